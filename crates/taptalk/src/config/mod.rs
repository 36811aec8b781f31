mod audio_config;
mod behaviour_config;
#[allow(clippy::module_inception)]
mod config;
mod hotkey_config;
mod stt_config;

pub(crate) use {
    audio_config::AudioConfig, behaviour_config::BehaviourConfig, config::Config,
    hotkey_config::HotkeyConfig, stt_config::SttConfig,
};

pub(crate) const DEFAULT_APPEND_TRAILING_SPACE: bool = true;
pub(crate) const DEFAULT_AUDIBLE_CUE: bool = true;
pub(crate) const DEFAULT_FOCUS_SETTLE_MS: u64 = 300;
pub(crate) const DEFAULT_STT_TIMEOUT_SECS: u64 = 60;

/// Environment variable holding the transcription service API key.
/// Keys are never stored in the config file.
pub(crate) const STT_API_KEY_ENV: &str = "TAPTALK_STT_API_KEY";

pub(crate) fn default_append_trailing_space() -> bool {
    DEFAULT_APPEND_TRAILING_SPACE
}

pub(crate) fn default_audible_cue() -> bool {
    DEFAULT_AUDIBLE_CUE
}

pub(crate) fn default_focus_settle_ms() -> u64 {
    DEFAULT_FOCUS_SETTLE_MS
}

pub(crate) fn default_stt_timeout_secs() -> u64 {
    DEFAULT_STT_TIMEOUT_SECS
}

pub(crate) fn default_stt_endpoint() -> String {
    "https://api.openai.com/v1/audio/transcriptions".to_string()
}

pub(crate) fn default_stt_model() -> String {
    "whisper-1".to_string()
}

pub(crate) fn default_assert_keys() -> Vec<String> {
    vec!["ctrl_left".to_string(), "alt_left".to_string()]
}

pub(crate) fn default_release_watch_keys() -> Vec<String> {
    vec![
        "ctrl_left".to_string(),
        "alt_left".to_string(),
        "ctrl_right".to_string(),
        "alt_right".to_string(),
    ]
}
