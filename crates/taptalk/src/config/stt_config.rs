use crate::config::{
    STT_API_KEY_ENV, default_stt_endpoint, default_stt_model, default_stt_timeout_secs,
};

use serde::{Deserialize, Serialize};

/// Transcription service configuration.
///
/// The API key is read from the `TAPTALK_STT_API_KEY` environment
/// variable and is deliberately absent from this struct so it can never
/// be serialized into the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SttConfig {
    /// OpenAI-compatible transcription endpoint URL.
    #[serde(default = "default_stt_endpoint")]
    pub endpoint: String,
    /// Model name sent with each request.
    #[serde(default = "default_stt_model")]
    pub model: String,
    /// Optional ISO-639-1 language hint (None = auto-detect).
    #[serde(default)]
    pub language: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_stt_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            endpoint: default_stt_endpoint(),
            model: default_stt_model(),
            language: None,
            timeout_secs: default_stt_timeout_secs(),
        }
    }
}

impl SttConfig {
    /// Read the service API key from the environment, if set.
    pub fn api_key() -> Option<String> {
        std::env::var(STT_API_KEY_ENV).ok().filter(|k| !k.is_empty())
    }
}
