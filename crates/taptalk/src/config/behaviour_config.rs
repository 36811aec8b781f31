use crate::config::{default_append_trailing_space, default_audible_cue, default_focus_settle_ms};

use serde::{Deserialize, Serialize};

/// Application behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviourConfig {
    /// Milliseconds to wait after focus verification before typing.
    #[serde(default = "default_focus_settle_ms")]
    pub focus_settle_ms: u64,
    /// Whether to append a trailing space after inserted text.
    #[serde(default = "default_append_trailing_space")]
    pub append_trailing_space: bool,
    /// Whether to play a short tone when a recording session starts.
    #[serde(default = "default_audible_cue")]
    pub audible_cue: bool,
}

impl Default for BehaviourConfig {
    fn default() -> Self {
        Self {
            focus_settle_ms: default_focus_settle_ms(),
            append_trailing_space: default_append_trailing_space(),
            audible_cue: default_audible_cue(),
        }
    }
}
