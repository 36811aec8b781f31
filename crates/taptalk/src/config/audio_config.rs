use serde::{Deserialize, Serialize};

use std::path::PathBuf;

/// Audio device and artifact configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Selected audio device name (None = default device).
    #[serde(default)]
    pub selected_device: Option<String>,
    /// Directory for session WAV artifacts (None = OS temp directory).
    #[serde(default)]
    pub artifact_dir: Option<PathBuf>,
}
