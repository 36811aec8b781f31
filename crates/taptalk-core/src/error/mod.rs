use error_location::ErrorLocation;
use thiserror::Error;

/// Audio capture errors with source location tracking.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// No audio input device found.
    #[error("No microphone found {location}")]
    NoMicrophoneFound {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Audio device operation failed.
    #[error("Audio device error: {reason} {location}")]
    DeviceError {
        /// Description of the device error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Encoding or writing the artifact file failed.
    #[error("Artifact write failed: {reason} {location}")]
    ArtifactWrite {
        /// Description of the write failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`CaptureError`].
pub type Result<T> = std::result::Result<T, CaptureError>;
