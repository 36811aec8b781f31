use taptalk_core::CaptureError;

use std::{panic::Location, result::Result as StdResult};

use error_location::ErrorLocation;
use thiserror::Error;

/// Application-level errors for the taptalk binary.
///
/// All variants include `ErrorLocation` for call-site tracking.
#[derive(Error, Debug)]
pub enum AppError {
    /// Capture engine error from taptalk-core.
    #[error("Capture error: {source} {location}")]
    Capture {
        /// The underlying capture error.
        #[source]
        source: CaptureError,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Failed to start or run the global key listener.
    #[error("Key listener failed: {reason} {location}")]
    KeyListener {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Configuration loading, validation, or saving error.
    #[error("Configuration error: {reason} {location}")]
    ConfigError {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// System tray icon or menu operation failed.
    #[error("Tray error: {reason} {location}")]
    Tray {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// IO error from filesystem operations.
    #[error("IO error: {source} {location}")]
    IoError {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Location where this error was created.
        location: ErrorLocation,
    },
}

// Manual From<CaptureError> with location tracking.
// Cannot use #[from] because it does not support extra fields.
impl From<CaptureError> for AppError {
    #[track_caller]
    fn from(source: CaptureError) -> Self {
        AppError::Capture {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for AppError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        AppError::IoError {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convenience type alias for Results using `AppError`.
pub type Result<T> = StdResult<T, AppError>;
