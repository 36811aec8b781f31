//! Cloud transcription collaborator.
//!
//! Consumes an artifact path, uploads the WAV to the configured
//! speech-to-text endpoint, and returns recognized text or a typed
//! failure. Failures never cross this boundary as anything but
//! [`TranscriptError`]; the orchestrator renders them as status text.

use crate::{AppError, AppResult, config::SttConfig};

use std::{panic::Location, path::Path, time::Duration};

use async_trait::async_trait;
use error_location::ErrorLocation;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Typed failures of the transcription collaborator.
#[derive(Error, Debug)]
pub enum TranscriptError {
    /// The service recognized no speech in the audio.
    #[error("No speech detected {location}")]
    NoSpeech {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The service could not be reached (connect or timeout).
    #[error("Transcription service unreachable: {reason} {location}")]
    ServiceUnreachable {
        /// Description of the network failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Any other failure (bad response, rejected request, local IO).
    #[error("Transcription failed: {reason} {location}")]
    Unexpected {
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result alias for the transcription collaborator.
pub type TranscriptResult = std::result::Result<String, TranscriptError>;

/// Transcription collaborator seam.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe the artifact at `path`. The caller owns the file and
    /// deletes it afterward regardless of outcome.
    async fn transcribe(&self, path: &Path) -> TranscriptResult;
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// HTTP transcriber posting multipart WAV uploads to an
/// OpenAI-compatible transcription endpoint.
pub struct HttpTranscriber {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    language: Option<String>,
    api_key: Option<String>,
}

impl HttpTranscriber {
    /// Build a transcriber from the `[stt]` config section. The API key
    /// is read from the environment, never from the config file.
    #[track_caller]
    #[instrument(skip(config))]
    pub fn new(config: &SttConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to build HTTP client: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(endpoint = %config.endpoint, model = %config.model, "Transcriber configured");

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            language: config.language.clone(),
            api_key: SttConfig::api_key(),
        })
    }
}

#[async_trait]
impl Transcriber for HttpTranscriber {
    #[instrument(skip(self))]
    async fn transcribe(&self, path: &Path) -> TranscriptResult {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| TranscriptError::Unexpected {
                reason: format!("Failed to read artifact: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!(byte_count = bytes.len(), "Uploading artifact");

        let part = Part::bytes(bytes)
            .file_name("session.wav")
            .mime_str("audio/wav")
            .map_err(|e| TranscriptError::Unexpected {
                reason: format!("Failed to build upload part: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let mut form = Form::new()
            .part("file", part)
            .text("model", self.model.clone());
        if let Some(language) = &self.language {
            form = form.text("language", language.clone());
        }

        let mut request = self.client.post(&self.endpoint).multipart(form);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                TranscriptError::ServiceUnreachable {
                    reason: e.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            } else {
                TranscriptError::Unexpected {
                    reason: e.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranscriptError::Unexpected {
                reason: format!("Service returned {}: {}", status, body),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let parsed: TranscriptionResponse =
            response
                .json()
                .await
                .map_err(|e| TranscriptError::Unexpected {
                    reason: format!("Failed to parse response: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;

        let text = parsed.text.trim().to_string();
        if text.is_empty() {
            return Err(TranscriptError::NoSpeech {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        info!(text_len = text.len(), "Transcription complete");

        Ok(text)
    }
}
