use crate::{transcribe::TranscriptError, window::WindowIdentity};

use std::time::Instant;

use uuid::Uuid;

/// Maximum transcribed characters echoed into the "Typing: ..." status.
const TYPING_PREVIEW_LEN: usize = 30;

/// Session state for the orchestrator.
///
/// Exactly one logical session exists at a time; `Idle` is both the
/// initial and terminal state of every arm/disarm cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    /// No session in flight.
    Idle,
    /// Capture armed, frames accumulating.
    Armed {
        /// When the session was armed.
        started_at: Instant,
        /// Unique session ID for log correlation and the artifact name.
        session_id: Uuid,
        /// Foreground window snapshotted at assertion time.
        window: Option<WindowIdentity>,
    },
    /// Artifact handed to the transcription collaborator.
    Transcribing {
        /// Session ID of the transcription in flight.
        session_id: Uuid,
    },
    /// Transcribed text handed to the insertion collaborator.
    Inserting {
        /// Session ID of the insertion in flight.
        session_id: Uuid,
    },
}

impl SessionPhase {
    /// Whether no session is in flight.
    pub fn is_idle(&self) -> bool {
        matches!(self, SessionPhase::Idle)
    }

    /// Whether a session is currently armed.
    pub fn is_armed(&self) -> bool {
        matches!(self, SessionPhase::Armed { .. })
    }
}

/// Status text for a failed transcription. The exact error is logged;
/// the register carries the user-facing phrase.
pub(crate) fn transcript_failure_text(error: &TranscriptError) -> &'static str {
    match error {
        TranscriptError::NoSpeech { .. } => "Error: No speech detected.",
        TranscriptError::ServiceUnreachable { .. } => {
            "Error: Transcription service unreachable. Check internet connection."
        }
        TranscriptError::Unexpected { .. } => "Error: Transcription failed.",
    }
}

/// Text actually handed to the insertion collaborator. A trailing space
/// keeps consecutive dictations from running together.
pub(crate) fn text_to_insert(text: &str, append_trailing_space: bool) -> String {
    if append_trailing_space {
        format!("{} ", text)
    } else {
        text.to_string()
    }
}

/// Truncated echo of the transcription for the "Typing: ..." status.
pub(crate) fn typing_preview(text: &str) -> String {
    if text.chars().count() > TYPING_PREVIEW_LEN {
        let head: String = text.chars().take(TYPING_PREVIEW_LEN).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
