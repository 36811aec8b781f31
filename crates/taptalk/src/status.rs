//! Process-wide observable status.
//!
//! Written only by the session orchestrator, read by the presentation
//! layer. Every write is atomic with respect to concurrent readers: all
//! access goes through one short-held lock, and readers get a snapshot.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, error};

/// Snapshot of the shared application status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppStatus {
    /// Whether hotkey listening is enabled.
    pub listening_enabled: bool,
    /// Whether a capture session is currently armed.
    pub is_recording: bool,
    /// Last user-visible status text.
    pub status_text: String,
}

impl Default for AppStatus {
    fn default() -> Self {
        Self {
            listening_enabled: true,
            is_recording: false,
            status_text: "Idle - Listening".to_string(),
        }
    }
}

/// Handle to the single shared status instance.
///
/// Explicitly owned and passed to every component that reads or writes
/// it; never a global singleton.
#[derive(Clone)]
pub struct StatusRegister {
    inner: Arc<Mutex<AppStatus>>,
}

impl StatusRegister {
    /// Create a register with default status (listening, idle).
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(AppStatus::default())),
        }
    }

    /// Consistent snapshot of all fields.
    pub fn snapshot(&self) -> AppStatus {
        self.lock().clone()
    }

    /// Whether hotkey listening is currently enabled.
    pub fn listening_enabled(&self) -> bool {
        self.lock().listening_enabled
    }

    /// Set the status text, optionally updating the recording flag in the
    /// same critical section.
    pub fn update_status(&self, text: impl Into<String>, is_recording: Option<bool>) {
        let mut status = self.lock();
        status.status_text = text.into();
        if let Some(recording) = is_recording {
            status.is_recording = recording;
        }
        debug!(status = %status.status_text, is_recording = status.is_recording, "Status updated");
    }

    /// Toggle the recording flag with its canonical status text.
    pub fn set_recording(&self, recording: bool) {
        let text = if recording {
            "Recording..."
        } else {
            "Processing..."
        };
        self.update_status(text, Some(recording));
    }

    /// Enable or disable listening, updating the idle text to match.
    pub fn set_listening(&self, enabled: bool) {
        let mut status = self.lock();
        status.listening_enabled = enabled;
        status.status_text = if enabled {
            "Idle - Listening".to_string()
        } else {
            "Idle - Not Listening".to_string()
        };
        debug!(listening_enabled = enabled, "Listening toggled");
    }

    fn lock(&self) -> MutexGuard<'_, AppStatus> {
        // The lock is only held for field reads/writes; a poisoned lock
        // still guards valid data.
        self.inner.lock().unwrap_or_else(|e| {
            error!("Status register lock poisoned, recovering");
            e.into_inner()
        })
    }
}

impl Default for StatusRegister {
    fn default() -> Self {
        Self::new()
    }
}
