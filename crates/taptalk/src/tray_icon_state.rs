use crate::AppStatus;

/// Tooltip length cap. Windows truncates tray tooltips around 128
/// characters; staying under it keeps the text predictable everywhere.
const MAX_TOOLTIP_LEN: usize = 127;

/// Visual states of the tray icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayIconState {
    /// Listening, ready for the hotkey.
    Idle,
    /// Capture session armed.
    Recording,
    /// Transcribing or inserting.
    Processing,
    /// Listening disabled.
    Disabled,
    /// Last session ended with an error.
    Error,
}

impl TrayIconState {
    /// Map a status snapshot to a visual state. Pure function of the
    /// snapshot; no side effects back into the core.
    pub fn from_status(status: &AppStatus) -> Self {
        let text = status.status_text.to_lowercase();

        if !status.listening_enabled {
            TrayIconState::Disabled
        } else if status.is_recording {
            TrayIconState::Recording
        } else if text.contains("processing") || text.contains("transcribing") {
            TrayIconState::Processing
        } else if text.contains("error") || text.contains("failed") {
            TrayIconState::Error
        } else {
            TrayIconState::Idle
        }
    }
}

/// Build the tray tooltip for a status snapshot, truncated to the
/// platform-safe length.
pub fn tooltip_for(status: &AppStatus) -> String {
    let prefix = "TapTalk: ";
    let budget = MAX_TOOLTIP_LEN - prefix.len();

    let mut text = status.status_text.clone();
    if text.chars().count() > budget {
        text = text.chars().take(budget - 3).collect::<String>() + "...";
    }

    format!("{}{}", prefix, text)
}
