//! Foreground window identity.
//!
//! The orchestrator snapshots the foreground window when a session is
//! armed, so the insertion step can verify focus before typing. Focus
//! restoration is best-effort by design: when the original window cannot
//! be confirmed, the text is typed into whatever currently has focus.

use tracing::debug;

/// Identity of a top-level window, captured once per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowIdentity {
    /// Window title at capture time.
    pub title: String,
}

/// Seam over the OS window system.
pub trait FocusTracker: Send + Sync {
    /// Identity of the currently focused window, if one can be determined.
    fn foreground(&self) -> Option<WindowIdentity>;

    /// Best-effort check that `target` holds focus. Returns `false` when
    /// focus moved elsewhere or cannot be determined; the caller falls
    /// back to the current focus.
    fn activate(&self, target: &WindowIdentity) -> bool;
}

/// OS-backed focus tracker.
pub struct SystemFocusTracker;

impl FocusTracker for SystemFocusTracker {
    fn foreground(&self) -> Option<WindowIdentity> {
        match active_win_pos_rs::get_active_window() {
            Ok(window) => Some(WindowIdentity {
                title: window.title,
            }),
            Err(()) => {
                debug!("No foreground window could be determined");
                None
            }
        }
    }

    fn activate(&self, target: &WindowIdentity) -> bool {
        // There is no portable forced-raise; the strongest portable
        // guarantee is confirming the target still holds focus.
        match self.foreground() {
            Some(current) if current.title == target.title => true,
            _ => false,
        }
    }
}
