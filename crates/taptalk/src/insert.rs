//! Text insertion collaborator.
//!
//! Emits transcribed text as synthetic keystrokes into the focused
//! window, after a best-effort attempt to confirm the session's original
//! window still holds focus. Returns `false` on any failure; nothing is
//! raised past this boundary.

use crate::window::{FocusTracker, WindowIdentity};

use std::{sync::Arc, time::Duration};

use enigo::{Enigo, Keyboard, Settings};
use tracing::{debug, info, instrument, warn};

/// Insertion seam: delivers transcribed text to the user's focus.
///
/// Behind a trait so session flows can be exercised without synthesizing
/// real OS input events.
pub trait Inserter: Send + Sync {
    /// Type `text` into the focused UI element, preferring the window
    /// captured at session start. Returns `false` on any failure.
    fn insert(&self, text: &str, window_hint: Option<&WindowIdentity>) -> bool;
}

/// Text inserter over synthetic keyboard input.
pub struct TextInserter {
    focus: Arc<dyn FocusTracker>,
    /// Delay before typing, giving the OS time to settle focus.
    settle: Duration,
}

impl TextInserter {
    /// Create an inserter using `focus` for window verification.
    pub fn new(focus: Arc<dyn FocusTracker>, settle: Duration) -> Self {
        Self { focus, settle }
    }
}

impl Inserter for TextInserter {
    /// Blocking (key-event timing sleeps); callers run it on a blocking
    /// task. An `Enigo` handle is created per call because `Enigo` is not
    /// `Send` and construction is cheap.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    fn insert(&self, text: &str, window_hint: Option<&WindowIdentity>) -> bool {
        if text.is_empty() {
            warn!("Empty text, nothing to insert");
            return false;
        }

        match window_hint {
            Some(hint) => {
                if self.focus.activate(hint) {
                    debug!(window = %hint.title, "Target window holds focus");
                } else {
                    warn!(
                        window = %hint.title,
                        "Could not confirm target window, typing into current focus"
                    );
                }
            }
            None => debug!("No window hint, typing into current focus"),
        }
        std::thread::sleep(self.settle);

        let mut enigo = match Enigo::new(&Settings::default()) {
            Ok(enigo) => enigo,
            Err(e) => {
                warn!(error = %e, "Failed to create keyboard handle");
                return false;
            }
        };

        if let Err(e) = enigo.text(text) {
            warn!(error = %e, "Failed to type text");
            return false;
        }

        info!(text_len = text.len(), "Text inserted");
        true
    }
}
