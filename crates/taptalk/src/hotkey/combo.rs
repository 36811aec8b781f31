//! Edge-triggered key-chord detection.
//!
//! Consumes raw key-transition events, maintains the set of currently
//! depressed modifier keys, and emits combo-asserted / combo-deasserted
//! signals. Pure logic: the OS feed lives in [`crate::hotkey::listener`].

use crate::{AppError, AppResult};

use std::{collections::HashSet, panic::Location, time::Instant};

use error_location::ErrorLocation;
use tracing::debug;

/// Modifier keys the detector can track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModKey {
    /// Left Control.
    ControlLeft,
    /// Right Control.
    ControlRight,
    /// Left Alt.
    AltLeft,
    /// Right Alt.
    AltRight,
    /// Left Shift.
    ShiftLeft,
    /// Right Shift.
    ShiftRight,
    /// Left Meta (Cmd / Win).
    MetaLeft,
    /// Right Meta (Cmd / Win).
    MetaRight,
}

impl ModKey {
    /// Parse a config key name (as written in `[hotkey]`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ctrl_left" => Some(Self::ControlLeft),
            "ctrl_right" => Some(Self::ControlRight),
            "alt_left" => Some(Self::AltLeft),
            "alt_right" => Some(Self::AltRight),
            "shift_left" => Some(Self::ShiftLeft),
            "shift_right" => Some(Self::ShiftRight),
            "meta_left" => Some(Self::MetaLeft),
            "meta_right" => Some(Self::MetaRight),
            _ => None,
        }
    }
}

/// Direction of a key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTransition {
    /// Key went down.
    Pressed,
    /// Key came up.
    Released,
}

/// One raw key-transition event. Transient; not retained beyond combo
/// evaluation.
#[derive(Debug, Clone, Copy)]
pub struct KeyEvent {
    /// Which modifier key transitioned.
    pub key: ModKey,
    /// Press or release.
    pub transition: KeyTransition,
    /// When the event was observed.
    pub at: Instant,
}

/// Edge-triggered signals emitted by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboSignal {
    /// The full assert set is now held; a session may begin.
    Asserted,
    /// A watched key was released while asserted; the session ends.
    Deasserted,
}

/// Immutable hotkey configuration: the keys whose simultaneous presence
/// triggers assertion, and the superset whose release ends the session.
#[derive(Debug, Clone)]
pub struct HotkeyCombo {
    assert: HashSet<ModKey>,
    release_watch: HashSet<ModKey>,
}

impl HotkeyCombo {
    /// Build a combo, validating that both sets are non-empty and that
    /// the assert set is a subset of the release-watch set.
    #[track_caller]
    pub fn new(assert: HashSet<ModKey>, release_watch: HashSet<ModKey>) -> AppResult<Self> {
        if assert.is_empty() {
            return Err(AppError::ConfigError {
                reason: "Hotkey assert set is empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if !assert.is_subset(&release_watch) {
            return Err(AppError::ConfigError {
                reason: "Hotkey assert set must be a subset of the release-watch set".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self {
            assert,
            release_watch,
        })
    }

    /// Whether the detector tracks this key at all. The release-watch set
    /// covers the assert set, so it is the full tracked universe.
    pub fn tracks(&self, key: ModKey) -> bool {
        self.release_watch.contains(&key)
    }
}

impl Default for HotkeyCombo {
    /// Ctrl+Alt (left side) asserts; releasing any Ctrl or Alt, left or
    /// right, while asserted ends the session.
    fn default() -> Self {
        Self {
            assert: HashSet::from([ModKey::ControlLeft, ModKey::AltLeft]),
            release_watch: HashSet::from([
                ModKey::ControlLeft,
                ModKey::AltLeft,
                ModKey::ControlRight,
                ModKey::AltRight,
            ]),
        }
    }
}

/// Key-combo detector: pressed-key set plus an assertion latch.
///
/// The latch guarantees `Asserted` fires exactly once per co-press and
/// `Deasserted` at most once per assertion. Untracked keys are ignored
/// entirely so the pressed set never grows unboundedly and unrelated
/// typing cannot false-trigger.
pub struct ComboDetector {
    combo: HotkeyCombo,
    pressed: HashSet<ModKey>,
    latched: bool,
}

impl ComboDetector {
    /// Create a detector for the given combo with empty pressed state.
    pub fn new(combo: HotkeyCombo) -> Self {
        Self {
            combo,
            pressed: HashSet::new(),
            latched: false,
        }
    }

    /// Feed one raw key transition; returns a signal on an edge.
    pub fn on_key_event(&mut self, event: &KeyEvent) -> Option<ComboSignal> {
        if !self.combo.tracks(event.key) {
            return None;
        }

        match event.transition {
            KeyTransition::Pressed => {
                // Idempotent insert: a key repeat must not re-trigger.
                self.pressed.insert(event.key);

                if !self.latched && self.combo.assert.is_subset(&self.pressed) {
                    self.latched = true;
                    debug!(pressed = ?self.pressed, "Combo asserted");
                    return Some(ComboSignal::Asserted);
                }
                None
            }
            KeyTransition::Released => {
                self.pressed.remove(&event.key);

                if self.latched && self.combo.release_watch.contains(&event.key) {
                    self.latched = false;
                    // Full clear forces a fresh co-press for the next
                    // session; leftover partial state must not re-assert.
                    self.pressed.clear();
                    debug!(released = ?event.key, "Combo deasserted");
                    return Some(ComboSignal::Deasserted);
                }
                None
            }
        }
    }

    /// Forced reset on listener restart or exit: clears the pressed set
    /// and the latch.
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.latched = false;
    }

    /// Whether the combo is currently asserted.
    pub fn is_asserted(&self) -> bool {
        self.latched
    }
}
