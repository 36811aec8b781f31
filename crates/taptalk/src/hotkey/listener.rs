//! OS-level key event feed.
//!
//! Runs `rdev::listen` on a dedicated thread and forwards modifier-key
//! transitions into the orchestration context over a bounded channel.
//! `rdev::listen` cannot be stopped once started, so the thread is
//! detached for the process lifetime; enable/disable and shutdown are
//! enforced downstream by the orchestrator's gating flags.

use crate::{
    AppError, AppResult,
    hotkey::{KeyEvent, KeyTransition, ModKey},
};

use std::{panic::Location, time::Instant};

use error_location::ErrorLocation;
use rdev::{Event, EventType, Key as RdevKey};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Global keyboard listener feeding the combo detector.
pub struct KeyListener;

impl KeyListener {
    /// Start the listener thread, forwarding tracked key transitions to
    /// `event_tx`. Events are dropped (with a warning) if the channel is
    /// full; the OS hook callback must never block.
    #[track_caller]
    pub fn spawn(event_tx: mpsc::Sender<KeyEvent>) -> AppResult<std::thread::JoinHandle<()>> {
        std::thread::Builder::new()
            .name("taptalk-keys".to_string())
            .spawn(move || {
                info!("Keyboard listener started");

                let result = rdev::listen(move |event: Event| {
                    let Some(key_event) = map_event(&event) else {
                        return;
                    };

                    if let Err(mpsc::error::TrySendError::Full(_)) = event_tx.try_send(key_event) {
                        warn!("Key event channel full, dropping event");
                    }
                });

                if let Err(e) = result {
                    error!(error = ?e, "Keyboard listener failed");
                }
            })
            .map_err(|e| AppError::KeyListener {
                reason: format!("Failed to spawn listener thread: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

fn map_event(event: &Event) -> Option<KeyEvent> {
    let (key, transition) = match event.event_type {
        EventType::KeyPress(key) => (map_key(key)?, KeyTransition::Pressed),
        EventType::KeyRelease(key) => (map_key(key)?, KeyTransition::Released),
        _ => return None,
    };

    Some(KeyEvent {
        key,
        transition,
        at: Instant::now(),
    })
}

/// Map rdev modifier keys onto the detector's key space. Everything else
/// is filtered here so unrelated typing never reaches the detector.
fn map_key(key: RdevKey) -> Option<ModKey> {
    match key {
        RdevKey::ControlLeft => Some(ModKey::ControlLeft),
        RdevKey::ControlRight => Some(ModKey::ControlRight),
        RdevKey::Alt => Some(ModKey::AltLeft),
        RdevKey::AltGr => Some(ModKey::AltRight),
        RdevKey::ShiftLeft => Some(ModKey::ShiftLeft),
        RdevKey::ShiftRight => Some(ModKey::ShiftRight),
        RdevKey::MetaLeft => Some(ModKey::MetaLeft),
        RdevKey::MetaRight => Some(ModKey::MetaRight),
        _ => None,
    }
}
