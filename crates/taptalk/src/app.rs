//! Session orchestrator.
//!
//! Ties the combo detector, capture engine, and collaborators together:
//! on combo-assert it arms capture and snapshots the foreground window;
//! on combo-deassert it disarms, transcribes, inserts, and republishes
//! status. Runs on the async runtime thread; tray updates go back to the
//! main thread via the event-loop proxy because `TrayIcon` is `!Send`.

use crate::{
    AppCommand, AppResult, StatusRegister, TrayCommand,
    capture::CaptureBackend,
    feedback,
    hotkey::{ComboDetector, ComboSignal, KeyEvent},
    insert::Inserter,
    lifecycle::LifecycleController,
    session::{self, SessionPhase},
    transcribe::Transcriber,
    tray_command::TrayNotifier,
    window::FocusTracker,
};

use std::{path::PathBuf, sync::Arc, time::Instant};

use tokio::sync::{Mutex, mpsc};
use tracing::{debug, error, info, instrument, warn};
use tray_icon::menu::{MenuEvent, MenuId};
use uuid::Uuid;

/// Main orchestration state.
pub struct App {
    pub(crate) engine: Arc<Mutex<dyn CaptureBackend>>,
    pub(crate) lifecycle: LifecycleController,
    pub(crate) transcriber: Arc<dyn Transcriber>,
    pub(crate) inserter: Arc<dyn Inserter>,
    pub(crate) focus: Arc<dyn FocusTracker>,
    pub(crate) status: StatusRegister,
    pub(crate) detector: ComboDetector,
    pub(crate) phase: SessionPhase,
    /// Set when disable-listening arrives mid-session; the stream is
    /// released once the session completes.
    pub(crate) pending_stream_release: bool,
    pub(crate) shutting_down: bool,
    pub(crate) artifact_dir: PathBuf,
    pub(crate) append_trailing_space: bool,
    pub(crate) audible_cue: bool,
    pub(crate) tray: Arc<dyn TrayNotifier>,
    pub(crate) key_rx: mpsc::Receiver<KeyEvent>,
    pub(crate) command_tx: mpsc::Sender<AppCommand>,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) listening_item_id: MenuId,
    pub(crate) exit_item_id: MenuId,
}

impl App {
    /// Run the main orchestration event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("TapTalk starting");

        // Pre-warm the capture stream so arming never pays open latency.
        // Failure is non-fatal: the status shows the device error and the
        // next arm attempt retries the open.
        if let Err(e) = self.lifecycle.enable().await {
            error!(error = ?e, "Failed to pre-warm capture stream");
            self.status
                .update_status("Error: microphone unavailable.", Some(false));
        }
        self.publish();

        // Tray event forwarding via single persistent blocking task.
        //
        // MenuEvent::receiver() returns a crossbeam_channel::Receiver which
        // HAS blocking recv() -- zero polling, instant response, one thread.
        //
        // Shutdown: when tray_event_rx is dropped (main loop breaks),
        // tray_event_tx.blocking_send() fails, breaking the blocking loop.
        let (tray_event_tx, mut tray_event_rx) = mpsc::channel(32);
        let tray_handle = tokio::task::spawn_blocking(move || {
            let receiver = MenuEvent::receiver();
            while let Ok(event) = receiver.recv() {
                if tray_event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        loop {
            tokio::select! {
                Some(event) = tray_event_rx.recv() => {
                    self.handle_menu_event(event);
                }

                Some(key_event) = self.key_rx.recv() => {
                    self.handle_key_event(key_event).await;
                }

                Some(cmd) = self.command_rx.recv() => {
                    if self.handle_command(cmd).await {
                        break;
                    }
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        drop(tray_event_rx);

        match tokio::time::timeout(std::time::Duration::from_secs(1), tray_handle).await {
            Ok(Ok(())) => info!("Tray event forwarder stopped cleanly"),
            Ok(Err(e)) => error!(error = ?e, "Tray event forwarder task panicked"),
            Err(_) => info!(
                "Tray event forwarder did not stop within timeout, \
                     will be cleaned up on exit"
            ),
        }

        info!("TapTalk shut down successfully");

        Ok(())
    }

    /// Feed one raw key transition through the combo detector.
    ///
    /// While listening is disabled or shutdown is in progress the event
    /// is consumed without touching detector state (freeze, not reset),
    /// so re-enabling cannot replay a stale combo. A session already in
    /// flight still receives events while disabled: it must observe its
    /// own combo release to run to completion.
    pub(crate) async fn handle_key_event(&mut self, event: KeyEvent) {
        if self.shutting_down {
            return;
        }
        if !self.status.listening_enabled() && self.phase.is_idle() {
            return;
        }

        match self.detector.on_key_event(&event) {
            Some(ComboSignal::Asserted) => self.begin_session().await,
            Some(ComboSignal::Deasserted) => self.complete_session().await,
            None => {}
        }
    }

    /// Combo asserted: arm capture and snapshot ambient context.
    #[instrument(skip(self))]
    pub(crate) async fn begin_session(&mut self) {
        // Defensive second gate behind the detector latch: no
        // overlapping sessions.
        if !self.phase.is_idle() {
            debug!(phase = ?self.phase, "Assert ignored, session already in flight");
            return;
        }

        let session_id = Uuid::new_v4();

        let arm_result = {
            let mut engine = self.engine.lock().await;
            engine.arm()
        };

        if let Err(e) = arm_result {
            error!(session_id = %session_id, error = ?e, "Failed to arm capture");
            self.status
                .update_status("Error: microphone unavailable.", Some(false));
            self.publish();
            return;
        }

        // Ambient context is snapshotted after arming so the window the
        // user is dictating into is the one focus returns to.
        let window = self.focus.foreground();

        self.phase = SessionPhase::Armed {
            started_at: Instant::now(),
            session_id,
            window,
        };
        self.status.set_recording(true);
        self.publish();

        if self.audible_cue {
            feedback::play_session_start();
        }

        info!(session_id = %session_id, "Session armed");
    }

    /// Combo deasserted: disarm, encode, transcribe, insert, republish.
    ///
    /// The engine lock is held only for the in-memory frame drain; WAV
    /// encoding, transcription, and insertion all run outside it, so a
    /// slow disk or network never blocks the next arm.
    #[instrument(skip(self))]
    pub(crate) async fn complete_session(&mut self) {
        let (started_at, session_id, window) =
            match std::mem::replace(&mut self.phase, SessionPhase::Idle) {
                SessionPhase::Armed {
                    started_at,
                    session_id,
                    window,
                } => (started_at, session_id, window),
                // Deassert with no session in flight: key-state desync
                // after a listener restart. Ignore.
                other => {
                    self.phase = other;
                    debug!("Deassert ignored, no armed session");
                    return;
                }
            };

        self.status.set_recording(false);
        self.publish();

        let artifact_path = self
            .artifact_dir
            .join(format!("taptalk-{}.wav", session_id));

        let captured = {
            let mut engine = self.engine.lock().await;
            engine.disarm()
        };

        let captured = match captured {
            Some(captured) => captured,
            None => {
                info!(session_id = %session_id, "Session ended with no audio");
                self.finish_session(session_id, "No audio captured.").await;
                return;
            }
        };

        // WAV encoding is file I/O; run it off the async worker.
        let encode_path = artifact_path.clone();
        let encode_result =
            tokio::task::spawn_blocking(move || captured.into_artifact(&encode_path)).await;

        let artifact = match encode_result {
            Ok(Ok(artifact)) => artifact,
            Ok(Err(e)) => {
                error!(session_id = %session_id, error = ?e, "Failed to produce artifact");
                self.finish_session(session_id, "Audio recording failed.")
                    .await;
                return;
            }
            Err(e) => {
                error!(session_id = %session_id, error = ?e, "Artifact encoding task panicked");
                self.finish_session(session_id, "Audio recording failed.")
                    .await;
                return;
            }
        };

        info!(
            session_id = %session_id,
            duration_ms = started_at.elapsed().as_millis(),
            sample_count = artifact.sample_count,
            "Session disarmed, artifact produced"
        );

        self.phase = SessionPhase::Transcribing { session_id };
        self.status.update_status("Transcribing...", Some(false));
        self.publish();

        let transcript = self.transcriber.transcribe(&artifact.path).await;

        // At most one artifact per session, always cleaned up -- even
        // when transcription failed.
        artifact.cleanup();

        let text = match transcript {
            Ok(text) => text,
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "Transcription failed");
                let status = session::transcript_failure_text(&e);
                self.finish_session(session_id, status).await;
                return;
            }
        };

        self.phase = SessionPhase::Inserting { session_id };
        self.status.update_status(
            format!("Typing: '{}'", session::typing_preview(&text)),
            Some(false),
        );
        self.publish();

        let to_type = session::text_to_insert(&text, self.append_trailing_space);
        let inserter = Arc::clone(&self.inserter);
        let window_hint = window.clone();

        // Synthetic typing is synchronous and sleeps for key timing;
        // run it off the async worker.
        let inserted = tokio::task::spawn_blocking(move || {
            inserter.insert(&to_type, window_hint.as_ref())
        })
        .await
        .unwrap_or_else(|e| {
            error!(session_id = %session_id, error = ?e, "Insertion task panicked");
            false
        });

        let status = if inserted {
            "Text inserted successfully."
        } else {
            "Error inserting text."
        };

        self.finish_session(session_id, status).await;
    }

    /// Common session epilogue: back to `Idle`, final status published,
    /// session context dropped, deferred stream release honored.
    async fn finish_session(&mut self, session_id: Uuid, status: &str) {
        self.phase = SessionPhase::Idle;
        self.status.update_status(status, Some(false));
        self.publish();

        info!(session_id = %session_id, status = status, "Session finished");

        if self.pending_stream_release {
            self.pending_stream_release = false;
            self.lifecycle.release_stream().await;
            self.publish();
        }
    }

    /// Handle a lifecycle command. Returns `true` on shutdown.
    #[instrument(skip(self))]
    pub(crate) async fn handle_command(&mut self, cmd: AppCommand) -> bool {
        match cmd {
            AppCommand::EnableListening => {
                // Forced reset: a fresh co-press is required after restart.
                self.detector.reset();

                match self.lifecycle.enable().await {
                    Ok(()) => {}
                    Err(e) => {
                        error!(error = ?e, "Failed to re-enable listening");
                        self.status
                            .update_status("Error: microphone unavailable.", Some(false));
                    }
                }
                self.publish();
                false
            }
            AppCommand::DisableListening => {
                self.lifecycle.disable();

                // A session already in flight runs to completion; only
                // the next combo press is ignored while disabled.
                if self.phase.is_idle() {
                    self.lifecycle.release_stream().await;
                } else {
                    self.pending_stream_release = true;
                }
                self.publish();
                false
            }
            AppCommand::Shutdown => {
                info!("Shutdown requested");
                self.shutting_down = true;
                self.detector.reset();
                // Stream teardown forfeits an unfinished session by design.
                self.lifecycle.shutdown().await;
                self.publish();
                self.tray.notify(TrayCommand::Shutdown);
                true
            }
        }
    }

    /// Handle tray menu events by translating them into lifecycle commands.
    ///
    /// The command channel is drained by the same event loop that calls
    /// this, so queueing must never wait: a full channel drops the click
    /// rather than deadlocking the loop against itself.
    pub(crate) fn handle_menu_event(&mut self, event: MenuEvent) {
        let event_id = &event.id;

        let cmd = if *event_id == self.listening_item_id {
            if self.status.listening_enabled() {
                AppCommand::DisableListening
            } else {
                AppCommand::EnableListening
            }
        } else if *event_id == self.exit_item_id {
            AppCommand::Shutdown
        } else {
            return;
        };

        if let Err(e) = self.command_tx.try_send(cmd) {
            warn!(error = %e, "Command queue full, dropping menu action");
        }
    }

    /// Push the current status snapshot to the presentation layer.
    fn publish(&self) {
        let snapshot = self.status.snapshot();
        self.tray.notify(TrayCommand::Refresh(snapshot));
    }
}
