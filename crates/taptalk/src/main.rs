//! TapTalk: Push-to-talk dictation with global hotkey control.

mod app;
mod app_command;
mod capture;
mod config;
mod error;
mod feedback;
mod hotkey;
mod insert;
mod lifecycle;
mod session;
mod status;
#[cfg(test)]
mod tests;
mod transcribe;
mod tray_command;
mod tray_icon_state;
mod tray_manager;
mod window;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    error::{AppError, Result as AppResult},
    insert::TextInserter,
    status::{AppStatus, StatusRegister},
    tray_command::TrayCommand,
    tray_icon_state::TrayIconState,
    tray_manager::TrayManager,
};

use crate::{
    capture::CaptureBackend,
    config::Config,
    hotkey::{ComboDetector, KeyListener},
    insert::Inserter,
    lifecycle::LifecycleController,
    session::SessionPhase,
    transcribe::HttpTranscriber,
    tray_command::TrayNotifier,
    window::SystemFocusTracker,
};

use std::{sync::Arc, time::Duration};

use tao::{
    event::Event,
    event_loop::{ControlFlow, EventLoopBuilder},
};
use taptalk_core::CaptureEngine;
use tokio::sync::{Mutex, mpsc};
use tracing::error;

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("taptalk=debug")
        .init();

    let event_loop = EventLoopBuilder::<TrayCommand>::with_user_event().build();
    let tray_proxy = event_loop.create_proxy();

    // TrayManager lives on the main thread - TrayIcon is !Send on all platforms.
    let mut tray_manager = match TrayManager::new() {
        Ok(tm) => tm,
        Err(e) => {
            error!("Failed to create TrayManager: {:?}", e);
            std::process::exit(1);
        }
    };

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(cmd) => {
                match cmd {
                    TrayCommand::Refresh(status) => {
                        if let Err(e) = tray_manager.refresh(&status) {
                            error!(error = ?e, "Failed to update tray icon");
                        }
                    }
                    TrayCommand::Shutdown => {
                        *control_flow = ControlFlow::ExitWithCode(0);
                    }
                }
            }
            Event::NewEvents(tao::event::StartCause::Init) => {
                let config = match Config::load() {
                    Ok(c) => c,
                    Err(e) => {
                        error!("Failed to load config: {:?}", e);
                        std::process::exit(1);
                    }
                };

                let combo = match config.hotkey.to_combo() {
                    Ok(c) => c,
                    Err(e) => {
                        error!("Invalid hotkey config: {:?}", e);
                        std::process::exit(1);
                    }
                };

                let transcriber = match HttpTranscriber::new(&config.stt) {
                    Ok(t) => Arc::new(t),
                    Err(e) => {
                        error!("Failed to create transcriber: {:?}", e);
                        std::process::exit(1);
                    }
                };

                #[cfg(target_os = "macos")]
                unsafe {
                    use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};
                    CFRunLoopWakeUp(CFRunLoopGetMain());
                }

                let engine: Arc<Mutex<dyn CaptureBackend>> = Arc::new(Mutex::new(
                    CaptureEngine::new(config.audio.selected_device.clone()),
                ));
                let status = StatusRegister::default();
                let lifecycle = LifecycleController::new(Arc::clone(&engine), status.clone());

                let focus: Arc<dyn window::FocusTracker> = Arc::new(SystemFocusTracker);
                let inserter: Arc<dyn Inserter> = Arc::new(TextInserter::new(
                    Arc::clone(&focus),
                    Duration::from_millis(config.behaviour.focus_settle_ms),
                ));

                let (key_tx, key_rx) = mpsc::channel(256);
                let (command_tx, command_rx) = mpsc::channel(32);

                // The raw key listener thread is detached; gating happens
                // in the orchestrator via the listening flag.
                if let Err(e) = KeyListener::spawn(key_tx) {
                    error!("Failed to start key listener: {:?}", e);
                    std::process::exit(1);
                }

                let tray: Arc<dyn TrayNotifier> = Arc::new(tray_proxy.clone());
                let listening_item_id = tray_manager.listening_item_id().clone();
                let exit_item_id = tray_manager.exit_item_id().clone();

                let artifact_dir = config.artifact_dir();
                let append_trailing_space = config.behaviour.append_trailing_space;
                let audible_cue = config.behaviour.audible_cue;

                // Spawn tokio runtime on separate thread.
                // TrayManager stays on the main thread.
                std::thread::spawn(move || {
                    let rt = match tokio::runtime::Runtime::new() {
                        Ok(rt) => rt,
                        Err(e) => {
                            error!("Failed to create tokio runtime: {:?}", e);
                            std::process::exit(1);
                        }
                    };

                    rt.block_on(async {
                        let app = App {
                            engine,
                            lifecycle,
                            transcriber,
                            inserter,
                            focus,
                            status,
                            detector: ComboDetector::new(combo),
                            phase: SessionPhase::Idle,
                            pending_stream_release: false,
                            shutting_down: false,
                            artifact_dir,
                            append_trailing_space,
                            audible_cue,
                            tray,
                            key_rx,
                            command_tx,
                            command_rx,
                            listening_item_id,
                            exit_item_id,
                        };

                        if let Err(e) = app.run().await {
                            error!(error = ?e, "App error");
                        }
                    });
                });
            }
            _ => {}
        }
    });
}
