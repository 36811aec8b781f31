//! Listener/stream lifecycle.
//!
//! Starts and stops the capture stream as a unit with the listening
//! flag, on behalf of the enable-listening, disable-listening, and
//! request-exit commands.

use crate::{AppResult, StatusRegister, capture::CaptureBackend};

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, instrument};

/// Controls the capture stream and listening flag together.
pub struct LifecycleController {
    engine: Arc<Mutex<dyn CaptureBackend>>,
    status: StatusRegister,
}

impl LifecycleController {
    /// Create a controller over the shared engine and status register.
    pub fn new(engine: Arc<Mutex<dyn CaptureBackend>>, status: StatusRegister) -> Self {
        Self { engine, status }
    }

    /// Enable listening: pre-warm the capture stream, then flip the flag.
    ///
    /// On failure the flag stays disabled and the error propagates; the
    /// caller surfaces a persistent disabled-style status until the next
    /// explicit retry.
    #[instrument(skip(self))]
    pub async fn enable(&self) -> AppResult<()> {
        {
            let mut engine = self.engine.lock().await;
            engine.open_stream()?;
        }

        self.status.set_listening(true);
        info!("Listening enabled, stream pre-warmed");

        Ok(())
    }

    /// Disable the listening flag. The stream is released separately so
    /// an in-flight session can finish first.
    pub fn disable(&self) {
        self.status.set_listening(false);
        info!("Listening disabled");
    }

    /// Release the capture stream. Forfeits an unfinished session by
    /// design; only called when no session is in flight or at shutdown.
    #[instrument(skip(self))]
    pub async fn release_stream(&self) {
        let mut engine = self.engine.lock().await;
        engine.close_stream();
    }

    /// Shutdown path: disable and tear the stream down unconditionally.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) {
        self.status.set_listening(false);
        self.status.update_status("Exiting...", Some(false));
        self.release_stream().await;
        info!("Lifecycle shutdown complete");
    }
}
