//! Capture engine seam.
//!
//! The orchestrator and lifecycle controller talk to the capture engine
//! through this trait rather than the concrete [`CaptureEngine`], so
//! session flows can be driven against a scripted capture source.

use taptalk_core::{CaptureEngine, CapturedAudio, CoreResult};

/// Stream lifecycle and per-session arm/disarm surface of a capture
/// source.
pub trait CaptureBackend: Send {
    /// Open and start the input stream. Idempotent.
    fn open_stream(&mut self) -> CoreResult<()>;

    /// Stop and release the input stream, discarding any in-flight
    /// session audio. Idempotent.
    fn close_stream(&mut self);

    /// Begin accumulating frames for a new session.
    fn arm(&mut self) -> CoreResult<()>;

    /// Stop accumulating and drain this session's audio. `None` when no
    /// frames were accumulated. Must not perform I/O.
    fn disarm(&mut self) -> Option<CapturedAudio>;
}

impl CaptureBackend for CaptureEngine {
    fn open_stream(&mut self) -> CoreResult<()> {
        CaptureEngine::open_stream(self)
    }

    fn close_stream(&mut self) {
        CaptureEngine::close_stream(self);
    }

    fn arm(&mut self) -> CoreResult<()> {
        CaptureEngine::arm(self)
    }

    fn disarm(&mut self) -> Option<CapturedAudio> {
        CaptureEngine::disarm(self)
    }
}
