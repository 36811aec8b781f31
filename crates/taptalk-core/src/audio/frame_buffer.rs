use std::sync::{
    Mutex,
    atomic::{AtomicBool, Ordering},
};

use tracing::{error, warn};

/// Maximum samples to accumulate per session (5 minutes at 48kHz mono).
/// Prevents unbounded memory growth if a hotkey is held indefinitely.
///
/// **Memory footprint at max capacity:**
/// - 48,000 Hz * 60s * 5 min * 4 bytes/f32 = ~58MB
/// - This is a hard upper bound; typical sessions are a few seconds
pub(crate) const MAX_BUFFER_SAMPLES: usize = 48_000 * 60 * 5;

struct Frames {
    blocks: Vec<Vec<f32>>,
    sample_count: usize,
    overflowed: bool,
}

/// Append-only accumulator for audio frame blocks during an armed session.
///
/// Shared between the audio callback context (writer) and the capture
/// engine (owner). The callback's critical section is limited to an
/// armed-check and an append; frames are only appended while armed,
/// and arrival order is preserved.
pub(crate) struct FrameBuffer {
    /// Gates the audio callback. Checked before the lock is taken so a
    /// disarm is observed by the next callback without contention.
    armed: AtomicBool,
    frames: Mutex<Frames>,
}

impl FrameBuffer {
    pub(crate) fn new() -> Self {
        Self {
            armed: AtomicBool::new(false),
            frames: Mutex::new(Frames {
                blocks: Vec::new(),
                sample_count: 0,
                overflowed: false,
            }),
        }
    }

    /// Reset the buffer and begin accepting frame blocks.
    pub(crate) fn arm(&self) {
        {
            let mut frames = self.lock_frames();
            frames.blocks.clear();
            frames.sample_count = 0;
            frames.overflowed = false;
        }
        // Armed flag is set only after the buffer is empty, so the first
        // block the callback appends belongs to this session.
        self.armed.store(true, Ordering::Release);
    }

    /// Stop accepting frames and drain all accumulated blocks.
    ///
    /// The armed flag is cleared before the lock is taken, so any callback
    /// that fires after this point appends nothing.
    pub(crate) fn disarm(&self) -> Vec<Vec<f32>> {
        self.armed.store(false, Ordering::Release);

        let mut frames = self.lock_frames();
        frames.sample_count = 0;
        std::mem::take(&mut frames.blocks)
    }

    /// Discard any accumulated frames without producing anything.
    /// Used on stream teardown, which forfeits an unfinished session.
    pub(crate) fn discard(&self) {
        self.armed.store(false, Ordering::Release);

        let mut frames = self.lock_frames();
        frames.blocks.clear();
        frames.sample_count = 0;
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }

    /// Append one frame block from the audio callback.
    ///
    /// Hot path: an atomic load, one short lock, one Vec push. No
    /// encoding, no I/O. Blocks past [`MAX_BUFFER_SAMPLES`] are dropped
    /// (newest-out) so arrival order of kept samples is never disturbed.
    pub(crate) fn push_block(&self, data: &[f32]) {
        if !self.armed.load(Ordering::Acquire) {
            return;
        }

        let mut frames = self.lock_frames();
        if frames.sample_count + data.len() > MAX_BUFFER_SAMPLES {
            if !frames.overflowed {
                frames.overflowed = true;
                warn!(
                    max_samples = MAX_BUFFER_SAMPLES,
                    "Frame buffer full, dropping further audio for this session"
                );
            }
            return;
        }

        frames.sample_count += data.len();
        frames.blocks.push(data.to_vec());
    }

    /// Recover from lock poison rather than silently dropping audio.
    /// A poisoned mutex means a previous holder panicked, but the
    /// frame data is still valid and usable.
    fn lock_frames(&self) -> std::sync::MutexGuard<'_, Frames> {
        self.frames.lock().unwrap_or_else(|e| {
            error!("Frame buffer lock poisoned, recovering");
            e.into_inner()
        })
    }
}
