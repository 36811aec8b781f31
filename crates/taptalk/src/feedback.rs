//! Audible session feedback.
//!
//! Plays a short confirmation tone when a session arms, so the user
//! knows the combo registered without looking at the tray. Playback is
//! fire-and-forget on a detached thread: audio output failures are
//! logged and never reach the session pipeline.

use std::time::Duration;

use rodio::{OutputStream, Sink, Source, source::SineWave};
use tracing::{debug, warn};

const CUE_FREQ_HZ: f32 = 1000.0;
const CUE_DURATION_MS: u64 = 150;
const CUE_AMPLITUDE: f32 = 0.2;

/// Play the session-start cue without blocking the caller.
pub fn play_session_start() {
    std::thread::Builder::new()
        .name("taptalk-cue".into())
        .spawn(|| {
            if let Err(reason) = play_tone(CUE_FREQ_HZ, Duration::from_millis(CUE_DURATION_MS)) {
                warn!(reason = %reason, "Failed to play session cue");
            }
        })
        .map(|_| ())
        .unwrap_or_else(|e| warn!(error = %e, "Failed to spawn cue thread"));
}

fn play_tone(freq_hz: f32, duration: Duration) -> Result<(), String> {
    // The stream handle must outlive playback, hence sleep_until_end on
    // this dedicated thread rather than detaching the sink.
    let (_stream, handle) =
        OutputStream::try_default().map_err(|e| format!("no audio output: {}", e))?;
    let sink = Sink::try_new(&handle).map_err(|e| format!("failed to create sink: {}", e))?;

    let tone = SineWave::new(freq_hz)
        .take_duration(duration)
        .amplify(CUE_AMPLITUDE);

    sink.append(tone);
    sink.sleep_until_end();

    debug!(freq_hz = freq_hz, "Session cue played");
    Ok(())
}
