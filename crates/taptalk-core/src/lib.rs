//! TapTalk Core Library
//!
//! Push-to-talk audio capture engine built on CPAL: a pre-warmed input
//! stream whose frame accumulation is armed and disarmed per session,
//! producing one 16-bit PCM WAV artifact per completed session.
//!
//! # Example
//!
//! ```no_run
//! use taptalk_core::{CaptureEngine, CoreResult};
//!
//! use std::{path::Path, thread::sleep, time::Duration};
//!
//! fn main() -> CoreResult<()> {
//!     let mut engine = CaptureEngine::new(None);
//!     engine.open_stream()?;
//!
//!     engine.arm()?;
//!     sleep(Duration::from_secs(3));
//!     if let Some(captured) = engine.disarm() {
//!         let artifact = captured.into_artifact(Path::new("session.wav"))?;
//!         println!("Captured {} samples", artifact.sample_count);
//!     }
//!     Ok(())
//! }
//! ```

mod audio;
mod error;

pub use {
    audio::Artifact, audio::CaptureEngine, audio::CapturedAudio, error::CaptureError,
    error::Result as CoreResult,
};

#[cfg(test)]
mod tests;
