pub(crate) mod capture;
pub(crate) mod encoder;
pub(crate) mod frame_buffer;

pub use capture::{Artifact, CaptureEngine, CapturedAudio};
