use crate::{CaptureError, CoreResult};

use std::{panic::Location, path::Path};

use error_location::ErrorLocation;
use tracing::{debug, instrument, warn};

/// Positive maximum of signed 16-bit PCM, used for symmetric scaling.
pub(crate) const PCM16_SCALE: f32 = i16::MAX as f32;

/// Clip a normalized sample to [-1.0, 1.0] and quantize to 16-bit
/// signed PCM. Out-of-range samples are clamped, never wrapped.
#[inline]
pub(crate) fn quantize(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * PCM16_SCALE) as i16
}

/// Average interleaved multi-channel samples down to mono.
///
/// A trailing partial frame (callback block not divisible by the channel
/// count) is averaged over the samples it actually contains.
pub(crate) fn downmix(samples: &[f32], channels: u16) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }

    let channels = channels as usize;
    samples
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}

/// Write mono samples as a 16-bit signed PCM WAV file.
///
/// Samples are clipped and quantized per [`quantize`]. The write happens
/// entirely off the capture hot path; the caller has already disarmed.
/// On failure any partially written file is removed, so a failed session
/// never leaves an artifact behind.
#[track_caller]
#[instrument(skip(samples))]
pub(crate) fn write_wav(path: &Path, sample_rate: u32, samples: &[f32]) -> CoreResult<()> {
    let result = write_samples(path, sample_rate, samples);

    if result.is_err() {
        // Half-written files are not valid artifacts; sweep best-effort.
        if let Err(e) = std::fs::remove_file(path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = ?path, error = %e, "Failed to remove partial artifact");
            }
        }
    }

    result
}

#[track_caller]
fn write_samples(path: &Path, sample_rate: u32, samples: &[f32]) -> CoreResult<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer =
        hound::WavWriter::create(path, spec).map_err(|e| CaptureError::ArtifactWrite {
            reason: format!("Failed to create artifact file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    for &sample in samples {
        writer
            .write_sample(quantize(sample))
            .map_err(|e| CaptureError::ArtifactWrite {
                reason: format!("Failed to write sample: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;
    }

    writer.finalize().map_err(|e| CaptureError::ArtifactWrite {
        reason: format!("Failed to finalize artifact: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    debug!(path = ?path, sample_count = samples.len(), "Artifact written");

    Ok(())
}
