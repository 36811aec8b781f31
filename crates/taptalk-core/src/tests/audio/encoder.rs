use crate::audio::encoder::{PCM16_SCALE, downmix, quantize, write_wav};

// Test constants
const SAMPLE_RATE: u32 = 44_100;
const QUANTIZATION_STEP: f32 = 1.0 / PCM16_SCALE;

/// WHAT: In-range samples quantize with symmetric scaling
/// WHY: Artifact samples must use the signed 16-bit positive maximum
#[test]
fn given_in_range_samples_when_quantizing_then_symmetric_scaling_applied() {
    assert_eq!(quantize(0.0), 0);
    assert_eq!(quantize(1.0), i16::MAX);
    assert_eq!(quantize(-1.0), -i16::MAX);
    assert_eq!(quantize(0.5), (0.5 * PCM16_SCALE) as i16);
}

/// WHAT: Out-of-range samples are clamped, never wrapped
/// WHY: A loud transient must clip, not alias into garbage
#[test]
fn given_out_of_range_samples_when_quantizing_then_clamped_to_extremes() {
    assert_eq!(quantize(1.5), i16::MAX);
    assert_eq!(quantize(-2.0), -i16::MAX);
    assert_eq!(quantize(f32::INFINITY), i16::MAX);
    assert_eq!(quantize(f32::NEG_INFINITY), -i16::MAX);
}

/// WHAT: Stereo interleaved samples average down to mono
/// WHY: The artifact is single-channel regardless of device layout
#[test]
fn given_stereo_samples_when_downmixing_then_channels_averaged() {
    // Given: Interleaved L/R frames
    let interleaved = [0.0, 1.0, 0.5, 0.5, -1.0, 1.0];

    // When: Downmixing two channels
    let mono = downmix(&interleaved, 2);

    // Then: Each frame is the mean of its channels
    assert_eq!(mono, vec![0.5, 0.5, 0.0]);
}

/// WHAT: Mono input passes through downmix unchanged
/// WHY: Single-channel devices must not pay an averaging penalty in content
#[test]
fn given_mono_samples_when_downmixing_then_unchanged() {
    let samples = [0.1, -0.2, 0.3];
    assert_eq!(downmix(&samples, 1), samples.to_vec());
}

/// WHAT: Encoding then decoding reproduces samples within one step
/// WHY: Round-trip fidelity of the artifact container and quantization
#[test]
#[allow(clippy::unwrap_used)]
fn given_known_samples_when_encoding_and_decoding_then_round_trip_within_one_step() {
    // Given: A known sequence of in-range samples plus clipping candidates
    let samples = [0.0, 0.25, -0.25, 0.9, -0.9, 1.5, -2.0];
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roundtrip.wav");

    // When: Writing the artifact and reading it back
    write_wav(&path, SAMPLE_RATE, &samples).unwrap();

    let mut reader = hound::WavReader::open(&path).unwrap();
    let spec = reader.spec();
    let decoded: Vec<f32> = reader
        .samples::<i16>()
        .map(|s| s.unwrap() as f32 / PCM16_SCALE)
        .collect();

    // Then: Mono 16-bit PCM at the requested rate, samples within one
    // quantization step, out-of-range inputs clamped to the extremes
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_rate, SAMPLE_RATE);
    assert_eq!(decoded.len(), samples.len());
    for (original, round_tripped) in samples.iter().zip(&decoded) {
        let expected = original.clamp(-1.0, 1.0);
        assert!(
            (expected - round_tripped).abs() <= QUANTIZATION_STEP,
            "expected ~{}, got {}",
            expected,
            round_tripped
        );
    }
    assert!((decoded[5] - 1.0).abs() <= QUANTIZATION_STEP);
    assert!((decoded[6] + 1.0).abs() <= QUANTIZATION_STEP);
}

/// WHAT: A failed write leaves no file behind
/// WHY: A half-written file is not a valid artifact and must be swept
#[test]
#[allow(clippy::unwrap_used)]
fn given_failing_write_when_encoding_then_no_partial_file_remains() {
    // Given: A target whose parent directory does not exist
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("partial.wav");

    // When: Writing fails
    let result = write_wav(&path, SAMPLE_RATE, &[0.1, 0.2, 0.3]);

    // Then: Error reported and nothing left on disk
    assert!(result.is_err());
    assert!(!path.exists());
}
