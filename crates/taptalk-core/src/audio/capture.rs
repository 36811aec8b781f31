use crate::{
    CaptureError, CoreResult,
    audio::{encoder, frame_buffer::FrameBuffer},
};

use std::{
    panic::Location,
    path::{Path, PathBuf},
    sync::Arc,
};

use cpal::{
    Stream, StreamConfig,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument, warn};

/// Handle to one encoded PCM file produced by a completed session.
///
/// Ownership transfers to the transcription step, which reads and then
/// deletes the file.
#[derive(Debug)]
pub struct Artifact {
    /// Location of the encoded WAV file.
    pub path: PathBuf,
    /// Number of mono samples the artifact contains.
    pub sample_count: usize,
    /// Sample rate the artifact was encoded at.
    pub sample_rate: u32,
}

impl Artifact {
    /// Best-effort removal of the artifact file. Called after transcription
    /// regardless of outcome; a leftover temp file is not worth failing over.
    pub fn cleanup(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = ?self.path, "Artifact deleted"),
            Err(e) => warn!(path = ?self.path, error = %e, "Failed to delete artifact"),
        }
    }
}

/// Frames drained from one completed session, not yet encoded.
///
/// Separating the drain from the encode keeps [`CaptureEngine::disarm`]
/// free of file I/O: the caller drains under whatever guard owns the
/// engine, then encodes on a blocking-friendly context.
#[derive(Debug)]
pub struct CapturedAudio {
    /// Frame blocks in arrival order, interleaved as delivered.
    pub blocks: Vec<Vec<f32>>,
    /// Channel count of the source stream.
    pub channels: u16,
    /// Sample rate of the source stream.
    pub sample_rate: u32,
}

impl CapturedAudio {
    /// Concatenate the blocks, downmix to mono, and write the WAV artifact.
    ///
    /// Blocking file I/O; callers run it off any latency-sensitive path.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn into_artifact(self, artifact_path: &Path) -> CoreResult<Artifact> {
        let total: usize = self.blocks.iter().map(Vec::len).sum();
        let mut samples = Vec::with_capacity(total);
        for block in &self.blocks {
            samples.extend_from_slice(block);
        }

        let mono = encoder::downmix(&samples, self.channels.max(1));

        encoder::write_wav(artifact_path, self.sample_rate, &mono)?;

        info!(
            path = ?artifact_path,
            block_count = self.blocks.len(),
            sample_count = mono.len(),
            "Session artifact produced"
        );

        Ok(Artifact {
            path: artifact_path.to_path_buf(),
            sample_count: mono.len(),
            sample_rate: self.sample_rate,
        })
    }
}

/// Manages the lifecycle of a live audio input stream and produces an
/// encoded artifact from accumulated frames on disarm.
///
/// The stream is pre-warmed: opened once at listener start and kept open
/// across many sessions, so arming never pays device-open latency on the
/// fast path. Arm/disarm only toggle whether the audio callback appends
/// into the [`FrameBuffer`].
///
/// # Thread Safety
///
/// CaptureEngine is NOT thread-safe; it is owned by the orchestration
/// context. The only state shared with the audio callback context is the
/// frame buffer, whose critical sections are an armed-check and an append.
pub struct CaptureEngine {
    preferred_device: Option<String>,
    stream: Option<Stream>,
    sample_rate: u32,
    channels: u16,
    buffer: Arc<FrameBuffer>,
}

impl CaptureEngine {
    /// Create an engine with no stream open. `preferred_device` selects an
    /// input device by name; `None` uses the system default.
    pub fn new(preferred_device: Option<String>) -> Self {
        Self {
            preferred_device,
            stream: None,
            sample_rate: 0,
            channels: 0,
            buffer: Arc::new(FrameBuffer::new()),
        }
    }

    /// Whether the input stream is currently open.
    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// Sample rate of the open stream, if any.
    pub fn sample_rate(&self) -> Option<u32> {
        self.stream.as_ref().map(|_| self.sample_rate)
    }

    /// Open and start the audio input stream. Idempotent: calling with the
    /// stream already open is a no-op success.
    ///
    /// The registered callback appends incoming frame blocks to the frame
    /// buffer only while a session is armed.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn open_stream(&mut self) -> CoreResult<()> {
        if self.stream.is_some() {
            debug!("Stream already open");
            return Ok(());
        }

        let host = cpal::default_host();

        let device = match &self.preferred_device {
            Some(name) => {
                let mut devices = host.input_devices().map_err(|e| CaptureError::DeviceError {
                    reason: format!("Failed to enumerate input devices: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
                devices
                    .find(|d| d.name().is_ok_and(|n| &n == name))
                    .ok_or_else(|| CaptureError::DeviceError {
                        reason: format!("Input device not found: {}", name),
                        location: ErrorLocation::from(Location::caller()),
                    })?
            }
            None => host
                .default_input_device()
                .ok_or(CaptureError::NoMicrophoneFound {
                    location: ErrorLocation::from(Location::caller()),
                })?,
        };

        let config = device
            .default_input_config()
            .map_err(|e| CaptureError::DeviceError {
                reason: format!("Failed to get config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let stream_config: StreamConfig = config.into();
        let sample_rate = stream_config.sample_rate;
        let channels = stream_config.channels;

        let buffer = Arc::clone(&self.buffer);

        let stream = device
            .build_input_stream(
                &stream_config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    buffer.push_block(data);
                },
                |err| {
                    error!("Audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| CaptureError::DeviceError {
                reason: format!("Failed to build stream: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        stream.play().map_err(|e| CaptureError::DeviceError {
            reason: format!("Failed to start stream: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        self.stream = Some(stream);
        self.sample_rate = sample_rate;
        self.channels = channels;

        info!(
            sample_rate = sample_rate,
            channels = channels,
            "Audio input stream opened (pre-warmed)"
        );

        Ok(())
    }

    /// Stop and release the audio input stream. Idempotent.
    ///
    /// Disarms first, discarding any in-flight buffer without producing an
    /// artifact: stream teardown forfeits an unfinished session.
    #[instrument(skip(self))]
    pub fn close_stream(&mut self) {
        self.buffer.discard();

        if let Some(stream) = self.stream.take() {
            drop(stream);
            // Brief yield so an in-flight callback observes the disarmed
            // buffer and completes before the device is fully released.
            std::thread::sleep(std::time::Duration::from_millis(5));
            info!("Audio input stream closed");
        }
    }

    /// Begin accumulating audio frames for a new session.
    ///
    /// If the stream is not open (pre-warming failed or was torn down),
    /// attempts to open it first. Otherwise this is lock-toggle cheap and
    /// sits safely on the hotkey-press latency path.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn arm(&mut self) -> CoreResult<()> {
        if self.stream.is_none() {
            warn!("Stream not open at arm time, attempting recovery open");
            self.open_stream()?;
        }

        self.buffer.arm();
        debug!("Capture armed");

        Ok(())
    }

    /// Whether a session is currently armed.
    pub fn is_armed(&self) -> bool {
        self.buffer.is_armed()
    }

    /// Stop accumulating frames and drain this session's audio.
    ///
    /// The armed flag is cleared first, so the callback stops appending
    /// as early as possible. Returns `None` when no frames were
    /// accumulated. No I/O happens here; the caller encodes the returned
    /// audio via [`CapturedAudio::into_artifact`] on a blocking context,
    /// so disarm never delays the next possible arm.
    #[instrument(skip(self))]
    pub fn disarm(&mut self) -> Option<CapturedAudio> {
        let blocks = self.buffer.disarm();

        if blocks.is_empty() {
            debug!("Disarmed with zero frames, no audio");
            return None;
        }

        debug!(block_count = blocks.len(), "Session audio drained");

        Some(CapturedAudio {
            blocks,
            channels: self.channels,
            sample_rate: self.sample_rate,
        })
    }
}
