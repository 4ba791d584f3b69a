//! Audio capture port interfaces

use std::path::Path;

use thiserror::Error;

/// Failures that make the microphone level unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("Failed to configure audio session: {0}")]
    SessionConfig(String),

    #[error("Failed to create capture target: {0}")]
    CaptureConstruction(String),

    #[error("Failed to prepare capture: {0}")]
    CapturePrepare(String),

    #[error("Failed to start capture: {0}")]
    CaptureStart(String),

    #[error("Capture stopped before the level was sampled")]
    CaptureStoppedUnexpectedly,

    #[error("Microphone probe failed: {0}")]
    Unclassified(String),
}

/// Failures while releasing probe resources. Never reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CleanupError {
    #[error("Failed to stop capture: {0}")]
    Stop(String),

    #[error("Failed to deactivate audio session: {0}")]
    Deactivate(String),

    #[error("Failed to remove capture file: {0}")]
    RemoveTempFile(String),
}

/// Capture target format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureFormat {
    pub sample_rate: u32,
    pub channels: u16,
}

impl CaptureFormat {
    /// Mono voice capture at 44.1kHz
    pub const VOICE: Self = Self {
        sample_rate: 44_100,
        channels: 1,
    };
}

/// Port for the process-wide audio capture session.
///
/// Activation is scoped by the caller: every successful or attempted
/// `activate` is followed by exactly one `deactivate`.
pub trait AudioSession {
    type Capture: CaptureTarget;

    /// Acquire the input device and configure it for voice capture.
    fn activate(&mut self) -> Result<(), ProbeError>;

    /// Release the session. Must tolerate a failed or partial activation.
    fn deactivate(&mut self) -> Result<(), CleanupError>;

    /// Create a capture target that records into `path`.
    fn open_capture(
        &mut self,
        path: &Path,
        format: CaptureFormat,
    ) -> Result<Self::Capture, ProbeError>;
}

/// Port for one short recording with level metering.
pub trait CaptureTarget {
    /// Create backing storage and ready the input stream.
    fn prepare(&mut self) -> Result<(), ProbeError>;

    fn enable_metering(&mut self);

    /// Start recording. Fails when the device is busy.
    fn start(&mut self) -> Result<(), ProbeError>;

    /// Whether capture is still running (the device may go away mid-capture).
    fn is_recording(&self) -> bool;

    /// Refresh the metering statistics from samples seen so far.
    fn update_meters(&mut self) -> Result<(), ProbeError>;

    /// Average power of `channel` in dBFS as of the last meter update.
    fn average_power(&self, channel: usize) -> Result<f32, ProbeError>;

    /// Stop recording and flush the capture file.
    fn stop(&mut self) -> Result<(), CleanupError>;
}
