//! Microphone level probe use case
//!
//! One-shot measurement: activate the audio session, record into a
//! temporary file for a single metering window, read the average power
//! and report it as a percentage. Every failure is reported as
//! [`MicLevel::Off`]; cleanup always runs.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tempfile::TempPath;
use tracing::debug;

use crate::domain::level::MicLevel;

use super::ports::{AudioSession, CaptureFormat, CaptureTarget, CleanupError, ProbeError};

/// How long the capture runs before the meters are read
pub const SAMPLE_WINDOW: Duration = Duration::from_millis(100);

/// Temporary capture file naming
pub const CAPTURE_FILE_PREFIX: &str = "mic_level_check";
pub const CAPTURE_FILE_SUFFIX: &str = ".flac";

/// The capture is mono, so only channel 0 is metered
const METERED_CHANNEL: usize = 0;

/// Microphone level probe over an [`AudioSession`] adapter
pub struct MicLevelProbe<S: AudioSession> {
    session: S,
    temp_dir: PathBuf,
}

impl<S: AudioSession> MicLevelProbe<S> {
    /// Create a probe that writes its capture file to the system temp directory
    pub fn new(session: S) -> Self {
        Self {
            session,
            temp_dir: std::env::temp_dir(),
        }
    }

    /// Use a different directory for the capture file
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Measure once and map the result for display.
    ///
    /// Errors and panics raised by the adapter both become `Off`.
    pub fn run(&mut self) -> MicLevel {
        match panic::catch_unwind(AssertUnwindSafe(|| self.measure())) {
            Ok(Ok(dbfs)) => {
                let level = MicLevel::from_dbfs(dbfs);
                debug!(dbfs, %level, "microphone level sampled");
                level
            }
            Ok(Err(e)) => {
                debug!(error = %e, "microphone unavailable");
                MicLevel::Off
            }
            Err(payload) => {
                let e = ProbeError::Unclassified(panic_message(payload.as_ref()));
                debug!(error = %e, "microphone probe panicked");
                MicLevel::Off
            }
        }
    }

    /// Measure the average input power in dBFS.
    ///
    /// The capture is stopped, the session deactivated and the capture file
    /// removed before this returns, whatever the outcome.
    pub fn measure(&mut self) -> Result<f32, ProbeError> {
        let mut scope = ProbeScope::new(&mut self.session);

        scope.activate()?;

        let path = scope.create_capture_file(&self.temp_dir)?;
        let capture = scope.open_capture(&path, CaptureFormat::VOICE)?;

        capture.prepare()?;
        capture.enable_metering();
        capture.start()?;
        debug!(path = %path.display(), "capture started");

        thread::sleep(SAMPLE_WINDOW);

        if !capture.is_recording() {
            return Err(ProbeError::CaptureStoppedUnexpectedly);
        }

        capture.update_meters()?;
        let dbfs = capture.average_power(METERED_CHANNEL)?;

        drop(scope);
        Ok(dbfs)
    }
}

/// Owns everything the probe acquires and releases it on drop:
/// stop capture, deactivate session, remove capture file.
struct ProbeScope<'a, S: AudioSession> {
    session: &'a mut S,
    activation_attempted: bool,
    capture: Option<S::Capture>,
    capture_file: Option<TempPath>,
}

impl<'a, S: AudioSession> ProbeScope<'a, S> {
    fn new(session: &'a mut S) -> Self {
        Self {
            session,
            activation_attempted: false,
            capture: None,
            capture_file: None,
        }
    }

    fn activate(&mut self) -> Result<(), ProbeError> {
        // a failed activation may leave partial state behind
        self.activation_attempted = true;
        self.session.activate()
    }

    fn create_capture_file(&mut self, dir: &Path) -> Result<PathBuf, ProbeError> {
        let file = tempfile::Builder::new()
            .prefix(CAPTURE_FILE_PREFIX)
            .suffix(CAPTURE_FILE_SUFFIX)
            .tempfile_in(dir)
            .map_err(|e| ProbeError::CaptureConstruction(e.to_string()))?;

        let temp_path = file.into_temp_path();
        let path = temp_path.to_path_buf();
        self.capture_file = Some(temp_path);
        Ok(path)
    }

    fn open_capture(
        &mut self,
        path: &Path,
        format: CaptureFormat,
    ) -> Result<&mut S::Capture, ProbeError> {
        let capture = self.session.open_capture(path, format)?;
        Ok(self.capture.insert(capture))
    }
}

impl<S: AudioSession> Drop for ProbeScope<'_, S> {
    fn drop(&mut self) {
        if let Some(mut capture) = self.capture.take() {
            cleanup_step(|| capture.stop());
        }

        if self.activation_attempted {
            let session = &mut *self.session;
            cleanup_step(|| session.deactivate());
        }

        if let Some(path) = self.capture_file.take() {
            cleanup_step(|| {
                path.close()
                    .map_err(|e| CleanupError::RemoveTempFile(e.to_string()))
            });
        }
    }
}

/// Run one cleanup step; failures and panics are logged and otherwise ignored.
fn cleanup_step(step: impl FnOnce() -> Result<(), CleanupError>) {
    match panic::catch_unwind(AssertUnwindSafe(step)) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => debug!(error = %e, "cleanup failed"),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            debug!(error = %message, "cleanup panicked");
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic in audio backend".to_string()
    }
}
