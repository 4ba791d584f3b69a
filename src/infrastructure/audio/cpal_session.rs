//! Audio session and metered capture using cpal
//!
//! The session holds the default input device while active. A capture
//! builds a paused input stream on it, meters incoming samples and keeps
//! them for the FLAC capture file written on stop.
//!
//! `cpal::Stream` is not `Send`, so a capture must stay on the thread that
//! opened it.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use tracing::{debug, warn};

use super::flac_encoder::encode_to_flac;
use crate::application::ports::{
    AudioSession, CaptureFormat, CaptureTarget, CleanupError, ProbeError,
};
use crate::domain::level::LevelMeter;

/// Audio session bound to the default input device
#[derive(Default)]
pub struct CpalSession {
    device: Option<cpal::Device>,
}

impl CpalSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a suitable input configuration, preferring a range containing the
    /// requested sample rate, then the closest channel count.
    fn get_input_config(
        device: &cpal::Device,
        format: CaptureFormat,
    ) -> Result<(StreamConfig, SampleFormat), ProbeError> {
        let supported_configs = device.supported_input_configs().map_err(|e| {
            ProbeError::CaptureConstruction(format!("Failed to get configs: {}", e))
        })?;

        let target_rate = format.sample_rate;
        let includes_target = |c: &cpal::SupportedStreamConfigRange| {
            c.min_sample_rate().0 <= target_rate && c.max_sample_rate().0 >= target_rate
        };

        // Only consider i16 or f32 formats; first best candidate wins ties
        let config_range = supported_configs
            .filter(|c| matches!(c.sample_format(), SampleFormat::I16 | SampleFormat::F32))
            .min_by_key(|c| {
                config_rank(
                    c.channels(),
                    c.min_sample_rate().0,
                    c.max_sample_rate().0,
                    format,
                )
            })
            .ok_or_else(|| {
                ProbeError::CaptureConstruction("No suitable input config found".into())
            })?;

        let sample_rate = if includes_target(&config_range) {
            SampleRate(target_rate)
        } else {
            config_range.min_sample_rate()
        };

        let config = StreamConfig {
            channels: config_range.channels(),
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        Ok((config, config_range.sample_format()))
    }

    fn build_stream(
        device: &cpal::Device,
        config: &StreamConfig,
        sample_format: SampleFormat,
        shared: &Arc<CaptureShared>,
    ) -> Result<cpal::Stream, ProbeError> {
        let channels = config.channels;
        let on_error = {
            let shared = Arc::clone(shared);
            move |err: cpal::StreamError| {
                warn!(error = %err, "audio stream error");
                shared.recording.store(false, Ordering::SeqCst);
            }
        };

        let stream = match sample_format {
            SampleFormat::I16 => {
                let shared = Arc::clone(shared);
                device.build_input_stream(
                    config,
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        let normalised: Vec<f32> =
                            data.iter().map(|&s| s as f32 / 32768.0).collect();
                        shared.push(&downmix(&normalised, channels));
                    },
                    on_error,
                    None,
                )
            }
            SampleFormat::F32 => {
                let shared = Arc::clone(shared);
                device.build_input_stream(
                    config,
                    move |data: &[f32], _: &cpal::InputCallbackInfo| {
                        shared.push(&downmix(data, channels));
                    },
                    on_error,
                    None,
                )
            }
            other => {
                return Err(ProbeError::CaptureConstruction(format!(
                    "Unsupported sample format: {:?}",
                    other
                )))
            }
        };

        stream.map_err(|e| ProbeError::CaptureConstruction(e.to_string()))
    }
}

impl AudioSession for CpalSession {
    type Capture = CpalCapture;

    fn activate(&mut self) -> Result<(), ProbeError> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| ProbeError::SessionConfig("No audio input device".into()))?;

        // A device that cannot report an input config cannot record either
        let config = device
            .default_input_config()
            .map_err(|e| ProbeError::SessionConfig(e.to_string()))?;

        debug!(
            device = %device.name().unwrap_or_else(|_| "unknown".to_string()),
            sample_rate = config.sample_rate().0,
            channels = config.channels(),
            "audio session active"
        );

        self.device = Some(device);
        Ok(())
    }

    fn deactivate(&mut self) -> Result<(), CleanupError> {
        self.device = None;
        Ok(())
    }

    fn open_capture(
        &mut self,
        path: &Path,
        format: CaptureFormat,
    ) -> Result<CpalCapture, ProbeError> {
        let device = self.device.as_ref().ok_or_else(|| {
            ProbeError::CaptureConstruction("Audio session is not active".into())
        })?;

        let (config, sample_format) = Self::get_input_config(device, format)?;
        let shared = Arc::new(CaptureShared::default());
        let stream = Self::build_stream(device, &config, sample_format, &shared)?;

        debug!(
            sample_rate = config.sample_rate.0,
            channels = config.channels,
            ?sample_format,
            "capture stream built"
        );

        Ok(CpalCapture {
            stream,
            path: path.to_path_buf(),
            sample_rate: config.sample_rate.0,
            shared,
            file: None,
            average_power: None,
        })
    }
}

/// State written by the audio callback thread
#[derive(Default)]
struct CaptureShared {
    recording: AtomicBool,
    metering: AtomicBool,
    samples: StdMutex<Vec<i16>>,
    meter: StdMutex<LevelMeter>,
}

impl CaptureShared {
    fn push(&self, mono: &[f32]) {
        if !self.recording.load(Ordering::SeqCst) {
            return;
        }

        if self.metering.load(Ordering::SeqCst) {
            if let Ok(mut meter) = self.meter.lock() {
                meter.accumulate(mono);
            }
        }

        if let Ok(mut samples) = self.samples.lock() {
            samples.extend(mono.iter().map(|&s| (s.clamp(-1.0, 1.0) * 32767.0) as i16));
        }
    }
}

/// One metered recording into a FLAC file
pub struct CpalCapture {
    stream: cpal::Stream,
    path: PathBuf,
    sample_rate: u32,
    shared: Arc<CaptureShared>,
    file: Option<File>,
    average_power: Option<f32>,
}

impl CpalCapture {
    fn flush_to_file(&mut self) -> Result<(), CleanupError> {
        let Some(mut file) = self.file.take() else {
            return Ok(());
        };

        let samples = self
            .shared
            .samples
            .lock()
            .map(|mut s| std::mem::take(&mut *s))
            .map_err(|_| CleanupError::Stop("sample buffer poisoned".into()))?;

        if samples.is_empty() {
            return Ok(());
        }

        let flac = encode_to_flac(&samples, self.sample_rate)
            .map_err(|e| CleanupError::Stop(e.to_string()))?;
        file.write_all(&flac)
            .map_err(|e| CleanupError::Stop(e.to_string()))
    }
}

impl CaptureTarget for CpalCapture {
    fn prepare(&mut self) -> Result<(), ProbeError> {
        let file = File::create(&self.path).map_err(|e| {
            ProbeError::CapturePrepare(format!("{}: {}", self.path.display(), e))
        })?;
        self.file = Some(file);
        Ok(())
    }

    fn enable_metering(&mut self) {
        self.shared.metering.store(true, Ordering::SeqCst);
    }

    fn start(&mut self) -> Result<(), ProbeError> {
        self.shared.recording.store(true, Ordering::SeqCst);
        if let Err(e) = self.stream.play() {
            self.shared.recording.store(false, Ordering::SeqCst);
            return Err(ProbeError::CaptureStart(e.to_string()));
        }
        Ok(())
    }

    fn is_recording(&self) -> bool {
        self.shared.recording.load(Ordering::SeqCst)
    }

    fn update_meters(&mut self) -> Result<(), ProbeError> {
        if !self.shared.metering.load(Ordering::SeqCst) {
            return Err(ProbeError::Unclassified("Metering is not enabled".into()));
        }

        let mut meter = self
            .shared
            .meter
            .lock()
            .map_err(|_| ProbeError::Unclassified("Meter state poisoned".into()))?;

        debug!(samples = meter.sample_count(), "refreshing meters");
        self.average_power = Some(meter.take_average_power());
        Ok(())
    }

    fn average_power(&self, channel: usize) -> Result<f32, ProbeError> {
        if channel != 0 {
            return Err(ProbeError::Unclassified(format!(
                "No input channel {}",
                channel
            )));
        }
        self.average_power
            .ok_or_else(|| ProbeError::Unclassified("Meters have not been updated".into()))
    }

    fn stop(&mut self) -> Result<(), CleanupError> {
        self.shared.recording.store(false, Ordering::SeqCst);
        let paused = self
            .stream
            .pause()
            .map_err(|e| CleanupError::Stop(e.to_string()));
        let flushed = self.flush_to_file();
        paused.and(flushed)
    }
}

/// Ordering key for a supported config range, lower is better: a range
/// containing the target rate beats any channel match, then the channel
/// count closest to the target wins.
fn config_rank(
    channels: u16,
    min_rate: u32,
    max_rate: u32,
    format: CaptureFormat,
) -> (bool, u16) {
    let includes_target = min_rate <= format.sample_rate && format.sample_rate <= max_rate;
    (!includes_target, channels.abs_diff(format.channels))
}

/// Mix interleaved frames down to mono
fn downmix(samples: &[f32], channels: u16) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }

    samples
        .chunks(channels as usize)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}
