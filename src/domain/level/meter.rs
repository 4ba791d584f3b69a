//! Average power meter over a window of samples

/// Reported for digital silence or an empty window.
pub const SILENCE_FLOOR_DBFS: f32 = -160.0;

/// Accumulates normalised samples (-1.0..=1.0) and reports their average
/// power in dBFS. Each refresh consumes the window.
#[derive(Debug, Default, Clone)]
pub struct LevelMeter {
    sum_squares: f64,
    count: u64,
}

impl LevelMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add samples to the current window
    pub fn accumulate(&mut self, samples: &[f32]) {
        for &s in samples {
            let s = f64::from(s);
            self.sum_squares += s * s;
        }
        self.count += samples.len() as u64;
    }

    /// Samples seen since the last refresh
    pub fn sample_count(&self) -> u64 {
        self.count
    }

    /// Average power of the window in dBFS, then start a new window.
    pub fn take_average_power(&mut self) -> f32 {
        let window = std::mem::take(self);
        if window.count == 0 {
            return SILENCE_FLOOR_DBFS;
        }

        let rms = (window.sum_squares / window.count as f64).sqrt();
        if rms <= 0.0 {
            return SILENCE_FLOOR_DBFS;
        }

        let dbfs = 20.0 * rms.log10();
        (dbfs as f32).max(SILENCE_FLOOR_DBFS)
    }
}
