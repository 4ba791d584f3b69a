//! Microphone level values and metering

mod meter;
mod mic_level;

pub use meter::{LevelMeter, SILENCE_FLOOR_DBFS};
pub use mic_level::{percent_from_dbfs, MicLevel, MIN_AUDIBLE_DBFS};
