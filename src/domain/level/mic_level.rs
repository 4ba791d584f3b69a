//! Microphone level value object

use std::fmt;

/// Quietest level that still maps above 0%.
pub const MIN_AUDIBLE_DBFS: f32 = -60.0;

/// Output token for an unavailable microphone
const OFF_TOKEN: &str = "OFF";

/// Result of a single probe: a percentage or "unavailable".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicLevel {
    /// Input level in 0..=100
    Percent(u8),
    /// No signal could be measured
    Off,
}

impl MicLevel {
    /// Build a level from an average power reading in dBFS
    pub fn from_dbfs(dbfs: f32) -> Self {
        Self::Percent(percent_from_dbfs(dbfs))
    }

    /// Percentage, if the microphone was available
    pub fn percent(&self) -> Option<u8> {
        match self {
            Self::Percent(p) => Some(*p),
            Self::Off => None,
        }
    }

    pub fn is_off(&self) -> bool {
        matches!(self, Self::Off)
    }
}

impl fmt::Display for MicLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent(p) => write!(f, "{}", p),
            Self::Off => f.write_str(OFF_TOKEN),
        }
    }
}

/// Map dBFS onto 0..=100.
///
/// Below -60 is 0 (strict comparison, so -60 itself takes the linear
/// branch), 0 and above is 100, everything between is linear and rounded
/// to the nearest integer.
pub fn percent_from_dbfs(dbfs: f32) -> u8 {
    if dbfs.is_nan() || dbfs < MIN_AUDIBLE_DBFS {
        0
    } else if dbfs >= 0.0 {
        100
    } else {
        let percent = (dbfs - MIN_AUDIBLE_DBFS) / -MIN_AUDIBLE_DBFS * 100.0;
        percent.round().clamp(0.0, 100.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_floor_is_zero() {
        assert_eq!(percent_from_dbfs(-60.01), 0);
        assert_eq!(percent_from_dbfs(-90.0), 0);
        assert_eq!(percent_from_dbfs(-160.0), 0);
    }

    #[test]
    fn floor_boundary_takes_linear_branch() {
        assert_eq!(percent_from_dbfs(-60.0), 0);
        assert_eq!(percent_from_dbfs(-59.0), 2);
    }

    #[test]
    fn full_scale_and_above_is_hundred() {
        assert_eq!(percent_from_dbfs(0.0), 100);
        assert_eq!(percent_from_dbfs(3.5), 100);
    }

    #[test]
    fn linear_midpoints() {
        assert_eq!(percent_from_dbfs(-30.0), 50);
        assert_eq!(percent_from_dbfs(-12.0), 80);
        assert_eq!(percent_from_dbfs(-45.0), 25);
    }

    #[test]
    fn rounds_to_nearest() {
        // 99.52 rounds up
        assert_eq!(percent_from_dbfs(-0.29), 100);
        // 0.1666 rounds down
        assert_eq!(percent_from_dbfs(-59.9), 0);
        // 16.66 rounds up
        assert_eq!(percent_from_dbfs(-50.0), 17);
    }

    #[test]
    fn non_finite_inputs() {
        assert_eq!(percent_from_dbfs(f32::NAN), 0);
        assert_eq!(percent_from_dbfs(f32::NEG_INFINITY), 0);
        assert_eq!(percent_from_dbfs(f32::INFINITY), 100);
    }

    #[test]
    fn display_tokens() {
        assert_eq!(MicLevel::Percent(80).to_string(), "80");
        assert_eq!(MicLevel::Percent(0).to_string(), "0");
        assert_eq!(MicLevel::Off.to_string(), "OFF");
    }

    #[test]
    fn from_dbfs_builds_percent() {
        assert_eq!(MicLevel::from_dbfs(-12.0), MicLevel::Percent(80));
        assert_eq!(MicLevel::from_dbfs(-12.0).percent(), Some(80));
        assert!(MicLevel::Off.is_off());
        assert_eq!(MicLevel::Off.percent(), None);
    }
}
