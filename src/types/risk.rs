//! Presentation buckets shared with the dashboard

use serde::{Deserialize, Serialize};
use std::fmt;

/// Probability bucket used for color-coding predictions.
///
/// Boundaries: <0.2 low, <0.4 medium-low, <0.7 medium-high, else high.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskBucket {
    Low = 0,
    MediumLow = 1,
    MediumHigh = 2,
    High = 3,
}

impl RiskBucket {
    pub fn from_probability(probability: f64) -> Self {
        if probability < 0.2 {
            RiskBucket::Low
        } else if probability < 0.4 {
            RiskBucket::MediumLow
        } else if probability < 0.7 {
            RiskBucket::MediumHigh
        } else {
            RiskBucket::High
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskBucket::Low => "Low",
            RiskBucket::MediumLow => "Medium-Low",
            RiskBucket::MediumHigh => "Medium-High",
            RiskBucket::High => "High",
        }
    }

    /// Dashboard color name for this bucket.
    pub const fn color(self) -> &'static str {
        match self {
            RiskBucket::Low => "green",
            RiskBucket::MediumLow => "yellow",
            RiskBucket::MediumHigh => "orange",
            RiskBucket::High => "red",
        }
    }
}

impl fmt::Display for RiskBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Qualitative status of an acoustic level reading.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum SoundLevelStatus {
    Quiet,
    Normal,
    Elevated,
    Warning,
    Dangerous,
}

/// Above this level (dB) the acoustic channel is flagged abnormal.
pub const SOUND_ABNORMAL_DB: f64 = 85.0;

impl SoundLevelStatus {
    /// Zones: <70 quiet, <80 normal, <90 elevated, <100 warning, else dangerous.
    pub fn from_level(level_db: f64) -> Self {
        if level_db < 70.0 {
            SoundLevelStatus::Quiet
        } else if level_db < 80.0 {
            SoundLevelStatus::Normal
        } else if level_db < 90.0 {
            SoundLevelStatus::Elevated
        } else if level_db < 100.0 {
            SoundLevelStatus::Warning
        } else {
            SoundLevelStatus::Dangerous
        }
    }

    pub fn is_abnormal(level_db: f64) -> bool {
        level_db > SOUND_ABNORMAL_DB
    }
}

impl fmt::Display for SoundLevelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoundLevelStatus::Quiet => write!(f, "Quiet"),
            SoundLevelStatus::Normal => write!(f, "Normal"),
            SoundLevelStatus::Elevated => write!(f, "Elevated"),
            SoundLevelStatus::Warning => write!(f, "Warning"),
            SoundLevelStatus::Dangerous => write!(f, "Dangerous"),
        }
    }
}
