//! Notification routing keys derived from predictions

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Component, DefectPrediction, RiskBucket};

/// Sensor family an alert belongs to; each has its own opt-in toggle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AlertCategory {
    Sound,
    Temperature,
    Vibration,
    Hydraulic,
}

impl AlertCategory {
    /// Category for a component, or `None` for the routine-wear fallback.
    pub const fn for_component(component: Component) -> Option<Self> {
        match component {
            Component::MainBearing => Some(AlertCategory::Temperature),
            Component::Gearbox => Some(AlertCategory::Vibration),
            Component::HydraulicSystem => Some(AlertCategory::Hydraulic),
            Component::MainMotor
            | Component::DrillingShaft
            | Component::TransmissionGears
            | Component::ElectricMotor
            | Component::MudPump
            | Component::Drawworks
            | Component::ShaleShaker => Some(AlertCategory::Sound),
            Component::OverallEquipment => None,
        }
    }
}

impl fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertCategory::Sound => write!(f, "sound"),
            AlertCategory::Temperature => write!(f, "temperature"),
            AlertCategory::Vibration => write!(f, "vibration"),
            AlertCategory::Hydraulic => write!(f, "hydraulic"),
        }
    }
}

/// Alert severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Info = 0,
    Warning = 1,
    Critical = 2,
}

impl AlertSeverity {
    /// High bucket is critical, medium-high is a warning, anything lower is info.
    pub const fn from_bucket(bucket: RiskBucket) -> Self {
        match bucket {
            RiskBucket::High => AlertSeverity::Critical,
            RiskBucket::MediumHigh => AlertSeverity::Warning,
            RiskBucket::MediumLow | RiskBucket::Low => AlertSeverity::Info,
        }
    }

    pub fn for_prediction(prediction: &DefectPrediction) -> Self {
        Self::from_bucket(prediction.risk_bucket())
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Info => write!(f, "INFO"),
            AlertSeverity::Warning => write!(f, "WARNING"),
            AlertSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_component_has_no_category() {
        assert_eq!(AlertCategory::for_component(Component::OverallEquipment), None);
    }

    #[test]
    fn test_acoustic_components_map_to_sound() {
        for component in [
            Component::MainMotor,
            Component::DrillingShaft,
            Component::MudPump,
            Component::ShaleShaker,
        ] {
            assert_eq!(AlertCategory::for_component(component), Some(AlertCategory::Sound));
        }
    }

    #[test]
    fn test_severity_from_bucket() {
        assert_eq!(AlertSeverity::from_bucket(RiskBucket::High), AlertSeverity::Critical);
        assert_eq!(AlertSeverity::from_bucket(RiskBucket::MediumHigh), AlertSeverity::Warning);
        assert_eq!(AlertSeverity::from_bucket(RiskBucket::MediumLow), AlertSeverity::Info);
        assert_eq!(AlertSeverity::from_bucket(RiskBucket::Low), AlertSeverity::Info);
    }
}
