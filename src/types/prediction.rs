//! Defect prediction output records

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use super::RiskBucket;

/// Physical subsystem a prediction refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    #[serde(rename = "Main Bearing")]
    MainBearing,
    #[serde(rename = "Gearbox")]
    Gearbox,
    #[serde(rename = "Hydraulic System")]
    HydraulicSystem,
    #[serde(rename = "Main Motor")]
    MainMotor,
    #[serde(rename = "Overall Equipment")]
    OverallEquipment,
    // Acoustic-only components
    #[serde(rename = "Drilling Shaft")]
    DrillingShaft,
    #[serde(rename = "Transmission Gears")]
    TransmissionGears,
    #[serde(rename = "Electric Motor")]
    ElectricMotor,
    #[serde(rename = "Mud Pump")]
    MudPump,
    #[serde(rename = "Drawworks")]
    Drawworks,
    #[serde(rename = "Shale Shaker")]
    ShaleShaker,
}

impl Component {
    pub const fn as_str(self) -> &'static str {
        match self {
            Component::MainBearing => "Main Bearing",
            Component::Gearbox => "Gearbox",
            Component::HydraulicSystem => "Hydraulic System",
            Component::MainMotor => "Main Motor",
            Component::OverallEquipment => "Overall Equipment",
            Component::DrillingShaft => "Drilling Shaft",
            Component::TransmissionGears => "Transmission Gears",
            Component::ElectricMotor => "Electric Motor",
            Component::MudPump => "Mud Pump",
            Component::Drawworks => "Drawworks",
            Component::ShaleShaker => "Shale Shaker",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Specific failure mode of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefectType {
    #[serde(rename = "Overheating")]
    Overheating,
    #[serde(rename = "Abnormal wear")]
    AbnormalWear,
    #[serde(rename = "Leakage")]
    Leakage,
    #[serde(rename = "Bearing damage")]
    BearingDamage,
    #[serde(rename = "Routine wear")]
    RoutineWear,
    #[serde(rename = "Bearing wear")]
    BearingWear,
    #[serde(rename = "Poor meshing")]
    PoorMeshing,
    #[serde(rename = "Shaft imbalance")]
    ShaftImbalance,
    #[serde(rename = "Valve wear")]
    ValveWear,
    #[serde(rename = "Brake anomaly")]
    BrakeAnomaly,
    #[serde(rename = "Screen damage")]
    ScreenDamage,
}

impl DefectType {
    pub const fn as_str(self) -> &'static str {
        match self {
            DefectType::Overheating => "Overheating",
            DefectType::AbnormalWear => "Abnormal wear",
            DefectType::Leakage => "Leakage",
            DefectType::BearingDamage => "Bearing damage",
            DefectType::RoutineWear => "Routine wear",
            DefectType::BearingWear => "Bearing wear",
            DefectType::PoorMeshing => "Poor meshing",
            DefectType::ShaftImbalance => "Shaft imbalance",
            DefectType::ValveWear => "Valve wear",
            DefectType::BrakeAnomaly => "Brake anomaly",
            DefectType::ScreenDamage => "Screen damage",
        }
    }
}

impl fmt::Display for DefectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit of a fixed time-to-failure window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowUnit {
    Hours,
    Days,
}

impl WindowUnit {
    const fn as_str(self) -> &'static str {
        match self {
            WindowUnit::Hours => "hours",
            WindowUnit::Days => "days",
        }
    }
}

/// Human-readable remaining-life estimate.
///
/// Serializes as its rendered string ("18 days", "90+ days", "24-48 hours").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeToFailure {
    /// Point estimate from the time-to-failure estimator
    Days(u32),
    /// Open-ended lower bound, used by the routine-wear fallback
    AtLeastDays(u32),
    /// Fixed window from the acoustic rule table
    Window { min: u32, max: u32, unit: WindowUnit },
}

impl TimeToFailure {
    pub const fn hours(min: u32, max: u32) -> Self {
        TimeToFailure::Window { min, max, unit: WindowUnit::Hours }
    }

    pub const fn days(min: u32, max: u32) -> Self {
        TimeToFailure::Window { min, max, unit: WindowUnit::Days }
    }
}

impl fmt::Display for TimeToFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeToFailure::Days(1) => write!(f, "1 day"),
            TimeToFailure::Days(n) => write!(f, "{n} days"),
            TimeToFailure::AtLeastDays(n) => write!(f, "{n}+ days"),
            TimeToFailure::Window { min, max, unit } => write!(f, "{min}-{max} {}", unit.as_str()),
        }
    }
}

impl Serialize for TimeToFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One probabilistic fault estimate.
///
/// Constructed fresh on every predictor call; carries no identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefectPrediction {
    pub component: Component,
    pub defect_type: DefectType,
    /// Probability in [0, 1]
    pub probability: f64,
    pub time_to_failure: TimeToFailure,
    pub recommended_action: String,
}

impl DefectPrediction {
    /// Dashboard color bucket for this prediction's probability.
    pub fn risk_bucket(&self) -> RiskBucket {
        RiskBucket::from_probability(self.probability)
    }
}

impl fmt::Display for DefectPrediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {}: {:.0}% ({}) - TTF {} - {}",
            self.component,
            self.defect_type,
            self.probability * 100.0,
            self.risk_bucket(),
            self.time_to_failure,
            self.recommended_action
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_to_failure_rendering() {
        assert_eq!(TimeToFailure::Days(18).to_string(), "18 days");
        assert_eq!(TimeToFailure::Days(1).to_string(), "1 day");
        assert_eq!(TimeToFailure::Days(0).to_string(), "0 days");
        assert_eq!(TimeToFailure::AtLeastDays(90).to_string(), "90+ days");
        assert_eq!(TimeToFailure::hours(24, 48).to_string(), "24-48 hours");
        assert_eq!(TimeToFailure::days(7, 14).to_string(), "7-14 days");
    }

    #[test]
    fn test_prediction_serializes_with_display_names() {
        let prediction = DefectPrediction {
            component: Component::MainBearing,
            defect_type: DefectType::Overheating,
            probability: 0.5,
            time_to_failure: TimeToFailure::Days(18),
            recommended_action: "inspect cooling immediately".to_string(),
        };
        let value = serde_json::to_value(&prediction).expect("serialize");
        assert_eq!(value["component"], "Main Bearing");
        assert_eq!(value["defectType"], "Overheating");
        assert_eq!(value["probability"], 0.5);
        assert_eq!(value["timeToFailure"], "18 days");
        assert_eq!(value["recommendedAction"], "inspect cooling immediately");
    }

    #[test]
    fn test_component_names_round_trip_through_serde() {
        let decoded: Component = serde_json::from_str(r#""Shale Shaker""#).expect("decode");
        assert_eq!(decoded, Component::ShaleShaker);
        assert_eq!(decoded.to_string(), "Shale Shaker");
    }
}
