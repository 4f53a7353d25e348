//! Sound Defect Predictor - six rig components from one acoustic level
//!
//! Every rule is evaluated against the same scalar, so overlapping thresholds
//! fire together (95 dB triggers all six). There is no fallback record: a
//! quiet rig legitimately yields an empty list.

use tracing::{debug, trace};

use super::Predictor;
use crate::types::{Component, DefectPrediction, DefectType, SensorReading, TimeToFailure};

/// One row of the acoustic rule table.
#[derive(Debug, Clone, Copy)]
struct SoundRule {
    component: Component,
    defect_type: DefectType,
    /// Rule fires strictly above this level (dB)
    threshold_db: f64,
    /// dB above threshold that maps to probability 1 before capping
    span_db: f64,
    /// Upper bound on the emitted probability
    cap: f64,
    /// Above this level the short window applies
    severe_above_db: f64,
    severe_window: TimeToFailure,
    mild_window: TimeToFailure,
    action: &'static str,
}

impl SoundRule {
    fn probability(&self, level: f64) -> f64 {
        ((level - self.threshold_db) / self.span_db).min(self.cap)
    }

    fn window(&self, level: f64) -> TimeToFailure {
        if level > self.severe_above_db {
            self.severe_window
        } else {
            self.mild_window
        }
    }
}

const SOUND_RULES: [SoundRule; 6] = [
    SoundRule {
        component: Component::DrillingShaft,
        defect_type: DefectType::BearingWear,
        threshold_db: 85.0,
        span_db: 30.0,
        cap: 0.95,
        severe_above_db: 100.0,
        severe_window: TimeToFailure::hours(24, 48),
        mild_window: TimeToFailure::days(7, 14),
        action: "replace bearings or enhance lubrication",
    },
    SoundRule {
        component: Component::TransmissionGears,
        defect_type: DefectType::PoorMeshing,
        threshold_db: 80.0,
        span_db: 35.0,
        cap: 0.9,
        severe_above_db: 95.0,
        severe_window: TimeToFailure::days(3, 5),
        mild_window: TimeToFailure::days(14, 21),
        action: "check gear alignment and wear",
    },
    SoundRule {
        component: Component::ElectricMotor,
        defect_type: DefectType::ShaftImbalance,
        threshold_db: 90.0,
        span_db: 25.0,
        cap: 0.85,
        severe_above_db: 105.0,
        severe_window: TimeToFailure::hours(48, 72),
        mild_window: TimeToFailure::days(10, 15),
        action: "balance motor shaft or replace motor",
    },
    SoundRule {
        component: Component::MudPump,
        defect_type: DefectType::ValveWear,
        threshold_db: 82.0,
        span_db: 28.0,
        cap: 0.88,
        severe_above_db: 98.0,
        severe_window: TimeToFailure::days(2, 4),
        mild_window: TimeToFailure::days(12, 18),
        action: "replace pump valves or check seals",
    },
    SoundRule {
        component: Component::Drawworks,
        defect_type: DefectType::BrakeAnomaly,
        threshold_db: 87.0,
        span_db: 30.0,
        cap: 0.92,
        severe_above_db: 102.0,
        severe_window: TimeToFailure::hours(36, 60),
        mild_window: TimeToFailure::days(8, 12),
        action: "overhaul brake system",
    },
    SoundRule {
        component: Component::ShaleShaker,
        defect_type: DefectType::ScreenDamage,
        threshold_db: 84.0,
        span_db: 32.0,
        cap: 0.87,
        severe_above_db: 96.0,
        severe_window: TimeToFailure::days(4, 7),
        mild_window: TimeToFailure::days(15, 24),
        action: "replace screens or adjust vibration parameters",
    },
];

/// Predictions for every acoustic rule triggered by `level_db`, in table order.
///
/// Non-finite levels trigger nothing.
pub fn predict_from_sound(level_db: f64) -> Vec<DefectPrediction> {
    if !level_db.is_finite() {
        trace!(level_db, "Non-finite sound level, no acoustic rules evaluated");
        return Vec::new();
    }

    SOUND_RULES
        .iter()
        .filter(|rule| level_db > rule.threshold_db)
        .map(|rule| {
            let probability = rule.probability(level_db);
            debug!(component = %rule.component, level_db, probability, "Acoustic rule fired");
            DefectPrediction {
                component: rule.component,
                defect_type: rule.defect_type,
                probability,
                time_to_failure: rule.window(level_db),
                recommended_action: rule.action.to_string(),
            }
        })
        .collect()
}

/// Acoustic predictor reading `acoustic.level` from a full snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoundDefectPredictor;

impl Predictor for SoundDefectPredictor {
    fn name(&self) -> &'static str {
        "Sound"
    }

    fn predict(&self, reading: &SensorReading) -> Vec<DefectPrediction> {
        match reading.acoustic_level() {
            Some(level) => predict_from_sound(level),
            None => {
                trace!("Acoustic level missing, sound predictor skipped");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-4;

    fn find(predictions: &[DefectPrediction], component: Component) -> &DefectPrediction {
        predictions
            .iter()
            .find(|p| p.component == component)
            .unwrap_or_else(|| panic!("{component} missing from {predictions:?}"))
    }

    #[test]
    fn test_95_db_triggers_all_six() {
        let predictions = predict_from_sound(95.0);
        assert_eq!(predictions.len(), 6);

        let expected = [
            (Component::DrillingShaft, 0.3333),
            (Component::TransmissionGears, 0.4286),
            (Component::ElectricMotor, 0.2),
            (Component::MudPump, 0.4643),
            (Component::Drawworks, 0.2667),
            (Component::ShaleShaker, 0.3438),
        ];
        for (i, (component, p)) in expected.iter().enumerate() {
            assert_eq!(predictions[i].component, *component, "order at {i}");
            assert!(
                (predictions[i].probability - p).abs() < EPS,
                "{component}: {} != {p}",
                predictions[i].probability
            );
        }
    }

    #[test]
    fn test_95_db_windows_and_actions() {
        let predictions = predict_from_sound(95.0);
        assert_eq!(find(&predictions, Component::DrillingShaft).time_to_failure.to_string(), "7-14 days");
        // 95 is not strictly above the gears' 95 dB severity boundary
        assert_eq!(find(&predictions, Component::TransmissionGears).time_to_failure.to_string(), "14-21 days");
        assert_eq!(find(&predictions, Component::ShaleShaker).time_to_failure.to_string(), "15-24 days");
        assert_eq!(
            find(&predictions, Component::Drawworks).recommended_action,
            "overhaul brake system"
        );
        assert_eq!(find(&predictions, Component::MudPump).defect_type, DefectType::ValveWear);
    }

    #[test]
    fn test_severe_windows() {
        let predictions = predict_from_sound(106.0);
        assert_eq!(find(&predictions, Component::DrillingShaft).time_to_failure.to_string(), "24-48 hours");
        assert_eq!(find(&predictions, Component::TransmissionGears).time_to_failure.to_string(), "3-5 days");
        assert_eq!(find(&predictions, Component::ElectricMotor).time_to_failure.to_string(), "48-72 hours");
        assert_eq!(find(&predictions, Component::MudPump).time_to_failure.to_string(), "2-4 days");
        assert_eq!(find(&predictions, Component::Drawworks).time_to_failure.to_string(), "36-60 hours");
        assert_eq!(find(&predictions, Component::ShaleShaker).time_to_failure.to_string(), "4-7 days");
    }

    #[test]
    fn test_quiet_level_is_empty() {
        assert!(predict_from_sound(80.0).is_empty());
        assert!(predict_from_sound(60.0).is_empty());
    }

    #[test]
    fn test_thresholds_are_strict() {
        // Only the gears rule (80) is below 82
        let predictions = predict_from_sound(82.0);
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].component, Component::TransmissionGears);
    }

    #[test]
    fn test_probabilities_are_capped() {
        let predictions = predict_from_sound(200.0);
        let caps = [0.95, 0.9, 0.85, 0.88, 0.92, 0.87];
        for (prediction, cap) in predictions.iter().zip(caps) {
            assert_eq!(prediction.probability, cap, "{}", prediction.component);
        }
    }

    #[test]
    fn test_non_finite_level_is_empty() {
        assert!(predict_from_sound(f64::NAN).is_empty());
        assert!(predict_from_sound(f64::INFINITY).is_empty());
    }

    #[test]
    fn test_predictor_uses_acoustic_channel() {
        let reading = SensorReading::new().with_acoustic_level(95.0).with_bearing_temp(90.0);
        assert_eq!(SoundDefectPredictor.predict(&reading), predict_from_sound(95.0));
        assert!(SoundDefectPredictor.predict(&SensorReading::new()).is_empty());
    }

    #[test]
    fn test_idempotent() {
        let first = serde_json::to_string(&predict_from_sound(97.5)).expect("serialize");
        let second = serde_json::to_string(&predict_from_sound(97.5)).expect("serialize");
        assert_eq!(first, second);
    }
}
