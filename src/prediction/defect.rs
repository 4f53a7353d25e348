//! Defect Predictor - reading-driven fault predictions per subsystem
//!
//! Rules, evaluated in this order (each independent, at most one record each):
//!
//! | Trigger                          | Component        | Defect         |
//! |----------------------------------|------------------|----------------|
//! | bearing temp > normal            | Main Bearing     | Overheating    |
//! | vibration level > normal         | Gearbox          | Abnormal wear  |
//! | pressure < normal or flow < normal | Hydraulic System | Leakage      |
//! | acoustic level > normal          | Main Motor       | Bearing damage |
//!
//! When nothing fires a single routine-wear record is returned instead of an
//! empty list.

use tracing::{debug, trace};

use super::{estimate_days, Predictor, RiskAnchors};
use crate::config::defaults::{ROUTINE_WEAR_ACTION, ROUTINE_WEAR_MIN_DAYS, ROUTINE_WEAR_PROBABILITY};
use crate::config::{FailureModes, HydraulicThresholds, MonitorConfig};
use crate::types::{Component, DefectPrediction, DefectType, SensorReading, TimeToFailure};

/// Fixed identity and action policy of one rule.
struct RuleLabels {
    component: Component,
    defect_type: DefectType,
    urgent_action: &'static str,
    routine_action: &'static str,
}

const MAIN_BEARING: RuleLabels = RuleLabels {
    component: Component::MainBearing,
    defect_type: DefectType::Overheating,
    urgent_action: "inspect cooling immediately",
    routine_action: "scheduled maintenance check",
};

const GEARBOX: RuleLabels = RuleLabels {
    component: Component::Gearbox,
    defect_type: DefectType::AbnormalWear,
    urgent_action: "check lubrication system",
    routine_action: "routine monitoring",
};

const HYDRAULIC: RuleLabels = RuleLabels {
    component: Component::HydraulicSystem,
    defect_type: DefectType::Leakage,
    urgent_action: "inspect piping and seals",
    routine_action: "routine monitoring",
};

const MAIN_MOTOR: RuleLabels = RuleLabels {
    component: Component::MainMotor,
    defect_type: DefectType::BearingDamage,
    urgent_action: "schedule motor inspection",
    routine_action: "increase monitoring",
};

/// Threshold-interpolation predictor for bearing, gearbox, hydraulics and motor.
#[derive(Debug, Clone, Default)]
pub struct DefectPredictor {
    modes: FailureModes,
}

impl DefectPredictor {
    pub fn new(modes: FailureModes) -> Self {
        Self { modes }
    }

    pub fn from_config(config: &MonitorConfig) -> Self {
        Self::new(config.failure_modes.clone())
    }

    /// Evaluate every rule against the snapshot.
    ///
    /// Output order: bearing, gearbox, hydraulic, motor, or the single
    /// routine-wear record when no rule fires.
    pub fn predict(&self, reading: &SensorReading) -> Vec<DefectPrediction> {
        let mut predictions = Vec::with_capacity(4);

        predictions.extend(rising_rule(
            reading.bearing_temp(),
            self.modes.main_bearing.anchors(),
            &MAIN_BEARING,
        ));
        predictions.extend(rising_rule(
            reading.vibration_level(),
            self.modes.gearbox.anchors(),
            &GEARBOX,
        ));
        predictions.extend(hydraulic_rule(
            reading.pressure(),
            reading.flow_rate(),
            &self.modes.hydraulic,
        ));
        predictions.extend(rising_rule(
            reading.acoustic_level(),
            self.modes.main_motor.anchors(),
            &MAIN_MOTOR,
        ));

        if predictions.is_empty() {
            trace!("No defect rule fired, emitting routine wear");
            predictions.push(routine_wear());
        }

        predictions
    }
}

impl Predictor for DefectPredictor {
    fn name(&self) -> &'static str {
        "Defect"
    }

    fn predict(&self, reading: &SensorReading) -> Vec<DefectPrediction> {
        DefectPredictor::predict(self, reading)
    }
}

/// Rule whose risk rises with the reading; fires strictly above `normal`.
fn rising_rule(value: Option<f64>, anchors: RiskAnchors, labels: &RuleLabels) -> Option<DefectPrediction> {
    let Some(value) = value else {
        trace!(component = %labels.component, "Reading missing, rule skipped");
        return None;
    };
    if value <= anchors.normal {
        return None;
    }

    let probability = anchors.probability(value);
    debug!(
        component = %labels.component,
        value,
        probability,
        "Defect rule fired"
    );
    Some(build(probability, anchors, labels))
}

/// Leak rule: either channel below its normal anchor triggers it, and the
/// larger of the two factors wins. Records at or below the reportable floor
/// are dropped.
fn hydraulic_rule(
    pressure: Option<f64>,
    flow_rate: Option<f64>,
    thresholds: &HydraulicThresholds,
) -> Option<DefectPrediction> {
    if pressure.is_none() && flow_rate.is_none() {
        trace!(component = %HYDRAULIC.component, "Readings missing, rule skipped");
        return None;
    }

    let pressure_anchors = thresholds.pressure_anchors();
    let flow_anchors = thresholds.flow_anchors();

    let pressure_low = pressure.filter(|p| *p < pressure_anchors.normal);
    let flow_low = flow_rate.filter(|f| *f < flow_anchors.normal);
    if pressure_low.is_none() && flow_low.is_none() {
        return None;
    }

    let pressure_factor = pressure_low.map_or(0.0, |p| pressure_anchors.probability(p));
    let flow_factor = flow_low.map_or(0.0, |f| flow_anchors.probability(f));
    let probability = pressure_factor.max(flow_factor);

    if probability <= thresholds.min_reportable_probability {
        debug!(
            pressure_factor,
            flow_factor,
            floor = thresholds.min_reportable_probability,
            "Hydraulic leak probability below reportable floor"
        );
        return None;
    }

    debug!(
        component = %HYDRAULIC.component,
        pressure_factor,
        flow_factor,
        probability,
        "Defect rule fired"
    );
    Some(build(probability, pressure_anchors, &HYDRAULIC))
}

fn build(probability: f64, anchors: RiskAnchors, labels: &RuleLabels) -> DefectPrediction {
    let action = if anchors.is_urgent(probability) {
        labels.urgent_action
    } else {
        labels.routine_action
    };

    DefectPrediction {
        component: labels.component,
        defect_type: labels.defect_type,
        probability: round_to_hundredths(probability),
        time_to_failure: TimeToFailure::Days(estimate_days(probability, anchors.baseline_days)),
        recommended_action: action.to_string(),
    }
}

fn routine_wear() -> DefectPrediction {
    DefectPrediction {
        component: Component::OverallEquipment,
        defect_type: DefectType::RoutineWear,
        probability: ROUTINE_WEAR_PROBABILITY,
        time_to_failure: TimeToFailure::AtLeastDays(ROUTINE_WEAR_MIN_DAYS),
        recommended_action: ROUTINE_WEAR_ACTION.to_string(),
    }
}

// Display precision of the emitted record; cutoff and TTF use the raw value.
fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nominal() -> SensorReading {
        SensorReading::new()
            .with_bearing_temp(50.0)
            .with_vibration_level(1.0)
            .with_pressure(3700.0)
            .with_flow_rate(130.0)
    }

    #[test]
    fn test_bearing_overheating_midpoint() {
        let predictions = DefectPredictor::default().predict(&SensorReading::new().with_bearing_temp(75.0));
        assert_eq!(predictions.len(), 1);
        let p = &predictions[0];
        assert_eq!(p.component, Component::MainBearing);
        assert_eq!(p.defect_type, DefectType::Overheating);
        assert_eq!(p.probability, 0.5);
        assert_eq!(p.time_to_failure, TimeToFailure::Days(18));
        assert_eq!(p.recommended_action, "inspect cooling immediately");
    }

    #[test]
    fn test_bearing_routine_action_below_cutoff() {
        // (65 - 55) / 40 = 0.25 <= 0.3
        let predictions = DefectPredictor::default().predict(&SensorReading::new().with_bearing_temp(65.0));
        assert_eq!(predictions[0].probability, 0.25);
        assert_eq!(predictions[0].recommended_action, "scheduled maintenance check");
        // 60 * (1 - 0.5) = 30
        assert_eq!(predictions[0].time_to_failure, TimeToFailure::Days(30));
    }

    #[test]
    fn test_trigger_is_strict() {
        let predictions = DefectPredictor::default().predict(&SensorReading::new().with_bearing_temp(55.0));
        assert_eq!(predictions, vec![routine_wear()]);
    }

    #[test]
    fn test_all_nominal_emits_routine_wear_only() {
        let predictions = DefectPredictor::default().predict(&nominal());
        assert_eq!(predictions.len(), 1);
        let p = &predictions[0];
        assert_eq!(p.component, Component::OverallEquipment);
        assert_eq!(p.defect_type, DefectType::RoutineWear);
        assert_eq!(p.probability, 0.05);
        assert_eq!(p.time_to_failure.to_string(), "90+ days");
        assert_eq!(p.recommended_action, "scheduled maintenance");
    }

    #[test]
    fn test_empty_reading_emits_routine_wear() {
        let predictions = DefectPredictor::default().predict(&SensorReading::new());
        assert_eq!(predictions, vec![routine_wear()]);
    }

    #[test]
    fn test_gearbox_cutoff() {
        // (5.0 - 2.5) / 5.5 = 0.4545 > 0.4
        let urgent = DefectPredictor::default().predict(&SensorReading::new().with_vibration_level(5.0));
        assert_eq!(urgent[0].component, Component::Gearbox);
        assert_eq!(urgent[0].probability, 0.45);
        assert_eq!(urgent[0].recommended_action, "check lubrication system");

        // (4.0 - 2.5) / 5.5 = 0.2727
        let routine = DefectPredictor::default().predict(&SensorReading::new().with_vibration_level(4.0));
        assert_eq!(routine[0].probability, 0.27);
        assert_eq!(routine[0].recommended_action, "routine monitoring");
    }

    #[test]
    fn test_hydraulic_takes_larger_factor() {
        // pressure: (2300 - 2100) / 500 = 0.4; flow: (80 - 75) / 20 = 0.25
        let reading = SensorReading::new().with_pressure(2100.0).with_flow_rate(75.0);
        let predictions = DefectPredictor::default().predict(&reading);
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].component, Component::HydraulicSystem);
        assert_eq!(predictions[0].defect_type, DefectType::Leakage);
        assert_eq!(predictions[0].probability, 0.4);
        assert_eq!(predictions[0].recommended_action, "inspect piping and seals");
    }

    #[test]
    fn test_hydraulic_low_flow_alone_triggers() {
        let reading = SensorReading::new().with_pressure(3700.0).with_flow_rate(65.0);
        let predictions = DefectPredictor::default().predict(&reading);
        assert_eq!(predictions[0].component, Component::HydraulicSystem);
        assert_eq!(predictions[0].probability, 0.75);
    }

    #[test]
    fn test_hydraulic_reportable_floor() {
        // (2300 - 2280) / 500 = 0.04, at or below 0.05: suppressed
        let reading = SensorReading::new().with_pressure(2280.0);
        let predictions = DefectPredictor::default().predict(&reading);
        assert_eq!(predictions, vec![routine_wear()]);

        // (2300 - 2250) / 500 = 0.1: reported with routine action
        let reading = SensorReading::new().with_pressure(2250.0);
        let predictions = DefectPredictor::default().predict(&reading);
        assert_eq!(predictions[0].probability, 0.1);
        assert_eq!(predictions[0].recommended_action, "routine monitoring");
    }

    #[test]
    fn test_hydraulic_severe_pressure_loss_saturates() {
        let reading = SensorReading::new().with_pressure(1500.0).with_flow_rate(130.0);
        let predictions = DefectPredictor::default().predict(&reading);
        assert_eq!(predictions[0].probability, 1.0);
        assert_eq!(predictions[0].time_to_failure, TimeToFailure::Days(0));
    }

    #[test]
    fn test_motor_rule_reads_acoustic_level() {
        // (95 - 85) / 25 = 0.4 > 0.25
        let predictions = DefectPredictor::default().predict(&SensorReading::new().with_acoustic_level(95.0));
        assert_eq!(predictions[0].component, Component::MainMotor);
        assert_eq!(predictions[0].defect_type, DefectType::BearingDamage);
        assert_eq!(predictions[0].probability, 0.4);
        assert_eq!(predictions[0].recommended_action, "schedule motor inspection");
    }

    #[test]
    fn test_rule_order_with_everything_firing() {
        let reading = SensorReading::new()
            .with_bearing_temp(90.0)
            .with_vibration_level(7.0)
            .with_pressure(1900.0)
            .with_flow_rate(62.0)
            .with_acoustic_level(105.0);
        let components: Vec<Component> = DefectPredictor::default()
            .predict(&reading)
            .iter()
            .map(|p| p.component)
            .collect();
        assert_eq!(
            components,
            vec![
                Component::MainBearing,
                Component::Gearbox,
                Component::HydraulicSystem,
                Component::MainMotor,
            ]
        );
    }

    #[test]
    fn test_missing_field_skips_only_its_rule() {
        let reading = SensorReading::new().with_vibration_level(6.0).with_acoustic_level(100.0);
        let components: Vec<Component> = DefectPredictor::default()
            .predict(&reading)
            .iter()
            .map(|p| p.component)
            .collect();
        assert_eq!(components, vec![Component::Gearbox, Component::MainMotor]);
    }

    #[test]
    fn test_custom_anchors_are_honored() {
        let mut modes = FailureModes::default();
        modes.main_bearing.normal_temp_c = 60.0;
        modes.main_bearing.danger_temp_c = 80.0;
        let predictor = DefectPredictor::new(modes);
        let predictions = predictor.predict(&SensorReading::new().with_bearing_temp(70.0));
        assert_eq!(predictions[0].probability, 0.5);

        let predictions = predictor.predict(&SensorReading::new().with_bearing_temp(58.0));
        assert_eq!(predictions, vec![routine_wear()]);
    }

    #[test]
    fn test_idempotent() {
        let reading = SensorReading::new().with_bearing_temp(81.3).with_flow_rate(71.0);
        let predictor = DefectPredictor::default();
        let first = serde_json::to_string(&predictor.predict(&reading)).expect("serialize");
        let second = serde_json::to_string(&predictor.predict(&reading)).expect("serialize");
        assert_eq!(first, second);
    }

    #[test]
    fn test_rounding_helper() {
        assert_eq!(round_to_hundredths(0.454_545), 0.45);
        assert_eq!(round_to_hundredths(0.272_727), 0.27);
        assert_eq!(round_to_hundredths(1.0), 1.0);
    }
}
