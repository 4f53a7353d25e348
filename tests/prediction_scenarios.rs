//! Prediction Scenario Tests
//!
//! End-to-end checks of the public prediction API: JSON reading in,
//! ordered prediction records out.

use topdrive_monitor::{
    estimate_days, predict_from_sound, probability, Component, DefectPredictor, DefectType,
    Monitor, MonitorConfig, Predictor, RiskBucket, SensorReading, SoundDefectPredictor,
    TimeToFailure,
};

const EPS: f64 = 1e-4;

fn reading(json: &str) -> SensorReading {
    serde_json::from_str(json).expect("valid reading JSON")
}

// ============================================================================
// Model properties
// ============================================================================

#[test]
fn probability_and_ttf_properties_hold_across_sweeps() {
    let anchors = [(55.0, 95.0), (2.5, 8.0), (85.0, 110.0)];
    for (normal, danger) in anchors {
        for i in 0..=400 {
            let v = normal - 20.0 + f64::from(i) * (danger - normal + 40.0) / 400.0;
            let p = probability(v, normal, danger);
            assert!((0.0..=1.0).contains(&p));
            if v <= normal {
                assert_eq!(p, 0.0);
            }
            if v >= danger {
                assert_eq!(p, 1.0);
            }
        }
    }
    for baseline in [30, 45, 60, 90] {
        assert_eq!(estimate_days(0.0, baseline), baseline);
        assert_eq!(estimate_days(1.0, baseline), 0);
    }
}

// ============================================================================
// Defect predictor scenarios
// ============================================================================

#[test]
fn bearing_at_75c_is_urgent_with_18_days() {
    let predictions = DefectPredictor::default().predict(&reading(r#"{"vibration":{"mainBearingTemp":75}}"#));
    assert_eq!(predictions.len(), 1);
    let p = &predictions[0];
    assert_eq!(p.component, Component::MainBearing);
    assert_eq!(p.defect_type, DefectType::Overheating);
    assert_eq!(p.probability, 0.5);
    assert_eq!(p.time_to_failure.to_string(), "18 days");
    assert_eq!(p.recommended_action, "inspect cooling immediately");
}

#[test]
fn all_nominal_reading_yields_only_routine_wear() {
    let r = reading(
        r#"{"vibration":{"mainBearingTemp":50,"level":1.0},"hydraulic":{"pressure":3700,"flowRate":130}}"#,
    );
    let predictions = DefectPredictor::default().predict(&r);
    assert_eq!(predictions.len(), 1);
    assert_eq!(predictions[0].component, Component::OverallEquipment);
    assert_eq!(predictions[0].defect_type, DefectType::RoutineWear);
    assert_eq!(predictions[0].probability, 0.05);
    assert_eq!(predictions[0].time_to_failure, TimeToFailure::AtLeastDays(90));
}

#[test]
fn non_numeric_fields_skip_their_rules_only() {
    let r = reading(
        r#"{"vibration":{"mainBearingTemp":"85","level":7.0},"hydraulic":{"pressure":null,"flowRate":true},"acoustic":{"level":{}}}"#,
    );
    let predictions = DefectPredictor::default().predict(&r);
    assert_eq!(predictions.len(), 1);
    assert_eq!(predictions[0].component, Component::Gearbox);
}

#[test]
fn null_or_scalar_section_skips_only_its_rules() {
    for json in [
        r#"{"vibration":{"mainBearingTemp":75},"hydraulic":null}"#,
        r#"{"vibration":{"mainBearingTemp":75},"acoustic":95}"#,
    ] {
        let predictions = DefectPredictor::default().predict(&reading(json));
        assert_eq!(predictions.len(), 1, "{json}");
        assert_eq!(predictions[0].component, Component::MainBearing);
        assert_eq!(predictions[0].probability, 0.5);
    }
}

#[test]
fn missing_sections_are_tolerated() {
    let predictions = DefectPredictor::default().predict(&reading("{}"));
    assert_eq!(predictions.len(), 1);
    assert_eq!(predictions[0].component, Component::OverallEquipment);
}

#[test]
fn prediction_json_shape() {
    let predictions = DefectPredictor::default().predict(&SensorReading::new().with_bearing_temp(75.0));
    let value = serde_json::to_value(&predictions[0]).expect("serialize");
    assert_eq!(value["component"], "Main Bearing");
    assert_eq!(value["defectType"], "Overheating");
    assert_eq!(value["probability"], 0.5);
    assert_eq!(value["timeToFailure"], "18 days");
    assert_eq!(value["recommendedAction"], "inspect cooling immediately");
}

#[test]
fn hydraulic_leak_uses_decreasing_orientation() {
    // Pressure 2000: (2300 - 2000) / 500 = 0.6
    let predictions = DefectPredictor::default().predict(&SensorReading::new().with_pressure(2000.0));
    assert_eq!(predictions[0].component, Component::HydraulicSystem);
    assert!((predictions[0].probability - 0.6).abs() < EPS);
    assert_eq!(predictions[0].recommended_action, "inspect piping and seals");
    // 90 * (1 - sqrt(0.6)) = 20.3
    assert_eq!(predictions[0].time_to_failure, TimeToFailure::Days(20));
}

// ============================================================================
// Sound predictor scenarios
// ============================================================================

#[test]
fn sound_at_95_db_yields_six_records() {
    let predictions = predict_from_sound(95.0);
    let expected = [
        (Component::DrillingShaft, 0.3333),
        (Component::TransmissionGears, 0.4286),
        (Component::ElectricMotor, 0.2),
        (Component::MudPump, 0.4643),
        (Component::Drawworks, 0.2667),
        (Component::ShaleShaker, 0.3438),
    ];
    assert_eq!(predictions.len(), expected.len());
    for (p, (component, probability)) in predictions.iter().zip(expected) {
        assert_eq!(p.component, component);
        assert!((p.probability - probability).abs() < EPS, "{component}");
    }
}

#[test]
fn sound_predictor_has_no_fallback() {
    assert!(predict_from_sound(75.0).is_empty());
    assert!(SoundDefectPredictor.predict(&SensorReading::new()).is_empty());
}

#[test]
fn predictors_are_idempotent() {
    let r = SensorReading::new()
        .with_bearing_temp(88.8)
        .with_vibration_level(6.1)
        .with_pressure(2050.0)
        .with_flow_rate(66.0)
        .with_acoustic_level(101.0);
    let defect = DefectPredictor::default();
    assert_eq!(
        serde_json::to_string(&defect.predict(&r)).expect("serialize"),
        serde_json::to_string(&defect.predict(&r)).expect("serialize")
    );
    assert_eq!(
        serde_json::to_string(&SoundDefectPredictor.predict(&r)).expect("serialize"),
        serde_json::to_string(&SoundDefectPredictor.predict(&r)).expect("serialize")
    );
}

// ============================================================================
// Monitor
// ============================================================================

#[test]
fn monitor_report_combines_predictors() {
    let mut monitor = Monitor::from_config(&MonitorConfig::default());
    let report = monitor.process(&SensorReading::new().with_bearing_temp(75.0).with_acoustic_level(101.0));

    let components: Vec<Component> = report.predictions().map(|p| p.component).collect();
    assert_eq!(components[0], Component::MainBearing);
    assert_eq!(components[1], Component::MainMotor);
    assert_eq!(components.len(), 2 + 6);
    // Highest is the mud pump at (101 - 82) / 28 = 0.679
    assert_eq!(report.highest_bucket, Some(RiskBucket::MediumHigh));
}
