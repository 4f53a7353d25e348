//! Defect prediction engine
//!
//! Maps an instantaneous [`SensorReading`] into probabilistic fault
//! predictions. Every predictor is a pure function of its input snapshot:
//! no state survives between calls, so concurrent callers need no locking.
//!
//! ## Predictors
//!
//! 1. **Defect** - bearing temperature, gearbox vibration, hydraulic leak,
//!    motor acoustics; always returns at least one record (routine-wear fallback)
//! 2. **Sound** - six drivetrain/rig components from a single acoustic level;
//!    may return an empty list

pub mod probability;
pub mod time_to_failure;
pub mod defect;
pub mod sound;

pub use probability::{decreasing_risk, increasing_risk, probability};
pub use time_to_failure::estimate_days;
pub use defect::DefectPredictor;
pub use sound::{predict_from_sound, SoundDefectPredictor};

use crate::types::{DefectPrediction, SensorReading};

/// Interpolation anchors and policy for one failure mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskAnchors {
    /// Probability is 0 at this value
    pub normal: f64,
    /// Probability is 1 at this value
    pub danger: f64,
    /// Remaining life at zero risk (days)
    pub baseline_days: u32,
    /// Strictly above this probability the urgent action applies
    pub urgent_cutoff: f64,
}

impl RiskAnchors {
    /// Probability of `value` between the two anchors, clamped to [0, 1].
    pub fn probability(&self, value: f64) -> f64 {
        probability(value, self.normal, self.danger)
    }

    pub fn is_urgent(&self, probability: f64) -> bool {
        probability > self.urgent_cutoff
    }
}

/// A predictor turns one reading snapshot into a list of predictions.
pub trait Predictor: Send + Sync {
    /// Predictor name for logs and reports (e.g. "Defect", "Sound")
    fn name(&self) -> &'static str;

    /// Evaluate the snapshot. Missing channels skip their rules.
    fn predict(&self, reading: &SensorReading) -> Vec<DefectPrediction>;
}

/// The defect predictor (with the given one) plus the acoustic predictor.
pub fn default_predictors(defect: DefectPredictor) -> Vec<Box<dyn Predictor>> {
    vec![Box::new(defect), Box::new(SoundDefectPredictor)]
}
