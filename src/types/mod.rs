//! Shared data structures for top drive defect prediction
//!
//! - SensorReading: instantaneous snapshot from the acquisition layer
//! - DefectPrediction: one probabilistic fault estimate per (component, defect type)
//! - RiskBucket / SoundLevelStatus: presentation buckets shared with the dashboard
//! - AlertCategory / AlertSeverity: notification routing keys

mod reading;
mod prediction;
mod risk;
mod alert;

pub use reading::*;
pub use prediction::*;
pub use risk::*;
pub use alert::*;
