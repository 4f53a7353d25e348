//! Top Drive Monitor: defect prediction for drilling top drives
//!
//! Maps instantaneous sensor readings (bearing temperature, vibration,
//! hydraulic pressure/flow, acoustic level) into probabilistic fault
//! predictions with a time-to-failure estimate and a recommended action.
//!
//! ## Architecture
//!
//! - **Prediction**: pure threshold-interpolation predictors (defect + sound)
//! - **Config**: operator-tunable failure-mode anchors from TOML
//! - **Notification**: alert routing policy and a caller-owned queue
//! - **Acquisition / Pipeline**: mock readings, stdin ingestion, poll loop

pub mod config;
pub mod types;
pub mod prediction;
pub mod notification;
pub mod acquisition;
pub mod pipeline;

// Re-export configuration
pub use config::{ConfigError, MonitorConfig};

// Re-export commonly used types
pub use types::{
    AlertCategory, AlertSeverity, Component, DefectPrediction, DefectType, RiskBucket,
    SensorReading, SoundLevelStatus, TimeToFailure,
};

// Re-export predictors
pub use prediction::{
    default_predictors, estimate_days, predict_from_sound, probability, DefectPredictor,
    Predictor, RiskAnchors, SoundDefectPredictor,
};

// Re-export pipeline
pub use pipeline::{LoopStats, Monitor, PollReport, ProcessingLoop};
