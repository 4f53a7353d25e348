//! Poll-cycle orchestrator: runs every predictor on a snapshot, summarises
//! the result and routes alert-worthy predictions into the notification queue.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::MonitorConfig;
use crate::notification::{should_notify, MalfunctionNotice, NotificationQueue, NotificationSettings};
use crate::prediction::{default_predictors, DefectPredictor, Predictor};
use crate::types::{AlertCategory, AlertSeverity, DefectPrediction, RiskBucket, SensorReading};

/// Predictions from one predictor in one poll.
#[derive(Debug, Clone, Serialize)]
pub struct PredictorOutput {
    pub source: &'static str,
    pub predictions: Vec<DefectPrediction>,
}

/// Everything a dashboard needs to render one poll.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollReport {
    pub timestamp: DateTime<Utc>,
    pub outputs: Vec<PredictorOutput>,
    /// Highest-probability prediction across all predictors
    pub highest: Option<DefectPrediction>,
    pub highest_bucket: Option<RiskBucket>,
    pub notifications_queued: usize,
    /// Notices drained from the queue after this poll, for the sink to deliver
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notifications: Vec<MalfunctionNotice>,
}

impl PollReport {
    pub fn prediction_count(&self) -> usize {
        self.outputs.iter().map(|o| o.predictions.len()).sum()
    }

    pub fn predictions(&self) -> impl Iterator<Item = &DefectPrediction> {
        self.outputs.iter().flat_map(|o| o.predictions.iter())
    }
}

/// Owns the predictors and the caller-side notification queue.
pub struct Monitor {
    predictors: Vec<Box<dyn Predictor>>,
    settings: NotificationSettings,
    equipment: String,
    queue: NotificationQueue,
}

impl Monitor {
    /// Defect + sound predictors with the configured anchors and alert settings.
    pub fn from_config(config: &MonitorConfig) -> Self {
        Self::new(
            default_predictors(DefectPredictor::from_config(config)),
            config.notifications.clone(),
            config.equipment.name.clone(),
        )
    }

    pub fn new(predictors: Vec<Box<dyn Predictor>>, settings: NotificationSettings, equipment: String) -> Self {
        Self {
            predictors,
            settings,
            equipment,
            queue: NotificationQueue::new(),
        }
    }

    pub fn predictor_names(&self) -> Vec<&'static str> {
        self.predictors.iter().map(|p| p.name()).collect()
    }

    pub fn queue(&self) -> &NotificationQueue {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut NotificationQueue {
        &mut self.queue
    }

    /// Evaluate one snapshot.
    pub fn process(&mut self, reading: &SensorReading) -> PollReport {
        let outputs: Vec<PredictorOutput> = self
            .predictors
            .iter()
            .map(|p| PredictorOutput {
                source: p.name(),
                predictions: p.predict(reading),
            })
            .collect();

        let highest = outputs
            .iter()
            .flat_map(|o| o.predictions.iter())
            .max_by(|a, b| a.probability.total_cmp(&b.probability))
            .cloned();
        let highest_bucket = highest.as_ref().map(DefectPrediction::risk_bucket);

        let mut notifications_queued = 0;
        for prediction in outputs.iter().flat_map(|o| o.predictions.iter()) {
            if self.route(prediction) {
                notifications_queued += 1;
            }
        }

        PollReport {
            timestamp: Utc::now(),
            outputs,
            highest,
            highest_bucket,
            notifications_queued,
            notifications: Vec::new(),
        }
    }

    /// Queue a notice for `prediction` if the settings allow it.
    ///
    /// Info-level predictions never notify; the routine-wear record has no
    /// category and never notifies either.
    fn route(&mut self, prediction: &DefectPrediction) -> bool {
        if self.settings.email.trim().is_empty() {
            return false;
        }
        let Some(category) = AlertCategory::for_component(prediction.component) else {
            return false;
        };
        let severity = AlertSeverity::for_prediction(prediction);
        if severity < AlertSeverity::Warning || !should_notify(category, severity, &self.settings) {
            debug!(component = %prediction.component, %category, %severity, "Notification suppressed");
            return false;
        }

        let details = format!(
            "{} on {}: {:.0}% probability, estimated time to failure {}. Recommended action: {}",
            prediction.defect_type,
            self.equipment,
            prediction.probability * 100.0,
            prediction.time_to_failure,
            prediction.recommended_action
        );
        match MalfunctionNotice::new(&self.settings.email, prediction.component, &details, severity) {
            Ok(notice) => {
                self.queue.push(notice);
                true
            }
            Err(e) => {
                warn!(error = %e, "Could not compose malfunction notice");
                false
            }
        }
    }
}
