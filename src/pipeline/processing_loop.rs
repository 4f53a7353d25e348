//! Poll loop shared across all input modes.
//!
//! Pulls readings from a [`ReadingSource`], runs them through the
//! [`Monitor`] and hands each report to a sink, until the source ends or the
//! cancellation token fires. Queued notices are drained into the report after
//! every poll, so the queue never outlives a cycle.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::monitor::{Monitor, PollReport};
use super::source::{ReadingEvent, ReadingSource};
use crate::types::RiskBucket;

/// Counters reported when the loop exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub polls: u64,
    pub predictions: u64,
    pub notifications_queued: u64,
    /// Polls whose highest-risk prediction landed in the High bucket
    pub high_risk_polls: u64,
}

/// Owns the monitor for the lifetime of one run.
pub struct ProcessingLoop {
    monitor: Monitor,
    cancel_token: CancellationToken,
}

impl ProcessingLoop {
    pub fn new(monitor: Monitor, cancel_token: CancellationToken) -> Self {
        Self { monitor, cancel_token }
    }

    /// Run with the default sink, which logs a summary of every poll.
    pub async fn run<S: ReadingSource>(self, source: &mut S) -> LoopStats {
        self.run_with(source, |report| log_report(report)).await.0
    }

    /// Run until EOF or cancellation, passing every report to `sink`.
    ///
    /// Returns the final statistics and the monitor. Every notice has already
    /// been handed to `sink` through [`PollReport::notifications`].
    pub async fn run_with<S, F>(mut self, source: &mut S, mut sink: F) -> (LoopStats, Monitor)
    where
        S: ReadingSource,
        F: FnMut(&PollReport),
    {
        let mut stats = LoopStats::default();

        info!("Polling readings from {}...", source.source_name());

        loop {
            let event = tokio::select! {
                // Cancellation wins over a reading that is ready at the same time
                biased;
                () = self.cancel_token.cancelled() => {
                    info!("[ProcessingLoop] Shutdown signal received");
                    break;
                }
                result = source.next_reading() => {
                    match result {
                        Ok(ev) => ev,
                        Err(e) => {
                            warn!("[ProcessingLoop] Source error: {}", e);
                            break;
                        }
                    }
                }
            };

            let reading = match event {
                ReadingEvent::Reading(r) => r,
                ReadingEvent::Eof => {
                    info!("[ProcessingLoop] Source reached end ({} polls processed)", stats.polls);
                    break;
                }
            };

            let mut report = self.monitor.process(&reading);
            report.notifications = self.monitor.queue_mut().drain();

            stats.polls += 1;
            stats.predictions += report.prediction_count() as u64;
            stats.notifications_queued += report.notifications_queued as u64;
            if report.highest_bucket == Some(RiskBucket::High) {
                stats.high_risk_polls += 1;
            }

            sink(&report);
        }

        info!(
            polls = stats.polls,
            predictions = stats.predictions,
            notifications = stats.notifications_queued,
            high_risk_polls = stats.high_risk_polls,
            "Monitoring finished"
        );

        (stats, self.monitor)
    }
}

/// Log a one-line summary per poll, plus every non-low prediction.
pub fn log_report(report: &PollReport) {
    match &report.highest {
        Some(top) => info!(
            predictions = report.prediction_count(),
            highest = %top.component,
            probability = top.probability,
            bucket = %top.risk_bucket(),
            "Poll complete"
        ),
        None => info!("Poll complete, no predictions"),
    }
    for notice in &report.notifications {
        info!(to = %notice.email, "Notification ready: {}", notice.subject);
    }
    for prediction in report.predictions() {
        if prediction.risk_bucket() == RiskBucket::Low {
            debug!("   {}", prediction);
        } else {
            info!("   {}", prediction);
        }
    }
}
