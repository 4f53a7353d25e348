//! Processing Pipeline Module
//!
//! ```text
//! ReadingSource (mock timer | stdin JSON lines)
//!      │
//!      ▼
//! Monitor::process ──► Defect predictor ─┐
//!                  └─► Sound predictor ──┴─► PollReport ──► sink (log / JSON)
//!                                              │
//!                                              ▼
//!                                      NotificationQueue
//! ```
//!
//! Predictors are stateless; the only state carried between polls is the
//! notification queue owned by [`Monitor`].

mod monitor;
pub mod source;
pub mod processing_loop;

pub use monitor::{Monitor, PollReport, PredictorOutput};
pub use processing_loop::{LoopStats, ProcessingLoop};
pub use source::{MockSource, ReadingEvent, ReadingSource, StdinSource};
