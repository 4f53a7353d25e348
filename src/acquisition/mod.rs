//! Sensor data acquisition module
//!
//! Produces reading snapshots for the pipeline. Only a mock generator exists;
//! real telemetry adapters plug in as further [`ReadingSource`](crate::pipeline::ReadingSource)s.

pub mod mock;

pub use mock::{MockGenerator, Scenario};
