//! Reading source abstraction for the poll cycle.
//!
//! Provides a unified trait for pulling sensor snapshots from different
//! sources: the mock generator (timer-paced) and stdin (JSON lines).

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use crate::acquisition::MockGenerator;
use crate::types::SensorReading;

/// Events produced by a reading source.
#[derive(Debug)]
pub enum ReadingEvent {
    /// A snapshot is ready for prediction.
    Reading(SensorReading),
    /// Source reached end of data (EOF for stdin, tick limit for mock).
    Eof,
}

/// Trait abstracting where readings come from.
///
/// Implementations handle parsing and pacing internally. The processing loop
/// calls [`next_reading`](ReadingSource::next_reading) in a `select!` with
/// cancellation.
#[async_trait]
pub trait ReadingSource: Send {
    /// Wait for the next snapshot.
    ///
    /// Returns `ReadingEvent::Eof` when no more data is available.
    async fn next_reading(&mut self) -> Result<ReadingEvent>;

    /// Human-readable name for logging (e.g. "mock", "stdin").
    fn source_name(&self) -> &str;
}

// ============================================================================
// Mock Source (poll timer + generator)
// ============================================================================

/// Emits one generated reading per poll interval.
pub struct MockSource {
    generator: MockGenerator,
    interval: Duration,
    max_ticks: Option<u64>,
    emitted: u64,
}

impl MockSource {
    /// `max_ticks = None` runs until cancelled.
    pub fn new(generator: MockGenerator, interval: Duration, max_ticks: Option<u64>) -> Self {
        Self {
            generator,
            interval,
            max_ticks,
            emitted: 0,
        }
    }
}

#[async_trait]
impl ReadingSource for MockSource {
    async fn next_reading(&mut self) -> Result<ReadingEvent> {
        if self.max_ticks.is_some_and(|max| self.emitted >= max) {
            return Ok(ReadingEvent::Eof);
        }
        // First reading is immediate, later ones wait one poll interval
        if self.emitted > 0 && !self.interval.is_zero() {
            tokio::time::sleep(self.interval).await;
        }
        self.emitted += 1;
        Ok(ReadingEvent::Reading(self.generator.next_reading()))
    }

    fn source_name(&self) -> &str {
        "mock"
    }
}

// ============================================================================
// Stdin Source (JSON readings, one per line)
// ============================================================================

/// Reads JSON-formatted readings from stdin.
///
/// Used with the simulation binary:
/// `simulation --count 100 | topdrive-monitor --stdin`
pub struct StdinSource {
    reader: tokio::io::BufReader<tokio::io::Stdin>,
    line_buffer: String,
}

impl StdinSource {
    pub fn new() -> Self {
        Self {
            reader: tokio::io::BufReader::new(tokio::io::stdin()),
            line_buffer: String::with_capacity(512),
        }
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadingSource for StdinSource {
    async fn next_reading(&mut self) -> Result<ReadingEvent> {
        use tokio::io::AsyncBufReadExt;
        loop {
            self.line_buffer.clear();
            let bytes = self.reader.read_line(&mut self.line_buffer).await?;
            if bytes == 0 {
                return Ok(ReadingEvent::Eof);
            }
            let line = self.line_buffer.trim();
            if line.is_empty() {
                continue;
            }
            match parse_reading_line(line) {
                Ok(reading) => return Ok(ReadingEvent::Reading(reading)),
                Err(e) => {
                    tracing::warn!("[StdinSource] Failed to parse reading: {}", e);
                }
            }
        }
    }

    fn source_name(&self) -> &str {
        "stdin"
    }
}

/// Decode one JSON line. Bad field values become missing channels; only
/// structurally broken JSON (or a non-object) is an error.
pub fn parse_reading_line(line: &str) -> serde_json::Result<SensorReading> {
    serde_json::from_str(line)
}
