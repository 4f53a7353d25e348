//! Top Drive Sensor Simulation
//!
//! Streams mock sensor readings as JSON lines for feeding the monitor.
//!
//! # Usage
//! ```bash
//! ./simulation --count 200 --scenario degrading --seed 7 | ./topdrive-monitor --stdin
//! ```

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use topdrive_monitor::acquisition::{MockGenerator, Scenario};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "topdrive-simulation")]
#[command(about = "Mock top drive sensor stream (JSON lines on stdout)")]
#[command(version)]
struct Args {
    /// Number of readings to emit (0 = until interrupted)
    #[arg(short, long, default_value = "100")]
    count: u64,

    /// Delay between readings in milliseconds
    #[arg(short, long, default_value = "0")]
    interval_ms: u64,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Data scenario to simulate
    #[arg(long, value_enum, default_value_t = Scenario::Nominal)]
    scenario: Scenario,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut generator = MockGenerator::new(args.scenario, args.seed);
    let delay = Duration::from_millis(args.interval_ms);

    info!(
        scenario = %args.scenario,
        count = args.count,
        seed = ?args.seed,
        "Starting sensor simulation"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut emitted = 0u64;

    while args.count == 0 || emitted < args.count {
        let reading = generator.next_reading();
        let line = serde_json::to_string(&reading).context("Failed to serialize reading")?;
        if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            // Downstream closed the pipe
            if e.kind() == io::ErrorKind::BrokenPipe {
                break;
            }
            return Err(e).context("Failed to write reading");
        }
        emitted += 1;

        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    info!(emitted, "Simulation complete");
    Ok(())
}
