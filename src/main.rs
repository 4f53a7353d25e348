//! Top Drive Monitor
//!
//! Polls sensor readings, runs the defect and sound predictors on each
//! snapshot and reports the predictions.
//!
//! # Usage
//!
//! ```bash
//! # Mock readings every 5 seconds
//! topdrive-monitor
//!
//! # Reproducible degrading run, 200 polls, no delay, JSON reports on stdout
//! topdrive-monitor --scenario degrading --seed 7 --ticks 200 --interval-secs 0 --json
//!
//! # Readings from the simulation binary
//! simulation --count 100 | topdrive-monitor --stdin
//!
//! # One-shot prediction
//! echo '{"vibration":{"mainBearingTemp":75}}' | topdrive-monitor predict --input -
//! ```
//!
//! # Environment Variables
//!
//! - `TOPDRIVE_CONFIG`: Path to the monitor config TOML
//! - `RUST_LOG`: Logging level (default: info)

use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;

use topdrive_monitor::acquisition::{MockGenerator, Scenario};
use topdrive_monitor::notification::{MalfunctionNotice, NotificationQueue};
use topdrive_monitor::pipeline::processing_loop::log_report;
use topdrive_monitor::pipeline::{MockSource, ReadingSource, StdinSource};
use topdrive_monitor::{
    predict_from_sound, Monitor, MonitorConfig, PollReport, ProcessingLoop, SensorReading,
    SoundLevelStatus,
};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "topdrive-monitor")]
#[command(about = "Top drive defect prediction monitor")]
#[command(version)]
struct CliArgs {
    /// Config file (skips the TOPDRIVE_CONFIG / ./monitor_config.toml search)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read JSON readings from stdin instead of the mock generator
    /// Use with: simulation | topdrive-monitor --stdin
    #[arg(long)]
    stdin: bool,

    /// Stop after this many polls (mock source only)
    #[arg(long)]
    ticks: Option<u64>,

    /// Override the poll interval from the config (0 = no delay)
    #[arg(long)]
    interval_secs: Option<u64>,

    /// Random seed for the mock generator
    #[arg(long)]
    seed: Option<u64>,

    /// Mock data scenario
    #[arg(long, value_enum, default_value_t = Scenario::Nominal)]
    scenario: Scenario,

    /// Print reports as JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Predict defects for a single JSON reading
    Predict {
        /// Reading file, or "-" for stdin
        #[arg(long, default_value = "-")]
        input: String,
    },

    /// Run only the sound predictor for an acoustic level
    Sound {
        /// Sound level in dB
        #[arg(long, allow_negative_numbers = true)]
        level: f64,
    },

    /// Print the effective configuration as TOML
    ShowConfig,

    /// Compose and queue a test notification
    TestNotification {
        /// Recipient (defaults to notifications.email from the config)
        #[arg(long)]
        email: Option<String>,
    },
}

// ============================================================================
// Subcommands
// ============================================================================

fn load_config(path: Option<&PathBuf>) -> Result<MonitorConfig> {
    match path {
        Some(p) => MonitorConfig::load_from_file(p)
            .with_context(|| format!("Failed to load config from {}", p.display())),
        None => Ok(MonitorConfig::load()),
    }
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read reading from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {input}"))
    }
}

fn run_predict(config: &MonitorConfig, input: &str, json: bool) -> Result<()> {
    let raw = read_input(input)?;
    let reading: SensorReading =
        serde_json::from_str(&raw).context("Input is not a JSON sensor reading")?;

    let mut monitor = Monitor::from_config(config);
    let report = monitor.process(&reading);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn run_sound(level: f64, json: bool) -> Result<()> {
    let predictions = predict_from_sound(level);
    if json {
        println!("{}", serde_json::to_string_pretty(&predictions)?);
        return Ok(());
    }

    let status = SoundLevelStatus::from_level(level);
    let flag = if SoundLevelStatus::is_abnormal(level) { " (abnormal)" } else { "" };
    println!("Sound level {level:.1} dB: {status}{flag}");
    if predictions.is_empty() {
        println!("  No acoustic defects predicted");
    }
    for p in &predictions {
        println!("  {p}");
    }
    Ok(())
}

fn run_test_notification(config: &MonitorConfig, email: Option<&str>) -> Result<()> {
    let email = email.unwrap_or(&config.notifications.email);
    let notice = MalfunctionNotice::test(email).context("Cannot send test notification")?;
    let mut queue = NotificationQueue::new();
    queue.push(notice);
    for notice in queue.drain() {
        println!("{}", serde_json::to_string_pretty(&notice)?);
    }
    Ok(())
}

fn print_report(report: &PollReport) {
    for output in &report.outputs {
        println!("{} predictor:", output.source);
        if output.predictions.is_empty() {
            println!("  (none)");
        }
        for p in &output.predictions {
            println!("  [{}] {}", p.risk_bucket().color(), p);
        }
    }
}

// ============================================================================
// Poll Loop
// ============================================================================

async fn run_monitor<S: ReadingSource>(
    monitor: Monitor,
    source: &mut S,
    json: bool,
    cancel_token: CancellationToken,
) -> Result<()> {
    let processing_loop = ProcessingLoop::new(monitor, cancel_token);
    let stats = if json {
        let (stats, _) = processing_loop
            .run_with(source, |report| match serde_json::to_string(report) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::warn!("Failed to serialize report: {}", e),
            })
            .await;
        stats
    } else {
        processing_loop
            .run_with(source, |report| log_report(report))
            .await
            .0
    };

    info!(
        "Polls: {} | Predictions: {} | Notifications queued: {}",
        stats.polls, stats.predictions, stats.notifications_queued
    );
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let mut config = load_config(args.config.as_ref())?;

    match &args.command {
        Some(SubCommand::Predict { input }) => return run_predict(&config, input, args.json),
        Some(SubCommand::Sound { level }) => return run_sound(*level, args.json),
        Some(SubCommand::ShowConfig) => {
            print!("{}", config.to_toml().context("Failed to render config")?);
            return Ok(());
        }
        Some(SubCommand::TestNotification { email }) => {
            return run_test_notification(&config, email.as_deref());
        }
        None => {}
    }

    if let Some(secs) = args.interval_secs {
        config.polling.interval_secs = secs;
    }

    info!(
        "Equipment: {} | Rig: {} | Poll interval: {}s",
        config.equipment.name,
        if config.equipment.rig.is_empty() {
            "unset"
        } else {
            &config.equipment.rig
        },
        config.polling.interval_secs
    );

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received Ctrl+C, shutting down...");
        shutdown_token.cancel();
    });

    let monitor = Monitor::from_config(&config);

    if args.stdin {
        info!("Input: stdin (JSON readings)");
        run_monitor(monitor, &mut StdinSource::new(), args.json, cancel_token).await?;
    } else {
        info!("Input: mock generator ({} scenario)", args.scenario);
        let generator = MockGenerator::new(args.scenario, args.seed);
        let mut source = MockSource::new(
            generator,
            Duration::from_secs(config.polling.interval_secs),
            args.ticks,
        );
        run_monitor(monitor, &mut source, args.json, cancel_token).await?;
    }

    info!("Top drive monitor shutdown complete");
    Ok(())
}
