//! System-wide default constants.
//!
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Config Loading
// ============================================================================

/// Environment variable holding an explicit config path.
pub const CONFIG_ENV_VAR: &str = "TOPDRIVE_CONFIG";

/// Config file looked up in the working directory when the env var is unset.
pub const DEFAULT_CONFIG_FILE: &str = "monitor_config.toml";

/// Maximum edit distance for "did you mean" suggestions on unknown keys.
pub const MAX_KEY_SUGGESTION_DISTANCE: usize = 3;

// ============================================================================
// Defect Predictor
// ============================================================================

/// Probability reported by the routine-wear record when no rule fires.
pub const ROUTINE_WEAR_PROBABILITY: f64 = 0.05;

/// Lower bound (days) shown by the routine-wear record ("90+ days").
pub const ROUTINE_WEAR_MIN_DAYS: u32 = 90;

/// Recommended action on the routine-wear record.
pub const ROUTINE_WEAR_ACTION: &str = "scheduled maintenance";

// ============================================================================
// Polling
// ============================================================================

/// Dashboard refresh period (seconds).
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

// ============================================================================
// Simulation
// ============================================================================

/// Ticks over which the degrading scenario ramps from nominal to failure.
pub const DEGRADING_RAMP_TICKS: u32 = 120;

/// Per-field drop probability in the dropout scenario.
pub const DROPOUT_PROBABILITY: f64 = 0.1;

/// Share of nominal ticks that produce a loud (85-100 dB) acoustic sample.
pub const LOUD_SOUND_PROBABILITY: f64 = 0.2;
