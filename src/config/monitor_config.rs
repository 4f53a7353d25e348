//! Monitor Configuration - failure-mode bounds as operator-tunable TOML values
//!
//! Each struct implements `Default` with the calibrated values, so a missing
//! file or an empty table reproduces the stock prediction behavior exactly.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults::{CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE, DEFAULT_POLL_INTERVAL_SECS};
use crate::prediction::RiskAnchors;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for one top drive installation.
///
/// Load with `MonitorConfig::load()` which searches:
/// 1. `$TOPDRIVE_CONFIG` env var
/// 2. `./monitor_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Equipment identification
    #[serde(default)]
    pub equipment: EquipmentInfo,

    /// Normal/danger anchors per failure mode
    #[serde(default)]
    pub failure_modes: FailureModes,

    /// Poll cycle timing
    #[serde(default)]
    pub polling: PollingConfig,

    /// Alert opt-ins and recipient
    #[serde(default)]
    pub notifications: NotificationSettings,
}

impl MonitorConfig {
    /// Load configuration using the standard search order:
    /// 1. `$TOPDRIVE_CONFIG` environment variable
    /// 2. `./monitor_config.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        let env_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        Self::load_from_search_path(env_path.as_deref(), Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Search order behind [`MonitorConfig::load`] with the candidate paths
    /// supplied by the caller: `env_path`, then `local`, then defaults.
    ///
    /// A candidate that is missing or fails to load is logged and skipped.
    pub fn load_from_search_path(env_path: Option<&Path>, local: &Path) -> Self {
        if let Some(p) = env_path {
            if p.exists() {
                match Self::load_from_file(p) {
                    Ok(config) => {
                        info!(path = %p.display(), equipment = %config.equipment.name, "Loaded monitor config from {CONFIG_ENV_VAR}");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {CONFIG_ENV_VAR}, falling back");
                    }
                }
            } else {
                warn!(path = %p.display(), "{CONFIG_ENV_VAR} points to non-existent file, falling back");
            }
        }

        if local.exists() {
            match Self::load_from_file(local) {
                Ok(config) => {
                    info!(path = %local.display(), equipment = %config.equipment.name, "Loaded monitor config");
                    return config;
                }
                Err(e) => {
                    warn!(path = %local.display(), error = %e, "Failed to load local config, using defaults");
                }
            }
        }

        info!("No {DEFAULT_CONFIG_FILE} found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    ///
    /// Unknown keys are logged as warnings; validation failures are errors.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config = Self::from_toml_str(&contents)
            .map_err(|e| match e {
                ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
                other => other,
            })?;
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save config to a file (template generation).
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Monitor config saved");
        Ok(())
    }

    /// Validate anchors, baselines and cutoffs for internal consistency.
    ///
    /// Rules:
    /// - Rising-risk modes need normal < danger
    /// - Hydraulic anchors need normal > danger (low values are dangerous)
    /// - Baselines > 0, cutoffs within [0, 1], poll interval > 0
    /// - Recipient email, when set, must look like an address
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.failure_modes;
        let mut errors: Vec<String> = Vec::new();

        Self::check_rising(m.main_bearing.anchors(), "failure_modes.main_bearing", &mut errors);
        Self::check_rising(m.gearbox.anchors(), "failure_modes.gearbox", &mut errors);
        Self::check_rising(m.main_motor.anchors(), "failure_modes.main_motor", &mut errors);

        let h = &m.hydraulic;
        Self::check_falling(
            h.pressure_normal_psi,
            h.pressure_danger_psi,
            "failure_modes.hydraulic.pressure",
            &mut errors,
        );
        Self::check_falling(
            h.flow_normal_gpm,
            h.flow_danger_gpm,
            "failure_modes.hydraulic.flow",
            &mut errors,
        );
        Self::check_common(h.baseline_days, h.urgent_cutoff, "failure_modes.hydraulic", &mut errors);
        if !(0.0..=1.0).contains(&h.min_reportable_probability) {
            errors.push(format!(
                "failure_modes.hydraulic.min_reportable_probability ({}) must be within [0, 1]",
                h.min_reportable_probability
            ));
        }

        if self.polling.interval_secs == 0 {
            errors.push("polling.interval_secs must be > 0".to_string());
        }

        let email = self.notifications.email.trim();
        if !email.is_empty() && !crate::notification::is_valid_email(email) {
            errors.push(format!("notifications.email '{email}' is not a valid address"));
        }

        let (range_errors, range_warnings) = super::validation::validate_physical_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_rising(anchors: RiskAnchors, name: &str, errors: &mut Vec<String>) {
        let RiskAnchors { normal, danger, .. } = anchors;
        if !normal.is_finite() || !danger.is_finite() {
            errors.push(format!(
                "{name}: anchors must be finite (got normal={normal}, danger={danger})"
            ));
        } else if normal >= danger {
            errors.push(format!(
                "{name}: normal ({normal:.3}) must be below danger ({danger:.3})"
            ));
        }
        Self::check_common(anchors.baseline_days, anchors.urgent_cutoff, name, errors);
    }

    fn check_falling(normal: f64, danger: f64, name: &str, errors: &mut Vec<String>) {
        if !normal.is_finite() || !danger.is_finite() {
            errors.push(format!(
                "{name}: anchors must be finite (got normal={normal}, danger={danger})"
            ));
        } else if normal <= danger {
            errors.push(format!(
                "{name}: normal ({normal:.3}) must be above danger ({danger:.3})"
            ));
        }
    }

    fn check_common(baseline_days: u32, urgent_cutoff: f64, name: &str, errors: &mut Vec<String>) {
        if baseline_days == 0 {
            errors.push(format!("{name}.baseline_days must be > 0"));
        }
        // NaN fails `contains`, so this also rejects non-finite cutoffs
        if !(0.0..=1.0).contains(&urgent_cutoff) {
            errors.push(format!("{name}.urgent_cutoff ({urgent_cutoff}) must be within [0, 1]"));
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Equipment Info
// ============================================================================

/// Identification metadata; appears in logs and notification bodies only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentInfo {
    #[serde(default = "default_equipment_name")]
    pub name: String,

    #[serde(default)]
    pub rig: String,
}

fn default_equipment_name() -> String {
    "TOP-DRIVE".to_string()
}

impl Default for EquipmentInfo {
    fn default() -> Self {
        Self {
            name: default_equipment_name(),
            rig: String::new(),
        }
    }
}

// ============================================================================
// Failure Modes (master container)
// ============================================================================

/// Anchors for every reading-driven failure mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FailureModes {
    #[serde(default)]
    pub main_bearing: MainBearingThresholds,

    #[serde(default)]
    pub gearbox: GearboxThresholds,

    #[serde(default)]
    pub hydraulic: HydraulicThresholds,

    #[serde(default)]
    pub main_motor: MainMotorThresholds,
}

// ============================================================================
// Main Bearing Overheating
// ============================================================================

/// Main bearing temperature anchors (°C).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainBearingThresholds {
    /// Rule fires above this temperature; probability 0 at or below it.
    #[serde(default = "default_bearing_normal")]
    pub normal_temp_c: f64,

    /// Probability reaches 1 at this temperature.
    #[serde(default = "default_bearing_danger")]
    pub danger_temp_c: f64,

    /// Remaining life at zero risk (days).
    #[serde(default = "default_bearing_baseline")]
    pub baseline_days: u32,

    /// Above this probability the urgent action is recommended.
    #[serde(default = "default_bearing_cutoff")]
    pub urgent_cutoff: f64,
}

fn default_bearing_normal() -> f64 { 55.0 }
fn default_bearing_danger() -> f64 { 95.0 }
fn default_bearing_baseline() -> u32 { 60 }
fn default_bearing_cutoff() -> f64 { 0.3 }

impl Default for MainBearingThresholds {
    fn default() -> Self {
        Self {
            normal_temp_c: default_bearing_normal(),
            danger_temp_c: default_bearing_danger(),
            baseline_days: default_bearing_baseline(),
            urgent_cutoff: default_bearing_cutoff(),
        }
    }
}

impl MainBearingThresholds {
    pub const fn anchors(&self) -> RiskAnchors {
        RiskAnchors {
            normal: self.normal_temp_c,
            danger: self.danger_temp_c,
            baseline_days: self.baseline_days,
            urgent_cutoff: self.urgent_cutoff,
        }
    }
}

// ============================================================================
// Gearbox Wear
// ============================================================================

/// Gearbox vibration anchors (mm/s).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GearboxThresholds {
    #[serde(default = "default_gearbox_normal")]
    pub normal_vibration_mm_s: f64,

    #[serde(default = "default_gearbox_danger")]
    pub danger_vibration_mm_s: f64,

    #[serde(default = "default_gearbox_baseline")]
    pub baseline_days: u32,

    #[serde(default = "default_gearbox_cutoff")]
    pub urgent_cutoff: f64,
}

fn default_gearbox_normal() -> f64 { 2.5 }
fn default_gearbox_danger() -> f64 { 8.0 }
fn default_gearbox_baseline() -> u32 { 45 }
fn default_gearbox_cutoff() -> f64 { 0.4 }

impl Default for GearboxThresholds {
    fn default() -> Self {
        Self {
            normal_vibration_mm_s: default_gearbox_normal(),
            danger_vibration_mm_s: default_gearbox_danger(),
            baseline_days: default_gearbox_baseline(),
            urgent_cutoff: default_gearbox_cutoff(),
        }
    }
}

impl GearboxThresholds {
    pub const fn anchors(&self) -> RiskAnchors {
        RiskAnchors {
            normal: self.normal_vibration_mm_s,
            danger: self.danger_vibration_mm_s,
            baseline_days: self.baseline_days,
            urgent_cutoff: self.urgent_cutoff,
        }
    }
}

// ============================================================================
// Hydraulic Leakage
// ============================================================================

/// Hydraulic leak anchors. Low pressure or low flow is dangerous, so each
/// `normal` anchor sits above its `danger` anchor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HydraulicThresholds {
    /// Pressure factor is evaluated below this pressure (psi).
    #[serde(default = "default_pressure_normal")]
    pub pressure_normal_psi: f64,

    /// Pressure factor reaches 1 at or below this pressure (psi).
    #[serde(default = "default_pressure_danger")]
    pub pressure_danger_psi: f64,

    /// Flow factor is evaluated below this flow rate (gpm).
    #[serde(default = "default_flow_normal")]
    pub flow_normal_gpm: f64,

    /// Flow factor reaches 1 at or below this flow rate (gpm).
    #[serde(default = "default_flow_danger")]
    pub flow_danger_gpm: f64,

    #[serde(default = "default_hydraulic_baseline")]
    pub baseline_days: u32,

    #[serde(default = "default_hydraulic_cutoff")]
    pub urgent_cutoff: f64,

    /// Leak records at or below this probability are suppressed.
    #[serde(default = "default_min_reportable")]
    pub min_reportable_probability: f64,
}

fn default_pressure_normal() -> f64 { 2300.0 }
fn default_pressure_danger() -> f64 { 1800.0 }
fn default_flow_normal() -> f64 { 80.0 }
fn default_flow_danger() -> f64 { 60.0 }
fn default_hydraulic_baseline() -> u32 { 90 }
fn default_hydraulic_cutoff() -> f64 { 0.3 }
fn default_min_reportable() -> f64 { 0.05 }

impl Default for HydraulicThresholds {
    fn default() -> Self {
        Self {
            pressure_normal_psi: default_pressure_normal(),
            pressure_danger_psi: default_pressure_danger(),
            flow_normal_gpm: default_flow_normal(),
            flow_danger_gpm: default_flow_danger(),
            baseline_days: default_hydraulic_baseline(),
            urgent_cutoff: default_hydraulic_cutoff(),
            min_reportable_probability: default_min_reportable(),
        }
    }
}

impl HydraulicThresholds {
    pub const fn pressure_anchors(&self) -> RiskAnchors {
        RiskAnchors {
            normal: self.pressure_normal_psi,
            danger: self.pressure_danger_psi,
            baseline_days: self.baseline_days,
            urgent_cutoff: self.urgent_cutoff,
        }
    }

    pub const fn flow_anchors(&self) -> RiskAnchors {
        RiskAnchors {
            normal: self.flow_normal_gpm,
            danger: self.flow_danger_gpm,
            baseline_days: self.baseline_days,
            urgent_cutoff: self.urgent_cutoff,
        }
    }
}

// ============================================================================
// Main Motor Bearing Damage (acoustic)
// ============================================================================

/// Main motor acoustic anchors (dB).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainMotorThresholds {
    #[serde(default = "default_motor_normal")]
    pub normal_sound_db: f64,

    #[serde(default = "default_motor_danger")]
    pub danger_sound_db: f64,

    #[serde(default = "default_motor_baseline")]
    pub baseline_days: u32,

    #[serde(default = "default_motor_cutoff")]
    pub urgent_cutoff: f64,
}

fn default_motor_normal() -> f64 { 85.0 }
fn default_motor_danger() -> f64 { 110.0 }
fn default_motor_baseline() -> u32 { 30 }
fn default_motor_cutoff() -> f64 { 0.25 }

impl Default for MainMotorThresholds {
    fn default() -> Self {
        Self {
            normal_sound_db: default_motor_normal(),
            danger_sound_db: default_motor_danger(),
            baseline_days: default_motor_baseline(),
            urgent_cutoff: default_motor_cutoff(),
        }
    }
}

impl MainMotorThresholds {
    pub const fn anchors(&self) -> RiskAnchors {
        RiskAnchors {
            normal: self.normal_sound_db,
            danger: self.danger_sound_db,
            baseline_days: self.baseline_days,
            urgent_cutoff: self.urgent_cutoff,
        }
    }
}

// ============================================================================
// Polling
// ============================================================================

/// Poll cycle timing for the monitor loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Seconds between reading snapshots.
    ///
    /// Can be overridden by the `--interval-secs` CLI flag.
    #[serde(default = "default_poll_interval")]
    pub interval_secs: u64,
}

fn default_poll_interval() -> u64 { DEFAULT_POLL_INTERVAL_SECS }

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_poll_interval(),
        }
    }
}

// ============================================================================
// Notification Settings
// ============================================================================

/// Which alerts the operator wants, and where to send them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Recipient address; empty disables notification queuing.
    #[serde(default)]
    pub email: String,

    #[serde(default = "default_true")]
    pub sound_alerts: bool,

    #[serde(default = "default_true")]
    pub temperature_alerts: bool,

    #[serde(default = "default_true")]
    pub vibration_alerts: bool,

    #[serde(default = "default_true")]
    pub hydraulic_alerts: bool,

    /// Suppress everything that is not critical.
    #[serde(default)]
    pub critical_only: bool,
}

fn default_true() -> bool { true }

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email: String::new(),
            sound_alerts: true,
            temperature_alerts: true,
            vibration_alerts: true,
            hydraulic_alerts: true,
            critical_only: false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
