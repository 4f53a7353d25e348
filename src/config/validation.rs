//! Config validation: unknown-key detection with Levenshtein suggestions
//! and physical range checks.
//!
//! The raw TOML is first walked as a `toml::Value` tree and compared against
//! the known key set, emitting "did you mean?" warnings. Typed deserialization
//! happens afterwards. Warnings never reject a config.

use std::collections::HashSet;
use std::fmt;

use super::defaults::MAX_KEY_SUGGESTION_DISTANCE;
use super::MonitorConfig;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Every valid dotted key path of `MonitorConfig`.
///
/// Must be kept in step with the structs in `monitor_config.rs`.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [equipment]
        "equipment",
        "equipment.name",
        "equipment.rig",
        // [failure_modes]
        "failure_modes",
        "failure_modes.main_bearing",
        "failure_modes.main_bearing.normal_temp_c",
        "failure_modes.main_bearing.danger_temp_c",
        "failure_modes.main_bearing.baseline_days",
        "failure_modes.main_bearing.urgent_cutoff",
        "failure_modes.gearbox",
        "failure_modes.gearbox.normal_vibration_mm_s",
        "failure_modes.gearbox.danger_vibration_mm_s",
        "failure_modes.gearbox.baseline_days",
        "failure_modes.gearbox.urgent_cutoff",
        "failure_modes.hydraulic",
        "failure_modes.hydraulic.pressure_normal_psi",
        "failure_modes.hydraulic.pressure_danger_psi",
        "failure_modes.hydraulic.flow_normal_gpm",
        "failure_modes.hydraulic.flow_danger_gpm",
        "failure_modes.hydraulic.baseline_days",
        "failure_modes.hydraulic.urgent_cutoff",
        "failure_modes.hydraulic.min_reportable_probability",
        "failure_modes.main_motor",
        "failure_modes.main_motor.normal_sound_db",
        "failure_modes.main_motor.danger_sound_db",
        "failure_modes.main_motor.baseline_days",
        "failure_modes.main_motor.urgent_cutoff",
        // [polling]
        "polling",
        "polling.interval_secs",
        // [notifications]
        "notifications",
        "notifications.email",
        "notifications.sound_alerts",
        "notifications.temperature_alerts",
        "notifications.vibration_alerts",
        "notifications.hydraulic_alerts",
        "notifications.critical_only",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Collect the dotted path of every key in a `toml::Value` tree.
///
/// `{ a = { b = 1, c = 2 } }` yields `["a", "a.b", "a.c"]`.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let Some(table) = value.as_table() else {
        return Vec::new();
    };
    let mut keys = Vec::new();
    for (k, v) in table {
        let path = if prefix.is_empty() {
            k.clone()
        } else {
            format!("{prefix}.{k}")
        };
        if v.is_table() {
            keys.push(path.clone());
            keys.extend(walk_toml_keys(v, &path));
        } else {
            keys.push(path);
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Edit distance between two strings, two-row dynamic programming.
fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(substitution);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Closest known key within `MAX_KEY_SUGGESTION_DISTANCE` edits, if any.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|k| (*k, levenshtein(unknown, k)))
        .filter(|(_, dist)| *dist <= MAX_KEY_SUGGESTION_DISTANCE)
        // Tie-break on the key so the suggestion does not depend on hash order
        .min_by(|(ka, da), (kb, db)| da.cmp(db).then_with(|| ka.cmp(kb)))
        .map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Warnings for every unknown key in a raw TOML document.
///
/// Parse errors yield no warnings here; serde reports them afterwards.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Physical Range Validation
// ============================================================================

/// Physical range checks on a parsed config.
///
/// Returns (errors, warnings): errors are impossible values, warnings are
/// values outside what a top drive normally sees.
pub fn validate_physical_ranges(config: &MonitorConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let m = &config.failure_modes;

    // Pressures and flows below zero cannot be measured
    if m.hydraulic.pressure_danger_psi < 0.0 {
        errors.push(format!(
            "failure_modes.hydraulic.pressure_danger_psi = {:.1} cannot be negative",
            m.hydraulic.pressure_danger_psi
        ));
    }
    if m.hydraulic.flow_danger_gpm < 0.0 {
        errors.push(format!(
            "failure_modes.hydraulic.flow_danger_gpm = {:.1} cannot be negative",
            m.hydraulic.flow_danger_gpm
        ));
    }
    if m.gearbox.normal_vibration_mm_s < 0.0 {
        errors.push(format!(
            "failure_modes.gearbox.normal_vibration_mm_s = {:.2} cannot be negative",
            m.gearbox.normal_vibration_mm_s
        ));
    }

    let mut suspicious = |field: &str, value: f64, lo: f64, hi: f64, unit: &str| {
        if value < lo || value > hi {
            warnings.push(ValidationWarning {
                field: field.to_string(),
                message: format!("{field} = {value:.1} is outside typical range ({lo}-{hi} {unit})"),
                suggestion: None,
            });
        }
    };

    suspicious("failure_modes.main_bearing.danger_temp_c", m.main_bearing.danger_temp_c, 30.0, 150.0, "°C");
    suspicious("failure_modes.gearbox.danger_vibration_mm_s", m.gearbox.danger_vibration_mm_s, 0.5, 50.0, "mm/s");
    suspicious("failure_modes.hydraulic.pressure_normal_psi", m.hydraulic.pressure_normal_psi, 500.0, 10_000.0, "psi");
    suspicious("failure_modes.hydraulic.flow_normal_gpm", m.hydraulic.flow_normal_gpm, 5.0, 500.0, "gpm");
    suspicious("failure_modes.main_motor.danger_sound_db", m.main_motor.danger_sound_db, 40.0, 140.0, "dB");

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_basics() {
        assert_eq!(levenshtein("cutoff", "cutoff"), 0);
        assert_eq!(levenshtein("cutof", "cutoff"), 1);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let value: toml::Value = "[failure_modes.gearbox]\nbaseline_days = 40\n"
            .parse()
            .expect("valid TOML");
        let keys = walk_toml_keys(&value, "");
        assert!(keys.contains(&"failure_modes".to_string()));
        assert!(keys.contains(&"failure_modes.gearbox".to_string()));
        assert!(keys.contains(&"failure_modes.gearbox.baseline_days".to_string()));
    }

    #[test]
    fn test_typo_key_produces_warning_with_suggestion() {
        let warnings = validate_unknown_keys("[failure_modes.gearbox]\nurgent_cutof = 0.5\n");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "failure_modes.gearbox.urgent_cutof");
        assert_eq!(
            warnings[0].suggestion.as_deref(),
            Some("failure_modes.gearbox.urgent_cutoff")
        );
        assert!(warnings[0].to_string().contains("did you mean"));
    }

    #[test]
    fn test_unknown_section_without_close_match() {
        let warnings = validate_unknown_keys("[telemetry]\nendpoint = \"x\"\n");
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.suggestion.is_none()));
    }

    #[test]
    fn test_full_default_config_has_no_unknown_keys() {
        let toml_str = MonitorConfig::default().to_toml().expect("serialize defaults");
        let warnings = validate_unknown_keys(&toml_str);
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn test_physical_ranges_defaults_clean() {
        let (errors, warnings) = validate_physical_ranges(&MonitorConfig::default());
        assert!(errors.is_empty(), "{errors:?}");
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn test_physical_ranges_flag_negative_and_suspicious_values() {
        let mut config = MonitorConfig::default();
        config.failure_modes.hydraulic.flow_danger_gpm = -5.0;
        config.failure_modes.main_motor.danger_sound_db = 180.0;
        let (errors, warnings) = validate_physical_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("flow_danger_gpm")));
        assert!(warnings.iter().any(|w| w.field.contains("danger_sound_db")));
    }
}
