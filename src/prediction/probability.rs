//! Risk probability from a measured value and two threshold anchors.
//!
//! The anchor order selects the risk direction:
//! - `normal <= danger`: risk rises with the value (temperature, vibration, sound)
//! - `normal > danger`: risk rises as the value falls (hydraulic pressure, flow)
//!
//! Between the anchors the probability is linear:
//! `|value - normal| / |danger - normal|`.

/// Probability in [0, 1] for `value`, with the direction chosen by anchor order.
pub fn probability(value: f64, normal: f64, danger: f64) -> f64 {
    if normal > danger {
        decreasing_risk(value, normal, danger)
    } else {
        increasing_risk(value, normal, danger)
    }
}

/// Rising risk: 0 at or below `normal`, 1 at or above `danger`.
///
/// Expects `normal <= danger`. A NaN value carries no evidence and yields 0.
pub fn increasing_risk(value: f64, normal: f64, danger: f64) -> f64 {
    if value.is_nan() || value <= normal {
        return 0.0;
    }
    if value >= danger {
        return 1.0;
    }
    interpolate(value, normal, danger)
}

/// Falling risk: 0 at or above `normal`, 1 at or below `danger`.
///
/// Expects `normal > danger`. A NaN value carries no evidence and yields 0.
pub fn decreasing_risk(value: f64, normal: f64, danger: f64) -> f64 {
    if value.is_nan() || value >= normal {
        return 0.0;
    }
    if value <= danger {
        return 1.0;
    }
    interpolate(value, normal, danger)
}

// Only reached strictly between distinct anchors, so the span is non-zero.
fn interpolate(value: f64, normal: f64, danger: f64) -> f64 {
    let deviation = (value - normal).abs();
    let span = (danger - normal).abs();
    (deviation / span).clamp(0.0, 1.0)
}
