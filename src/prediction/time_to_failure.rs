//! Remaining-life estimate from a risk probability.

/// Estimated days to failure: `round(baseline_days * (1 - sqrt(p)))`.
///
/// `p` is clamped to [0, 1], so the result always lies in `0..=baseline_days`:
/// `p = 0` returns the baseline unchanged, `p = 1` returns 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn estimate_days(probability: f64, baseline_days: u32) -> u32 {
    let p = if probability.is_nan() { 0.0 } else { probability.clamp(0.0, 1.0) };
    let days = f64::from(baseline_days) * (1.0 - p.sqrt());
    // Non-negative and at most baseline_days, so the cast cannot overflow
    days.round() as u32
}
