/// Value returned when the expected range has no width.
pub const NEUTRAL_NORMALIZED: f64 = 50.0;

/// Map `value` from the expected `[min, max]` range onto 0–100, clamping outside it.
///
/// The comparisons are evaluated against `min` first, so an inverted range
/// (`min > max`) keeps the literal ordering of the checks rather than flipping
/// the scale.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if min == max {
        return NEUTRAL_NORMALIZED;
    }
    if value <= min {
        return 0.0;
    }
    if value >= max {
        return 100.0;
    }
    (value - min) / (max - min) * 100.0
}

/// Clamp a score into the closed 0–100 interval.
pub fn clamp_score(score: f64) -> f64 {
    score.clamp(0.0, 100.0)
}

/// Round to two decimal places, the precision scores are stored and returned with.
pub fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}
