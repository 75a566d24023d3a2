//! Load rounding to the nearest plate increment

/// Round a weight to the nearest multiple of `increment`.
///
/// Ties go away from zero (`f64::round`). A zero, negative or non-finite
/// increment leaves the value unchanged.
pub fn round_to_increment(value: f64, increment: f64) -> f64 {
    if !increment.is_finite() || increment <= 0.0 {
        return value;
    }
    (value / increment).round() * increment
}
