//! Small numeric helpers shared by the engine stages.

/// Round to `places` decimals. Non-finite input becomes 0.
pub fn round_to(value: f64, places: i32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Replace NaN/infinity with 0 so bad inputs never propagate.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Clamp into `[min, max]`, treating non-finite input as `min`.
pub fn clamp_finite(value: f64, min: f64, max: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        min
    }
}

/// Round a litre figure to a whole, non-negative amount
pub fn whole_liters(value: f64) -> u64 {
    let rounded = finite_or_zero(value).round();
    if rounded <= 0.0 {
        0
    } else {
        rounded as u64
    }
}
