//! Shared angle helpers.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    if r < 0.0 { r + 360.0 } else { r }
}

/// Shortest angular distance between two longitudes, in [0, 180].
pub fn angular_separation(a_deg: f64, b_deg: f64) -> f64 {
    let d = normalize_360(a_deg - b_deg);
    if d > 180.0 { 360.0 - d } else { d }
}

/// Whether `value` is a finite number in [0, 1].
pub(crate) fn is_unit_interval(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}
