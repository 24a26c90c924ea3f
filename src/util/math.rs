//! Angle helpers shared by the geometry and registry code.

/// Wraps an angle in degrees to the range [0, 360).
pub(crate) fn normalize_deg(angle_deg: f64) -> f64 {
    let wrapped = angle_deg % 360.0;
    if wrapped < 0.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Rounds a degree value to a whole degree in [0, 360).
pub(crate) fn round_deg(angle_deg: f64) -> u16 {
    if !angle_deg.is_finite() {
        return 0;
    }
    (normalize_deg(angle_deg).round() as u32 % 360) as u16
}

/// Computes sine and cosine for an angle in degrees.
pub(crate) fn sin_cos_deg(angle_deg: f64) -> (f64, f64) {
    angle_deg.to_radians().sin_cos()
}
