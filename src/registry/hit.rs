//! Hit-testing against points and their orientation indicators.

/// Thresholds for hit-testing in model-space pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct HitConfig {
    /// Maximum distance from a minutia position that counts as a point hit.
    pub point_radius: f64,
    /// Maximum distance from an indicator endpoint that counts as a hit.
    pub orientation_radius: f64,
    /// Length of the orientation indicator drawn from each minutia.
    pub indicator_length: f64,
}

impl Default for HitConfig {
    fn default() -> Self {
        Self {
            point_radius: 5.0,
            orientation_radius: 5.0,
            indicator_length: 15.0,
        }
    }
}

/// What a query point landed on.
///
/// The indicator starts at the minutia position and ends at its tip, so
/// `OnOrientationStart` is only reported when `orientation_radius` exceeds
/// `point_radius`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HitKind {
    OnPoint(usize),
    OnOrientationStart(usize),
    OnOrientationEnd(usize),
    Miss,
}

impl HitKind {
    /// Returns the index of the minutia that was hit.
    pub fn index(self) -> Option<usize> {
        match self {
            HitKind::OnPoint(idx)
            | HitKind::OnOrientationStart(idx)
            | HitKind::OnOrientationEnd(idx) => Some(idx),
            HitKind::Miss => None,
        }
    }
}
