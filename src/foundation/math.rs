/// Magnitude below which a control or divisor is treated as zero.
pub(crate) const NEAR_ZERO: f64 = 0.001;

/// Width of the reference frame distance controls are authored against.
pub(crate) const REFERENCE_WIDTH: f64 = 1920.0;
/// Height of the reference frame distance controls are authored against.
pub(crate) const REFERENCE_HEIGHT: f64 = 1080.0;

/// Ratio between the diagonal of a `width x height` image and the 1920x1080 reference diagonal.
///
/// Distance-like controls are multiplied by this so the effect keeps its look across resolutions.
pub fn resolution_scale(width: u32, height: u32) -> f64 {
    let w = f64::from(width);
    let h = f64::from(height);
    (w * w + h * h).sqrt() / REFERENCE_WIDTH.hypot(REFERENCE_HEIGHT)
}

pub(crate) fn is_near_zero(v: f64) -> bool {
    v.abs() <= NEAR_ZERO
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
