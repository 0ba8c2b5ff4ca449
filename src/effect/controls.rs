use crate::field::params::{FieldParams, FlowMode, is_identity};
use crate::foundation::core::{Point, RectI};
use crate::foundation::error::{WarpError, WarpResult};
use crate::foundation::math::resolution_scale;

/// Host-facing effect controls for one point in time.
///
/// Positions are normalized to the source bounds (`0..1` on each axis). Distances are authored
/// against a 1920x1080 frame and rescaled by [`EffectControls::resolve`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EffectControls {
    pub intensity: f64,
    pub center: Point,
    pub radius: f64,
    pub decay: f64,
    pub mode: FlowMode,
    /// Flow direction in degrees.
    pub flow_direction: f64,
    pub flow_strength: f64,
    pub wake_width: f64,
    pub vortex_spacing: f64,
    pub projectile_start: Point,
    pub projectile_end: Point,
    pub projectile_speed: f64,
    pub projectile_radius: f64,
    pub wake_decay: f64,
}

impl Default for EffectControls {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            center: Point::new(0.5, 0.5),
            radius: 200.0,
            decay: 100.0,
            mode: FlowMode::RadialSwirl,
            flow_direction: 0.0,
            flow_strength: 1.0,
            wake_width: 50.0,
            vortex_spacing: 80.0,
            projectile_start: Point::new(0.1, 0.5),
            projectile_end: Point::new(0.9, 0.5),
            projectile_speed: 30.0,
            projectile_radius: 80.0,
            wake_decay: 0.5,
        }
    }
}

fn check_range(name: &str, value: f64, min: f64, max: f64) -> WarpResult<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(WarpError::validation(format!(
            "control '{name}' = {value} is outside [{min}, {max}]"
        )))
    }
}

fn check_point(name: &str, p: Point) -> WarpResult<()> {
    if p.x.is_finite() && p.y.is_finite() {
        Ok(())
    } else {
        Err(WarpError::validation(format!(
            "control '{name}' must be finite, got ({}, {})",
            p.x, p.y
        )))
    }
}

impl EffectControls {
    /// Parse controls from JSON. Missing keys take their defaults; the result is validated.
    pub fn from_json(json: &str) -> WarpResult<Self> {
        let controls: Self = serde_json::from_str(json)
            .map_err(|e| WarpError::validation(format!("invalid controls json: {e}")))?;
        controls.validate()?;
        Ok(controls)
    }

    /// Check every control against its allowed range.
    pub fn validate(&self) -> WarpResult<()> {
        check_range("intensity", self.intensity, -10.0, 10.0)?;
        check_point("center", self.center)?;
        check_range("radius", self.radius, 1.0, 1000.0)?;
        check_range("decay", self.decay, 1.0, 500.0)?;
        check_range("flow_direction", self.flow_direction, -360.0, 360.0)?;
        check_range("flow_strength", self.flow_strength, 0.0, 10.0)?;
        check_range("wake_width", self.wake_width, 5.0, 200.0)?;
        check_range("vortex_spacing", self.vortex_spacing, 10.0, 300.0)?;
        check_point("projectile_start", self.projectile_start)?;
        check_point("projectile_end", self.projectile_end)?;
        check_range("projectile_speed", self.projectile_speed, 5.0, 200.0)?;
        check_range("projectile_radius", self.projectile_radius, 10.0, 300.0)?;
        check_range("wake_decay", self.wake_decay, 0.1, 2.0)?;
        Ok(())
    }

    /// Pixel-space parameters for an image covering `bounds` at `time`.
    pub fn resolve(&self, bounds: RectI, time: f64) -> FieldParams {
        let w = f64::from(bounds.width());
        let h = f64::from(bounds.height());
        let to_pixels = |p: Point| {
            Point::new(
                f64::from(bounds.x1) + p.x * w,
                f64::from(bounds.y1) + p.y * h,
            )
        };
        let scale = resolution_scale(bounds.width(), bounds.height());

        FieldParams {
            intensity: self.intensity,
            center: to_pixels(self.center),
            radius: self.radius * scale,
            decay: self.decay * scale,
            flow_direction_deg: self.flow_direction,
            flow_strength: self.flow_strength,
            wake_width: self.wake_width * scale,
            vortex_spacing: self.vortex_spacing * scale,
            mode: self.mode,
            projectile_start: to_pixels(self.projectile_start),
            projectile_end: to_pixels(self.projectile_end),
            projectile_speed: self.projectile_speed,
            projectile_radius: self.projectile_radius * scale,
            wake_decay: self.wake_decay,
            current_time: time,
        }
    }

    /// `true` when rendering would return the source unchanged.
    pub fn is_identity(&self) -> bool {
        is_identity(self.intensity, self.flow_strength, self.mode)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effect/controls.rs"]
mod tests;
