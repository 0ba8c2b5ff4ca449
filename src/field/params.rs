use crate::foundation::core::Point;
use crate::foundation::math::is_near_zero;

/// Which vector field drives the warp.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FlowMode {
    /// Rotation around a center, falling off with distance.
    #[default]
    RadialSwirl,
    /// Push along a direction, strongest on the axis through the center.
    DirectionalFlow,
    /// Expanding wave, local field and trailing wake of a moving projectile.
    ProjectileWake,
}

impl FlowMode {
    /// Mode for a host choice index (`0`, `1`, `2`).
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(FlowMode::RadialSwirl),
            1 => Some(FlowMode::DirectionalFlow),
            2 => Some(FlowMode::ProjectileWake),
            _ => None,
        }
    }

    pub fn index(self) -> i32 {
        match self {
            FlowMode::RadialSwirl => 0,
            FlowMode::DirectionalFlow => 1,
            FlowMode::ProjectileWake => 2,
        }
    }
}

/// Immutable parameter snapshot for one render call.
///
/// Every position and distance is in destination pixel space and already resolution-scaled.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FieldParams {
    /// Swirl strength in radians at the center; also scales the wave and local wake layers.
    pub intensity: f64,
    pub center: Point,
    pub radius: f64,
    /// Distance over which the swirl angle falls off by `1/e`.
    pub decay: f64,
    pub flow_direction_deg: f64,
    pub flow_strength: f64,
    pub wake_width: f64,
    pub vortex_spacing: f64,
    pub mode: FlowMode,
    pub projectile_start: Point,
    pub projectile_end: Point,
    /// Frames the projectile needs for one start-to-end traversal.
    pub projectile_speed: f64,
    pub projectile_radius: f64,
    pub wake_decay: f64,
    pub current_time: f64,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            center: Point::new(960.0, 540.0),
            radius: 200.0,
            decay: 100.0,
            flow_direction_deg: 0.0,
            flow_strength: 1.0,
            wake_width: 50.0,
            vortex_spacing: 80.0,
            mode: FlowMode::RadialSwirl,
            projectile_start: Point::new(192.0, 540.0),
            projectile_end: Point::new(1728.0, 540.0),
            projectile_speed: 30.0,
            projectile_radius: 80.0,
            wake_decay: 0.5,
            current_time: 0.0,
        }
    }
}

impl FieldParams {
    /// Radial swirl around `center`, other fields at their defaults.
    pub fn radial(center: Point, intensity: f64, decay: f64) -> Self {
        Self {
            intensity,
            center,
            decay,
            mode: FlowMode::RadialSwirl,
            ..Self::default()
        }
    }

    /// Return `true` when the warp changes at least one pixel.
    pub fn is_active(&self) -> bool {
        !is_identity(self.intensity, self.flow_strength, self.mode)
    }
}

/// Bypass query: `true` when the given controls leave the image untouched.
///
/// Radial swirl only looks at `intensity`; the other modes are identity when both `intensity` and
/// `flow_strength` are within `0.001` of zero.
pub fn is_identity(intensity: f64, flow_strength: f64, mode: FlowMode) -> bool {
    match mode {
        FlowMode::RadialSwirl => is_near_zero(intensity),
        FlowMode::DirectionalFlow | FlowMode::ProjectileWake => {
            is_near_zero(intensity) && is_near_zero(flow_strength)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/params.rs"]
mod tests;
