use crate::field::params::{FieldParams, FlowMode};
use crate::field::wake::WakeFrame;
use crate::foundation::core::Point;
use crate::foundation::math::NEAR_ZERO;

/// Displacement field for one parameter snapshot.
///
/// Per-call constants (flow direction, projectile kinematics) are computed once in
/// [`FieldModel::new`]; the per-pixel queries are pure.
#[derive(Clone, Copy, Debug)]
pub struct FieldModel {
    params: FieldParams,
    active: bool,
    flow_cos: f64,
    flow_sin: f64,
    wake: Option<WakeFrame>,
}

impl FieldModel {
    pub fn new(params: &FieldParams) -> Self {
        let (flow_sin, flow_cos) = params.flow_direction_deg.to_radians().sin_cos();
        let active = params.is_active();
        let wake = (active && params.mode == FlowMode::ProjectileWake)
            .then(|| WakeFrame::new(params));
        Self {
            params: *params,
            active,
            flow_cos,
            flow_sin,
            wake,
        }
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    /// `false` when every pixel maps to itself.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Fractional source coordinate for destination pixel `(x, y)`. May lie outside the source.
    pub fn source_coord(&self, x: i32, y: i32) -> Point {
        let p = Point::new(f64::from(x), f64::from(y));
        if !self.active {
            return p;
        }
        match self.params.mode {
            FlowMode::RadialSwirl => self.radial_swirl(p),
            FlowMode::DirectionalFlow => self.directional_flow(p),
            FlowMode::ProjectileWake => match &self.wake {
                Some(wake) => wake.displace(p),
                None => p,
            },
        }
    }

    /// Diffusion blur strength for destination pixel `(x, y)`; non-zero only in wake mode.
    pub fn turbulence(&self, x: i32, y: i32) -> f64 {
        match &self.wake {
            Some(wake) => wake.turbulence(Point::new(f64::from(x), f64::from(y))),
            None => 0.0,
        }
    }

    fn radial_swirl(&self, p: Point) -> Point {
        let c = self.params.center;
        let d = p - c;
        let r = d.hypot();
        let mut angle = d.y.atan2(d.x);
        if self.params.decay > NEAR_ZERO {
            angle += self.params.intensity * (-r / self.params.decay).exp();
        }
        let (sin_a, cos_a) = angle.sin_cos();
        Point::new(c.x + r * cos_a, c.y + r * sin_a)
    }

    fn directional_flow(&self, p: Point) -> Point {
        if self.params.wake_width <= NEAR_ZERO {
            return p;
        }
        let d = p - self.params.center;
        let off_axis = (d.x * self.flow_sin - d.y * self.flow_cos).abs();
        let push = self.params.flow_strength * (-off_axis / self.params.wake_width).exp();
        Point::new(p.x - push * self.flow_cos, p.y - push * self.flow_sin)
    }
}

/// Source coordinate of destination pixel `(x, y)` under `params`.
///
/// Convenience over [`FieldModel`] for one-off queries; renders build the model once per call.
pub fn compute_source_coord(x: i32, y: i32, params: &FieldParams) -> Point {
    FieldModel::new(params).source_coord(x, y)
}

#[cfg(test)]
#[path = "../../tests/unit/field/model.rs"]
mod tests;
