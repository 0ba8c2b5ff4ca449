//! Projectile wake field: an expanding wave from the launch point, a local push around the
//! projectile and a decaying trail behind it.

use std::f64::consts::{PI, TAU};

use crate::field::params::FieldParams;
use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::{NEAR_ZERO, lerp};

/// Trail segment from the launch point to the current projectile position.
#[derive(Clone, Copy, Debug)]
struct Trail {
    dir: Vec2,
    len: f64,
}

impl Trail {
    /// Projection of `p` onto the trail and its distance to it, when the projection falls
    /// strictly inside the segment.
    fn locate(&self, start: Point, p: Point) -> Option<(f64, f64)> {
        let rel = p - start;
        let along = rel.dot(self.dir);
        if along > 0.0 && along < self.len {
            let closest = start + self.dir * along;
            Some((along, p.distance(closest)))
        } else {
            None
        }
    }
}

/// Per-call projectile kinematics, computed once and shared by every pixel.
#[derive(Clone, Copy, Debug)]
pub struct WakeFrame {
    start: Point,
    current: Point,
    progress: f64,
    intensity: f64,
    flow_strength: f64,
    radius: f64,
    wake_width: f64,
    wake_decay: f64,
    wave_radius: f64,
    travel: Vec2,
    trail: Option<Trail>,
}

impl WakeFrame {
    pub fn new(params: &FieldParams) -> Self {
        let progress = if params.projectile_speed.abs() > NEAR_ZERO {
            params.current_time / params.projectile_speed
        } else {
            0.0
        };
        let start = params.projectile_start;
        let end = params.projectile_end;
        let current = Point::new(
            lerp(start.x, end.x, progress),
            lerp(start.y, end.y, progress),
        );

        let radius = params.projectile_radius;
        let wave_radius = (progress * radius * 4.0).min(radius * 8.0);

        let path = end - start;
        let path_len = path.hypot();
        let travel = if path_len > NEAR_ZERO {
            path / path_len
        } else {
            path
        };

        let behind = current - start;
        let trail_len = behind.hypot();
        let trail = (trail_len > NEAR_ZERO).then(|| Trail {
            dir: behind / trail_len,
            len: trail_len,
        });

        Self {
            start,
            current,
            progress,
            intensity: params.intensity,
            flow_strength: params.flow_strength,
            radius,
            wake_width: params.wake_width,
            wake_decay: params.wake_decay,
            wave_radius,
            travel,
            trail,
        }
    }

    /// Normalized time: `0` at launch, `1` when the projectile reaches its end point.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Current projectile position.
    pub fn position(&self) -> Point {
        self.current
    }

    /// Radius of the wave front expanding from the launch point.
    pub fn wave_radius(&self) -> f64 {
        self.wave_radius
    }

    /// Source coordinate for destination pixel `p`. The three layers are summed onto `p`.
    pub fn displace(&self, p: Point) -> Point {
        let mut src = p;
        src += self.wave_offset(p);
        src += self.local_offset(p);
        src += self.trail_offset(p);
        src
    }

    fn wave_offset(&self, p: Point) -> Vec2 {
        if self.wake_decay <= NEAR_ZERO {
            return Vec2::ZERO;
        }
        let rel = p - self.start;
        let dist = rel.hypot();
        if !(dist < self.wave_radius && self.wave_radius > 1.0 && dist > 0.1) {
            return Vec2::ZERO;
        }
        let angle = rel.y.atan2(rel.x);
        let front = (dist / self.wave_radius * PI).sin() * 2.0;
        let fade = (-self.progress / (self.wake_decay * 2.0)).exp();
        let total = self.intensity * 15.0 * front * fade;
        let (sin_a, cos_a) = angle.sin_cos();
        let swirl = total * 0.3 * (dist * 0.1).sin();
        Vec2::new(cos_a * total - sin_a * swirl, sin_a * total + cos_a * swirl)
    }

    fn local_offset(&self, p: Point) -> Vec2 {
        if self.radius <= NEAR_ZERO {
            return Vec2::ZERO;
        }
        let rel = p - self.current;
        let dist = rel.hypot();
        if !(dist < self.radius && dist > 0.1) {
            return Vec2::ZERO;
        }
        let u = self.travel;
        let perp = Vec2::new(-u.y, u.x);
        let push = self.intensity * 80.0 * (-dist / (self.radius * 0.2)).exp();
        let off_axis = rel.dot(perp).abs();
        let swirl = push * 0.5 * (off_axis * 0.1).sin();
        u * push + perp * swirl
    }

    fn trail_offset(&self, p: Point) -> Vec2 {
        if self.wake_width <= NEAR_ZERO || self.wake_decay <= NEAR_ZERO {
            return Vec2::ZERO;
        }
        let Some(trail) = self.trail else {
            return Vec2::ZERO;
        };
        let Some((along, dist)) = trail.locate(self.start, p) else {
            return Vec2::ZERO;
        };
        if dist >= self.wake_width {
            return Vec2::ZERO;
        }
        let age = 1.0 - along / trail.len;
        let strength = self.flow_strength
            * (-dist / (self.wake_width * 0.3)).exp()
            * (-age / self.wake_decay).exp();

        let dir = trail.dir;
        let streak = strength * 20.0;
        let mut off = Vec2::new(
            dir.x * streak * (1.0 + (dist * 0.1).sin() * 0.3),
            dir.y * streak * (1.0 + (dist * 0.1).cos() * 0.3),
        );

        let perp = Vec2::new(-dir.y, dir.x);
        off += perp * (strength * 5.0 * (along * 0.05 + dist * 0.2).sin());

        let mix = strength * 8.0;
        off += Vec2::new(
            (dist * 0.4 + along * 0.08).sin() * mix,
            (dist * 0.35 + along * 0.12).cos() * mix,
        );
        off
    }

    /// Blur strength for destination pixel `p`, `0` outside every ripple region.
    ///
    /// The largest of the wave ripple, the widening trail band and the concentric ripple around
    /// the projectile.
    pub fn turbulence(&self, p: Point) -> f64 {
        self.wave_ripple(p)
            .max(self.trail_band(p))
            .max(self.concentric_ripple(p))
            .max(0.0)
    }

    fn wave_ripple(&self, p: Point) -> f64 {
        if self.wake_decay <= NEAR_ZERO {
            return 0.0;
        }
        let dist = p.distance(self.start);
        if !(dist < self.wave_radius && self.wave_radius > 1.0) {
            return 0.0;
        }
        let ratio = dist / self.wave_radius;
        let ripple = ((ratio * TAU * 3.0).sin() + 1.0) * 0.5;
        let falloff = (1.0 - ratio) * (1.0 - ratio);
        let fade = (-self.progress / self.wake_decay).exp();
        self.flow_strength * 0.5 * ripple * falloff * fade
    }

    fn trail_band(&self, p: Point) -> f64 {
        let width = self.wake_width * (1.0 + self.progress * 2.0);
        if width <= NEAR_ZERO || self.wake_decay <= NEAR_ZERO {
            return 0.0;
        }
        let Some(trail) = self.trail else {
            return 0.0;
        };
        let Some((along, dist)) = trail.locate(self.start, p) else {
            return 0.0;
        };
        if dist >= width {
            return 0.0;
        }
        let age = 1.0 - along / trail.len;
        self.flow_strength * (-dist / (width * 0.4)).exp() * (-age / self.wake_decay).exp()
    }

    fn concentric_ripple(&self, p: Point) -> f64 {
        if self.radius <= NEAR_ZERO {
            return 0.0;
        }
        let dist = p.distance(self.current);
        if dist >= self.radius * 2.0 {
            return 0.0;
        }
        self.flow_strength * 0.3 * (dist / self.radius * PI).sin()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/wake.rs"]
mod tests;
