pub use kurbo::{Point, Vec2};

/// Integer pixel rectangle, half-open on both axes: `x1 <= x < x2`, `y1 <= y < y2`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct RectI {
    /// Inclusive left edge.
    pub x1: i32,
    /// Inclusive first row.
    pub y1: i32,
    /// Exclusive right edge.
    pub x2: i32,
    /// Exclusive row end.
    pub y2: i32,
}

impl RectI {
    /// Build a rectangle from its edges. No ordering is enforced; see [`RectI::is_empty`].
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Rectangle anchored at the origin with the given size.
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self {
            x1: 0,
            y1: 0,
            x2: width as i32,
            y2: height as i32,
        }
    }

    /// Width in pixels, `0` for inverted rectangles.
    pub fn width(self) -> u32 {
        (i64::from(self.x2) - i64::from(self.x1)).max(0) as u32
    }

    /// Height in pixels, `0` for inverted rectangles.
    pub fn height(self) -> u32 {
        (i64::from(self.y2) - i64::from(self.y1)).max(0) as u32
    }

    /// Number of pixels covered.
    pub fn area(self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// Return `true` when the rectangle covers no pixel (empty or inverted).
    pub fn is_empty(self) -> bool {
        self.x1 >= self.x2 || self.y1 >= self.y2
    }

    /// Return `true` when `(x, y)` is inside the rectangle.
    pub fn contains_point(self, x: i64, y: i64) -> bool {
        i64::from(self.x1) <= x
            && x < i64::from(self.x2)
            && i64::from(self.y1) <= y
            && y < i64::from(self.y2)
    }

    /// Return `true` when `other` lies entirely inside `self`.
    ///
    /// Only edges are compared, so an inverted `other` may still be "contained".
    pub fn contains_rect(self, other: RectI) -> bool {
        self.x1 <= other.x1 && other.x2 <= self.x2 && self.y1 <= other.y1 && other.y2 <= self.y2
    }

    /// Same rectangle restricted to rows `[y1, y2)`.
    pub fn with_rows(self, y1: i32, y2: i32) -> Self {
        Self { y1, y2, ..self }
    }
}

/// Render scale forwarded by the host (proxy renders use values below 1).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderScale {
    /// Horizontal scale.
    pub x: f64,
    /// Vertical scale.
    pub y: f64,
}

impl Default for RenderScale {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
