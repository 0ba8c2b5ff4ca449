//! Source reconstruction: bilinear inside the image, nearest neighbour on the last row and
//! column, and edge fallbacks outside.

use std::f64::consts::TAU;

use crate::foundation::core::{Point, RectI};
use crate::raster::sample::Sample;
use crate::raster::view::RasterView;

/// Blur strength above which the diffusion multi-sample replaces plain bilinear.
pub const DIFFUSION_THRESHOLD: f64 = 0.01;

const DIFFUSION_TAPS: usize = 5;

/// Reconstruct the `N` channels of `src` at `coord` for destination pixel `(dest_x, dest_y)`.
///
/// Never reads outside `src.bounds()`. Returns default samples when the source is empty.
pub fn sample<T: Sample, const N: usize>(
    src: &RasterView<'_, T>,
    coord: Point,
    dest_x: i32,
    dest_y: i32,
    blur: f64,
) -> [T; N] {
    debug_assert_eq!(src.channels(), N);
    let bounds = src.bounds();
    if bounds.is_empty() {
        return [T::default(); N];
    }

    if let Some((x0, y0)) = floor_coord(coord) {
        if fits_bilinear(bounds, x0, y0) {
            if blur > DIFFUSION_THRESHOLD
                && let Some(px) = diffuse::<T, N>(src, coord, blur)
            {
                return px;
            }
            return bilinear::<T, N>(src, coord, x0 as i32, y0 as i32);
        }
        if bounds.contains_point(x0, y0) {
            return copy_pixel(src, x0 as i32, y0 as i32);
        }
    }

    if bounds.contains_point(i64::from(dest_x), i64::from(dest_y)) {
        return copy_pixel(src, dest_x, dest_y);
    }
    let cx = clamp_axis(coord.x, bounds.x1, bounds.x2);
    let cy = clamp_axis(coord.y, bounds.y1, bounds.y2);
    copy_pixel(src, cx, cy)
}

/// Floor of a finite coordinate, `None` for NaN or infinities.
fn floor_coord(coord: Point) -> Option<(i64, i64)> {
    if coord.x.is_finite() && coord.y.is_finite() {
        Some((coord.x.floor() as i64, coord.y.floor() as i64))
    } else {
        None
    }
}

/// `true` when the 2x2 neighbourhood anchored at `(x0, y0)` is inside `b`.
fn fits_bilinear(b: RectI, x0: i64, y0: i64) -> bool {
    x0 >= i64::from(b.x1)
        && x0 < i64::from(b.x2) - 1
        && y0 >= i64::from(b.y1)
        && y0 < i64::from(b.y2) - 1
}

fn clamp_axis(v: f64, lo: i32, hi: i32) -> i32 {
    // f64::max drops NaN, so NaN clamps to the low edge
    v.floor().max(f64::from(lo)).min(f64::from(hi - 1)) as i32
}

fn copy_pixel<T: Sample, const N: usize>(src: &RasterView<'_, T>, x: i32, y: i32) -> [T; N] {
    let mut out = [T::default(); N];
    out.copy_from_slice(src.pixel(x, y));
    out
}

fn bilinear<T: Sample, const N: usize>(
    src: &RasterView<'_, T>,
    coord: Point,
    x0: i32,
    y0: i32,
) -> [T; N] {
    let fx = coord.x - f64::from(x0);
    let fy = coord.y - f64::from(y0);
    if fx == 0.0 && fy == 0.0 {
        return copy_pixel(src, x0, y0);
    }
    let acc = bilinear_f64::<T, N>(src, fx, fy, x0, y0);
    acc.map(T::from_f64)
}

fn bilinear_f64<T: Sample, const N: usize>(
    src: &RasterView<'_, T>,
    fx: f64,
    fy: f64,
    x0: i32,
    y0: i32,
) -> [f64; N] {
    let fx1 = 1.0 - fx;
    let fy1 = 1.0 - fy;
    let p00 = src.pixel(x0, y0);
    let p10 = src.pixel(x0 + 1, y0);
    let p01 = src.pixel(x0, y0 + 1);
    let p11 = src.pixel(x0 + 1, y0 + 1);
    let mut out = [0.0; N];
    for (c, v) in out.iter_mut().enumerate() {
        *v = p00[c].to_f64() * fx1 * fy1
            + p10[c].to_f64() * fx * fy1
            + p01[c].to_f64() * fx1 * fy
            + p11[c].to_f64() * fx * fy;
    }
    out
}

/// Unweighted mean of bilinear taps on a widening spiral around `coord`.
///
/// `None` when no tap has a full 2x2 neighbourhood inside the source.
fn diffuse<T: Sample, const N: usize>(
    src: &RasterView<'_, T>,
    coord: Point,
    blur: f64,
) -> Option<[T; N]> {
    let bounds = src.bounds();
    let reach = blur * 3.0;
    let mut sum = [0.0; N];
    let mut taps = 0usize;
    for s in 0..DIFFUSION_TAPS {
        let frac = s as f64 / DIFFUSION_TAPS as f64;
        let (sin_a, cos_a) = (TAU * frac).sin_cos();
        let tap = Point::new(coord.x + cos_a * reach * frac, coord.y + sin_a * reach * frac);
        let Some((x0, y0)) = floor_coord(tap) else {
            continue;
        };
        if !fits_bilinear(bounds, x0, y0) {
            continue;
        }
        let fx = tap.x - x0 as f64;
        let fy = tap.y - y0 as f64;
        let px = bilinear_f64::<T, N>(src, fx, fy, x0 as i32, y0 as i32);
        for (acc, v) in sum.iter_mut().zip(px) {
            *acc += v;
        }
        taps += 1;
    }
    if taps == 0 {
        return None;
    }
    let n = taps as f64;
    Some(sum.map(|v| T::from_f64(v / n)))
}

#[cfg(test)]
#[path = "../../tests/unit/render/resample.rs"]
mod tests;
