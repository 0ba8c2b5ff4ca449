use crate::foundation::core::RectI;
use crate::foundation::error::{WarpError, WarpResult};
use crate::raster::sample::{Sample, check_channels};
use crate::raster::view::{RasterView, RasterViewMut};

/// Owned, tightly packed raster.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterBuf<T> {
    data: Vec<T>,
    bounds: RectI,
    channels: usize,
}

impl<T: Sample> RasterBuf<T> {
    /// Zero-filled raster covering `bounds`.
    pub fn new(bounds: RectI, channels: usize) -> WarpResult<Self> {
        check_channels(channels)?;
        let len = sample_count(bounds, channels)?;
        Ok(Self {
            data: vec![T::default(); len],
            bounds,
            channels,
        })
    }

    /// Wrap existing samples. `data` must hold exactly `width * height * channels` values.
    pub fn from_vec(data: Vec<T>, bounds: RectI, channels: usize) -> WarpResult<Self> {
        check_channels(channels)?;
        let len = sample_count(bounds, channels)?;
        if data.len() != len {
            return Err(WarpError::validation(format!(
                "raster of {bounds:?} x {channels} needs {len} samples, got {}",
                data.len()
            )));
        }
        Ok(Self {
            data,
            bounds,
            channels,
        })
    }

    /// Raster whose sample at `(x, y, channel)` is `f(x, y, channel)`.
    pub fn from_fn(
        bounds: RectI,
        channels: usize,
        mut f: impl FnMut(i32, i32, usize) -> T,
    ) -> WarpResult<Self> {
        check_channels(channels)?;
        let len = sample_count(bounds, channels)?;
        let mut data = Vec::with_capacity(len);
        for y in bounds.y1..bounds.y2 {
            for x in bounds.x1..bounds.x2 {
                for c in 0..channels {
                    data.push(f(x, y, c));
                }
            }
        }
        Ok(Self {
            data,
            bounds,
            channels,
        })
    }

    pub fn bounds(&self) -> RectI {
        self.bounds
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Channels of the pixel at `(x, y)`, or `None` outside the bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<&[T]> {
        if !self.bounds.contains_point(i64::from(x), i64::from(y)) {
            return None;
        }
        let row = (y - self.bounds.y1) as usize;
        let col = (x - self.bounds.x1) as usize;
        let idx = (row * self.bounds.width() as usize + col) * self.channels;
        Some(&self.data[idx..idx + self.channels])
    }

    /// Borrow as a read-only view.
    pub fn view(&self) -> RasterView<'_, T> {
        RasterView {
            data: &self.data,
            bounds: self.bounds,
            channels: self.channels,
            row_stride: self.bounds.width() as usize * self.channels,
        }
    }

    /// Borrow as a writable view.
    pub fn view_mut(&mut self) -> RasterViewMut<'_, T> {
        RasterViewMut {
            data: &mut self.data,
            bounds: self.bounds,
            channels: self.channels,
            row_stride: self.bounds.width() as usize * self.channels,
        }
    }
}

fn sample_count(bounds: RectI, channels: usize) -> WarpResult<usize> {
    if bounds.x1 > bounds.x2 || bounds.y1 > bounds.y2 {
        return Err(WarpError::validation(format!(
            "raster bounds are inverted: {bounds:?}"
        )));
    }
    (bounds.width() as usize)
        .checked_mul(bounds.height() as usize)
        .and_then(|v| v.checked_mul(channels))
        .ok_or_else(|| WarpError::validation("raster buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/buffer.rs"]
mod tests;
