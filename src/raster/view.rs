use crate::foundation::core::RectI;
use crate::foundation::error::{WarpError, WarpResult};
use crate::raster::sample::{BitDepth, Sample, check_channels};

/// Validate that `len` samples can hold `bounds` with the given interleaving and row stride.
///
/// The final row only needs `width * channels` samples, so hosts handing out padded rows do not
/// have to pad the last one.
fn check_layout(len: usize, bounds: RectI, channels: usize, row_stride: usize) -> WarpResult<()> {
    check_channels(channels)?;
    if bounds.x1 > bounds.x2 || bounds.y1 > bounds.y2 {
        return Err(WarpError::validation(format!(
            "raster bounds are inverted: {bounds:?}"
        )));
    }
    let row_len = (bounds.width() as usize)
        .checked_mul(channels)
        .ok_or_else(|| WarpError::validation("raster row length overflow"))?;
    if row_stride < row_len {
        return Err(WarpError::validation(format!(
            "row stride {row_stride} is shorter than a row ({row_len} samples)"
        )));
    }
    let height = bounds.height() as usize;
    let required = if height == 0 {
        0
    } else {
        row_stride
            .checked_mul(height - 1)
            .and_then(|v| v.checked_add(row_len))
            .ok_or_else(|| WarpError::validation("raster buffer size overflow"))?
    };
    if len < required {
        return Err(WarpError::validation(format!(
            "raster buffer holds {len} samples, bounds {bounds:?} need {required}"
        )));
    }
    Ok(())
}

/// Read-only pixel rectangle borrowed from the host for the duration of one call.
#[derive(Clone, Copy, Debug)]
pub struct RasterView<'a, T> {
    pub(super) data: &'a [T],
    pub(super) bounds: RectI,
    pub(super) channels: usize,
    pub(super) row_stride: usize,
}

impl<'a, T: Sample> RasterView<'a, T> {
    /// View over tightly packed rows.
    pub fn new(data: &'a [T], bounds: RectI, channels: usize) -> WarpResult<Self> {
        check_channels(channels)?;
        let row_stride = bounds.width() as usize * channels;
        Self::with_stride(data, bounds, channels, row_stride)
    }

    /// View over rows that are `row_stride` samples apart.
    pub fn with_stride(
        data: &'a [T],
        bounds: RectI,
        channels: usize,
        row_stride: usize,
    ) -> WarpResult<Self> {
        check_layout(data.len(), bounds, channels, row_stride)?;
        Ok(Self {
            data,
            bounds,
            channels,
            row_stride,
        })
    }

    /// Pixel bounds of the buffer.
    pub fn bounds(&self) -> RectI {
        self.bounds
    }

    /// Interleaved channels per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Distance between rows, in samples.
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// Sample type of the buffer.
    pub fn depth(&self) -> BitDepth {
        T::DEPTH
    }

    /// Underlying samples.
    pub fn data(&self) -> &'a [T] {
        self.data
    }

    /// Channels of the pixel at `(x, y)`.
    ///
    /// Panics if `(x, y)` is outside [`RasterView::bounds`].
    pub fn pixel(&self, x: i32, y: i32) -> &'a [T] {
        assert!(
            self.bounds.contains_point(i64::from(x), i64::from(y)),
            "pixel ({x}, {y}) outside raster bounds {:?}",
            self.bounds
        );
        let idx = self.offset(x, y);
        &self.data[idx..idx + self.channels]
    }

    /// Channels of the pixel at `(x, y)`, or `None` outside the bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<&'a [T]> {
        if !self.bounds.contains_point(i64::from(x), i64::from(y)) {
            return None;
        }
        let idx = self.offset(x, y);
        Some(&self.data[idx..idx + self.channels])
    }

    /// Samples of row `y`, `width * channels` long.
    pub fn row(&self, y: i32) -> &'a [T] {
        let start = self.offset(self.bounds.x1, y);
        &self.data[start..start + self.bounds.width() as usize * self.channels]
    }

    fn offset(&self, x: i32, y: i32) -> usize {
        let row = (i64::from(y) - i64::from(self.bounds.y1)) as usize;
        let col = (i64::from(x) - i64::from(self.bounds.x1)) as usize;
        row * self.row_stride + col * self.channels
    }
}

/// Writable pixel rectangle borrowed from the host for the duration of one call.
#[derive(Debug)]
pub struct RasterViewMut<'a, T> {
    pub(super) data: &'a mut [T],
    pub(super) bounds: RectI,
    pub(super) channels: usize,
    pub(super) row_stride: usize,
}

impl<'a, T: Sample> RasterViewMut<'a, T> {
    /// View over tightly packed rows.
    pub fn new(data: &'a mut [T], bounds: RectI, channels: usize) -> WarpResult<Self> {
        check_channels(channels)?;
        let row_stride = bounds.width() as usize * channels;
        Self::with_stride(data, bounds, channels, row_stride)
    }

    /// View over rows that are `row_stride` samples apart.
    pub fn with_stride(
        data: &'a mut [T],
        bounds: RectI,
        channels: usize,
        row_stride: usize,
    ) -> WarpResult<Self> {
        check_layout(data.len(), bounds, channels, row_stride)?;
        Ok(Self {
            data,
            bounds,
            channels,
            row_stride,
        })
    }

    /// Pixel bounds of the buffer.
    pub fn bounds(&self) -> RectI {
        self.bounds
    }

    /// Interleaved channels per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Distance between rows, in samples.
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// Sample type of the buffer.
    pub fn depth(&self) -> BitDepth {
        T::DEPTH
    }

    /// Read-only view of the same pixels.
    pub fn as_view(&self) -> RasterView<'_, T> {
        RasterView {
            data: &*self.data,
            bounds: self.bounds,
            channels: self.channels,
            row_stride: self.row_stride,
        }
    }

    /// Shorter-lived writable view of the same pixels.
    pub fn reborrow(&mut self) -> RasterViewMut<'_, T> {
        RasterViewMut {
            data: &mut *self.data,
            bounds: self.bounds,
            channels: self.channels,
            row_stride: self.row_stride,
        }
    }

    /// Mutable channels of the pixel at `(x, y)`.
    ///
    /// Panics if `(x, y)` is outside [`RasterViewMut::bounds`].
    pub fn pixel_mut(&mut self, x: i32, y: i32) -> &mut [T] {
        assert!(
            self.bounds.contains_point(i64::from(x), i64::from(y)),
            "pixel ({x}, {y}) outside raster bounds {:?}",
            self.bounds
        );
        let idx = self.offset(x, y);
        &mut self.data[idx..idx + self.channels]
    }

    /// Mutable samples of row `y`, `width * channels` long.
    pub fn row_mut(&mut self, y: i32) -> &mut [T] {
        let start = self.offset(self.bounds.x1, y);
        let len = self.bounds.width() as usize * self.channels;
        &mut self.data[start..start + len]
    }

    /// Split into disjoint views, one per row range.
    ///
    /// `ranges` must be ascending, non-overlapping and inside the row bounds. Each returned view
    /// owns exactly the rows of its range, which is what lets strips be written concurrently.
    pub(crate) fn split_rows(self, ranges: &[(i32, i32)]) -> Vec<RasterViewMut<'a, T>> {
        let mut out = Vec::with_capacity(ranges.len());
        let mut rest = self.data;
        let mut rest_row = self.bounds.y1;
        for &(y1, y2) in ranges {
            debug_assert!(rest_row <= y1 && y1 <= y2 && y2 <= self.bounds.y2);
            let skip = ((y1 - rest_row) as usize * self.row_stride).min(rest.len());
            let (_, tail) = std::mem::take(&mut rest).split_at_mut(skip);
            let take = ((y2 - y1) as usize * self.row_stride).min(tail.len());
            let (head, tail) = tail.split_at_mut(take);
            out.push(RasterViewMut {
                data: head,
                bounds: self.bounds.with_rows(y1, y2),
                channels: self.channels,
                row_stride: self.row_stride,
            });
            rest = tail;
            rest_row = y2;
        }
        out
    }

    fn offset(&self, x: i32, y: i32) -> usize {
        let row = (i64::from(y) - i64::from(self.bounds.y1)) as usize;
        let col = (i64::from(x) - i64::from(self.bounds.x1)) as usize;
        row * self.row_stride + col * self.channels
    }
}

/// Read-only raster of any supported sample type, as handed over by the host.
#[derive(Clone, Copy, Debug)]
pub enum RasterRef<'a> {
    /// 8-bit samples.
    U8(RasterView<'a, u8>),
    /// 16-bit samples.
    U16(RasterView<'a, u16>),
    /// Float samples.
    F32(RasterView<'a, f32>),
}

/// Writable raster of any supported sample type, as handed over by the host.
#[derive(Debug)]
pub enum RasterMut<'a> {
    /// 8-bit samples.
    U8(RasterViewMut<'a, u8>),
    /// 16-bit samples.
    U16(RasterViewMut<'a, u16>),
    /// Float samples.
    F32(RasterViewMut<'a, f32>),
}

impl RasterRef<'_> {
    /// Sample type tag.
    pub fn depth(&self) -> BitDepth {
        match self {
            RasterRef::U8(_) => BitDepth::U8,
            RasterRef::U16(_) => BitDepth::U16,
            RasterRef::F32(_) => BitDepth::F32,
        }
    }

    /// Pixel bounds.
    pub fn bounds(&self) -> RectI {
        match self {
            RasterRef::U8(v) => v.bounds(),
            RasterRef::U16(v) => v.bounds(),
            RasterRef::F32(v) => v.bounds(),
        }
    }

    /// Interleaved channels per pixel.
    pub fn channels(&self) -> usize {
        match self {
            RasterRef::U8(v) => v.channels(),
            RasterRef::U16(v) => v.channels(),
            RasterRef::F32(v) => v.channels(),
        }
    }
}

impl RasterMut<'_> {
    /// Sample type tag.
    pub fn depth(&self) -> BitDepth {
        match self {
            RasterMut::U8(_) => BitDepth::U8,
            RasterMut::U16(_) => BitDepth::U16,
            RasterMut::F32(_) => BitDepth::F32,
        }
    }

    /// Pixel bounds.
    pub fn bounds(&self) -> RectI {
        match self {
            RasterMut::U8(v) => v.bounds(),
            RasterMut::U16(v) => v.bounds(),
            RasterMut::F32(v) => v.bounds(),
        }
    }

    /// Interleaved channels per pixel.
    pub fn channels(&self) -> usize {
        match self {
            RasterMut::U8(v) => v.channels(),
            RasterMut::U16(v) => v.channels(),
            RasterMut::F32(v) => v.channels(),
        }
    }
}

impl<'a> From<RasterView<'a, u8>> for RasterRef<'a> {
    fn from(v: RasterView<'a, u8>) -> Self {
        RasterRef::U8(v)
    }
}

impl<'a> From<RasterView<'a, u16>> for RasterRef<'a> {
    fn from(v: RasterView<'a, u16>) -> Self {
        RasterRef::U16(v)
    }
}

impl<'a> From<RasterView<'a, f32>> for RasterRef<'a> {
    fn from(v: RasterView<'a, f32>) -> Self {
        RasterRef::F32(v)
    }
}

impl<'a> From<RasterViewMut<'a, u8>> for RasterMut<'a> {
    fn from(v: RasterViewMut<'a, u8>) -> Self {
        RasterMut::U8(v)
    }
}

impl<'a> From<RasterViewMut<'a, u16>> for RasterMut<'a> {
    fn from(v: RasterViewMut<'a, u16>) -> Self {
        RasterMut::U16(v)
    }
}

impl<'a> From<RasterViewMut<'a, f32>> for RasterMut<'a> {
    fn from(v: RasterViewMut<'a, f32>) -> Self {
        RasterMut::F32(v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/view.rs"]
mod tests;
