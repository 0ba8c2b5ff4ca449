use image::{DynamicImage, ImageBuffer, Luma, Pixel, Primitive, Rgb, Rgba};

use crate::foundation::core::RectI;
use crate::foundation::error::{WarpError, WarpResult};
use crate::raster::buffer::RasterBuf;
use crate::raster::sample::{BitDepth, Sample};
use crate::raster::view::{RasterMut, RasterRef};

impl<T: Sample + Primitive> RasterBuf<T> {
    /// Copy an `image` buffer into a raster anchored at the origin.
    pub fn from_image<P>(img: &ImageBuffer<P, Vec<T>>) -> WarpResult<Self>
    where
        P: Pixel<Subpixel = T>,
    {
        let (w, h) = img.dimensions();
        RasterBuf::from_vec(
            img.as_raw().clone(),
            RectI::from_size(w, h),
            usize::from(P::CHANNEL_COUNT),
        )
    }

    /// Copy into an `image` buffer with pixel type `P`.
    pub fn to_image<P>(&self) -> WarpResult<ImageBuffer<P, Vec<T>>>
    where
        P: Pixel<Subpixel = T>,
    {
        if usize::from(P::CHANNEL_COUNT) != self.channels() {
            return Err(WarpError::validation(format!(
                "raster has {} channels, target pixel type has {}",
                self.channels(),
                P::CHANNEL_COUNT
            )));
        }
        let b = self.bounds();
        ImageBuffer::from_raw(b.width(), b.height(), self.data().to_vec())
            .ok_or_else(|| WarpError::validation("raster does not fit the target image buffer"))
    }
}

/// Owned raster of any supported sample type.
#[derive(Clone, Debug, PartialEq)]
pub enum OwnedRaster {
    U8(RasterBuf<u8>),
    U16(RasterBuf<u16>),
    F32(RasterBuf<f32>),
}

impl OwnedRaster {
    /// Zero-filled raster of the given depth.
    pub fn new(depth: BitDepth, bounds: RectI, channels: usize) -> WarpResult<Self> {
        Ok(match depth {
            BitDepth::U8 => OwnedRaster::U8(RasterBuf::new(bounds, channels)?),
            BitDepth::U16 => OwnedRaster::U16(RasterBuf::new(bounds, channels)?),
            BitDepth::F32 => OwnedRaster::F32(RasterBuf::new(bounds, channels)?),
        })
    }

    /// Convert a decoded image, keeping its sample depth where one is supported.
    ///
    /// Two-channel luma+alpha images are widened to RGBA. Unknown layouts become RGBA float.
    pub fn from_dynamic(img: &DynamicImage) -> WarpResult<Self> {
        Ok(match img {
            DynamicImage::ImageLuma8(b) => OwnedRaster::U8(RasterBuf::from_image(b)?),
            DynamicImage::ImageRgb8(b) => OwnedRaster::U8(RasterBuf::from_image(b)?),
            DynamicImage::ImageRgba8(b) => OwnedRaster::U8(RasterBuf::from_image(b)?),
            DynamicImage::ImageLumaA8(_) => {
                OwnedRaster::U8(RasterBuf::from_image(&img.to_rgba8())?)
            }
            DynamicImage::ImageLuma16(b) => OwnedRaster::U16(RasterBuf::from_image(b)?),
            DynamicImage::ImageRgb16(b) => OwnedRaster::U16(RasterBuf::from_image(b)?),
            DynamicImage::ImageRgba16(b) => OwnedRaster::U16(RasterBuf::from_image(b)?),
            DynamicImage::ImageLumaA16(_) => {
                OwnedRaster::U16(RasterBuf::from_image(&img.to_rgba16())?)
            }
            DynamicImage::ImageRgb32F(b) => OwnedRaster::F32(RasterBuf::from_image(b)?),
            DynamicImage::ImageRgba32F(b) => OwnedRaster::F32(RasterBuf::from_image(b)?),
            other => OwnedRaster::F32(RasterBuf::from_image(&other.to_rgba32f())?),
        })
    }

    /// Convert back into a `DynamicImage`.
    pub fn into_dynamic(self) -> WarpResult<DynamicImage> {
        Ok(match self {
            OwnedRaster::U8(b) => match b.channels() {
                1 => DynamicImage::ImageLuma8(b.to_image::<Luma<u8>>()?),
                3 => DynamicImage::ImageRgb8(b.to_image::<Rgb<u8>>()?),
                _ => DynamicImage::ImageRgba8(b.to_image::<Rgba<u8>>()?),
            },
            OwnedRaster::U16(b) => match b.channels() {
                1 => DynamicImage::ImageLuma16(b.to_image::<Luma<u16>>()?),
                3 => DynamicImage::ImageRgb16(b.to_image::<Rgb<u16>>()?),
                _ => DynamicImage::ImageRgba16(b.to_image::<Rgba<u16>>()?),
            },
            OwnedRaster::F32(b) => match b.channels() {
                3 => DynamicImage::ImageRgb32F(b.to_image::<Rgb<f32>>()?),
                4 => DynamicImage::ImageRgba32F(b.to_image::<Rgba<f32>>()?),
                n => {
                    return Err(WarpError::unsupported(format!(
                        "{n}-channel float raster has no image representation"
                    )));
                }
            },
        })
    }

    pub fn depth(&self) -> BitDepth {
        match self {
            OwnedRaster::U8(_) => BitDepth::U8,
            OwnedRaster::U16(_) => BitDepth::U16,
            OwnedRaster::F32(_) => BitDepth::F32,
        }
    }

    pub fn bounds(&self) -> RectI {
        match self {
            OwnedRaster::U8(b) => b.bounds(),
            OwnedRaster::U16(b) => b.bounds(),
            OwnedRaster::F32(b) => b.bounds(),
        }
    }

    pub fn channels(&self) -> usize {
        match self {
            OwnedRaster::U8(b) => b.channels(),
            OwnedRaster::U16(b) => b.channels(),
            OwnedRaster::F32(b) => b.channels(),
        }
    }

    pub fn as_raster_ref(&self) -> RasterRef<'_> {
        match self {
            OwnedRaster::U8(b) => RasterRef::U8(b.view()),
            OwnedRaster::U16(b) => RasterRef::U16(b.view()),
            OwnedRaster::F32(b) => RasterRef::F32(b.view()),
        }
    }

    pub fn as_raster_mut(&mut self) -> RasterMut<'_> {
        match self {
            OwnedRaster::U8(b) => RasterMut::U8(b.view_mut()),
            OwnedRaster::U16(b) => RasterMut::U16(b.view_mut()),
            OwnedRaster::F32(b) => RasterMut::F32(b.view_mut()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/interop.rs"]
mod tests;
