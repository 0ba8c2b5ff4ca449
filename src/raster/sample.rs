use crate::foundation::error::{WarpError, WarpResult};

/// Storage type of one channel value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BitDepth {
    /// 8-bit unsigned integer samples.
    U8,
    /// 16-bit unsigned integer samples.
    U16,
    /// Normalized 32-bit float samples.
    F32,
}

impl BitDepth {
    /// Value of a fully saturated channel.
    pub fn white_point(self) -> f64 {
        match self {
            BitDepth::U8 => 255.0,
            BitDepth::U16 => 65535.0,
            BitDepth::F32 => 1.0,
        }
    }
}

impl std::fmt::Display for BitDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BitDepth::U8 => "u8",
            BitDepth::U16 => "u16",
            BitDepth::F32 => "f32",
        };
        f.write_str(name)
    }
}

/// A channel value the resampler can read and write.
///
/// Narrowing from `f64` is an `as` cast: integer types truncate toward zero and saturate, they
/// are never rounded.
pub trait Sample: Copy + Default + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// Bit depth tag for this storage type.
    const DEPTH: BitDepth;

    /// Widen to `f64` without loss.
    fn to_f64(self) -> f64;

    /// Narrow from `f64` by cast.
    fn from_f64(v: f64) -> Self;

    /// Byte view of 8-bit samples, `None` for wider types.
    fn as_u8(_samples: &[Self]) -> Option<&[u8]> {
        None
    }

    /// Mutable byte view of 8-bit samples, `None` for wider types.
    fn as_u8_mut(_samples: &mut [Self]) -> Option<&mut [u8]> {
        None
    }
}

impl Sample for u8 {
    const DEPTH: BitDepth = BitDepth::U8;

    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn from_f64(v: f64) -> Self {
        v as u8
    }

    fn as_u8(samples: &[Self]) -> Option<&[u8]> {
        Some(samples)
    }

    fn as_u8_mut(samples: &mut [Self]) -> Option<&mut [u8]> {
        Some(samples)
    }
}

impl Sample for u16 {
    const DEPTH: BitDepth = BitDepth::U16;

    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn from_f64(v: f64) -> Self {
        v as u16
    }
}

impl Sample for f32 {
    const DEPTH: BitDepth = BitDepth::F32;

    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn from_f64(v: f64) -> Self {
        v as f32
    }
}

/// Channel counts the processor is built for: alpha-only, RGB and RGBA.
pub const SUPPORTED_CHANNELS: [usize; 3] = [1, 3, 4];

/// Reject channel layouts other than 1, 3 or 4 interleaved components.
pub fn check_channels(channels: usize) -> WarpResult<()> {
    if SUPPORTED_CHANNELS.contains(&channels) {
        Ok(())
    } else {
        Err(WarpError::unsupported(format!(
            "{channels} channels per pixel (expected 1, 3 or 4)"
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/sample.rs"]
mod tests;
