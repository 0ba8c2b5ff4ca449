use crate::field::params::FlowMode;
use crate::foundation::error::{WarpError, WarpResult};
use crate::raster::sample::BitDepth;

/// Packed 8-bit swirl request handed to an accelerator.
///
/// `src` and `dst` hold `height` rows of `width * channels` samples with no padding. The center
/// is relative to the first sample of the buffers.
#[derive(Debug)]
pub struct SwirlJob<'a> {
    pub dst: &'a mut [u8],
    pub src: &'a [u8],
    pub width: u32,
    pub height: u32,
    pub center_x: f32,
    pub center_y: f32,
    pub intensity: f32,
    pub decay: f32,
    pub channels: usize,
}

/// Device resources held for a single render call. Released on drop.
pub trait AcceleratorSession {
    /// Warp `job.src` into `job.dst` in place.
    fn process_swirl(&mut self, job: SwirlJob<'_>) -> WarpResult<()>;
}

/// Optional hardware path for the radial swirl on 8-bit images.
///
/// Implementations are queried once per call. A session never outlives the call that opened it.
pub trait Accelerator: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Capability query. When `false`, [`Accelerator::open_session`] must fail.
    fn is_available(&self) -> bool;

    /// Acquire device resources for one call.
    fn open_session(&self) -> WarpResult<Box<dyn AcceleratorSession + '_>>;
}

/// Placeholder accelerator that is never available.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableAccelerator;

impl Accelerator for UnavailableAccelerator {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn open_session(&self) -> WarpResult<Box<dyn AcceleratorSession + '_>> {
        Err(WarpError::unsupported("no accelerator is available"))
    }
}

/// Caller preference for the processing path.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BackendPreference {
    /// Use the accelerator when the call is eligible, otherwise the CPU.
    #[default]
    Auto,
    /// Always the tiled CPU path.
    Cpu,
    /// Require the accelerator; ineligible calls fail.
    Accelerated,
}

/// Path a call was executed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Tiled multi-threaded CPU processing.
    Cpu,
    /// An [`Accelerator`] session.
    Accelerated,
}

/// Pick the processing path for one call.
///
/// The accelerator is eligible only for available devices, 8-bit samples, radial swirl and a
/// window that lies inside the source. `Auto` falls back to the CPU; `Accelerated` reports why it
/// cannot run.
pub fn select_backend(
    preference: BackendPreference,
    accelerator: Option<&dyn Accelerator>,
    depth: BitDepth,
    mode: FlowMode,
    window_in_source: bool,
) -> WarpResult<BackendKind> {
    if preference == BackendPreference::Cpu {
        return Ok(BackendKind::Cpu);
    }

    let blocker = match accelerator {
        None => Some("no accelerator configured".to_owned()),
        Some(a) if !a.is_available() => Some(format!("accelerator '{}' is not available", a.name())),
        Some(_) if depth != BitDepth::U8 => {
            Some(format!("accelerator only handles u8 samples, got {depth}"))
        }
        Some(_) if mode != FlowMode::RadialSwirl => {
            Some(format!("accelerator only handles radial swirl, got {mode:?}"))
        }
        Some(_) if !window_in_source => {
            Some("render window is not inside the source bounds".to_owned())
        }
        Some(_) => None,
    };

    match (preference, blocker) {
        (_, None) => Ok(BackendKind::Accelerated),
        (BackendPreference::Accelerated, Some(reason)) => Err(WarpError::unsupported(reason)),
        (_, Some(_)) => Ok(BackendKind::Cpu),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
