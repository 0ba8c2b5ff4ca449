//! fluidwarp is a fluid-style spatial warp for raster images.
//!
//! Every destination pixel is mapped through a vector field (radial swirl, directional flow or a
//! projectile wake) to a fractional source coordinate, then reconstructed by bilinear sampling
//! with edge fallbacks and an optional diffusion blur. Render windows are split into row strips
//! and processed on a rayon pool; the output does not depend on the number of workers.
//!
//! - Describe the effect with [`EffectControls`] (or build [`FieldParams`] directly)
//! - Wrap host buffers in [`RasterView`] / [`RasterViewMut`]
//! - Call [`render_effect`], or drive a [`Processor`] yourself
#![forbid(unsafe_code)]

mod effect;
mod field;
mod foundation;
mod raster;
mod render;

pub use crate::foundation::core::{Point, RectI, RenderScale, Vec2};
pub use crate::foundation::error::{WarpError, WarpResult};
pub use crate::foundation::math::resolution_scale;

pub use crate::raster::buffer::RasterBuf;
pub use crate::raster::interop::OwnedRaster;
pub use crate::raster::sample::{BitDepth, SUPPORTED_CHANNELS, Sample};
pub use crate::raster::view::{RasterMut, RasterRef, RasterView, RasterViewMut};

pub use crate::field::model::{FieldModel, compute_source_coord};
pub use crate::field::params::{FieldParams, FlowMode, is_identity};
pub use crate::field::wake::WakeFrame;

pub use crate::render::backend::{
    Accelerator, AcceleratorSession, BackendKind, BackendPreference, SwirlJob,
    UnavailableAccelerator, select_backend,
};
pub use crate::render::cancel::CancelToken;
pub use crate::render::processor::{ProcessHooks, ProcessReport, Processor, RenderOpts};
pub use crate::render::resample::{DIFFUSION_THRESHOLD, sample};
pub use crate::render::tiles::{
    PIXELS_PER_WORKER, TileStats, build_thread_pool, run_tiled, strip_ranges, worker_count,
};

pub use crate::effect::controls::EffectControls;
pub use crate::effect::render::render_effect;
