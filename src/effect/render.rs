use crate::effect::controls::EffectControls;
use crate::foundation::core::RectI;
use crate::foundation::error::{WarpError, WarpResult};
use crate::raster::view::{RasterMut, RasterRef};
use crate::render::processor::{ProcessReport, Processor, RenderOpts};

/// Render the effect at `time` from `src` into the `window` of `dst`.
///
/// Source and destination must share bit depth, channel count and bounds. Controls are validated
/// and resolved against the source bounds, then the call is dispatched once on the sample type.
#[tracing::instrument(skip_all, fields(window = ?window, time = time, mode = ?controls.mode))]
pub fn render_effect(
    controls: &EffectControls,
    time: f64,
    src: RasterRef<'_>,
    dst: RasterMut<'_>,
    window: RectI,
    opts: &RenderOpts<'_>,
) -> WarpResult<ProcessReport> {
    if src.depth() != dst.depth() {
        return Err(WarpError::validation(format!(
            "source is {}, destination is {}",
            src.depth(),
            dst.depth()
        )));
    }
    if src.channels() != dst.channels() {
        return Err(WarpError::validation(format!(
            "source has {} channels, destination has {}",
            src.channels(),
            dst.channels()
        )));
    }
    if src.bounds() != dst.bounds() {
        return Err(WarpError::validation(format!(
            "source bounds {:?} differ from destination bounds {:?}",
            src.bounds(),
            dst.bounds()
        )));
    }
    controls.validate()?;

    let params = controls.resolve(src.bounds(), time);
    match (src, dst) {
        (RasterRef::U8(s), RasterMut::U8(d)) => Processor::new(params, s, d, window)
            .with_options(opts.clone())
            .process(),
        (RasterRef::U16(s), RasterMut::U16(d)) => Processor::new(params, s, d, window)
            .with_options(opts.clone())
            .process(),
        (RasterRef::F32(s), RasterMut::F32(d)) => Processor::new(params, s, d, window)
            .with_options(opts.clone())
            .process(),
        (s, d) => Err(WarpError::unsupported(format!(
            "no pipeline for {} source into {} destination",
            s.depth(),
            d.depth()
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effect/render.rs"]
mod tests;
