use crate::field::model::FieldModel;
use crate::field::params::FieldParams;
use crate::foundation::core::{RectI, RenderScale};
use crate::foundation::error::{WarpError, WarpResult};
use crate::raster::sample::Sample;
use crate::raster::view::{RasterView, RasterViewMut};
use crate::render::backend::{Accelerator, BackendKind, BackendPreference, SwirlJob, select_backend};
use crate::render::cancel::CancelToken;
use crate::render::resample;
use crate::render::tiles::{TileStats, build_thread_pool, run_tiled, worker_count};

/// Per-call execution options.
#[derive(Clone, Default)]
pub struct RenderOpts<'a> {
    /// Processing path preference.
    pub backend: BackendPreference,
    /// Worker thread override. `None` uses the global rayon pool.
    pub threads: Option<usize>,
    /// Polled once per output row.
    pub cancel: CancelToken,
    /// Device considered for the accelerated path.
    pub accelerator: Option<&'a dyn Accelerator>,
}

impl std::fmt::Debug for RenderOpts<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderOpts")
            .field("backend", &self.backend)
            .field("threads", &self.threads)
            .field("cancel", &self.cancel)
            .field("accelerator", &self.accelerator.map(|a| a.name()))
            .finish()
    }
}

/// What a [`Processor::process`] call did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ProcessReport {
    /// Path taken, `None` when the window was rejected and nothing ran.
    pub path: Option<BackendKind>,
    pub workers: usize,
    pub strips: usize,
    pub rows_written: usize,
    pub cancelled: bool,
}

/// Callbacks run around the processing step of a valid window.
pub trait ProcessHooks {
    fn pre_process(&mut self, _window: RectI) {}

    fn post_process(&mut self, _report: &ProcessReport) {}
}

/// One warp invocation: a parameter snapshot applied to a source raster over a render window of
/// the destination.
pub struct Processor<'a, T> {
    params: FieldParams,
    src: RasterView<'a, T>,
    dst: RasterViewMut<'a, T>,
    window: RectI,
    scale: RenderScale,
    opts: RenderOpts<'a>,
    hooks: Option<&'a mut dyn ProcessHooks>,
}

impl<'a, T: Sample> Processor<'a, T> {
    pub fn new(
        params: FieldParams,
        src: RasterView<'a, T>,
        dst: RasterViewMut<'a, T>,
        window: RectI,
    ) -> Self {
        Self {
            params,
            src,
            dst,
            window,
            scale: RenderScale::default(),
            opts: RenderOpts::default(),
            hooks: None,
        }
    }

    pub fn with_scale(mut self, scale: RenderScale) -> Self {
        self.scale = scale;
        self
    }

    /// Replace the options. An accelerator set earlier is kept unless `opts` names one.
    pub fn with_options(mut self, opts: RenderOpts<'a>) -> Self {
        let accelerator = opts.accelerator.or(self.opts.accelerator);
        self.opts = RenderOpts {
            accelerator,
            ..opts
        };
        self
    }

    pub fn with_accelerator(mut self, accelerator: &'a dyn Accelerator) -> Self {
        self.opts.accelerator = Some(accelerator);
        self
    }

    pub fn with_hooks(mut self, hooks: &'a mut dyn ProcessHooks) -> Self {
        self.hooks = Some(hooks);
        self
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    /// Warp the render window of the destination.
    ///
    /// An empty or inverted window, one outside the destination, or an empty source is a silent
    /// no-op. Mismatched channel layouts, an invalid thread override and accelerator failures are
    /// errors.
    #[tracing::instrument(skip_all, fields(window = ?self.window, mode = ?self.params.mode))]
    pub fn process(&mut self) -> WarpResult<ProcessReport> {
        let window = self.window;
        if window.is_empty()
            || !self.dst.bounds().contains_rect(window)
            || self.src.bounds().is_empty()
        {
            tracing::debug!(dst = ?self.dst.bounds(), "render window rejected, nothing to do");
            return Ok(ProcessReport::default());
        }
        if self.opts.threads == Some(0) {
            return Err(WarpError::validation(
                "render option 'threads' must be >= 1 when set",
            ));
        }
        if self.src.channels() != self.dst.channels() {
            return Err(WarpError::validation(format!(
                "source has {} channels, destination has {}",
                self.src.channels(),
                self.dst.channels()
            )));
        }

        let path = select_backend(
            self.opts.backend,
            self.opts.accelerator,
            T::DEPTH,
            self.params.mode,
            self.src.bounds().contains_rect(window),
        )?;
        tracing::debug!(?path, "selected backend");

        if let Some(hooks) = self.hooks.as_deref_mut() {
            hooks.pre_process(window);
        }

        let report = match (path, self.opts.accelerator) {
            (BackendKind::Accelerated, Some(accelerator)) => self.process_accelerated(accelerator)?,
            _ => self.process_cpu()?,
        };

        if report.cancelled {
            tracing::warn!(rows = report.rows_written, "render cancelled");
        }
        if let Some(hooks) = self.hooks.as_deref_mut() {
            hooks.post_process(&report);
        }
        Ok(report)
    }

    fn process_cpu(&mut self) -> WarpResult<ProcessReport> {
        let available = self
            .opts
            .threads
            .unwrap_or_else(rayon::current_num_threads);
        let workers = worker_count(self.window, available);
        let pool = match self.opts.threads {
            Some(n) if workers > 1 => Some(build_thread_pool(Some(n))?),
            _ => None,
        };
        tracing::debug!(workers, "tiled cpu path");

        let stats = match self.src.channels() {
            1 => self.run_strips::<1>(workers, pool.as_ref()),
            3 => self.run_strips::<3>(workers, pool.as_ref()),
            4 => self.run_strips::<4>(workers, pool.as_ref()),
            n => {
                return Err(WarpError::unsupported(format!("{n} channels per pixel")));
            }
        };
        Ok(ProcessReport {
            path: Some(BackendKind::Cpu),
            workers,
            strips: stats.strips,
            rows_written: stats.rows_written,
            cancelled: stats.cancelled,
        })
    }

    fn run_strips<const N: usize>(
        &mut self,
        workers: usize,
        pool: Option<&rayon::ThreadPool>,
    ) -> TileStats {
        let model = FieldModel::new(&self.params);
        let src = self.src;
        run_tiled(
            self.window,
            self.scale,
            workers,
            pool,
            self.dst.reborrow(),
            &self.opts.cancel,
            |strip, _scale, y, view| {
                let x_offset = (strip.x1 - view.bounds().x1) as usize * N;
                let row = &mut view.row_mut(y)[x_offset..];
                for (px, x) in row.chunks_exact_mut(N).zip(strip.x1..strip.x2) {
                    let coord = model.source_coord(x, y);
                    let blur = model.turbulence(x, y);
                    px.copy_from_slice(&resample::sample::<T, N>(&src, coord, x, y, blur));
                }
            },
        )
    }

    fn process_accelerated(&mut self, accelerator: &dyn Accelerator) -> WarpResult<ProcessReport> {
        let window = self.window;
        let report = ProcessReport {
            path: Some(BackendKind::Accelerated),
            workers: 1,
            strips: 1,
            ..ProcessReport::default()
        };
        if self.opts.cancel.is_cancelled() {
            return Ok(ProcessReport {
                cancelled: true,
                ..report
            });
        }

        let channels = self.src.channels();
        let row_len = window.width() as usize * channels;
        let rows = window.height() as usize;
        let src_x = (window.x1 - self.src.bounds().x1) as usize * channels;
        let dst_x = (window.x1 - self.dst.bounds().x1) as usize * channels;

        let mut packed_src = Vec::with_capacity(row_len * rows);
        for y in window.y1..window.y2 {
            packed_src.extend_from_slice(&self.src.row(y)[src_x..src_x + row_len]);
        }
        let src_bytes = T::as_u8(&packed_src)
            .ok_or_else(|| WarpError::unsupported("accelerator only handles u8 samples"))?;
        let mut packed_dst = vec![0u8; row_len * rows];

        tracing::debug!(accelerator = accelerator.name(), "accelerated path");
        {
            let mut session = accelerator.open_session()?;
            session.process_swirl(SwirlJob {
                dst: &mut packed_dst,
                src: src_bytes,
                width: window.width(),
                height: window.height(),
                center_x: (self.params.center.x - f64::from(window.x1)) as f32,
                center_y: (self.params.center.y - f64::from(window.y1)) as f32,
                intensity: self.params.intensity as f32,
                decay: self.params.decay as f32,
                channels,
            })?;
        }

        for (y, packed) in (window.y1..window.y2).zip(packed_dst.chunks_exact(row_len.max(1))) {
            let row = T::as_u8_mut(&mut self.dst.row_mut(y)[dst_x..dst_x + row_len])
                .ok_or_else(|| WarpError::unsupported("accelerator only handles u8 samples"))?;
            row.copy_from_slice(packed);
        }

        Ok(ProcessReport {
            rows_written: rows,
            ..report
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/processor.rs"]
mod tests;
