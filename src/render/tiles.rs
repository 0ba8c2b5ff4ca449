//! Row-strip partitioning of a render window and the fork-join executor that runs it.

use rayon::prelude::*;

use crate::foundation::core::{RectI, RenderScale};
use crate::foundation::error::{WarpError, WarpResult};
use crate::raster::sample::Sample;
use crate::raster::view::RasterViewMut;
use crate::render::cancel::CancelToken;

/// Pixels of work each worker gets at minimum.
pub const PIXELS_PER_WORKER: u64 = 4096;

/// Number of workers for `window` given `available` threads.
///
/// Row width counts up to 4096 pixels, so each worker gets at least ~4096 pixels and never
/// more workers than there are rows. Always at least one.
pub fn worker_count(window: RectI, available: usize) -> usize {
    let width = u64::from(window.width()).min(PIXELS_PER_WORKER);
    let by_area = width * u64::from(window.height()) / PIXELS_PER_WORKER;
    let by_area = usize::try_from(by_area).unwrap_or(usize::MAX);
    by_area.min(available).max(1)
}

/// Split rows `[y1, y2)` into at most `n` contiguous strips.
///
/// The first `h % n` strips get one extra row. Empty strips are dropped, so the result covers
/// the range exactly once in ascending order.
pub fn strip_ranges(y1: i32, y2: i32, n: usize) -> Vec<(i32, i32)> {
    let height = (i64::from(y2) - i64::from(y1)).max(0);
    let n = i64::try_from(n.max(1))
        .unwrap_or(i64::MAX)
        .min(height.max(1));
    let base = height / n;
    let extra = height % n;
    let mut out = Vec::with_capacity(n.min(height) as usize);
    let mut start = i64::from(y1);
    for i in 0..n {
        let rows = base + i64::from(i < extra);
        if rows == 0 {
            break;
        }
        out.push((start as i32, (start + rows) as i32));
        start += rows;
    }
    out
}

/// Outcome of one tiled run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TileStats {
    /// Strips that were scheduled.
    pub strips: usize,
    /// Rows fully written across all strips.
    pub rows_written: usize,
    /// Whether any worker stopped early on the cancel token.
    pub cancelled: bool,
}

/// Build a dedicated pool for a thread override.
pub fn build_thread_pool(threads: Option<usize>) -> WarpResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(WarpError::validation(
            "render option 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("warp-strip-{i}"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| WarpError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

/// Run `row_fn` over every row of `window`, one strip per worker.
///
/// `row_fn(strip, scale, y, view)` must fill row `y` of `view` inside the strip's columns. The
/// destination is split into disjoint per-strip views, so strips never share a row. Blocks until
/// every strip is done. Runs inline when there is a single strip, on `pool` when given, and on
/// the global rayon pool otherwise.
///
/// A window that is empty or not inside `dst` is a no-op.
pub fn run_tiled<T, F>(
    window: RectI,
    scale: RenderScale,
    workers: usize,
    pool: Option<&rayon::ThreadPool>,
    dst: RasterViewMut<'_, T>,
    cancel: &CancelToken,
    row_fn: F,
) -> TileStats
where
    T: Sample,
    F: Fn(RectI, RenderScale, i32, &mut RasterViewMut<'_, T>) + Sync,
{
    if window.is_empty() || !dst.bounds().contains_rect(window) {
        return TileStats::default();
    }

    let ranges = strip_ranges(window.y1, window.y2, workers);
    let strips = dst.split_rows(&ranges);
    let count = strips.len();

    let run_strip = |mut view: RasterViewMut<'_, T>| -> (usize, bool) {
        let b = view.bounds();
        let strip = window.with_rows(b.y1, b.y2);
        let mut rows = 0usize;
        for y in strip.y1..strip.y2 {
            if cancel.is_cancelled() {
                return (rows, true);
            }
            row_fn(strip, scale, y, &mut view);
            rows += 1;
        }
        (rows, false)
    };

    let results: Vec<(usize, bool)> = if count <= 1 {
        strips.into_iter().map(run_strip).collect()
    } else if let Some(pool) = pool {
        pool.install(|| strips.into_par_iter().map(run_strip).collect())
    } else {
        strips.into_par_iter().map(run_strip).collect()
    };

    results.into_iter().fold(
        TileStats {
            strips: count,
            ..TileStats::default()
        },
        |mut acc, (rows, cancelled)| {
            acc.rows_written += rows;
            acc.cancelled |= cancelled;
            acc
        },
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/tiles.rs"]
mod tests;
