//! Coordinate-space partitioning and the worker-count policy.

use std::thread;

/// Hard cap on detected hardware concurrency.
const MAX_HARDWARE_THREADS: usize = 64;

/// Grids below this edge length run inline on the calling thread.
const PARALLEL_MIN_RESOLUTION: u32 = 1024;

/// An ordered run of grid coordinates assigned to one worker.
///
/// Chunks produced by [`partition`] are disjoint and their union covers the
/// full coordinate space exactly once.
pub type WorkChunk = Vec<(u32, u32)>;

/// Decides how many workers to use for a grid of the given resolution.
///
/// Detected parallelism is clamped to [1, 64] and one core is left for the
/// caller. Small grids always run inline: below 1024x1024 the sampling work
/// does not repay the thread-launch overhead. 1024 and 2048 grids cap out
/// at 2 and 4 workers for the same reason; anything larger takes every
/// usable core.
pub fn worker_count(resolution: u32) -> usize {
    let hardware = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .clamp(1, MAX_HARDWARE_THREADS);
    let usable = hardware.saturating_sub(1).max(1);

    if resolution < PARALLEL_MIN_RESOLUTION || usable <= 1 {
        return 1;
    }
    match resolution {
        1024 => 2,
        2048 => usable.min(4),
        _ => usable,
    }
}

/// Splits an N x N coordinate space into `workers` contiguous chunks.
///
/// Coordinates are enumerated with x as the outer loop and y as the inner
/// loop. Each chunk takes up to `total / workers + 1` coordinates; the last
/// chunk absorbs the remainder and may be smaller, or empty when the
/// earlier chunks already cover the space. Deterministic for a given
/// `(resolution, workers)` pair.
///
/// # Panics
/// Panics if `workers` is zero.
pub fn partition(resolution: u32, workers: usize) -> Vec<WorkChunk> {
    assert!(workers > 0, "worker count must be at least 1");

    let total = (resolution as usize) * (resolution as usize);
    let per_chunk = total / workers + 1;

    let mut coords = (0..resolution).flat_map(|x| (0..resolution).map(move |y| (x, y)));

    let mut chunks = Vec::with_capacity(workers);
    for _ in 0..workers {
        let chunk: WorkChunk = coords.by_ref().take(per_chunk).collect();
        chunks.push(chunk);
    }
    chunks
}
