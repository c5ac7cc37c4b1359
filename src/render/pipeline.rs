use rayon::prelude::*;

use crate::{
    eval::evaluator::{FrameOutput, render_frame},
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{FlowcutError, FlowcutResult},
    timeline::composer::Timeline,
};

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
/// How [`render_frames`] spreads work across threads.
pub struct RenderThreading {
    /// Evaluate chunks on a rayon pool instead of the calling thread.
    pub parallel: bool,
    /// Frames per chunk. `0` is treated as `1`.
    pub chunk_size: usize,
    /// Worker count; `None` lets rayon decide.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
/// Counters reported by [`render_frames`].
pub struct RenderStats {
    /// Frames evaluated.
    pub frames_total: u64,
    /// Chunks processed.
    pub chunks: u64,
    /// Frames that fell inside a transition window.
    pub transition_frames: u64,
}

/// Evaluate every frame in `range`, in order.
///
/// Frames are independent, so parallel and sequential runs produce identical output.
#[tracing::instrument(skip(timeline), fields(start = range.start.0, end = range.end.0))]
pub fn render_frames(
    timeline: &Timeline,
    range: FrameRange,
    threading: &RenderThreading,
) -> FlowcutResult<(Vec<FrameOutput>, RenderStats)> {
    if range.is_empty() {
        return Err(FlowcutError::validation("render range must be non-empty"));
    }
    if range.end.0 > timeline.total_duration() {
        return Err(FlowcutError::validation(format!(
            "render range end {} exceeds timeline duration {}",
            range.end.0,
            timeline.total_duration()
        )));
    }

    let chunk_size = normalized_chunk_size(threading.chunk_size);
    let pool = if threading.parallel {
        Some(build_thread_pool(threading.threads)?)
    } else {
        None
    };

    let mut out = Vec::with_capacity(range.len_frames().min(4096) as usize);
    let mut stats = RenderStats::default();
    let mut chunk_start = range.start.0;
    while chunk_start < range.end.0 {
        let chunk_end = (chunk_start + chunk_size).min(range.end.0);
        let chunk = FrameRange::new(FrameIndex(chunk_start), FrameIndex(chunk_end))
            .map_err(|e| FlowcutError::evaluation(format!("invalid chunk range: {e}")))?;

        let mut frames = match &pool {
            Some(pool) => render_chunk_parallel(timeline, chunk, pool),
            None => render_chunk_sequential(timeline, chunk),
        };
        stats.transition_frames += frames
            .iter()
            .filter(|f| f.context.is_transition())
            .count() as u64;
        stats.frames_total += chunk.len_frames();
        stats.chunks += 1;
        out.append(&mut frames);
        chunk_start = chunk_end;
    }

    tracing::debug!(
        frames = stats.frames_total,
        chunks = stats.chunks,
        parallel = threading.parallel,
        "frames rendered"
    );
    Ok((out, stats))
}

fn render_chunk_sequential(timeline: &Timeline, range: FrameRange) -> Vec<FrameOutput> {
    (range.start.0..range.end.0)
        .map(|f| render_frame(timeline, FrameIndex(f)))
        .collect()
}

fn render_chunk_parallel(
    timeline: &Timeline,
    range: FrameRange,
    pool: &rayon::ThreadPool,
) -> Vec<FrameOutput> {
    pool.install(|| {
        (range.start.0..range.end.0)
            .into_par_iter()
            .map(|f| render_frame(timeline, FrameIndex(f)))
            .collect()
    })
}

fn build_thread_pool(threads: Option<usize>) -> FlowcutResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(FlowcutError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| FlowcutError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    chunk_size.max(1) as u64
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
