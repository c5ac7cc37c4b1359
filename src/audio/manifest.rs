use crate::{
    eval::evaluator::render_frame,
    foundation::core::{Fps, FrameIndex, FrameRange},
    foundation::error::{FlowcutError, FlowcutResult},
    timeline::composer::Timeline,
};

/// Two cues continue one segment when their source times differ by one frame within this.
const CONTINUITY_EPS_S: f64 = 1e-6;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One uninterrupted run of an asset: consecutive frames with consecutive source times.
pub struct AudioSegment {
    /// Asset key.
    pub asset: String,
    /// First timeline frame of the run.
    pub timeline_start: FrameIndex,
    /// Source time at `timeline_start`, in seconds.
    pub source_start_s: f64,
    /// Gain for each frame of the run, in `[0, 1]`.
    pub gains: Vec<f64>,
}

impl AudioSegment {
    /// Timeline frames covered by this run.
    pub fn frames(&self) -> FrameRange {
        FrameRange {
            start: self.timeline_start,
            end: FrameIndex(self.timeline_start.0 + self.gains.len() as u64),
        }
    }

    /// Loudest gain in the run.
    pub fn peak_gain(&self) -> f64 {
        self.gains.iter().copied().fold(0.0, f64::max)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Per-asset gain automation for a frame range, handed to the external mixer.
pub struct AudioManifest {
    /// Timeline frame rate.
    pub fps: Fps,
    /// Frames described.
    pub range: FrameRange,
    /// Runs in order of first appearance.
    pub segments: Vec<AudioSegment>,
}

struct OpenRun {
    segment: usize,
    last_frame: u64,
    next_source_s: f64,
}

/// Collect every frame's audio cues in `range` into contiguous per-asset segments.
#[tracing::instrument(skip(timeline))]
pub fn build_audio_manifest(
    timeline: &Timeline,
    range: FrameRange,
) -> FlowcutResult<AudioManifest> {
    if range.is_empty() {
        return Err(FlowcutError::validation(
            "audio manifest range must be non-empty",
        ));
    }
    if range.end.0 > timeline.total_duration() {
        return Err(FlowcutError::validation(format!(
            "audio manifest range end {} exceeds timeline duration {}",
            range.end.0,
            timeline.total_duration()
        )));
    }

    let fps = timeline.fps();
    let step = fps.frame_duration_secs();
    let mut segments = Vec::<AudioSegment>::new();
    let mut open = Vec::<OpenRun>::new();

    for f in range.start.0..range.end.0 {
        for cue in render_frame(timeline, FrameIndex(f)).audio {
            let run = open.iter_mut().find(|r| {
                f > 0
                    && r.last_frame == f - 1
                    && segments[r.segment].asset == cue.asset
                    && (r.next_source_s - cue.source_time_s).abs() < CONTINUITY_EPS_S
            });
            match run {
                Some(r) => {
                    segments[r.segment].gains.push(cue.gain);
                    r.last_frame = f;
                    r.next_source_s = cue.source_time_s + step;
                }
                None => {
                    open.push(OpenRun {
                        segment: segments.len(),
                        last_frame: f,
                        next_source_s: cue.source_time_s + step,
                    });
                    segments.push(AudioSegment {
                        asset: cue.asset,
                        timeline_start: FrameIndex(f),
                        source_start_s: cue.source_time_s,
                        gains: vec![cue.gain],
                    });
                }
            }
        }
        open.retain(|r| r.last_frame == f);
    }

    tracing::debug!(segments = segments.len(), "audio manifest built");
    Ok(AudioManifest {
        fps,
        range,
        segments,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/audio/manifest.rs"]
mod tests;
