//! Frame resolution for an alternating `[scene, transition, scene, ...]` sequence.
//!
//! Scene `i` starts at `Σ_{k<i} d_k − Σ_{k<i} D_k`. Transition `j` occupies the last `D_j` frames
//! of scene `j` and the first `D_j` frames of scene `j + 1`, so the window is
//! `[start(j + 1), start(j + 1) + D_j)`. Inside it both scenes render at their own local frames.

use crate::{
    animation::seeded::EffectRng,
    effects::{
        blend::TransitionBlender,
        transitions::{TransitionKind, TransitionTiming},
    },
    foundation::core::{Canvas, FrameIndex, FrameRange, Fps},
    foundation::error::{FlowcutError, FlowcutResult},
    scene::SceneRenderer,
};

/// A transition between two adjacent scenes.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TransitionDef {
    /// Id used in logs and tooling.
    pub id: String,
    /// Overlap length in frames, at least 1.
    pub duration_frames: u64,
    /// Presentation rule.
    pub kind: TransitionKind,
    /// Progress weight.
    pub timing: TransitionTiming,
}

/// What a global frame maps to. Recomputed per query.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum FrameContext {
    /// One scene owns the frame.
    Single {
        /// Scene index.
        scene: usize,
        /// Frame within the scene.
        local: FrameIndex,
    },
    /// Two scenes overlap inside transition `transition`.
    Transition {
        /// Transition index.
        transition: usize,
        /// Scene being left.
        outgoing: usize,
        /// Outgoing scene's local frame.
        outgoing_local: FrameIndex,
        /// Scene being entered.
        incoming: usize,
        /// Incoming scene's local frame.
        incoming_local: FrameIndex,
        /// `(f − window_start) / D`, in `[0, 1)`.
        raw_progress: f64,
        /// `raw_progress` through the transition's timing.
        progress: f64,
    },
}

impl FrameContext {
    /// `true` inside a transition window.
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Transition { .. })
    }
}

enum Entry {
    Scene(Box<dyn SceneRenderer>),
    Transition(TransitionDef),
}

/// Collects entries in order, validates them and builds a [`Timeline`].
pub struct TimelineBuilder {
    fps: Fps,
    canvas: Canvas,
    rng: EffectRng,
    entries: Vec<Entry>,
}

impl TimelineBuilder {
    pub fn new(fps: Fps, canvas: Canvas, rng: EffectRng) -> Self {
        Self {
            fps,
            canvas,
            rng,
            entries: Vec::new(),
        }
    }

    pub fn scene(mut self, scene: Box<dyn SceneRenderer>) -> Self {
        self.entries.push(Entry::Scene(scene));
        self
    }

    pub fn transition(mut self, transition: TransitionDef) -> Self {
        self.entries.push(Entry::Transition(transition));
        self
    }

    /// Check ordering and durations, then precompute scene start offsets.
    pub fn build(self) -> FlowcutResult<Timeline> {
        self.fps.validate()?;
        self.canvas.validate()?;

        let mut scenes: Vec<Box<dyn SceneRenderer>> = Vec::new();
        let mut transitions = Vec::new();
        for (i, entry) in self.entries.into_iter().enumerate() {
            match (i % 2, entry) {
                (0, Entry::Scene(s)) => scenes.push(s),
                (1, Entry::Transition(t)) => transitions.push(t),
                (_, Entry::Transition(t)) => {
                    return Err(FlowcutError::validation(format!(
                        "entry {i}: expected a scene, found transition \"{}\"",
                        t.id
                    )));
                }
                (_, Entry::Scene(s)) => {
                    return Err(FlowcutError::validation(format!(
                        "entry {i}: expected a transition, found scene \"{}\"",
                        s.id()
                    )));
                }
            }
        }
        if scenes.is_empty() {
            return Err(FlowcutError::validation("timeline needs at least one scene"));
        }
        if transitions.len() != scenes.len() - 1 {
            return Err(FlowcutError::validation(
                "timeline must end with a scene, not a transition",
            ));
        }

        for s in &scenes {
            if s.duration_frames() == 0 {
                return Err(FlowcutError::validation(format!(
                    "scene \"{}\" duration must be >= 1 frame",
                    s.id()
                )));
            }
        }
        for (j, t) in transitions.iter().enumerate() {
            let (a, b) = (&scenes[j], &scenes[j + 1]);
            if t.duration_frames == 0 {
                return Err(FlowcutError::validation(format!(
                    "transition \"{}\" duration must be >= 1 frame",
                    t.id
                )));
            }
            let limit = a.duration_frames().min(b.duration_frames());
            if t.duration_frames > limit {
                return Err(FlowcutError::validation(format!(
                    "transition \"{}\" lasts {} frames but adjacent scenes \"{}\"/\"{}\" allow at most {limit}",
                    t.id,
                    t.duration_frames,
                    a.id(),
                    b.id()
                )));
            }
        }
        for i in 1..scenes.len().saturating_sub(1) {
            let inbound = transitions[i - 1].duration_frames;
            let outbound = transitions[i].duration_frames;
            if inbound + outbound > scenes[i].duration_frames() {
                return Err(FlowcutError::validation(format!(
                    "transitions \"{}\" and \"{}\" overlap inside scene \"{}\" ({} + {} > {})",
                    transitions[i - 1].id,
                    transitions[i].id,
                    scenes[i].id(),
                    inbound,
                    outbound,
                    scenes[i].duration_frames()
                )));
            }
        }

        let mut starts = Vec::with_capacity(scenes.len());
        let mut cursor = 0u64;
        for (i, s) in scenes.iter().enumerate() {
            starts.push(cursor);
            cursor += s.duration_frames();
            if let Some(t) = transitions.get(i) {
                cursor -= t.duration_frames;
            }
        }
        let total = cursor;

        tracing::debug!(
            scenes = scenes.len(),
            transitions = transitions.len(),
            total,
            ?starts,
            "timeline built"
        );

        Ok(Timeline {
            fps: self.fps,
            canvas: self.canvas,
            rng: self.rng,
            blender: TransitionBlender::new(self.canvas, self.rng),
            scenes,
            transitions,
            starts,
            total,
        })
    }
}

/// Immutable, validated timeline. Safe to query from many threads.
#[derive(Debug)]
pub struct Timeline {
    fps: Fps,
    canvas: Canvas,
    rng: EffectRng,
    blender: TransitionBlender,
    scenes: Vec<Box<dyn SceneRenderer>>,
    transitions: Vec<TransitionDef>,
    starts: Vec<u64>,
    total: u64,
}

impl Timeline {
    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn rng(&self) -> EffectRng {
        self.rng
    }

    pub fn blender(&self) -> &TransitionBlender {
        &self.blender
    }

    pub fn scenes(&self) -> &[Box<dyn SceneRenderer>] {
        &self.scenes
    }

    pub fn transitions(&self) -> &[TransitionDef] {
        &self.transitions
    }

    /// Global frame at which scene `i` starts.
    pub fn scene_start(&self, i: usize) -> Option<u64> {
        self.starts.get(i).copied()
    }

    /// `Σ scene durations − Σ transition durations`.
    pub fn total_duration(&self) -> u64 {
        self.total
    }

    /// `[0, total_duration)`.
    pub fn frame_range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.total),
        }
    }

    /// Frames covered by transition `j`.
    pub fn transition_window(&self, j: usize) -> Option<FrameRange> {
        let t = self.transitions.get(j)?;
        let start = *self.starts.get(j + 1)?;
        Some(FrameRange {
            start: FrameIndex(start),
            end: FrameIndex(start + t.duration_frames),
        })
    }

    /// Map a global frame to its scene(s). Frames past the end freeze on the last frame.
    pub fn resolve(&self, frame: FrameIndex) -> FrameContext {
        let f = self.frame_range().clamp(frame).0;
        // starts[0] == 0, so the partition point is at least 1.
        let owner = self.starts.partition_point(|&s| s <= f).saturating_sub(1);

        if owner > 0 {
            let j = owner - 1;
            let window_start = self.starts[owner];
            let t = &self.transitions[j];
            if f < window_start + t.duration_frames {
                let raw = (f - window_start) as f64 / t.duration_frames as f64;
                return FrameContext::Transition {
                    transition: j,
                    outgoing: j,
                    outgoing_local: FrameIndex(f - self.starts[j]),
                    incoming: owner,
                    incoming_local: FrameIndex(f - window_start),
                    raw_progress: raw,
                    progress: t.timing.apply(raw),
                };
            }
        }

        FrameContext::Single {
            scene: owner,
            local: FrameIndex(f - self.starts[owner]),
        }
    }

    /// [`Timeline::resolve`] for signed frames; negatives freeze on frame 0.
    pub fn resolve_signed(&self, frame: i64) -> FrameContext {
        self.resolve(FrameIndex(u64::try_from(frame).unwrap_or(0)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/composer.rs"]
mod tests;
