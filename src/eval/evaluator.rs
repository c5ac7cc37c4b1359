use crate::{
    foundation::core::FrameIndex,
    scene::descriptor::{AudioCue, VisualDescriptor},
    timeline::composer::{FrameContext, Timeline},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Composed state of one global frame, ready for the external encoder.
pub struct FrameOutput {
    /// Requested frame index (before freeze clamping).
    pub frame: FrameIndex,
    /// Which scene(s) produced the frame.
    pub context: FrameContext,
    /// Composed layer stack.
    pub visual: VisualDescriptor,
    /// Audio cues; inside a transition, the union of both scenes' cues.
    pub audio: Vec<AudioCue>,
}

/// Evaluate one global frame.
///
/// Pure: the result depends only on `timeline` and `frame`, never on which frames were rendered
/// before. Out-of-range frames freeze on the nearest boundary frame.
#[tracing::instrument(level = "trace", skip(timeline), fields(frame = frame.0))]
pub fn render_frame(timeline: &Timeline, frame: FrameIndex) -> FrameOutput {
    let context = timeline.resolve(frame);
    let scenes = timeline.scenes();

    let (visual, audio) = match context {
        FrameContext::Single { scene, local } => {
            let out = scenes[scene].render(local);
            (out.visual, out.audio)
        }
        FrameContext::Transition {
            transition,
            outgoing,
            outgoing_local,
            incoming,
            incoming_local,
            progress,
            ..
        } => {
            let a = scenes[outgoing].render(outgoing_local);
            let b = scenes[incoming].render(incoming_local);
            let kind = &timeline.transitions()[transition].kind;
            let visual = timeline.blender().blend(&a.visual, &b.visual, progress, kind);
            let mut audio = a.audio;
            audio.extend(b.audio);
            (visual, audio)
        }
    };

    FrameOutput {
        frame,
        context,
        visual,
        audio,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
