//! Flowcut is a deterministic, frame-indexed timeline compositor.
//!
//! An edit is an alternating sequence of scenes and transitions. For every global frame the
//! compositor resolves which scene (or pair of scenes mid-transition) is active, renders each
//! scene's layer stack at its local frame, and blends the pair when a transition is in flight.
//!
//! # Pipeline overview
//!
//! 1. **Configure**: [`EditConfig`] (JSON or [`EditConfig::default_edit`])
//! 2. **Build**: [`build_timeline`] validates every duration, curve and asset reference up front
//! 3. **Evaluate**: [`render_frame`] maps a [`FrameIndex`] to a [`FrameOutput`]
//! 4. **Hand off**: the external encoder consumes [`VisualDescriptor`]s, fetches pixels through
//!    an [`AssetSource`], and mixes audio from an [`AudioManifest`]
//!
//! Every procedural effect is seeded by string keys, so the same frame always renders the same
//! way regardless of evaluation order or thread count.
#![forbid(unsafe_code)]

mod animation;
mod assets;
mod audio;
mod composition;
mod effects;
mod eval;
mod foundation;
mod render;
mod scene;
mod timeline;

pub use animation::ease::Ease;
pub use animation::interp::{Curve, Extrapolate, InterpOpts, interpolate};
pub use animation::seeded::{EffectRng, artifact_key, float01, phase_of};
pub use animation::spring::{SpringParams, settle_frames, spring_progress};
pub use animation::text::{CharState, RevealStyle, TextAnimator, TextReveal, TextRevealSpec};
pub use assets::source::{
    AssetFailure, AssetSource, AudioSamples, FetchedFrame, FrameAssets, PixelBuffer,
    StillFrameSource, fetch_frame_assets,
};
pub use audio::manifest::{AudioManifest, AudioSegment, build_audio_manifest};
pub use composition::build::build_timeline;
pub use composition::model::{AssetDef, AssetKind, EditConfig, SceneSpec, TransitionSpec};
pub use effects::blend::{GLITCH_BUCKETS, TransitionBlender, flash_opacity};
pub use effects::transitions::{
    DEFAULT_GLITCH_DISPLACEMENT, TransitionKind, TransitionTiming, WipeDir, parse_transition,
    parse_transition_kind_params,
};
pub use eval::evaluator::{FrameOutput, render_frame};
pub use foundation::color::ColorDef;
pub use foundation::core::{Affine, Canvas, Fps, FrameIndex, FrameRange, Rgba8Premul, Vec2};
pub use foundation::error::{FlowcutError, FlowcutResult};
pub use render::pipeline::{RenderStats, RenderThreading, render_frames};
pub use scene::descriptor::{
    Artifact, ArtifactKind, AudioCue, BACKDROP_LAYER, BlendMode, ColorGrade, GradientStop, Inset,
    Layer, LayerKind, LayerTransform, SceneOutput, VisualDescriptor,
};
pub use scene::{SceneEnv, SceneKind, SceneRenderer, SceneSetup};
pub use timeline::composer::{FrameContext, Timeline, TimelineBuilder, TransitionDef};
