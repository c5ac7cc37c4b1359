//! Scene renderers: pure functions from a local frame to a visual descriptor plus audio cues.

use std::collections::BTreeMap;

use crate::{
    animation::seeded::EffectRng,
    foundation::core::{Canvas, FrameIndex, Fps},
    foundation::error::{FlowcutError, FlowcutResult},
};

pub(crate) mod common;
pub(crate) mod descriptor;
pub(crate) mod glitch;
pub(crate) mod intro;
pub(crate) mod outro;
pub(crate) mod speed;

use descriptor::SceneOutput;

/// A fixed-duration segment with its own render function.
///
/// Implementations hold no mutable state; `render` may be called for any frame in any order and
/// from several threads at once.
pub trait SceneRenderer: Send + Sync + std::fmt::Debug {
    /// Stable scene id from the edit config.
    fn id(&self) -> &str;

    /// Intrinsic duration in frames, at least 1.
    fn duration_frames(&self) -> u64;

    /// Render local frame `local`. Frames past the end freeze on the last frame.
    fn render(&self, local: FrameIndex) -> SceneOutput;
}

/// Edit-wide values shared by every scene.
#[derive(Clone, Copy, Debug)]
pub struct SceneEnv {
    /// Timeline frame rate.
    pub fps: Fps,
    /// Output canvas.
    pub canvas: Canvas,
    /// Seeded RNG for procedural artifacts.
    pub rng: EffectRng,
}

/// Content references for one scene, resolved from the edit config.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSetup {
    /// Scene id.
    pub id: String,
    /// Duration in frames.
    pub duration_frames: u64,
    /// Footage asset key.
    pub footage: String,
    /// Seconds skipped at the head of the footage.
    pub trim_start_sec: f64,
    /// Sound effect assets by role (`riser`, `impact`, ...).
    pub sfx: BTreeMap<String, String>,
}

impl SceneSetup {
    /// Asset bound to sfx `role`, or a validation error naming the scene.
    pub fn sfx_asset(&self, role: &str) -> FlowcutResult<&str> {
        self.sfx.get(role).map(String::as_str).ok_or_else(|| {
            FlowcutError::validation(format!(
                "scene \"{}\" is missing sfx role \"{role}\"",
                self.id
            ))
        })
    }

    pub(crate) fn clamp_local(&self, local: FrameIndex) -> u64 {
        local.0.min(self.duration_frames.saturating_sub(1))
    }
}

/// Scene content type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// Zoom-in title card with impact flash.
    Intro,
    /// Block-displacement glitch footage.
    Glitch,
    /// Periodic speed ramps with motion blur.
    Speed,
    /// CRT shutdown ending.
    Outro,
}

impl SceneKind {
    /// Sfx roles this kind requires in its [`SceneSetup`].
    pub fn sfx_roles(self) -> &'static [&'static str] {
        match self {
            Self::Intro => &["riser", "impact"],
            Self::Glitch => &["glitch"],
            Self::Speed => &["whoosh"],
            Self::Outro => &["drone", "impact"],
        }
    }

    /// Build the renderer for this kind.
    pub fn build(self, setup: SceneSetup, env: SceneEnv) -> FlowcutResult<Box<dyn SceneRenderer>> {
        if setup.duration_frames == 0 {
            return Err(FlowcutError::validation(format!(
                "scene \"{}\" duration must be >= 1 frame",
                setup.id
            )));
        }
        Ok(match self {
            Self::Intro => Box::new(intro::IntroScene::new(setup, env)?),
            Self::Glitch => Box::new(glitch::GlitchScene::new(setup, env)?),
            Self::Speed => Box::new(speed::SpeedScene::new(setup, env)?),
            Self::Outro => Box::new(outro::OutroScene::new(setup, env)?),
        })
    }
}
