use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    animation::ease::Ease,
    foundation::core::{Canvas, Fps},
    foundation::error::{FlowcutError, FlowcutResult},
    scene::SceneKind,
};

/// A complete edit: canvas, frame rate, asset table and the ordered scene/transition list.
///
/// This is the JSON-facing description. [`crate::build_timeline`] validates it and turns it into
/// an immutable [`crate::Timeline`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EditConfig {
    /// Timeline frame rate.
    pub fps: Fps,
    /// Output canvas dimensions.
    pub canvas: Canvas,
    /// Salt mixed into every procedural decision.
    #[serde(default)]
    pub seed: u64,
    /// Asset table keyed by stable asset keys.
    pub assets: BTreeMap<String, AssetDef>,
    /// Scenes in playback order.
    pub scenes: Vec<SceneSpec>,
    /// Transitions; entry `j` joins scene `j` and scene `j + 1`.
    #[serde(default)]
    pub transitions: Vec<TransitionSpec>,
}

/// Media type of an asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// Footage with picture (and usually sound).
    Video,
    /// Sound only.
    Audio,
}

/// Asset table entry. The URI is opaque to flowcut and handed to the asset source.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssetDef {
    /// Media type.
    pub kind: AssetKind,
    /// Location understood by the asset source.
    pub uri: String,
}

/// One scene of the edit.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneSpec {
    /// Unique id.
    pub id: String,
    /// Content type.
    pub kind: SceneKind,
    /// Duration in frames.
    pub duration_frames: u64,
    /// Key of a video asset.
    pub footage: String,
    /// Seconds skipped at the head of the footage.
    #[serde(default)]
    pub trim_start_sec: f64,
    /// Sound effect asset keys by role.
    #[serde(default)]
    pub sfx: BTreeMap<String, String>,
}

/// Transition between two adjacent scenes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionSpec {
    /// Transition kind identifier (`glitch`, `flash`, `glitch_wipe`, ...).
    pub kind: String,
    /// Overlap duration in frames.
    pub duration_frames: u64,
    /// Easing applied to transition progress.
    #[serde(default)]
    pub ease: Ease,
    /// Transition parameter object.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub params: serde_json::Value,
}

impl TransitionSpec {
    /// Structural checks only; durations against scenes are checked when the timeline is built.
    pub fn validate(&self) -> FlowcutResult<()> {
        if self.kind.trim().is_empty() {
            return Err(FlowcutError::validation("transition kind must be non-empty"));
        }
        if self.duration_frames == 0 {
            return Err(FlowcutError::validation(
                "transition duration_frames must be > 0",
            ));
        }
        if !(self.params.is_null() || self.params.is_object()) {
            return Err(FlowcutError::validation(
                "transition params must be an object when set",
            ));
        }
        Ok(())
    }
}

impl EditConfig {
    /// Parse an edit from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FlowcutResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| FlowcutError::serde(format!("parse edit JSON: {e}")))
    }

    /// Parse an edit from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FlowcutResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FlowcutError::validation(format!("open edit JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Validate structure and asset references.
    pub fn validate(&self) -> FlowcutResult<()> {
        self.fps.validate()?;
        self.canvas.validate()?;

        for (key, asset) in &self.assets {
            if key.trim().is_empty() {
                return Err(FlowcutError::validation("asset key must be non-empty"));
            }
            if asset.uri.trim().is_empty() {
                return Err(FlowcutError::validation(format!(
                    "asset '{key}' uri must be non-empty"
                )));
            }
        }

        if self.scenes.is_empty() {
            return Err(FlowcutError::validation("edit must have at least one scene"));
        }
        if self.transitions.len() + 1 != self.scenes.len() {
            return Err(FlowcutError::validation(format!(
                "edit with {} scenes needs {} transitions, found {}",
                self.scenes.len(),
                self.scenes.len() - 1,
                self.transitions.len()
            )));
        }

        let mut seen = std::collections::BTreeSet::new();
        for scene in &self.scenes {
            if scene.id.trim().is_empty() {
                return Err(FlowcutError::validation("scene id must be non-empty"));
            }
            if !seen.insert(scene.id.as_str()) {
                return Err(FlowcutError::validation(format!(
                    "duplicate scene id '{}'",
                    scene.id
                )));
            }
            if scene.duration_frames == 0 {
                return Err(FlowcutError::validation(format!(
                    "scene '{}' duration_frames must be > 0",
                    scene.id
                )));
            }
            if !scene.trim_start_sec.is_finite() || scene.trim_start_sec < 0.0 {
                return Err(FlowcutError::validation(format!(
                    "scene '{}' trim_start_sec must be finite and >= 0",
                    scene.id
                )));
            }
            self.expect_asset(&scene.footage, AssetKind::Video, &scene.id)?;
            for role in scene.kind.sfx_roles() {
                let key = scene.sfx.get(*role).ok_or_else(|| {
                    FlowcutError::validation(format!(
                        "scene '{}' is missing sfx role '{role}'",
                        scene.id
                    ))
                })?;
                self.expect_asset(key, AssetKind::Audio, &scene.id)?;
            }
        }

        for t in &self.transitions {
            t.validate()?;
        }
        Ok(())
    }

    fn expect_asset(&self, key: &str, kind: AssetKind, scene: &str) -> FlowcutResult<()> {
        match self.assets.get(key) {
            None => Err(FlowcutError::validation(format!(
                "scene '{scene}' references unknown asset '{key}'"
            ))),
            Some(a) if a.kind != kind => Err(FlowcutError::validation(format!(
                "scene '{scene}' expects asset '{key}' to be {kind:?}, found {:?}",
                a.kind
            ))),
            Some(_) => Ok(()),
        }
    }

    /// The built-in four-scene edit: intro, glitch, speed ramp, CRT outro at 30 fps, 1920x1080.
    pub fn default_edit() -> Self {
        fn asset(kind: AssetKind, uri: &str) -> AssetDef {
            AssetDef {
                kind,
                uri: uri.to_owned(),
            }
        }
        fn roles(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
            pairs
                .iter()
                .map(|(role, key)| ((*role).to_owned(), (*key).to_owned()))
                .collect()
        }
        fn scene(
            id: &str,
            kind: SceneKind,
            duration_frames: u64,
            trim_start_sec: f64,
            sfx: &[(&str, &str)],
        ) -> SceneSpec {
            SceneSpec {
                id: id.to_owned(),
                kind,
                duration_frames,
                footage: "footage".to_owned(),
                trim_start_sec,
                sfx: roles(sfx),
            }
        }
        fn transition(kind: &str, duration_frames: u64) -> TransitionSpec {
            TransitionSpec {
                kind: kind.to_owned(),
                duration_frames,
                ease: Ease::Linear,
                params: serde_json::Value::Null,
            }
        }

        let assets = BTreeMap::from([
            ("footage".to_owned(), asset(AssetKind::Video, "media/source.mp4")),
            ("riser".to_owned(), asset(AssetKind::Audio, "sfx/tension_riser.mp3")),
            ("impact".to_owned(), asset(AssetKind::Audio, "sfx/bass_impact.mp3")),
            ("glitch".to_owned(), asset(AssetKind::Audio, "sfx/digital_glitch.mp3")),
            ("whoosh".to_owned(), asset(AssetKind::Audio, "sfx/whoosh.mp3")),
            ("drone".to_owned(), asset(AssetKind::Audio, "sfx/ambient_drone.mp3")),
        ]);

        Self {
            fps: Fps { num: 30, den: 1 },
            canvas: Canvas {
                width: 1920,
                height: 1080,
            },
            seed: 0,
            assets,
            scenes: vec![
                scene(
                    "intro",
                    SceneKind::Intro,
                    120,
                    0.0,
                    &[("riser", "riser"), ("impact", "impact")],
                ),
                scene("glitch", SceneKind::Glitch, 150, 3.0, &[("glitch", "glitch")]),
                scene("speed", SceneKind::Speed, 150, 40.0, &[("whoosh", "whoosh")]),
                scene(
                    "outro",
                    SceneKind::Outro,
                    180,
                    80.0,
                    &[("drone", "drone"), ("impact", "impact")],
                ),
            ],
            transitions: vec![
                transition("glitch", 15),
                transition("flash_white", 12),
                transition("flash_black", 12),
            ],
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
