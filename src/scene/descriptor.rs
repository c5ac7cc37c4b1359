//! Per-frame output of a scene or transition: an ordered layer stack, procedural artifacts,
//! text reveals and audio cues. Everything here is plain data for the external compositor.

use crate::{
    animation::text::TextReveal,
    foundation::core::{Affine, Canvas, Rgba8Premul, Vec2},
    foundation::math::clamp01,
};

/// Compositing mode for a layer over what is below it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Source-over.
    #[default]
    Normal,
    /// Screen.
    Screen,
}

/// Per-layer transform. Scale is about the canvas center.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct LayerTransform {
    /// Horizontal scale.
    pub scale_x: f64,
    /// Vertical scale.
    pub scale_y: f64,
    /// Horizontal offset in px.
    pub translate_x: f64,
    /// Vertical offset in px.
    pub translate_y: f64,
    /// Hue rotation in degrees.
    pub hue_rotate_deg: f64,
}

impl Default for LayerTransform {
    fn default() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            hue_rotate_deg: 0.0,
        }
    }
}

impl LayerTransform {
    /// Uniform scale, no translation.
    pub fn scale(s: f64) -> Self {
        Self {
            scale_x: s,
            scale_y: s,
            ..Self::default()
        }
    }

    /// Pure translation.
    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            translate_x: x,
            translate_y: y,
            ..Self::default()
        }
    }

    /// Geometric part as an affine matrix in canvas pixel space.
    pub fn to_affine(&self, canvas: Canvas) -> Affine {
        let center = Vec2::new(canvas.w() / 2.0, canvas.h() / 2.0);
        Affine::translate(center + Vec2::new(self.translate_x, self.translate_y))
            * Affine::scale_non_uniform(self.scale_x, self.scale_y)
            * Affine::translate(-center)
    }
}

/// Color filter chain applied to a layer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ColorGrade {
    /// Saturation multiplier.
    pub saturate: f64,
    /// Contrast multiplier.
    pub contrast: f64,
    /// Brightness multiplier.
    pub brightness: f64,
    /// Gaussian blur radius in px.
    pub blur_px: f64,
}

impl Default for ColorGrade {
    fn default() -> Self {
        Self {
            saturate: 1.0,
            contrast: 1.0,
            brightness: 1.0,
            blur_px: 0.0,
        }
    }
}

/// Clip rectangle expressed as insets, each a fraction of the canvas in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Inset {
    /// Fraction removed from the top.
    pub top: f64,
    /// Fraction removed from the right.
    pub right: f64,
    /// Fraction removed from the bottom.
    pub bottom: f64,
    /// Fraction removed from the left.
    pub left: f64,
}

impl Inset {
    /// Horizontal band from `top` to `1 - bottom`.
    pub fn band(top: f64, bottom: f64) -> Self {
        Self {
            top,
            bottom,
            ..Self::default()
        }
    }
}

/// Gradient color stop.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GradientStop {
    /// Position along the gradient in `[0, 1]`.
    pub offset: f64,
    /// Color at `offset`.
    pub color: Rgba8Premul,
}

/// Layer content.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum LayerKind {
    /// Footage frame fetched from the asset source.
    Video {
        /// Asset key.
        asset: String,
        /// Source timestamp in seconds (trim included).
        source_time_s: f64,
    },
    /// Flat fill.
    Solid {
        /// Fill color.
        color: Rgba8Premul,
    },
    /// Linear gradient fill.
    Gradient {
        /// CSS-style angle in degrees.
        angle_deg: f64,
        /// Color stops.
        stops: Vec<GradientStop>,
    },
    /// Film grain; offsets come from the seeded RNG.
    Grain {
        /// Grain strength.
        intensity: f64,
        /// Noise texture offset x, `[0, 1)`.
        offset_x: f64,
        /// Noise texture offset y, `[0, 1)`.
        offset_y: f64,
    },
    /// Edge darkening.
    Vignette {
        /// Darkening strength.
        intensity: f64,
        /// Clear radius as a fraction of the canvas.
        size: f64,
    },
    /// Cinema bars.
    Letterbox {
        /// Bar height as a fraction of canvas height.
        size: f64,
    },
    /// Soft colored light bloom.
    LightLeak {
        /// Warm (orange) or cool (blue) tint.
        warm: bool,
        /// Bloom center x as a fraction of canvas width.
        center_x: f64,
        /// Bloom center y as a fraction of canvas height.
        center_y: f64,
    },
    /// CRT scanlines.
    Scanlines {
        /// Line darkness.
        intensity: f64,
        /// Vertical roll offset in px.
        roll_px: f64,
    },
}

/// Name of the opaque base layer every scene paints first.
pub const BACKDROP_LAYER: &str = "backdrop";

/// One entry of the layer stack.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Layer {
    /// Stable name within the scene.
    pub name: String,
    /// Content.
    pub kind: LayerKind,
    /// Geometric transform and hue rotation.
    pub transform: LayerTransform,
    /// Filter chain.
    pub grade: ColorGrade,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Painter's order; higher draws on top.
    pub z: i32,
    /// Compositing mode.
    pub blend: BlendMode,
    /// Optional clip.
    pub clip: Option<Inset>,
}

impl Layer {
    /// Fully opaque, untransformed layer.
    pub fn new(name: impl Into<String>, kind: LayerKind, z: i32) -> Self {
        Self {
            name: name.into(),
            kind,
            transform: LayerTransform::default(),
            grade: ColorGrade::default(),
            opacity: 1.0,
            z,
            blend: BlendMode::Normal,
            clip: None,
        }
    }

    /// Set opacity, clamped to `[0, 1]`.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = clamp01(opacity);
        self
    }

    /// Set transform.
    pub fn with_transform(mut self, transform: LayerTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Set filter chain.
    pub fn with_grade(mut self, grade: ColorGrade) -> Self {
        self.grade = grade;
        self
    }

    /// Set blend mode.
    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }

    /// Set clip.
    pub fn with_clip(mut self, clip: Inset) -> Self {
        self.clip = Some(clip);
        self
    }
}

/// Kind of procedural artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Sweeping horizontal light line.
    ScanLine,
    /// Red/blue edge fringe.
    ChromaFringe,
    /// Offset color wash for RGB split.
    RgbSplit,
    /// Horizontally displaced band of footage.
    GlitchSlice,
    /// Slow-drifting decorative line.
    FloatingLine,
    /// Fast horizontal streak.
    SpeedLine,
    /// Corner frame bracket.
    CornerBracket,
    /// Accent bar above a label.
    AccentBar,
    /// Full-frame directional blur.
    MotionBlur,
    /// Final CRT dot glow.
    CrtDot,
}

/// One procedural artifact instance.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Artifact {
    /// Kind.
    pub kind: ArtifactKind,
    /// Left edge (or center for dots) in px.
    pub x: f64,
    /// Top edge (or center for dots) in px.
    pub y: f64,
    /// Width in px.
    pub width: f64,
    /// Height in px.
    pub height: f64,
    /// Kind-specific strength (displacement, blur px, glow).
    pub intensity: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Hue rotation in degrees.
    pub hue_rotate_deg: f64,
    /// Tint.
    pub color: Rgba8Premul,
    /// Painter's order relative to layers.
    pub z: i32,
}

impl Artifact {
    /// Artifact with zero hue shift and full opacity.
    pub fn new(kind: ArtifactKind, rect: [f64; 4], color: Rgba8Premul, z: i32) -> Self {
        Self {
            kind,
            x: rect[0],
            y: rect[1],
            width: rect[2],
            height: rect[3],
            intensity: 0.0,
            opacity: 1.0,
            hue_rotate_deg: 0.0,
            color,
            z,
        }
    }

    /// Set intensity.
    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = intensity;
        self
    }

    /// Set opacity, clamped to `[0, 1]`.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = clamp01(opacity);
        self
    }
}

/// Composed visual state for one frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct VisualDescriptor {
    /// Layers in painter's order (ascending `z`, stable).
    pub layers: Vec<Layer>,
    /// Procedural artifacts.
    pub artifacts: Vec<Artifact>,
    /// Text reveals.
    pub texts: Vec<TextReveal>,
}

impl VisualDescriptor {
    /// Restore painter's order after pushes or z edits.
    pub fn sort(&mut self) {
        self.layers.sort_by_key(|l| l.z);
        self.artifacts.sort_by_key(|a| a.z);
    }

    /// Highest z used by any layer or artifact, or 0 when empty.
    pub fn max_z(&self) -> i32 {
        self.layers
            .iter()
            .map(|l| l.z)
            .chain(self.artifacts.iter().map(|a| a.z))
            .max()
            .unwrap_or(0)
    }

    /// Multiply every opacity by `factor`.
    pub fn fade(&mut self, factor: f64) {
        let factor = clamp01(factor);
        for l in &mut self.layers {
            l.opacity *= factor;
        }
        for a in &mut self.artifacts {
            a.opacity *= factor;
        }
        for t in &mut self.texts {
            t.opacity *= factor;
        }
    }

    /// Shift every z by `delta`.
    pub fn raise(&mut self, delta: i32) {
        for l in &mut self.layers {
            l.z += delta;
        }
        for a in &mut self.artifacts {
            a.z += delta;
        }
    }

    /// Append `other` and restore painter's order.
    pub fn merge(&mut self, other: VisualDescriptor) {
        self.layers.extend(other.layers);
        self.artifacts.extend(other.artifacts);
        self.texts.extend(other.texts);
        self.sort();
    }

    /// Look up a layer by name.
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Look up a text block by name.
    pub fn text(&self, name: &str) -> Option<&TextReveal> {
        self.texts.iter().find(|t| t.name == name)
    }
}

/// Gain applied to one audio asset for one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AudioCue {
    /// Asset key.
    pub asset: String,
    /// Gain in `[0, 1]`.
    pub gain: f64,
    /// Source timestamp in seconds (trim included).
    pub source_time_s: f64,
}

/// Everything a scene produces for one local frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct SceneOutput {
    /// Visual stack.
    pub visual: VisualDescriptor,
    /// Audio cues active on this frame.
    pub audio: Vec<AudioCue>,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/descriptor.rs"]
mod tests;
