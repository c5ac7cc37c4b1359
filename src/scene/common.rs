//! Pieces every scene shares: z bands, camera drift, cinematic overlays and audio envelopes.

use crate::{
    animation::{
        ease::Ease,
        interp::{Curve, InterpOpts},
        seeded::{EffectRng, artifact_key},
        spring::{SpringParams, spring_progress},
        text::{CharState, TextAnimator, TextReveal},
    },
    foundation::core::{Fps, Rgba8Premul},
    foundation::error::FlowcutResult,
    scene::{
        SceneEnv,
        descriptor::{
            AudioCue, BACKDROP_LAYER, BlendMode, ColorGrade, GradientStop, Layer, LayerKind,
            LayerTransform,
        },
    },
};

pub(crate) const Z_BACKDROP: i32 = 0;
pub(crate) const Z_FOOTAGE: i32 = 10;
pub(crate) const Z_FX: i32 = 20;
pub(crate) const Z_SHADE: i32 = 30;
pub(crate) const Z_GRAPHICS: i32 = 40;
pub(crate) const Z_OVERLAY: i32 = 100;

/// Black backdrop under everything.
pub(crate) fn backdrop() -> Layer {
    Layer::new(
        BACKDROP_LAYER,
        LayerKind::Solid {
            color: Rgba8Premul::black(),
        },
        Z_BACKDROP,
    )
}

/// Full-frame footage layer at `source_time_s`.
pub(crate) fn footage(
    asset: &str,
    source_time_s: f64,
    transform: LayerTransform,
    grade: ColorGrade,
) -> Layer {
    Layer::new(
        "footage",
        LayerKind::Video {
            asset: asset.to_owned(),
            source_time_s,
        },
        Z_FOOTAGE,
    )
    .with_transform(transform)
    .with_grade(grade)
}

/// Black gradient used to darken footage behind text. `stops` are `(offset, alpha)` pairs.
pub(crate) fn shade(angle_deg: f64, stops: &[(f64, f64)]) -> Layer {
    let stops = stops
        .iter()
        .map(|&(offset, alpha)| GradientStop {
            offset,
            color: Rgba8Premul::rgba(0, 0, 0, alpha),
        })
        .collect();
    Layer::new("shade", LayerKind::Gradient { angle_deg, stops }, Z_SHADE)
}

/// Spring progress for a reveal anchored at local frame `anchor`.
pub(crate) fn spring_at(frame: u64, anchor: u64, fps: Fps, params: &SpringParams) -> f64 {
    spring_progress(frame as f64 - anchor as f64, fps, params)
}

/// Place a text reveal on the canvas.
pub(crate) fn place_text(
    animator: &TextAnimator,
    name: &str,
    frame: u64,
    rng: &EffectRng,
    anchor: (f64, f64),
    opacity: f64,
) -> TextReveal {
    let mut text = animator.reveal(name, frame, rng);
    text.x = anchor.0;
    text.y = anchor.1;
    text.opacity = opacity.clamp(0.0, 1.0);
    text
}

/// Fully revealed text block, for readouts that change every frame.
pub(crate) fn static_text(
    name: &str,
    text: String,
    anchor: (f64, f64),
    font_size: f64,
    color: Rgba8Premul,
    opacity: f64,
) -> TextReveal {
    let chars = text
        .chars()
        .map(|glyph| CharState {
            glyph,
            progress: 1.0,
            opacity: 1.0,
            offset_y: 0.0,
            blur_px: 0.0,
        })
        .collect();
    TextReveal {
        name: name.to_owned(),
        text,
        x: anchor.0,
        y: anchor.1,
        font_size,
        color,
        opacity: opacity.clamp(0.0, 1.0),
        translate_x: 0.0,
        translate_y: 0.0,
        chars,
    }
}

/// Slow sinusoidal camera motion: `scale = base + sin(f * scale_rate) * scale_amp`, and likewise
/// a sine pan on x and a cosine pan on y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Drift {
    pub(crate) scale_base: f64,
    pub(crate) scale_amp: f64,
    pub(crate) scale_rate: f64,
    pub(crate) x_amp: f64,
    pub(crate) x_rate: f64,
    pub(crate) y_amp: f64,
    pub(crate) y_rate: f64,
}

impl Drift {
    pub(crate) fn at(&self, frame: u64) -> LayerTransform {
        let f = frame as f64;
        let scale = self.scale_base + (f * self.scale_rate).sin() * self.scale_amp;
        LayerTransform {
            translate_x: (f * self.x_rate).sin() * self.x_amp,
            translate_y: (f * self.y_rate).cos() * self.y_amp,
            ..LayerTransform::scale(scale)
        }
    }
}

/// Film grain with a per-frame seeded texture offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Grain {
    pub(crate) intensity: f64,
    pub(crate) speed: f64,
    pub(crate) opacity: f64,
}

/// Cinema bars, optionally sliding in.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Letterbox {
    size: f64,
    reveal: Option<Curve>,
}

impl Letterbox {
    pub(crate) fn fixed(size: f64) -> Self {
        Self { size, reveal: None }
    }

    /// Bars grow from 0 to `size` over `secs`.
    pub(crate) fn animated(size: f64, secs: f64, fps: Fps) -> FlowcutResult<Self> {
        let end = fps.secs_to_frames(secs).max(1.0);
        let reveal = Curve::new(
            &[0.0, end],
            &[0.0, 1.0],
            InterpOpts::clamp().with_ease(Ease::OutCubic),
        )?;
        Ok(Self {
            size,
            reveal: Some(reveal),
        })
    }

    fn size_at(&self, frame: u64) -> f64 {
        match &self.reveal {
            Some(c) => self.size * c.sample(frame as f64),
            None => self.size,
        }
    }
}

/// Drifting colored bloom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct LightLeak {
    pub(crate) warm: bool,
    pub(crate) intensity: f64,
    pub(crate) speed: f64,
}

/// CRT scanline overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Retro {
    pub(crate) intensity: f64,
    pub(crate) speed: f64,
}

/// The overlay stack a scene draws on top of its content.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Overlays {
    pub(crate) light_leak: Option<LightLeak>,
    pub(crate) retro: Option<Retro>,
    pub(crate) grain: Option<Grain>,
    pub(crate) vignette: Option<(f64, f64)>,
    pub(crate) letterbox: Option<Letterbox>,
}

impl Overlays {
    pub(crate) fn layers(&self, scene_id: &str, frame: u64, env: &SceneEnv) -> Vec<Layer> {
        let f = frame as f64;
        let mut out = Vec::new();
        let mut z = Z_OVERLAY;

        if let Some(leak) = self.light_leak {
            let t = f * leak.speed;
            let kind = LayerKind::LightLeak {
                warm: leak.warm,
                center_x: 0.5 + (t * 0.02).sin() * 0.3,
                center_y: 0.4 + (t * 0.015).cos() * 0.2,
            };
            let opacity = leak.intensity * (0.7 + 0.3 * (t * 0.05).sin());
            out.push(
                Layer::new("light_leak", kind, z)
                    .with_opacity(opacity)
                    .with_blend(BlendMode::Screen),
            );
            z += 1;
        }

        if let Some(retro) = self.retro {
            let kind = LayerKind::Scanlines {
                intensity: retro.intensity,
                roll_px: (f * retro.speed * 2.0) % 8.0,
            };
            out.push(Layer::new("scanlines", kind, z));
            z += 1;
        }

        if let Some(grain) = self.grain {
            let phase = (f * grain.speed).floor() as u64;
            let effect = format!("{scene_id}-grain");
            let kind = LayerKind::Grain {
                intensity: grain.intensity,
                offset_x: env.rng.float01(&artifact_key(&effect, phase, 0)),
                offset_y: env.rng.float01(&artifact_key(&effect, phase, 1)),
            };
            out.push(Layer::new("grain", kind, z).with_opacity(grain.opacity));
            z += 1;
        }

        if let Some((intensity, size)) = self.vignette {
            out.push(Layer::new("vignette", LayerKind::Vignette { intensity, size }, z));
            z += 1;
        }

        if let Some(letterbox) = &self.letterbox {
            let size = letterbox.size_at(frame);
            out.push(Layer::new("letterbox", LayerKind::Letterbox { size }, z));
        }

        out
    }
}

/// One-shot sound effect starting at local frame `start`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Sfx {
    pub(crate) asset: String,
    pub(crate) start: u64,
    pub(crate) gain: f64,
}

impl Sfx {
    pub(crate) fn new(asset: &str, start: u64, gain: f64) -> Self {
        Self {
            asset: asset.to_owned(),
            start,
            gain,
        }
    }

    pub(crate) fn cue(&self, frame: u64, fps: Fps) -> Option<AudioCue> {
        (frame >= self.start).then(|| AudioCue {
            asset: self.asset.clone(),
            gain: self.gain.clamp(0.0, 1.0),
            source_time_s: fps.frames_to_secs(frame - self.start),
        })
    }
}

/// Gain as the minimum of independent curves, so overlapping fades never stack.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GainEnvelope {
    curves: Vec<Curve>,
}

impl GainEnvelope {
    pub(crate) fn new(curves: Vec<Curve>) -> Self {
        Self { curves }
    }

    pub(crate) fn at(&self, frame: u64) -> f64 {
        let x = frame as f64;
        self.curves
            .iter()
            .map(|c| c.sample(x))
            .fold(f64::INFINITY, f64::min)
            .clamp(0.0, 1.0)
    }
}

/// Continuous track (footage soundtrack or bed) with a trim offset and gain envelope.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct AudioTrack {
    pub(crate) asset: String,
    pub(crate) trim_start_sec: f64,
    pub(crate) envelope: GainEnvelope,
}

impl AudioTrack {
    /// Source timestamp for local `frame`.
    pub(crate) fn source_time(&self, frame: u64, fps: Fps) -> f64 {
        self.trim_start_sec + fps.frames_to_secs(frame)
    }

    pub(crate) fn cue(&self, frame: u64, fps: Fps) -> AudioCue {
        AudioCue {
            asset: self.asset.clone(),
            gain: self.envelope.at(frame),
            source_time_s: self.source_time(frame, fps),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/common.rs"]
mod tests;
