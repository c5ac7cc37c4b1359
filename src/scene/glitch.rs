//! Glitch scene.
//!
//! Frames are grouped into 4-frame phases. Each phase rolls once for whether it glitches and how
//! hard; every slice, hue and displacement decision inside the phase has its own key.

use crate::{
    animation::{
        ease::Ease,
        interp::{Curve, InterpOpts},
        seeded::{artifact_key, phase_of},
        spring::SpringParams,
        text::{RevealStyle, TextAnimator, TextRevealSpec},
    },
    foundation::core::{FrameIndex, Rgba8Premul},
    foundation::error::FlowcutResult,
    foundation::math::{clamp01, lerp},
    scene::{
        SceneEnv, SceneRenderer, SceneSetup,
        common::{
            AudioTrack, Drift, GainEnvelope, Grain, Letterbox, LightLeak, Overlays, Sfx, Z_FX,
            Z_GRAPHICS, backdrop, footage, place_text, shade, spring_at, static_text,
        },
        descriptor::{
            Artifact, ArtifactKind, ColorGrade, Inset, Layer, LayerKind, LayerTransform,
            SceneOutput, VisualDescriptor,
        },
    },
};

pub(crate) const PHASE_FRAMES: u64 = 4;
pub(crate) const SLICES: usize = 8;
const GLITCH_THRESHOLD: f64 = 0.7;
const SLICE_SKIP_ABOVE: f64 = 0.4;

const LABEL: SpringParams = SpringParams {
    damping: 15.0,
    stiffness: 150.0,
    mass: 1.0,
    overshoot_clamping: false,
};
const BAR: SpringParams = SpringParams {
    damping: 20.0,
    stiffness: 100.0,
    mass: 1.0,
    overshoot_clamping: false,
};

const DRIFT: Drift = Drift {
    scale_base: 1.02,
    scale_amp: 0.015,
    scale_rate: 0.008,
    x_amp: 8.0,
    x_rate: 0.005,
    y_amp: 5.0,
    y_rate: 0.007,
};

/// Seeded decorative line; `(seed, color, thickness)`.
const FLOATING_LINES: [(&str, (u8, u8, u8, f64), f64); 3] = [
    ("line1", (0, 200, 255, 0.3), 1.0),
    ("line2", (255, 50, 100, 0.2), 2.0),
    ("line3", (100, 255, 150, 0.15), 1.0),
];

/// Glitch state of one phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct GlitchPulse {
    pub(crate) phase: u64,
    pub(crate) active: bool,
    pub(crate) intensity: f64,
}

#[derive(Debug)]
pub(crate) struct GlitchScene {
    setup: SceneSetup,
    env: SceneEnv,
    label: TextAnimator,
    audio: AudioTrack,
    overlays: Overlays,
    sfx: Sfx,
}

impl GlitchScene {
    pub(crate) fn new(setup: SceneSetup, env: SceneEnv) -> FlowcutResult<Self> {
        let label = TextAnimator::new(
            TextRevealSpec {
                text: "GLITCH FREEZE".to_owned(),
                style: RevealStyle::Scramble {
                    glyphs: "01!@#$%".to_owned(),
                },
                stagger_sec: 0.03,
                duration_sec: 0.8,
                start_frame: 25.0,
                ease: Ease::Linear,
                font_size: 14.0,
                color: Rgba8Premul::rgba(255, 255, 255, 0.5),
            },
            env.fps,
        )?;
        let audio = AudioTrack {
            asset: setup.footage.clone(),
            trim_start_sec: setup.trim_start_sec,
            envelope: GainEnvelope::new(vec![Curve::new(
                &[0.0, 15.0],
                &[0.0, 0.8],
                InterpOpts::clamp_right(),
            )?]),
        };
        let overlays = Overlays {
            light_leak: Some(LightLeak {
                warm: false,
                intensity: 0.2,
                speed: 0.3,
            }),
            grain: Some(Grain {
                intensity: 0.35,
                speed: 1.5,
                opacity: 0.12,
            }),
            vignette: Some((0.65, 0.3)),
            letterbox: Some(Letterbox::fixed(0.08)),
            ..Overlays::default()
        };
        let sfx = Sfx::new(setup.sfx_asset("glitch")?, 0, 0.2);

        Ok(Self {
            setup,
            env,
            label,
            audio,
            overlays,
            sfx,
        })
    }

    /// Whether `frame`'s phase glitches, and how hard.
    pub(crate) fn pulse(&self, frame: u64) -> GlitchPulse {
        let rng = self.env.rng;
        let phase = phase_of(frame, PHASE_FRAMES);
        let active = rng.float01(&format!("glitch-{phase}")) > GLITCH_THRESHOLD;
        let intensity = if active {
            rng.float01(&format!("glitch-i-{phase}")) * 0.8
        } else {
            0.0
        };
        GlitchPulse {
            phase,
            active,
            intensity,
        }
    }

    fn slices(&self, pulse: GlitchPulse, source_time_s: f64, base: LayerTransform) -> Vec<Layer> {
        let rng = self.env.rng;
        let band = 1.0 / SLICES as f64;
        (0..SLICES)
            .filter(|&i| rng.float01(&artifact_key("slice", pulse.phase, i)) <= SLICE_SKIP_ABOVE)
            .map(|i| {
                let dx = rng.centered(&artifact_key("disp-x", pulse.phase, i), 80.0)
                    * pulse.intensity;
                let hue = rng.float01(&artifact_key("hue", pulse.phase, i)) * 60.0 - 30.0;
                let top = i as f64 * band;
                let bottom = 1.0 - (i + 1) as f64 * band;
                Layer::new(
                    format!("slice-{i}"),
                    LayerKind::Video {
                        asset: self.setup.footage.clone(),
                        source_time_s,
                    },
                    Z_FX,
                )
                .with_transform(LayerTransform {
                    translate_x: base.translate_x + dx,
                    hue_rotate_deg: hue,
                    ..base
                })
                .with_clip(Inset::band(top, bottom))
            })
            .collect()
    }

    fn floating_lines(&self, f: u64) -> Vec<Artifact> {
        let rng = self.env.rng;
        let (w, h) = (self.env.canvas.w(), self.env.canvas.h());
        let x = f as f64;
        let opacity = 0.15 + (x * 0.03).sin() * 0.1;
        FLOATING_LINES
            .iter()
            .map(|&(seed, (r, g, b, a), thickness)| {
                let base_y = rng.float01(seed) * h;
                let wobble = (x * 0.05 + rng.float01(&format!("{seed}p")) * 10.0).sin() * 40.0;
                let width = 200.0 + rng.float01(&format!("{seed}w")) * 600.0;
                let left = rng.float01(&format!("{seed}x")) * 0.6 * w;
                Artifact::new(
                    ArtifactKind::FloatingLine,
                    [left, base_y + wobble, width, thickness],
                    Rgba8Premul::rgba(r, g, b, a),
                    Z_GRAPHICS,
                )
                .with_opacity(opacity)
            })
            .collect()
    }
}

impl SceneRenderer for GlitchScene {
    fn id(&self) -> &str {
        &self.setup.id
    }

    fn duration_frames(&self) -> u64 {
        self.setup.duration_frames
    }

    fn render(&self, local: FrameIndex) -> SceneOutput {
        let f = self.setup.clamp_local(local);
        let SceneEnv { fps, canvas, rng } = self.env;
        let (w, h) = (canvas.w(), canvas.h());

        let pulse = self.pulse(f);
        let rgb_split = pulse.intensity * 12.0;
        let label_in = spring_at(f, 20, fps, &LABEL);
        let bar_in = spring_at(f, 15, fps, &BAR);
        let label_opacity = clamp01(label_in);
        let label_dx = lerp(-40.0, 0.0, label_in);

        let source_time_s = self.audio.source_time(f, fps);
        let camera = DRIFT.at(f);

        let mut visual = VisualDescriptor::default();
        visual.layers.push(backdrop());
        visual.layers.push(footage(
            &self.setup.footage,
            source_time_s,
            LayerTransform {
                hue_rotate_deg: pulse.intensity * 40.0,
                ..camera
            },
            ColorGrade {
                saturate: 1.3,
                contrast: 1.15,
                ..ColorGrade::default()
            },
        ));
        if pulse.active {
            visual
                .layers
                .extend(self.slices(pulse, source_time_s, camera));
        }

        if rgb_split > 1.0 {
            let full = [0.0, 0.0, w, h];
            for (sign, color) in [
                (1.0, Rgba8Premul::rgba(255, 0, 50, 0.2)),
                (-1.0, Rgba8Premul::rgba(0, 100, 255, 0.2)),
            ] {
                let mut split = Artifact::new(ArtifactKind::RgbSplit, full, color, Z_FX + 1)
                    .with_intensity(rgb_split)
                    .with_opacity(0.35);
                split.x = sign * rgb_split;
                split.y = -sign * rgb_split * 0.3;
                visual.artifacts.push(split);
            }
        }

        visual
            .layers
            .push(shade(135.0, &[(0.0, 0.5), (0.5, 0.15), (1.0, 0.4)]));
        visual.artifacts.extend(self.floating_lines(f));

        let mut bar = Artifact::new(
            ArtifactKind::AccentBar,
            [80.0 + label_dx, 80.0, lerp(0.0, 60.0, bar_in), 3.0],
            Rgba8Premul::from_straight_rgba(0, 212, 255, 255),
            Z_GRAPHICS + 1,
        )
        .with_opacity(label_opacity);
        bar.intensity = 15.0;
        visual.artifacts.push(bar);

        let mut label = place_text(&self.label, "label", f, &rng, (80.0, 95.0), label_opacity);
        label.translate_x = label_dx;
        visual.texts.push(label);
        visual.texts.push(static_text(
            "counter",
            format!("{f:04} / {:02}fps", fps.as_f64().round() as u64),
            (w - 80.0, h - 100.0),
            13.0,
            Rgba8Premul::rgba(255, 255, 255, 0.3),
            label_opacity,
        ));

        visual
            .layers
            .extend(self.overlays.layers(&self.setup.id, f, &self.env));
        visual.sort();

        let mut audio = vec![self.audio.cue(f, fps)];
        audio.extend(self.sfx.cue(f, fps));
        SceneOutput { visual, audio }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/glitch.rs"]
mod tests;
