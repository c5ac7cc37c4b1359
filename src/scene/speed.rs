use crate::{
    animation::{
        ease::Ease,
        interp::{Curve, InterpOpts},
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
            Artifact, ArtifactKind, ColorGrade, LayerTransform, SceneOutput, VisualDescriptor,
        },
    },
};

/// Speed ramps repeat every this many frames.
pub(crate) const RAMP_PERIOD: u64 = 90;
/// A ramp is active for ramp frames strictly inside this interval.
pub(crate) const RAMP_WINDOW: (u64, u64) = (30, 45);

const LABEL: SpringParams = SpringParams {
    damping: 18.0,
    stiffness: 120.0,
    mass: 1.0,
    overshoot_clamping: false,
};
const DIVIDER: SpringParams = SpringParams {
    damping: 25.0,
    stiffness: 80.0,
    mass: 1.0,
    overshoot_clamping: false,
};

const DRIFT: Drift = Drift {
    scale_base: 1.05,
    scale_amp: 0.03,
    scale_rate: 0.004,
    x_amp: 15.0,
    x_rate: 0.003,
    y_amp: 8.0,
    y_rate: 0.005,
};

/// `(y fraction, delay into ramp, width px, color)`.
const SPEED_LINES: [(f64, f64, f64, (u8, u8, u8, f64)); 5] = [
    (0.2, 32.0, 400.0, (255, 200, 100, 0.4)),
    (0.35, 33.0, 300.0, (255, 150, 50, 0.3)),
    (0.55, 34.0, 500.0, (255, 200, 100, 0.35)),
    (0.7, 35.0, 350.0, (255, 180, 80, 0.3)),
    (0.85, 36.0, 250.0, (255, 220, 120, 0.25)),
];

/// Position within the current ramp cycle, and whether the ramp is running.
pub(crate) fn ramp_frame(frame: u64) -> (u64, bool) {
    let r = frame % RAMP_PERIOD;
    (r, r > RAMP_WINDOW.0 && r < RAMP_WINDOW.1)
}

#[derive(Debug)]
pub(crate) struct SpeedScene {
    setup: SceneSetup,
    env: SceneEnv,
    warmth: Curve,
    blur: Curve,
    line_travel: Curve,
    line_fade: Curve,
    label: TextAnimator,
    audio: AudioTrack,
    overlays: Overlays,
    sfx: Sfx,
}

impl SpeedScene {
    pub(crate) fn new(setup: SceneSetup, env: SceneEnv) -> FlowcutResult<Self> {
        let warmth = Curve::new(&[-1.0, 1.0], &[0.0, 15.0], InterpOpts::default())?;
        let blur = Curve::new(&[30.0, 37.0, 45.0], &[0.0, 4.0, 0.0], InterpOpts::clamp())?;
        let line_travel = Curve::new(
            &[0.0, 8.0],
            &[0.0, 1.0],
            InterpOpts::clamp().with_ease(Ease::OutCubic),
        )?;
        let line_fade = Curve::new(
            &[0.0, 0.3, 0.7, 1.0],
            &[0.0, 0.6, 0.6, 0.0],
            InterpOpts::clamp(),
        )?;
        let label = TextAnimator::new(
            TextRevealSpec {
                text: "SPEED RAMP".to_owned(),
                style: RevealStyle::SlideUp { distance: 30.0 },
                stagger_sec: 0.04,
                duration_sec: 0.5,
                start_frame: 18.0,
                ease: Ease::OutCubic,
                font_size: 15.0,
                color: Rgba8Premul::rgba(255, 255, 255, 0.5),
            },
            env.fps,
        )?;
        let audio = AudioTrack {
            asset: setup.footage.clone(),
            trim_start_sec: setup.trim_start_sec,
            envelope: GainEnvelope::new(vec![Curve::new(
                &[0.0, 15.0],
                &[0.0, 0.7],
                InterpOpts::clamp_right(),
            )?]),
        };
        let overlays = Overlays {
            light_leak: Some(LightLeak {
                warm: true,
                intensity: 0.25,
                speed: 0.4,
            }),
            grain: Some(Grain {
                intensity: 0.25,
                speed: 1.0,
                opacity: 0.1,
            }),
            vignette: Some((0.6, 0.35)),
            letterbox: Some(Letterbox::fixed(0.08)),
            ..Overlays::default()
        };
        let sfx = Sfx::new(setup.sfx_asset("whoosh")?, 30, 0.2);

        Ok(Self {
            setup,
            env,
            warmth,
            blur,
            line_travel,
            line_fade,
            label,
            audio,
            overlays,
            sfx,
        })
    }

    fn speed_lines(&self, ramp: u64) -> Vec<Artifact> {
        let (w, h) = (self.env.canvas.w(), self.env.canvas.h());
        SPEED_LINES
            .iter()
            .map(|&(y, delay, width, (r, g, b, a))| {
                let p = self.line_travel.sample(ramp as f64 - delay);
                Artifact::new(
                    ArtifactKind::SpeedLine,
                    [lerp(-width, w + 100.0, p), h * y, width, 2.0],
                    Rgba8Premul::rgba(r, g, b, a),
                    Z_FX + 1,
                )
                .with_intensity(p)
                .with_opacity(self.line_fade.sample(p))
            })
            .collect()
    }
}

impl SceneRenderer for SpeedScene {
    fn id(&self) -> &str {
        &self.setup.id
    }

    fn duration_frames(&self) -> u64 {
        self.setup.duration_frames
    }

    fn render(&self, local: FrameIndex) -> SceneOutput {
        let f = self.setup.clamp_local(local);
        let x = f as f64;
        let SceneEnv { fps, canvas, rng } = self.env;
        let (w, h) = (canvas.w(), canvas.h());

        let (ramp, ramping) = ramp_frame(f);
        let blur = if ramping {
            self.blur.sample(ramp as f64)
        } else {
            0.0
        };
        let label_in = spring_at(f, 15, fps, &LABEL);
        let divider_in = spring_at(f, 10, fps, &DIVIDER);
        let label_opacity = clamp01(label_in);

        let mut visual = VisualDescriptor::default();
        visual.layers.push(backdrop());
        visual.layers.push(footage(
            &self.setup.footage,
            self.audio.source_time(f, fps),
            LayerTransform {
                hue_rotate_deg: self.warmth.sample((x * 0.01).sin()),
                ..DRIFT.at(f)
            },
            ColorGrade {
                saturate: 1.4,
                contrast: 1.1,
                brightness: 1.0 + (x * 0.02).sin() * 0.05,
                blur_px: 0.0,
            },
        ));

        if blur > 0.0 {
            visual.artifacts.push(
                Artifact::new(
                    ArtifactKind::MotionBlur,
                    [0.0, 0.0, w, h],
                    Rgba8Premul::transparent(),
                    Z_FX,
                )
                .with_intensity(blur),
            );
        }
        if ramping {
            visual.artifacts.extend(self.speed_lines(ramp));
        }

        visual
            .layers
            .push(shade(180.0, &[(0.0, 0.4), (0.3, 0.1), (0.7, 0.1), (1.0, 0.5)]));

        visual.artifacts.push(
            Artifact::new(
                ArtifactKind::AccentBar,
                [80.0, h - 170.0, lerp(0.0, 200.0, divider_in), 2.0],
                Rgba8Premul::from_straight_rgba(255, 138, 0, 255),
                Z_GRAPHICS,
            )
            .with_intensity(12.0)
            .with_opacity(label_opacity),
        );
        visual.texts.push(place_text(
            &self.label,
            "label",
            f,
            &rng,
            (80.0, h - 130.0),
            label_opacity,
        ));

        let per_sec = (fps.as_f64().round() as u64).max(1);
        visual.texts.push(static_text(
            "timestamp",
            format!("{:02}:{:02}", f / per_sec, f % per_sec),
            (w - 80.0, 80.0),
            12.0,
            Rgba8Premul::rgba(255, 255, 255, 0.25),
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
#[path = "../../tests/unit/scene/speed.rs"]
mod tests;
