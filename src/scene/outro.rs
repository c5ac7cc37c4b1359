//! Outro scene ending in a CRT shutdown.
//!
//! The last [`SHUTDOWN_FRAMES`] frames squeeze the footage to a line, then a dot, with a
//! brightness flare; "FIN" blurs in once the picture is gone. Before the shutdown the scene looks
//! like the others: drifting footage, a label and the usual overlays plus CRT scanlines.

use crate::{
    animation::{
        ease::Ease,
        interp::{Curve, InterpOpts},
        spring::SpringParams,
        text::{RevealStyle, TextAnimator, TextRevealSpec},
    },
    foundation::core::{FrameIndex, Rgba8Premul},
    foundation::error::{FlowcutError, FlowcutResult},
    foundation::math::{clamp01, lerp},
    scene::{
        SceneEnv, SceneRenderer, SceneSetup,
        common::{
            AudioTrack, Drift, GainEnvelope, Grain, Letterbox, Overlays, Retro, Sfx, Z_FX,
            Z_GRAPHICS, backdrop, footage, place_text, shade, spring_at,
        },
        descriptor::{
            Artifact, ArtifactKind, ColorGrade, LayerTransform, SceneOutput, VisualDescriptor,
        },
    },
};

/// Length of the CRT shutdown at the end of the scene.
pub(crate) const SHUTDOWN_FRAMES: u64 = 60;
/// Shortest duration whose fade and shutdown curves stay strictly ordered.
pub(crate) const MIN_DURATION: u64 = 91;

const LABEL: SpringParams = SpringParams {
    damping: 20.0,
    stiffness: 100.0,
    mass: 1.0,
    overshoot_clamping: false,
};

const DRIFT: Drift = Drift {
    scale_base: 1.03,
    scale_amp: 0.02,
    scale_rate: 0.006,
    x_amp: 10.0,
    x_rate: 0.004,
    y_amp: 0.0,
    y_rate: 0.0,
};

/// Per-frame state of the shutdown effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Shutdown {
    pub(crate) active: bool,
    pub(crate) progress: f64,
    pub(crate) scale_x: f64,
    pub(crate) scale_y: f64,
    pub(crate) brightness: f64,
    pub(crate) dot_glow: f64,
}

#[derive(Debug)]
pub(crate) struct OutroScene {
    setup: SceneSetup,
    env: SceneEnv,
    start: u64,
    progress: Curve,
    squeeze_y: Curve,
    squeeze_x: Curve,
    flare: Curve,
    glow: Curve,
    fin_fade: Curve,
    fin: TextAnimator,
    label: TextAnimator,
    footage_audio: AudioTrack,
    drone: AudioTrack,
    impact: Sfx,
    overlays: Overlays,
}

impl OutroScene {
    pub(crate) fn new(setup: SceneSetup, env: SceneEnv) -> FlowcutResult<Self> {
        let d = setup.duration_frames;
        if d < MIN_DURATION {
            return Err(FlowcutError::validation(format!(
                "outro scene \"{}\" needs more than {} frames, got {d}",
                setup.id,
                MIN_DURATION - 1
            )));
        }
        let start = d - SHUTDOWN_FRAMES;
        let s = start as f64;
        let df = d as f64;

        let progress = Curve::new(
            &[s, s + 20.0, s + 40.0, s + 55.0],
            &[0.0, 0.7, 0.95, 1.0],
            InterpOpts::clamp().with_ease(Ease::InCubic),
        )?;
        let squeeze_y = Curve::new(&[0.0, 0.7, 1.0], &[1.0, 0.01, 0.0], InterpOpts::default())?;
        let squeeze_x = Curve::new(
            &[0.0, 0.5, 0.9, 1.0],
            &[1.0, 1.0, 0.3, 0.0],
            InterpOpts::default(),
        )?;
        let flare = Curve::new(
            &[0.0, 0.3, 0.7, 1.0],
            &[1.0, 2.5, 3.0, 0.0],
            InterpOpts::default(),
        )?;
        let glow = Curve::new(&[0.85, 0.95, 1.0], &[0.0, 1.0, 0.0], InterpOpts::clamp())?;
        let fin_fade = Curve::new(&[s + 45.0, s + 55.0], &[0.0, 1.0], InterpOpts::clamp())?;

        let fin = TextAnimator::new(
            TextRevealSpec {
                text: "FIN".to_owned(),
                style: RevealStyle::Blur { max_blur_px: 10.0 },
                stagger_sec: 0.06,
                duration_sec: 0.6,
                start_frame: s + 45.0,
                ease: Ease::OutQuad,
                font_size: 18.0,
                color: Rgba8Premul::rgba(255, 255, 255, 0.4),
            },
            env.fps,
        )?;
        let label = TextAnimator::new(
            TextRevealSpec {
                text: "OUTRO".to_owned(),
                style: RevealStyle::FadeChars,
                stagger_sec: 0.03,
                duration_sec: 0.5,
                start_frame: 15.0,
                ease: Ease::OutQuad,
                font_size: 14.0,
                color: Rgba8Premul::rgba(255, 255, 255, 0.45),
            },
            env.fps,
        )?;

        let footage_audio = AudioTrack {
            asset: setup.footage.clone(),
            trim_start_sec: setup.trim_start_sec,
            envelope: GainEnvelope::new(vec![
                Curve::new(&[0.0, 15.0], &[0.0, 0.7], InterpOpts::clamp_right())?,
                Curve::new(&[df - 90.0, df - 30.0], &[0.7, 0.0], InterpOpts::clamp())?,
            ]),
        };
        let drone = AudioTrack {
            asset: setup.sfx_asset("drone")?.to_owned(),
            trim_start_sec: 0.0,
            envelope: GainEnvelope::new(vec![Curve::new(
                &[0.0, 30.0, s, df],
                &[0.0, 0.15, 0.15, 0.0],
                InterpOpts::clamp_right(),
            )?]),
        };
        let impact = Sfx::new(setup.sfx_asset("impact")?, start, 0.3);

        let overlays = Overlays {
            retro: Some(Retro {
                intensity: 0.3,
                speed: 0.8,
            }),
            grain: Some(Grain {
                intensity: 0.3,
                speed: 1.0,
                opacity: 0.12,
            }),
            vignette: Some((0.7, 0.3)),
            letterbox: Some(Letterbox::fixed(0.08)),
            ..Overlays::default()
        };

        Ok(Self {
            setup,
            env,
            start,
            progress,
            squeeze_y,
            squeeze_x,
            flare,
            glow,
            fin_fade,
            fin,
            label,
            footage_audio,
            drone,
            impact,
            overlays,
        })
    }

    /// Shutdown state at local `frame`; identity before the shutdown starts.
    pub(crate) fn shutdown(&self, frame: u64) -> Shutdown {
        if frame < self.start {
            return Shutdown {
                active: false,
                progress: 0.0,
                scale_x: 1.0,
                scale_y: 1.0,
                brightness: 1.0,
                dot_glow: 0.0,
            };
        }
        let p = self.progress.sample(frame as f64);
        Shutdown {
            active: true,
            progress: p,
            scale_x: self.squeeze_x.sample(p),
            scale_y: self.squeeze_y.sample(p),
            brightness: self.flare.sample(p),
            dot_glow: self.glow.sample(p),
        }
    }
}

impl SceneRenderer for OutroScene {
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
        let crt = self.shutdown(f);
        let drift = DRIFT.at(f);

        let mut visual = VisualDescriptor::default();
        visual.layers.push(backdrop());
        visual.layers.push(footage(
            &self.setup.footage,
            self.footage_audio.source_time(f, fps),
            LayerTransform {
                scale_x: crt.scale_x * drift.scale_x,
                scale_y: crt.scale_y * drift.scale_y,
                ..drift
            },
            ColorGrade {
                saturate: if crt.active { 0.5 } else { 1.2 },
                contrast: 1.1,
                brightness: crt.brightness,
                blur_px: 0.0,
            },
        ));

        if crt.dot_glow > 0.0 {
            visual.artifacts.push(
                Artifact::new(
                    ArtifactKind::CrtDot,
                    [w / 2.0, h / 2.0, 6.0, 6.0],
                    Rgba8Premul::white(),
                    Z_FX,
                )
                .with_intensity(crt.dot_glow)
                .with_opacity(crt.dot_glow),
            );
        }

        let fin_opacity = self.fin_fade.sample(f as f64);
        if fin_opacity > 0.0 {
            visual.texts.push(place_text(
                &self.fin,
                "fin",
                f,
                &rng,
                (w / 2.0, h / 2.0),
                fin_opacity,
            ));
        }

        if !crt.active {
            let label_in = spring_at(f, 10, fps, &LABEL);
            let label_opacity = clamp01(label_in);
            let bar_width = lerp(0.0, 80.0, label_in);
            visual
                .layers
                .push(shade(0.0, &[(0.0, 0.5), (0.4, 0.1), (0.6, 0.1), (1.0, 0.3)]));
            visual.artifacts.push(
                Artifact::new(
                    ArtifactKind::AccentBar,
                    [w - 80.0 - bar_width, h - 165.0, bar_width, 2.0],
                    Rgba8Premul::from_straight_rgba(139, 92, 246, 255),
                    Z_GRAPHICS,
                )
                .with_intensity(10.0)
                .with_opacity(label_opacity),
            );
            visual.texts.push(place_text(
                &self.label,
                "label",
                f,
                &rng,
                (w - 80.0, h - 130.0),
                label_opacity,
            ));
            visual
                .layers
                .extend(self.overlays.layers(&self.setup.id, f, &self.env));
        }
        visual.sort();

        let mut audio = vec![self.footage_audio.cue(f, fps), self.drone.cue(f, fps)];
        audio.extend(self.impact.cue(f, fps));
        SceneOutput { visual, audio }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/outro.rs"]
mod tests;
