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
            Grain, Letterbox, Overlays, Sfx, Z_FX, Z_GRAPHICS, backdrop, footage, place_text,
            shade, spring_at,
        },
        descriptor::{
            Artifact, ArtifactKind, ColorGrade, Layer, LayerKind, LayerTransform, SceneOutput,
            VisualDescriptor,
        },
    },
};

const ZOOM: SpringParams = SpringParams {
    damping: 100.0,
    stiffness: 30.0,
    mass: 2.0,
    overshoot_clamping: false,
};
const TITLE: SpringParams = SpringParams {
    damping: 15.0,
    stiffness: 120.0,
    mass: 1.0,
    overshoot_clamping: false,
};
const SUBTITLE: SpringParams = SpringParams {
    damping: 20.0,
    stiffness: 100.0,
    mass: 1.0,
    overshoot_clamping: false,
};

const TITLE_AT: u64 = 30;
const SUBTITLE_AT: u64 = 45;
const IMPACT_AT: u64 = 25;

/// Opening title card: zoom into footage, white impact flash, then title and subtitle.
#[derive(Debug)]
pub(crate) struct IntroScene {
    setup: SceneSetup,
    env: SceneEnv,
    flash: Curve,
    scan: Curve,
    chroma: Curve,
    title: TextAnimator,
    subtitle: TextAnimator,
    overlays: Overlays,
    sfx: [Sfx; 2],
}

impl IntroScene {
    pub(crate) fn new(setup: SceneSetup, env: SceneEnv) -> FlowcutResult<Self> {
        let h = env.canvas.h();
        let flash = Curve::new(&[25.0, 30.0, 40.0], &[0.0, 0.9, 0.0], InterpOpts::clamp())?;
        let scan = Curve::new(&[0.0, 90.0], &[-20.0, h + 20.0], InterpOpts::clamp_right())?;
        let chroma = Curve::new(&[25.0, 32.0, 50.0], &[0.0, 8.0, 0.0], InterpOpts::clamp())?;

        let title = TextAnimator::new(
            TextRevealSpec {
                text: "DYNAMIC EDIT".to_owned(),
                style: RevealStyle::FadeChars,
                stagger_sec: 0.04,
                duration_sec: 0.6,
                start_frame: TITLE_AT as f64,
                ease: Ease::OutCubic,
                font_size: 82.0,
                color: Rgba8Premul::white(),
            },
            env.fps,
        )?;
        let subtitle = TextAnimator::new(
            TextRevealSpec {
                text: "CINEMATIC GLITCH & FLOW".to_owned(),
                style: RevealStyle::FadeChars,
                stagger_sec: 0.02,
                duration_sec: 0.5,
                start_frame: SUBTITLE_AT as f64,
                ease: Ease::OutQuad,
                font_size: 20.0,
                color: Rgba8Premul::rgba(255, 255, 255, 0.6),
            },
            env.fps,
        )?;

        let overlays = Overlays {
            grain: Some(Grain {
                intensity: 0.3,
                speed: 1.0,
                opacity: 0.15,
            }),
            vignette: Some((0.7, 0.35)),
            letterbox: Some(Letterbox::animated(0.08, 1.0, env.fps)?),
            ..Overlays::default()
        };
        let sfx = [
            Sfx::new(setup.sfx_asset("riser")?, 0, 0.25),
            Sfx::new(setup.sfx_asset("impact")?, IMPACT_AT, 0.35),
        ];

        Ok(Self {
            setup,
            env,
            flash,
            scan,
            chroma,
            title,
            subtitle,
            overlays,
            sfx,
        })
    }
}

impl SceneRenderer for IntroScene {
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

        let zoom = spring_at(f, 0, fps, &ZOOM);
        let title_in = spring_at(f, TITLE_AT, fps, &TITLE);
        let sub_in = spring_at(f, SUBTITLE_AT, fps, &SUBTITLE);
        let title_opacity = clamp01(title_in);
        let chroma = self.chroma.sample(x);

        let mut visual = VisualDescriptor::default();
        visual.layers.push(backdrop());
        visual.layers.push(footage(
            &self.setup.footage,
            self.setup.trim_start_sec + fps.frames_to_secs(f),
            LayerTransform::scale(lerp(1.4, 1.05, zoom)),
            ColorGrade {
                saturate: 1.2,
                contrast: 1.1,
                ..ColorGrade::default()
            },
        ));

        if chroma > 0.5 {
            let full = [0.0, 0.0, w, h];
            for (dx, color) in [
                (chroma, Rgba8Premul::rgba(255, 0, 0, 0.15)),
                (-chroma, Rgba8Premul::rgba(0, 100, 255, 0.15)),
            ] {
                let mut fringe = Artifact::new(ArtifactKind::ChromaFringe, full, color, Z_FX)
                    .with_intensity(chroma)
                    .with_opacity(0.4);
                fringe.x = dx;
                visual.artifacts.push(fringe);
            }
        }

        visual.layers.push(
            Layer::new(
                "flash",
                LayerKind::Solid {
                    color: Rgba8Premul::white(),
                },
                Z_FX + 1,
            )
            .with_opacity(self.flash.sample(x)),
        );
        visual.artifacts.push(Artifact::new(
            ArtifactKind::ScanLine,
            [0.0, self.scan.sample(x), w, 3.0],
            Rgba8Premul::rgba(255, 255, 255, 0.25),
            Z_FX + 2,
        ));
        visual
            .layers
            .push(shade(0.0, &[(0.0, 0.7), (0.4, 0.2), (0.6, 0.1), (1.0, 0.4)]));

        if title_opacity > 0.5 {
            let bracket = Rgba8Premul::rgba(255, 255, 255, 0.3);
            for rect in [[60.0, 60.0, 40.0, 40.0], [w - 100.0, h - 100.0, 40.0, 40.0]] {
                visual.artifacts.push(
                    Artifact::new(ArtifactKind::CornerBracket, rect, bracket, Z_GRAPHICS)
                        .with_opacity(title_opacity),
                );
            }
        }

        let mut title = place_text(
            &self.title,
            "title",
            f,
            &rng,
            (w / 2.0, h - 180.0),
            title_opacity,
        );
        title.translate_y = lerp(60.0, 0.0, title_in);
        visual.texts.push(title);
        visual.texts.push(place_text(
            &self.subtitle,
            "subtitle",
            f,
            &rng,
            (w / 2.0, h - 140.0),
            sub_in,
        ));

        visual
            .layers
            .extend(self.overlays.layers(&self.setup.id, f, &self.env));
        visual.sort();

        let audio = self.sfx.iter().filter_map(|s| s.cue(f, fps)).collect();
        SceneOutput { visual, audio }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/intro.rs"]
mod tests;
