use super::*;
use crate::{animation::seeded::EffectRng, foundation::core::{Canvas, Fps}};

fn scene() -> IntroScene {
    let setup = SceneSetup {
        id: "intro".to_owned(),
        duration_frames: 120,
        footage: "clip".to_owned(),
        trim_start_sec: 0.0,
        sfx: [("riser", "sfx/riser"), ("impact", "sfx/impact")]
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect(),
    };
    let env = SceneEnv {
        fps: Fps::new(30, 1).unwrap(),
        canvas: Canvas {
            width: 1920,
            height: 1080,
        },
        rng: EffectRng::default(),
    };
    IntroScene::new(setup, env).unwrap()
}

#[test]
fn zoom_starts_wide_and_settles() {
    let s = scene();
    let start = s.render(FrameIndex(0));
    let mid = s.render(FrameIndex(60));
    let end = s.render(FrameIndex(119));
    let scale = |o: &SceneOutput| o.visual.layer("footage").unwrap().transform.scale_x;
    assert_eq!(scale(&start), 1.4);
    // Heavily over-damped: no overshoot, still closing in at the end of the scene.
    assert!(scale(&mid) < 1.4 && scale(&end) < scale(&mid));
    assert!(scale(&end) > 1.05);
}

#[test]
fn impact_flash_peaks_at_frame_30() {
    let s = scene();
    let flash = |f| s.render(FrameIndex(f)).visual.layer("flash").unwrap().opacity;
    assert_eq!(flash(20), 0.0);
    assert!((flash(30) - 0.9).abs() < 1e-12);
    assert_eq!(flash(45), 0.0);
}

#[test]
fn title_is_hidden_until_its_spring_fires() {
    let s = scene();
    let early = s.render(FrameIndex(10));
    assert_eq!(early.visual.text("title").unwrap().opacity, 0.0);
    assert!(early
        .visual
        .artifacts
        .iter()
        .all(|a| a.kind != ArtifactKind::CornerBracket));

    let late = s.render(FrameIndex(100));
    let title = late.visual.text("title").unwrap();
    assert!(title.opacity > 0.9);
    assert_eq!(title.progress(), 1.0);
    assert_eq!(
        late.visual
            .artifacts
            .iter()
            .filter(|a| a.kind == ArtifactKind::CornerBracket)
            .count(),
        2
    );
}

#[test]
fn impact_cue_joins_riser_at_25() {
    let s = scene();
    assert_eq!(s.render(FrameIndex(24)).audio.len(), 1);
    let audio = s.render(FrameIndex(25)).audio;
    assert_eq!(audio.len(), 2);
    assert_eq!(audio[1].asset, "sfx/impact");
    assert_eq!(audio[1].source_time_s, 0.0);
}

#[test]
fn layers_are_in_painter_order() {
    let out = scene().render(FrameIndex(30));
    assert!(out.visual.layers.windows(2).all(|w| w[0].z <= w[1].z));
    assert_eq!(out.visual.layers[0].name, "backdrop");
}

#[test]
fn missing_sfx_role_is_rejected() {
    let mut setup = SceneSetup {
        id: "intro".to_owned(),
        duration_frames: 120,
        footage: "clip".to_owned(),
        trim_start_sec: 0.0,
        sfx: Default::default(),
    };
    setup.sfx.insert("riser".to_owned(), "r".to_owned());
    let env = SceneEnv {
        fps: Fps::new(30, 1).unwrap(),
        canvas: Canvas {
            width: 64,
            height: 64,
        },
        rng: EffectRng::default(),
    };
    let err = IntroScene::new(setup, env).unwrap_err();
    assert!(err.to_string().contains("impact"));
}
