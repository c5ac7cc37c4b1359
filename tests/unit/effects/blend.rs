use super::*;
use crate::animation::text::{CharState, TextReveal};

fn canvas() -> Canvas {
    Canvas {
        width: 320,
        height: 180,
    }
}

fn scene(name: &str) -> VisualDescriptor {
    let solid = |n: &str, z| {
        Layer::new(
            format!("{name}-{n}"),
            LayerKind::Solid {
                color: Rgba8Premul::white(),
            },
            z,
        )
    };
    VisualDescriptor {
        layers: vec![solid("bg", 0), solid("fg", 10)],
        artifacts: vec![Artifact::new(
            ArtifactKind::ScanLine,
            [0.0, 0.0, 10.0, 2.0],
            Rgba8Premul::white(),
            20,
        )],
        texts: vec![TextReveal {
            name: format!("{name}-text"),
            text: "A".to_owned(),
            x: 0.0,
            y: 0.0,
            font_size: 10.0,
            color: Rgba8Premul::white(),
            opacity: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            chars: vec![CharState {
                glyph: 'A',
                progress: 1.0,
                opacity: 1.0,
                offset_y: 0.0,
                blur_px: 0.0,
            }],
        }],
    }
}

fn kinds() -> [TransitionKind; 3] {
    [
        TransitionKind::Glitch {
            max_displacement: 60.0,
        },
        TransitionKind::Flash {
            color: Rgba8Premul::white(),
        },
        TransitionKind::GlitchWipe {
            dir: WipeDir::LeftToRight,
            max_displacement: 60.0,
        },
    ]
}

#[test]
fn endpoints_match_single_scene_renders() {
    let b = TransitionBlender::new(canvas(), EffectRng::default());
    let (out, inc) = (scene("out"), scene("in"));
    for kind in kinds() {
        assert_eq!(b.blend(&out, &inc, 0.0, &kind), out);
        assert_eq!(b.blend(&out, &inc, 1.0, &kind), inc);
        assert_eq!(b.blend(&out, &inc, -0.5, &kind), out);
        assert_eq!(b.blend(&out, &inc, f64::NAN, &kind), out);
        assert_eq!(b.blend(&out, &inc, 3.0, &kind), inc);
    }
}

#[test]
fn flash_peaks_at_midpoint() {
    assert_eq!(flash_opacity(0.0), 0.0);
    assert_eq!(flash_opacity(0.5), 1.0);
    assert_eq!(flash_opacity(1.0), 0.0);
    assert_eq!(flash_opacity(0.25), 0.5);

    let b = TransitionBlender::new(canvas(), EffectRng::default());
    let kind = TransitionKind::Flash {
        color: Rgba8Premul::black(),
    };
    let mid = b.blend(&scene("out"), &scene("in"), 0.5, &kind);
    let top = mid.layers.last().unwrap();
    assert_eq!(top.name, "flash");
    assert_eq!(top.opacity, 1.0);
    assert_eq!(mid.texts[0].opacity, 0.0);

    let before = b.blend(&scene("out"), &scene("in"), 0.4, &kind);
    assert!(before.layer("out-fg").is_some());
    let after = b.blend(&scene("out"), &scene("in"), 0.6, &kind);
    assert!(after.layer("in-fg").is_some() && after.layer("out-fg").is_none());
}

#[test]
fn glitch_puts_outgoing_over_incoming() {
    let b = TransitionBlender::new(canvas(), EffectRng::default());
    let kind = TransitionKind::Glitch {
        max_displacement: 60.0,
    };
    let v = b.blend(&scene("out"), &scene("in"), 0.3, &kind);
    let out_fg = v.layer("out-fg").unwrap();
    let in_fg = v.layer("in-fg").unwrap();
    assert!(out_fg.z > in_fg.z);
    assert!((out_fg.opacity - 0.7).abs() < 1e-12);
    assert_eq!(in_fg.opacity, 1.0);
    assert!(v.layers.windows(2).all(|w| w[0].z <= w[1].z));
    assert!(out_fg.transform.translate_x.abs() <= 60.0 * 0.3);
}

#[test]
fn glitch_is_deterministic() {
    let b = TransitionBlender::new(canvas(), EffectRng::new(5));
    let kind = TransitionKind::Glitch {
        max_displacement: 40.0,
    };
    for p in [0.1, 0.37, 0.9] {
        assert_eq!(
            b.blend(&scene("out"), &scene("in"), p, &kind),
            b.blend(&scene("out"), &scene("in"), p, &kind)
        );
    }
}

#[test]
fn wipe_splits_the_canvas_along_dir() {
    let b = TransitionBlender::new(canvas(), EffectRng::default());
    let kind = TransitionKind::GlitchWipe {
        dir: WipeDir::LeftToRight,
        max_displacement: 30.0,
    };
    let v = b.blend(&scene("out"), &scene("in"), 0.25, &kind);
    let in_clip = v.layer("in-fg").unwrap().clip.unwrap();
    let out_layer = v.layer("out-fg").unwrap();
    let out_clip = out_layer.clip.unwrap();
    assert_eq!(in_clip.right, 0.75);
    assert_eq!(out_clip.left, 0.25);
    assert!(out_layer.transform.translate_x > 0.0);
    assert_eq!(out_layer.transform.translate_y, 0.0);
}

#[test]
fn wipe_keeps_existing_clip_tighter() {
    let b = TransitionBlender::new(canvas(), EffectRng::default());
    let mut out = scene("out");
    out.layers[1].clip = Some(Inset::band(0.0, 0.5));
    let kind = TransitionKind::GlitchWipe {
        dir: WipeDir::BottomToTop,
        max_displacement: 0.0,
    };
    let v = b.blend(&out, &scene("in"), 0.2, &kind);
    let clip = v.layer("out-fg").unwrap().clip.unwrap();
    assert_eq!(clip.bottom, 0.5);
}

#[test]
fn glitch_drops_outgoing_backdrop_only() {
    let b = TransitionBlender::new(canvas(), EffectRng::default());
    let with_backdrop = |name: &str| {
        let mut v = scene(name);
        v.layers.insert(
            0,
            Layer::new(
                BACKDROP_LAYER,
                LayerKind::Solid {
                    color: Rgba8Premul::black(),
                },
                0,
            ),
        );
        v
    };
    let kind = TransitionKind::Glitch {
        max_displacement: 60.0,
    };
    let v = b.blend(&with_backdrop("out"), &with_backdrop("in"), 0.5, &kind);
    let backdrops: Vec<_> = v
        .layers
        .iter()
        .filter(|l| l.name == BACKDROP_LAYER)
        .collect();
    assert_eq!(backdrops.len(), 1);
    assert_eq!(backdrops[0].opacity, 1.0);
    assert_eq!(backdrops[0].z, v.layers[0].z);
}
