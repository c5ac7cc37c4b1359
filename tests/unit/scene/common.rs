use super::*;
use crate::foundation::core::Canvas;

fn env() -> SceneEnv {
    SceneEnv {
        fps: Fps::new(30, 1).unwrap(),
        canvas: Canvas {
            width: 1920,
            height: 1080,
        },
        rng: EffectRng::new(7),
    }
}

#[test]
fn gain_envelope_takes_minimum() {
    let fade_in = Curve::new(&[0.0, 10.0], &[0.0, 1.0], InterpOpts::clamp_right()).unwrap();
    let fade_out = Curve::new(&[5.0, 15.0], &[1.0, 0.0], InterpOpts::clamp()).unwrap();
    let env = GainEnvelope::new(vec![fade_in, fade_out]);

    assert_eq!(env.at(0), 0.0);
    // 0.8 from the fade-in, 0.7 from the fade-out.
    assert!((env.at(8) - 0.7).abs() < 1e-12);
    assert_eq!(env.at(20), 0.0);
    assert_eq!(GainEnvelope::new(Vec::new()).at(3), 1.0);
}

#[test]
fn sfx_starts_at_its_frame() {
    let fps = Fps::new(30, 1).unwrap();
    let sfx = Sfx::new("boom", 25, 0.35);
    assert!(sfx.cue(24, fps).is_none());
    let cue = sfx.cue(40, fps).unwrap();
    assert_eq!(cue.asset, "boom");
    assert_eq!(cue.gain, 0.35);
    assert!((cue.source_time_s - 0.5).abs() < 1e-12);
}

#[test]
fn drift_is_deterministic_sine() {
    let d = Drift {
        scale_base: 1.0,
        scale_amp: 0.1,
        scale_rate: 0.5,
        x_amp: 4.0,
        x_rate: 0.25,
        y_amp: 2.0,
        y_rate: 0.1,
    };
    let t0 = d.at(0);
    assert_eq!(t0.scale_x, 1.0);
    assert_eq!(t0.translate_x, 0.0);
    assert_eq!(t0.translate_y, 2.0);
    assert_eq!(d.at(17), d.at(17));
}

#[test]
fn grain_offsets_are_seeded_per_frame() {
    let overlays = Overlays {
        grain: Some(Grain {
            intensity: 0.3,
            speed: 1.0,
            opacity: 0.15,
        }),
        vignette: Some((0.7, 0.3)),
        ..Overlays::default()
    };
    let env = env();
    let a = overlays.layers("intro", 3, &env);
    let b = overlays.layers("intro", 3, &env);
    let c = overlays.layers("intro", 4, &env);
    assert_eq!(a, b);
    assert_ne!(a[0].kind, c[0].kind);
    assert_eq!(a.len(), 2);
    assert!(a.iter().all(|l| l.z >= Z_OVERLAY));
}

#[test]
fn animated_letterbox_grows_to_full_size() {
    let env = env();
    let overlays = Overlays {
        letterbox: Some(Letterbox::animated(0.08, 1.0, env.fps).unwrap()),
        ..Overlays::default()
    };
    let size_at = |f| match overlays.layers("s", f, &env)[0].kind {
        LayerKind::Letterbox { size } => size,
        _ => unreachable!(),
    };
    assert_eq!(size_at(0), 0.0);
    assert!(size_at(10) > 0.0 && size_at(10) < 0.08);
    assert_eq!(size_at(30), 0.08);
}

#[test]
fn static_text_is_fully_revealed() {
    let t = static_text(
        "counter",
        "0001".to_owned(),
        (1.0, 2.0),
        12.0,
        Rgba8Premul::white(),
        2.0,
    );
    assert_eq!(t.progress(), 1.0);
    assert_eq!(t.opacity, 1.0);
    assert_eq!(t.chars.len(), 4);
}
