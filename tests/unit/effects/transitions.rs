use super::*;

#[test]
fn glitch_wipe_dir_parses_aliases() {
    let kind =
        parse_transition_kind_params("glitch_wipe", &serde_json::json!({ "dir": "ttb" })).unwrap();
    assert_eq!(
        kind,
        TransitionKind::GlitchWipe {
            dir: WipeDir::TopToBottom,
            max_displacement: DEFAULT_GLITCH_DISPLACEMENT,
        }
    );
    let kind = parse_transition_kind_params(" Glitch_Wipe ", &serde_json::Value::Null).unwrap();
    assert_eq!(kind.name(), "glitch_wipe");
}

#[test]
fn flash_color_param_and_aliases() {
    let kind =
        parse_transition_kind_params("flash", &serde_json::json!({ "color": "#000000" })).unwrap();
    assert_eq!(
        kind,
        TransitionKind::Flash {
            color: Rgba8Premul::black()
        }
    );
    assert_eq!(
        parse_transition_kind_params("flash_white", &serde_json::Value::Null).unwrap(),
        TransitionKind::Flash {
            color: Rgba8Premul::white()
        }
    );
    assert_eq!(
        parse_transition_kind_params("flash", &serde_json::Value::Null).unwrap(),
        TransitionKind::Flash {
            color: Rgba8Premul::white()
        }
    );
}

#[test]
fn rejects_bad_input() {
    assert!(parse_transition_kind_params("", &serde_json::Value::Null).is_err());
    assert!(parse_transition_kind_params("dissolve", &serde_json::Value::Null).is_err());
    assert!(parse_transition_kind_params("glitch", &serde_json::json!([1, 2])).is_err());
    assert!(
        parse_transition_kind_params("glitch_wipe", &serde_json::json!({ "dir": "up" })).is_err()
    );
    assert!(
        parse_transition_kind_params("glitch", &serde_json::json!({ "max_displacement": -1.0 }))
            .is_err()
    );
    assert!(
        parse_transition_kind_params("flash", &serde_json::json!({ "color": "#12" })).is_err()
    );
}

#[test]
fn timing_clamps_and_eases() {
    assert_eq!(TransitionTiming::Linear.apply(0.25), 0.25);
    assert_eq!(TransitionTiming::Linear.apply(-1.0), 0.0);
    assert_eq!(TransitionTiming::Linear.apply(f64::NAN), 0.0);
    let eased = TransitionTiming::from_ease(Ease::InQuad);
    assert_eq!(eased, TransitionTiming::Eased(Ease::InQuad));
    assert_eq!(eased.apply(0.5), 0.25);
    assert_eq!(eased.apply(1.0), 1.0);
    assert_eq!(TransitionTiming::from_ease(Ease::Linear), TransitionTiming::Linear);
}
