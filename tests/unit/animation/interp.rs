use super::*;

#[test]
fn exact_values_at_every_breakpoint() {
    let input = [25.0, 30.0, 40.0];
    let output = [0.0, 0.9, 0.0];
    let c = Curve::new(&input, &output, InterpOpts::clamp().with_ease(Ease::InOutCubic)).unwrap();
    for (x, y) in input.iter().zip(output.iter()) {
        assert_eq!(c.sample(*x), *y);
    }
}

#[test]
fn linear_between_breakpoints() {
    let v = interpolate(5.0, &[0.0, 10.0], &[0.0, 0.8], InterpOpts::default()).unwrap();
    assert!((v - 0.4).abs() < 1e-12);
}

#[test]
fn clamp_policy_returns_boundary_values() {
    let c = Curve::new(&[25.0, 32.0, 50.0], &[0.0, 8.0, 0.0], InterpOpts::clamp()).unwrap();
    assert_eq!(c.sample(-100.0), 0.0);
    assert_eq!(c.sample(1e9), 0.0);

    let c = Curve::new(&[0.0, 15.0], &[0.0, 0.7], InterpOpts::clamp()).unwrap();
    assert_eq!(c.sample(400.0), 0.7);
}

#[test]
fn extend_policy_continues_edge_slope() {
    let c = Curve::new(&[0.0, 1.0], &[1.4, 1.05], InterpOpts::default()).unwrap();
    assert!((c.sample(2.0) - 0.7).abs() < 1e-12);
    assert!((c.sample(-1.0) - 1.75).abs() < 1e-12);
}

#[test]
fn identity_alias_extends_edge_slope() {
    let policy: Extrapolate = serde_json::from_str("\"identity\"").unwrap();
    assert_eq!(policy, Extrapolate::Extend);
    let opts = InterpOpts {
        ease: None,
        left: policy,
        right: policy,
    };
    let below = interpolate(-1.0, &[0.0, 1.0], &[0.0, 10.0], opts).unwrap();
    let above = interpolate(2.0, &[0.0, 1.0], &[0.0, 10.0], opts).unwrap();
    assert!((below + 10.0).abs() < 1e-12);
    assert!((above - 20.0).abs() < 1e-12);
}

#[test]
fn easing_remaps_segment_ratio() {
    let c = Curve::new(
        &[0.0, 8.0],
        &[0.0, 1.0],
        InterpOpts::clamp().with_ease(Ease::OutCubic),
    )
    .unwrap();
    assert!((c.sample(4.0) - Ease::OutCubic.apply(0.5)).abs() < 1e-12);
}

#[test]
fn easing_is_not_applied_when_extending() {
    let opts = InterpOpts::default().with_ease(Ease::InCubic);
    let c = Curve::new(&[0.0, 10.0], &[0.0, 10.0], opts).unwrap();
    assert!((c.sample(15.0) - 15.0).abs() < 1e-12);
}

#[test]
fn rejects_non_increasing_breakpoints() {
    assert!(Curve::new(&[0.0, 0.0], &[0.0, 1.0], InterpOpts::default()).is_err());
    assert!(Curve::new(&[0.0, 5.0, 3.0], &[0.0, 1.0, 2.0], InterpOpts::default()).is_err());
}

#[test]
fn rejects_malformed_shapes() {
    assert!(Curve::new(&[0.0], &[0.0], InterpOpts::default()).is_err());
    assert!(Curve::new(&[0.0, 1.0], &[0.0], InterpOpts::default()).is_err());
    assert!(Curve::new(&[0.0, f64::NAN], &[0.0, 1.0], InterpOpts::default()).is_err());
}

#[test]
fn hold_alias_deserializes_to_clamp() {
    let e: Extrapolate = serde_json::from_str("\"hold\"").unwrap();
    assert_eq!(e, Extrapolate::Clamp);
}
