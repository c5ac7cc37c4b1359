use super::*;

fn fps30() -> Fps {
    Fps::new(30, 1).unwrap()
}

fn configs() -> Vec<SpringParams> {
    vec![
        SpringParams::default(),
        SpringParams::new(15.0, 120.0),
        SpringParams::new(20.0, 100.0),
        SpringParams::new(100.0, 30.0).with_mass(2.0),
        SpringParams::new(2.0 * 10.0, 100.0), // critically damped: c = 2 * sqrt(k * m)
        SpringParams::new(1.0, 300.0).with_mass(0.5),
    ]
}

#[test]
fn zero_and_negative_elapsed_are_at_rest() {
    for p in configs() {
        assert_eq!(spring_progress(0.0, fps30(), &p), 0.0);
        assert_eq!(spring_progress(-30.0, fps30(), &p), 0.0);
    }
}

#[test]
fn converges_to_one_for_every_regime() {
    for p in configs() {
        let v = spring_progress(100_000.0, fps30(), &p);
        assert!((v - 1.0).abs() < 1e-6, "{p:?} -> {v}");
    }
}

#[test]
fn critically_damped_branch_is_hit() {
    let p = SpringParams::new(20.0, 100.0);
    assert_eq!(p.damping_ratio(), 1.0);
    let v = spring_progress(15.0, fps30(), &p);
    assert!(v > 0.0 && v < 1.0);
}

#[test]
fn under_damped_spring_overshoots() {
    let p = SpringParams::new(5.0, 200.0);
    let peak = (0..60)
        .map(|f| spring_progress(f as f64, fps30(), &p))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0, "peak {peak}");
}

#[test]
fn overshoot_clamping_caps_at_one() {
    let p = SpringParams {
        overshoot_clamping: true,
        ..SpringParams::new(5.0, 200.0)
    };
    for f in 0..60 {
        assert!(spring_progress(f as f64, fps30(), &p) <= 1.0);
    }
}

#[test]
fn over_damped_spring_is_monotonic() {
    let p = SpringParams::new(100.0, 30.0).with_mass(2.0);
    let mut prev = 0.0;
    for f in 0..400 {
        let v = spring_progress(f as f64, fps30(), &p);
        assert!(v >= prev);
        assert!(v <= 1.0);
        prev = v;
    }
}

#[test]
fn evaluation_order_does_not_matter() {
    let p = SpringParams::new(15.0, 120.0);
    let forward: Vec<f64> = (0..90).map(|f| spring_progress(f as f64, fps30(), &p)).collect();
    let backward: Vec<f64> = (0..90)
        .rev()
        .map(|f| spring_progress(f as f64, fps30(), &p))
        .collect();
    for (a, b) in forward.iter().zip(backward.iter().rev()) {
        assert_eq!(a, b);
    }
}

#[test]
fn validate_rejects_non_positive_coefficients() {
    assert!(SpringParams::new(0.0, 100.0).validate().is_err());
    assert!(SpringParams::new(10.0, -1.0).validate().is_err());
    assert!(SpringParams::new(10.0, 100.0).with_mass(0.0).validate().is_err());
    assert!(SpringParams::default().validate().is_ok());
}

#[test]
fn settle_frames_bounds_the_tail() {
    for p in configs() {
        let settled = settle_frames(fps30(), &p, 0.005).unwrap();
        for f in settled..settled + 120 {
            let v = spring_progress(f as f64, fps30(), &p);
            assert!((v - 1.0).abs() < 0.005, "{p:?} frame {f} -> {v}");
        }
    }
}
