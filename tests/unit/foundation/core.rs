use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
}

#[test]
fn frame_index_defaults_to_zero() {
    assert_eq!(FrameIndex::default(), FrameIndex(0));
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
}

#[test]
fn frame_range_clamp_freezes_at_edges() {
    let r = FrameRange::new(FrameIndex(0), FrameIndex(10)).unwrap();
    assert_eq!(r.clamp(FrameIndex(42)), FrameIndex(9));
    assert_eq!(r.clamp(FrameIndex(3)), FrameIndex(3));
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.frames_to_secs(45), 1.5);
    assert_eq!(fps.secs_to_frames_round(40.0), 1200);
}

#[test]
fn rgba_premultiplies_alpha() {
    let c = Rgba8Premul::rgba(255, 0, 0, 0.5);
    assert_eq!(c.a, 128);
    assert_eq!(c.r, 128);
    assert_eq!(Rgba8Premul::white().a, 255);
    assert_eq!(Rgba8Premul::black().r, 0);
}
