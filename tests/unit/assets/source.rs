use super::*;
use crate::{
    composition::{build::build_timeline, model::EditConfig},
    eval::evaluator::render_frame,
};

fn still() -> PixelBuffer {
    PixelBuffer {
        width: 2,
        height: 1,
        rgba8_premul: vec![255; 8],
    }
}

#[test]
fn fetches_every_video_layer() {
    let t = build_timeline(&EditConfig::default_edit()).unwrap();
    let source = StillFrameSource::new().with_still("footage", still());

    let out = render_frame(&t, FrameIndex(10));
    let assets = fetch_frame_assets(&out, &source);
    assert!(assets.is_complete());
    assert_eq!(assets.fetched.len(), 1);
    let layer = &out.visual.layers[assets.fetched[0].layer_index];
    assert!(matches!(layer.kind, LayerKind::Video { .. }));
}

#[test]
fn transition_frames_fetch_both_scenes() {
    let t = build_timeline(&EditConfig::default_edit()).unwrap();
    let source = StillFrameSource::new().with_still("footage", still());
    let out = render_frame(&t, FrameIndex(110));
    let assets = fetch_frame_assets(&out, &source);
    assert!(assets.fetched.len() >= 2);
}

#[test]
fn missing_asset_is_recorded_not_fatal() {
    let t = build_timeline(&EditConfig::default_edit()).unwrap();
    let source = StillFrameSource::new();
    let out = render_frame(&t, FrameIndex(10));
    let assets = fetch_frame_assets(&out, &source);
    assert!(!assets.is_complete());
    assert_eq!(assets.failures.len(), 1);
    assert_eq!(assets.failures[0].asset, "footage");
    assert!(assets.failures[0].message.contains("not found"));
    assert_eq!(assets.frame, FrameIndex(10));
}

#[test]
fn silence_covers_the_requested_range() {
    let source = StillFrameSource::new();
    let range = FrameRange::new(FrameIndex(0), FrameIndex(30)).unwrap();
    let samples = source
        .get_audio_samples("drone", range, Fps::new(30, 1).unwrap())
        .unwrap();
    assert_eq!(samples.interleaved_f32.len(), 48_000 * 2);
    assert!(samples.interleaved_f32.iter().all(|s| *s == 0.0));
}
