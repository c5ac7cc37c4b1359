use super::*;
use crate::composition::{build::build_timeline, model::EditConfig};

fn timeline() -> Timeline {
    build_timeline(&EditConfig::default_edit()).unwrap()
}

fn range(start: u64, end: u64) -> FrameRange {
    FrameRange::new(FrameIndex(start), FrameIndex(end)).unwrap()
}

#[test]
fn sequential_renders_in_order_with_chunk_stats() {
    let t = timeline();
    let threading = RenderThreading {
        chunk_size: 10,
        ..RenderThreading::default()
    };
    let (frames, stats) = render_frames(&t, range(100, 125), &threading).unwrap();
    assert_eq!(frames.len(), 25);
    assert!(frames.iter().zip(100..).all(|(out, f)| out.frame == FrameIndex(f)));
    assert_eq!(stats.frames_total, 25);
    assert_eq!(stats.chunks, 3);
    // Window of the first transition is [105, 120).
    assert_eq!(stats.transition_frames, 15);
}

#[test]
fn parallel_matches_sequential() {
    let t = timeline();
    let seq = render_frames(&t, range(230, 300), &RenderThreading::default()).unwrap();
    let par = render_frames(
        &t,
        range(230, 300),
        &RenderThreading {
            parallel: true,
            chunk_size: 7,
            threads: Some(3),
        },
    )
    .unwrap();
    assert_eq!(seq.0, par.0);
    assert_eq!(seq.1.frames_total, par.1.frames_total);
    assert_eq!(seq.1.transition_frames, par.1.transition_frames);
    assert_eq!(par.1.chunks, 10);
}

#[test]
fn zero_chunk_size_means_one_frame_per_chunk() {
    let t = timeline();
    let threading = RenderThreading {
        chunk_size: 0,
        ..RenderThreading::default()
    };
    let (_, stats) = render_frames(&t, range(0, 4), &threading).unwrap();
    assert_eq!(stats.chunks, 4);
}

#[test]
fn rejects_bad_ranges_and_thread_counts() {
    let t = timeline();
    let d = RenderThreading::default();
    assert!(render_frames(&t, range(3, 3), &d).is_err());
    assert!(render_frames(&t, range(0, t.total_duration() + 1), &d).is_err());
    let zero_threads = RenderThreading {
        parallel: true,
        threads: Some(0),
        ..RenderThreading::default()
    };
    assert!(render_frames(&t, range(0, 2), &zero_threads).is_err());
}
