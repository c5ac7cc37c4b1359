//! Boundary to the external media decoder.
//!
//! flowcut never decodes media. It tells an [`AssetSource`] which asset and timestamp each video
//! layer needs; failures come back per layer and never abort a render.

use std::collections::BTreeMap;

use crate::{
    eval::evaluator::FrameOutput,
    foundation::core::{FrameIndex, FrameRange, Fps},
    foundation::error::{FlowcutError, FlowcutResult},
    scene::descriptor::LayerKind,
};

#[derive(Clone, Debug, PartialEq)]
/// Decoded video frame.
pub struct PixelBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq)]
/// Decoded audio covering a frame range, stored as interleaved `f32` PCM.
pub struct AudioSamples {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
    /// Interleaved samples.
    pub interleaved_f32: Vec<f32>,
}

/// External media decoder.
pub trait AssetSource: Send + Sync {
    /// Frame of video asset `asset` at `timestamp_s` seconds into the source.
    fn get_video_frame(&self, asset: &str, timestamp_s: f64) -> FlowcutResult<PixelBuffer>;

    /// Samples of `asset` for timeline frames `range` at `fps`.
    fn get_audio_samples(
        &self,
        asset: &str,
        range: FrameRange,
        fps: Fps,
    ) -> FlowcutResult<AudioSamples>;
}

#[derive(Clone, Debug, PartialEq)]
/// A fetched video frame for one layer of a [`FrameOutput`].
pub struct FetchedFrame {
    /// Index into `FrameOutput::visual.layers`.
    pub layer_index: usize,
    /// Asset key.
    pub asset: String,
    /// Decoded pixels.
    pub pixels: PixelBuffer,
}

#[derive(Clone, Debug, PartialEq)]
/// A video layer whose frame could not be fetched.
pub struct AssetFailure {
    /// Index into `FrameOutput::visual.layers`.
    pub layer_index: usize,
    /// Asset key.
    pub asset: String,
    /// Source timestamp that was requested.
    pub source_time_s: f64,
    /// Error reported by the source.
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Media fetched for one frame. The caller decides whether to retry or substitute failures.
pub struct FrameAssets {
    /// Global frame.
    pub frame: FrameIndex,
    /// Successfully fetched layers.
    pub fetched: Vec<FetchedFrame>,
    /// Layers whose fetch failed.
    pub failures: Vec<AssetFailure>,
}

impl FrameAssets {
    /// `true` when every video layer was fetched.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Pull a video frame for every video layer of `output`.
#[tracing::instrument(level = "trace", skip(output, source), fields(frame = output.frame.0))]
pub fn fetch_frame_assets(output: &FrameOutput, source: &dyn AssetSource) -> FrameAssets {
    let mut assets = FrameAssets {
        frame: output.frame,
        ..FrameAssets::default()
    };
    for (layer_index, layer) in output.visual.layers.iter().enumerate() {
        let LayerKind::Video {
            asset,
            source_time_s,
        } = &layer.kind
        else {
            continue;
        };
        match source.get_video_frame(asset, *source_time_s) {
            Ok(pixels) => assets.fetched.push(FetchedFrame {
                layer_index,
                asset: asset.clone(),
                pixels,
            }),
            Err(e) => {
                tracing::warn!(
                    frame = output.frame.0,
                    layer = %layer.name,
                    asset = %asset,
                    source_time_s = *source_time_s,
                    error = %e,
                    "video frame fetch failed"
                );
                assets.failures.push(AssetFailure {
                    layer_index,
                    asset: asset.clone(),
                    source_time_s: *source_time_s,
                    message: e.to_string(),
                });
            }
        }
    }
    assets
}

/// In-memory source returning one still frame per video asset and silence for audio.
///
/// Useful for previews and tests; unknown assets are reported as [`FlowcutError::Asset`].
#[derive(Clone, Debug, Default)]
pub struct StillFrameSource {
    stills: BTreeMap<String, PixelBuffer>,
    sample_rate: u32,
    channels: u16,
}

impl StillFrameSource {
    /// Empty source producing 48 kHz stereo silence.
    pub fn new() -> Self {
        Self {
            stills: BTreeMap::new(),
            sample_rate: 48_000,
            channels: 2,
        }
    }

    /// Register the still returned for `asset`.
    pub fn with_still(mut self, asset: impl Into<String>, pixels: PixelBuffer) -> Self {
        self.stills.insert(asset.into(), pixels);
        self
    }
}

impl AssetSource for StillFrameSource {
    fn get_video_frame(&self, asset: &str, timestamp_s: f64) -> FlowcutResult<PixelBuffer> {
        if !timestamp_s.is_finite() || timestamp_s < 0.0 {
            return Err(FlowcutError::asset(format!(
                "asset '{asset}': invalid timestamp {timestamp_s}"
            )));
        }
        self.stills
            .get(asset)
            .cloned()
            .ok_or_else(|| FlowcutError::asset(format!("asset '{asset}' not found")))
    }

    fn get_audio_samples(
        &self,
        _asset: &str,
        range: FrameRange,
        fps: Fps,
    ) -> FlowcutResult<AudioSamples> {
        let secs = fps.frames_to_secs(range.len_frames());
        let frames = (secs * f64::from(self.sample_rate)).round() as usize;
        Ok(AudioSamples {
            sample_rate: self.sample_rate,
            channels: self.channels,
            interleaved_f32: vec![0.0; frames * usize::from(self.channels)],
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
