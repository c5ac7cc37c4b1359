//! Two-scene compositing for transition windows.
//!
//! Every rule returns the outgoing descriptor unchanged at progress 0 and the incoming one at
//! progress 1, so the frames on either side of a window line up with the single-scene renders.

use std::f64::consts::PI;

use crate::{
    animation::seeded::{EffectRng, artifact_key},
    effects::transitions::{TransitionKind, WipeDir},
    foundation::core::{Canvas, Rgba8Premul},
    scene::descriptor::{
        Artifact, ArtifactKind, BACKDROP_LAYER, Inset, Layer, LayerKind, VisualDescriptor,
    },
};

/// Seeded corruption is re-rolled this many times across a transition.
pub const GLITCH_BUCKETS: f64 = 8.0;
const GLITCH_SLICES: usize = 4;

/// Opacity of the flash layer: a triangle peaking at 1 when `p = 0.5`.
pub fn flash_opacity(p: f64) -> f64 {
    (1.0 - (2.0 * p - 1.0).abs()).clamp(0.0, 1.0)
}

/// Combines an outgoing and an incoming scene render.
#[derive(Clone, Copy, Debug)]
pub struct TransitionBlender {
    canvas: Canvas,
    rng: EffectRng,
}

impl TransitionBlender {
    pub fn new(canvas: Canvas, rng: EffectRng) -> Self {
        Self { canvas, rng }
    }

    /// Blend at weighted progress `progress` (clamped to `[0, 1]`, NaN treated as 0).
    pub fn blend(
        &self,
        outgoing: &VisualDescriptor,
        incoming: &VisualDescriptor,
        progress: f64,
        kind: &TransitionKind,
    ) -> VisualDescriptor {
        let p = if progress.is_nan() { 0.0 } else { progress };
        if p <= 0.0 {
            return outgoing.clone();
        }
        if p >= 1.0 {
            return incoming.clone();
        }

        match *kind {
            TransitionKind::Glitch { max_displacement } => {
                self.glitch(outgoing, incoming, p, max_displacement)
            }
            TransitionKind::Flash { color } => flash(outgoing, incoming, p, color),
            TransitionKind::GlitchWipe {
                dir,
                max_displacement,
            } => self.glitch_wipe(outgoing, incoming, p, dir, max_displacement),
        }
    }

    fn glitch(
        &self,
        outgoing: &VisualDescriptor,
        incoming: &VisualDescriptor,
        p: f64,
        max_displacement: f64,
    ) -> VisualDescriptor {
        let bucket = (p * GLITCH_BUCKETS).floor() as u64;

        let mut under = incoming.clone();

        // Only the outgoing content fades; its own backdrop would darken the incoming scene.
        let mut over = outgoing.clone();
        over.layers.retain(|l| l.name != BACKDROP_LAYER);
        over.fade(1.0 - p);
        over.raise(under.max_z() + 1 - min_z(&over));
        for (i, layer) in over.layers.iter_mut().enumerate() {
            let dx = self
                .rng
                .centered(&artifact_key("tx-glitch", bucket, i), 2.0 * max_displacement);
            let hue = self.rng.centered(&artifact_key("tx-hue", bucket, i), 60.0);
            layer.transform.translate_x += dx * p;
            layer.transform.hue_rotate_deg += hue * p;
        }

        let top = over.max_z() + 1;
        under.merge(over);
        under
            .artifacts
            .extend(self.slices(bucket, p, max_displacement, top));
        under.sort();
        under
    }

    fn glitch_wipe(
        &self,
        outgoing: &VisualDescriptor,
        incoming: &VisualDescriptor,
        p: f64,
        dir: WipeDir,
        max_displacement: f64,
    ) -> VisualDescriptor {
        let bucket = (p * GLITCH_BUCKETS).floor() as u64;
        let (revealed, remaining) = wipe_insets(dir, p);
        // Zero at both ends of the window.
        let swell = (PI * p).sin();

        let mut under = incoming.clone();
        for layer in &mut under.layers {
            layer.clip = Some(intersect(layer.clip, revealed));
        }
        for text in &mut under.texts {
            text.opacity *= p;
        }

        let mut over = outgoing.clone();
        over.raise(under.max_z() + 1 - min_z(&over));
        let (ux, uy) = dir_unit(dir);
        for (i, layer) in over.layers.iter_mut().enumerate() {
            let amount = max_displacement
                * swell
                * (0.5 + self.rng.float01(&artifact_key("tx-wipe", bucket, i)));
            layer.clip = Some(intersect(layer.clip, remaining));
            layer.transform.translate_x += ux * amount;
            layer.transform.translate_y += uy * amount;
        }
        for text in &mut over.texts {
            text.opacity *= 1.0 - p;
        }
        for artifact in &mut over.artifacts {
            artifact.opacity *= 1.0 - p;
        }

        let top = over.max_z() + 1;
        under.merge(over);
        under.artifacts.push(self.wipe_edge(dir, p, swell, top));
        under.sort();
        under
    }

    fn slices(&self, bucket: u64, p: f64, max_displacement: f64, z: i32) -> Vec<Artifact> {
        let (w, h) = (self.canvas.w(), self.canvas.h());
        let band = h / GLITCH_SLICES as f64 / 2.0;
        let strength = 4.0 * p * (1.0 - p);
        (0..GLITCH_SLICES)
            .filter(|&i| self.rng.chance(&artifact_key("tx-slice", bucket, i), p))
            .map(|i| {
                let y = self.rng.float01(&artifact_key("tx-slice-y", bucket, i)) * (h - band);
                let dx = self
                    .rng
                    .centered(&artifact_key("tx-slice-dx", bucket, i), 2.0 * max_displacement);
                let mut slice = Artifact::new(
                    ArtifactKind::GlitchSlice,
                    [dx, y, w, band],
                    Rgba8Premul::transparent(),
                    z,
                )
                .with_intensity(dx.abs())
                .with_opacity(strength);
                slice.hue_rotate_deg = self
                    .rng
                    .centered(&artifact_key("tx-slice-hue", bucket, i), 60.0);
                slice
            })
            .collect()
    }

    fn wipe_edge(&self, dir: WipeDir, p: f64, swell: f64, z: i32) -> Artifact {
        let (w, h) = (self.canvas.w(), self.canvas.h());
        let thickness = 6.0;
        let rect = match dir {
            WipeDir::LeftToRight => [w * p - thickness / 2.0, 0.0, thickness, h],
            WipeDir::RightToLeft => [w * (1.0 - p) - thickness / 2.0, 0.0, thickness, h],
            WipeDir::TopToBottom => [0.0, h * p - thickness / 2.0, w, thickness],
            WipeDir::BottomToTop => [0.0, h * (1.0 - p) - thickness / 2.0, w, thickness],
        };
        Artifact::new(ArtifactKind::GlitchSlice, rect, Rgba8Premul::white(), z)
            .with_intensity(swell)
            .with_opacity(swell)
    }
}

fn flash(
    outgoing: &VisualDescriptor,
    incoming: &VisualDescriptor,
    p: f64,
    color: Rgba8Premul,
) -> VisualDescriptor {
    let peak = flash_opacity(p);
    let mut out = if p < 0.5 {
        outgoing.clone()
    } else {
        incoming.clone()
    };
    for text in &mut out.texts {
        text.opacity *= 1.0 - peak;
    }
    let z = out.max_z() + 1;
    out.layers
        .push(Layer::new("flash", LayerKind::Solid { color }, z).with_opacity(peak));
    out.sort();
    out
}

fn min_z(v: &VisualDescriptor) -> i32 {
    v.layers
        .iter()
        .map(|l| l.z)
        .chain(v.artifacts.iter().map(|a| a.z))
        .min()
        .unwrap_or(0)
}

/// `(incoming clip, outgoing clip)` for a wipe at progress `p`.
fn wipe_insets(dir: WipeDir, p: f64) -> (Inset, Inset) {
    let q = 1.0 - p;
    match dir {
        WipeDir::LeftToRight => (
            Inset {
                right: q,
                ..Inset::default()
            },
            Inset {
                left: p,
                ..Inset::default()
            },
        ),
        WipeDir::RightToLeft => (
            Inset {
                left: q,
                ..Inset::default()
            },
            Inset {
                right: p,
                ..Inset::default()
            },
        ),
        WipeDir::TopToBottom => (Inset::band(0.0, q), Inset::band(p, 0.0)),
        WipeDir::BottomToTop => (Inset::band(q, 0.0), Inset::band(0.0, p)),
    }
}

fn dir_unit(dir: WipeDir) -> (f64, f64) {
    match dir {
        WipeDir::LeftToRight => (1.0, 0.0),
        WipeDir::RightToLeft => (-1.0, 0.0),
        WipeDir::TopToBottom => (0.0, 1.0),
        WipeDir::BottomToTop => (0.0, -1.0),
    }
}

/// Tighter of two clips, side by side.
fn intersect(a: Option<Inset>, b: Inset) -> Inset {
    let a = a.unwrap_or_default();
    Inset {
        top: a.top.max(b.top),
        right: a.right.max(b.right),
        bottom: a.bottom.max(b.bottom),
        left: a.left.max(b.left),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blend.rs"]
mod tests;
