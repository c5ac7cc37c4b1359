//! Staggered per-character text reveals.
//!
//! The core never lays out glyphs. It hands the external text collaborator the string plus a
//! per-character progress, and for the scramble style the glyph to show in place of a char that
//! has not settled yet.

use crate::{
    animation::{
        ease::Ease,
        interp::{Curve, InterpOpts},
        seeded::EffectRng,
    },
    foundation::core::{Fps, Rgba8Premul},
    foundation::error::FlowcutResult,
};

/// Visual treatment of unrevealed characters.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "style")]
pub enum RevealStyle {
    /// Opacity follows progress.
    FadeChars,
    /// Random glyphs from `glyphs` until the char settles.
    Scramble {
        /// Replacement alphabet.
        glyphs: String,
    },
    /// Char slides up from `distance` px below.
    SlideUp {
        /// Start offset in px.
        distance: f64,
    },
    /// Char sharpens from `max_blur_px`.
    Blur {
        /// Blur radius at progress 0.
        max_blur_px: f64,
    },
}

/// Static description of one text reveal.
#[derive(Clone, Debug)]
pub struct TextRevealSpec {
    /// Text to reveal.
    pub text: String,
    /// Reveal style.
    pub style: RevealStyle,
    /// Delay between consecutive chars, seconds.
    pub stagger_sec: f64,
    /// Per-char reveal duration, seconds.
    pub duration_sec: f64,
    /// Local frame at which the first char starts.
    pub start_frame: f64,
    /// Per-char easing.
    pub ease: Ease,
    /// Font size in px, passed through to layout.
    pub font_size: f64,
    /// Fill color.
    pub color: Rgba8Premul,
}

/// Resolved state of one character.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CharState {
    /// Character to draw.
    pub glyph: char,
    /// Eased reveal progress in `[0, 1]`.
    pub progress: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Vertical offset in px.
    pub offset_y: f64,
    /// Blur radius in px.
    pub blur_px: f64,
}

/// Text block handed to the glyph layout collaborator.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextReveal {
    /// Stable name within the scene.
    pub name: String,
    /// Full target string.
    pub text: String,
    /// Block anchor x in px.
    pub x: f64,
    /// Block anchor y in px.
    pub y: f64,
    /// Font size in px.
    pub font_size: f64,
    /// Fill color.
    pub color: Rgba8Premul,
    /// Block opacity multiplier.
    pub opacity: f64,
    /// Block translation x in px.
    pub translate_x: f64,
    /// Block translation y in px.
    pub translate_y: f64,
    /// Per-character states, in string order.
    pub chars: Vec<CharState>,
}

impl TextReveal {
    /// Mean per-char progress; 1 once every char has settled.
    pub fn progress(&self) -> f64 {
        if self.chars.is_empty() {
            return 1.0;
        }
        self.chars.iter().map(|c| c.progress).sum::<f64>() / self.chars.len() as f64
    }
}

/// Precomputed per-character timing for a [`TextRevealSpec`].
#[derive(Clone, Debug)]
pub struct TextAnimator {
    spec: TextRevealSpec,
    per_char: Vec<Curve>,
}

impl TextAnimator {
    /// Build the per-char curves. Fails for a non-positive duration.
    pub fn new(spec: TextRevealSpec, fps: Fps) -> FlowcutResult<Self> {
        let dur = fps.secs_to_frames(spec.duration_sec);
        let stagger = fps.secs_to_frames(spec.stagger_sec);
        let per_char = spec
            .text
            .chars()
            .enumerate()
            .map(|(i, _)| {
                let start = spec.start_frame + stagger * i as f64;
                Curve::new(
                    &[start, start + dur],
                    &[0.0, 1.0],
                    InterpOpts::clamp().with_ease(spec.ease),
                )
            })
            .collect::<FlowcutResult<Vec<_>>>()?;
        Ok(Self { spec, per_char })
    }

    /// Resolve every character at `local_frame`.
    ///
    /// `rng` drives scramble glyphs; the key includes the block name, char index and frame so a
    /// given frame always shows the same scramble.
    pub fn reveal(&self, name: &str, local_frame: u64, rng: &EffectRng) -> TextReveal {
        let chars = self
            .spec
            .text
            .chars()
            .zip(self.per_char.iter())
            .enumerate()
            .map(|(i, (ch, curve))| {
                let p = curve.sample(local_frame as f64);
                self.char_state(name, i, ch, p, local_frame, rng)
            })
            .collect();

        TextReveal {
            name: name.to_owned(),
            text: self.spec.text.clone(),
            x: 0.0,
            y: 0.0,
            font_size: self.spec.font_size,
            color: self.spec.color,
            opacity: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            chars,
        }
    }

    fn char_state(
        &self,
        name: &str,
        index: usize,
        ch: char,
        p: f64,
        frame: u64,
        rng: &EffectRng,
    ) -> CharState {
        let mut state = CharState {
            glyph: ch,
            progress: p,
            opacity: p,
            offset_y: 0.0,
            blur_px: 0.0,
        };
        match &self.spec.style {
            RevealStyle::FadeChars => {}
            RevealStyle::Scramble { glyphs } => {
                let alphabet: Vec<char> = glyphs.chars().collect();
                state.opacity = if p > 0.0 { 1.0 } else { 0.0 };
                if p < 1.0 && !ch.is_whitespace() && !alphabet.is_empty() {
                    let key = format!("scramble-{name}-{index}-{frame}");
                    state.glyph = alphabet[rng.pick(&key, alphabet.len())];
                }
            }
            RevealStyle::SlideUp { distance } => {
                state.offset_y = (1.0 - p) * distance;
            }
            RevealStyle::Blur { max_blur_px } => {
                state.blur_px = (1.0 - p) * max_blur_px;
            }
        }
        state
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/text.rs"]
mod tests;
