//! Deterministic per-key randomness for procedural artifacts.
//!
//! There is no generator state: a value is a pure function of `(salt, key)`. Evaluation order,
//! thread count and process boundaries cannot change what a key returns.

use crate::foundation::math::{Fnv1a64, mix64, unit_f64};

/// Stateless keyed RNG. `salt` is the edit-level seed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EffectRng {
    /// Mixed into every key; 0 reproduces [`float01`].
    pub salt: u64,
}

impl EffectRng {
    /// RNG with the given salt.
    pub fn new(salt: u64) -> Self {
        Self { salt }
    }

    /// Stable 64-bit hash of `key`.
    pub fn hash(&self, key: &str) -> u64 {
        let mut h = Fnv1a64::new(Fnv1a64::OFFSET_BASIS ^ self.salt);
        h.write_bytes(key.as_bytes());
        mix64(h.finish())
    }

    /// Value in `[0, 1)` for `key`.
    pub fn float01(&self, key: &str) -> f64 {
        unit_f64(self.hash(key))
    }

    /// Value in `[lo, hi)` for `key`.
    pub fn range(&self, key: &str, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.float01(key)
    }

    /// Signed offset `(float01 - 0.5) * span`, centered on zero.
    pub fn centered(&self, key: &str, span: f64) -> f64 {
        (self.float01(key) - 0.5) * span
    }

    /// `true` with probability `p`.
    pub fn chance(&self, key: &str, p: f64) -> bool {
        self.float01(key) < p
    }

    /// Index in `0..len`. `len` must be non-zero.
    pub fn pick(&self, key: &str, len: usize) -> usize {
        ((self.float01(key) * len as f64) as usize).min(len.saturating_sub(1))
    }
}

/// [`EffectRng::float01`] with salt 0.
pub fn float01(key: &str) -> f64 {
    EffectRng::default().float01(key)
}

/// Phase bucket containing `frame` when phases are `phase_len` frames long.
pub fn phase_of(frame: u64, phase_len: u64) -> u64 {
    frame / phase_len.max(1)
}

/// Canonical key for one artifact decision: `"{effect}-{phase}-{index}"`.
pub fn artifact_key(effect: &str, phase: u64, index: usize) -> String {
    format!("{effect}-{phase}-{index}")
}

#[cfg(test)]
#[path = "../../tests/unit/animation/seeded.rs"]
mod tests;
