//! Damped-spring progress.
//!
//! A unit mass-spring-damper released from rest at 0 toward a target of 1. The response is
//! evaluated in closed form at `elapsed / fps` seconds, so frame `N` never depends on frames
//! `0..N`. Under-damped springs overshoot past 1 before settling; that overshoot is part of
//! the response and is only removed when [`SpringParams::overshoot_clamping`] is set.

use crate::{
    foundation::core::Fps,
    foundation::error::{FlowcutError, FlowcutResult},
};

/// Physical spring configuration.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringParams {
    /// Damping coefficient `c`.
    pub damping: f64,
    /// Stiffness `k`.
    pub stiffness: f64,
    /// Mass `m`.
    pub mass: f64,
    /// Cap the response at 1 instead of overshooting.
    #[serde(default)]
    pub overshoot_clamping: bool,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            damping: 10.0,
            stiffness: 100.0,
            mass: 1.0,
            overshoot_clamping: false,
        }
    }
}

impl SpringParams {
    /// Spring with default mass.
    pub fn new(damping: f64, stiffness: f64) -> Self {
        Self {
            damping,
            stiffness,
            ..Self::default()
        }
    }

    /// Replace the mass.
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// All three coefficients must be finite and strictly positive.
    pub fn validate(&self) -> FlowcutResult<()> {
        for (name, v) in [
            ("damping", self.damping),
            ("stiffness", self.stiffness),
            ("mass", self.mass),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(FlowcutError::animation(format!(
                    "spring {name} must be finite and > 0, got {v}"
                )));
            }
        }
        Ok(())
    }

    /// Damping ratio `zeta = c / (2 * sqrt(k * m))`.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Undamped angular frequency `sqrt(k / m)` in rad/s.
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }
}

/// Spring progress after `elapsed_frames` frames.
///
/// Negative elapsed time means the spring has not been triggered yet and yields 0.
pub fn spring_progress(elapsed_frames: f64, fps: Fps, params: &SpringParams) -> f64 {
    if elapsed_frames.is_nan() || elapsed_frames <= 0.0 {
        return 0.0;
    }
    let t = elapsed_frames / fps.as_f64();
    let progress = 1.0 - displacement(t, params);
    if params.overshoot_clamping {
        progress.min(1.0)
    } else {
        progress
    }
}

/// Remaining distance to the target at `t` seconds, starting from `x0 = 1` with zero velocity.
fn displacement(t: f64, params: &SpringParams) -> f64 {
    let zeta = params.damping_ratio();
    let w0 = params.natural_frequency();

    if zeta < 1.0 {
        let w1 = w0 * (1.0 - zeta * zeta).sqrt();
        let envelope = (-zeta * w0 * t).exp();
        envelope * ((w1 * t).cos() + (zeta * w0 / w1) * (w1 * t).sin())
    } else if zeta == 1.0 {
        (-w0 * t).exp() * (1.0 + w0 * t)
    } else {
        let root = (zeta * zeta - 1.0).sqrt();
        let slow = -w0 * (zeta - root);
        let fast = -w0 * (zeta + root);
        // x(0) = 1, x'(0) = 0
        let c_slow = -fast / (slow - fast);
        let c_fast = 1.0 - c_slow;
        c_slow * (slow * t).exp() + c_fast * (fast * t).exp()
    }
}

/// Upper bound on `|displacement(t)|` that never increases with `t`.
fn displacement_bound(t: f64, params: &SpringParams) -> f64 {
    let zeta = params.damping_ratio();
    if zeta < 1.0 {
        let w0 = params.natural_frequency();
        let w1 = w0 * (1.0 - zeta * zeta).sqrt();
        let amp = (1.0 + (zeta * w0 / w1).powi(2)).sqrt();
        amp * (-zeta * w0 * t).exp()
    } else {
        // Critically and over-damped responses released from rest decay monotonically.
        displacement(t, params).abs()
    }
}

const MAX_SETTLE_FRAMES: u64 = 1_000_000;

/// First frame from which the response stays within `threshold` of 1 forever.
pub fn settle_frames(fps: Fps, params: &SpringParams, threshold: f64) -> FlowcutResult<u64> {
    params.validate()?;
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(FlowcutError::animation("settle threshold must be > 0"));
    }
    let fps = fps.as_f64();
    (0..MAX_SETTLE_FRAMES)
        .find(|&f| displacement_bound(f as f64 / fps, params) < threshold)
        .ok_or_else(|| {
            FlowcutError::animation(format!(
                "spring does not settle within {MAX_SETTLE_FRAMES} frames"
            ))
        })
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
