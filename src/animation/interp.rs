//! Breakpoint interpolation.
//!
//! Every fade, slide and squeeze in the scene renderers goes through [`Curve::sample`]: a piecewise
//! linear map from ordered input breakpoints to output values, optionally remapped by an
//! [`Ease`] inside each segment, with an explicit policy for inputs outside the breakpoint domain.

use crate::{
    animation::ease::Ease,
    foundation::error::{FlowcutError, FlowcutResult},
    foundation::math::lerp,
};

/// What to do with inputs outside the breakpoint domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Continue the edge segment's slope.
    #[default]
    #[serde(alias = "identity")]
    Extend,
    /// Freeze at the edge value.
    #[serde(alias = "hold")]
    Clamp,
}

/// Options shared by [`Curve`] and [`interpolate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InterpOpts {
    /// Easing applied to the in-segment ratio.
    #[serde(default)]
    pub ease: Option<Ease>,
    /// Policy below the first breakpoint.
    #[serde(default)]
    pub left: Extrapolate,
    /// Policy above the last breakpoint.
    #[serde(default)]
    pub right: Extrapolate,
}

impl InterpOpts {
    /// Clamp on both sides.
    pub fn clamp() -> Self {
        Self {
            ease: None,
            left: Extrapolate::Clamp,
            right: Extrapolate::Clamp,
        }
    }

    /// Extend on the left, clamp on the right.
    pub fn clamp_right() -> Self {
        Self {
            ease: None,
            left: Extrapolate::Extend,
            right: Extrapolate::Clamp,
        }
    }

    /// Return a copy with `ease` applied inside segments.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }
}

/// Validated breakpoint curve.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Curve {
    input: Vec<f64>,
    output: Vec<f64>,
    opts: InterpOpts,
}

impl Curve {
    /// Build a curve. Fails unless there are at least two strictly increasing, finite
    /// breakpoints with one finite output per breakpoint.
    pub fn new(input: &[f64], output: &[f64], opts: InterpOpts) -> FlowcutResult<Self> {
        validate_breakpoints(input, output)?;
        Ok(Self {
            input: input.to_vec(),
            output: output.to_vec(),
            opts,
        })
    }

    /// Evaluate the curve at `x`.
    pub fn sample(&self, x: f64) -> f64 {
        sample_validated(&self.input, &self.output, self.opts, x)
    }

    /// Breakpoints.
    pub fn input(&self) -> &[f64] {
        &self.input
    }

    /// Output values, one per breakpoint.
    pub fn output(&self) -> &[f64] {
        &self.output
    }

    /// Extrapolation and easing options.
    pub fn opts(&self) -> InterpOpts {
        self.opts
    }
}

/// One-shot interpolation; validates the breakpoints on every call.
pub fn interpolate(x: f64, input: &[f64], output: &[f64], opts: InterpOpts) -> FlowcutResult<f64> {
    validate_breakpoints(input, output)?;
    Ok(sample_validated(input, output, opts, x))
}

fn validate_breakpoints(input: &[f64], output: &[f64]) -> FlowcutResult<()> {
    if input.len() < 2 {
        return Err(FlowcutError::animation(
            "interpolation needs at least two breakpoints",
        ));
    }
    if input.len() != output.len() {
        return Err(FlowcutError::animation(format!(
            "interpolation has {} breakpoints but {} output values",
            input.len(),
            output.len()
        )));
    }
    if let Some(v) = input.iter().chain(output).find(|v| !v.is_finite()) {
        return Err(FlowcutError::animation(format!(
            "interpolation values must be finite, got {v}"
        )));
    }
    if let Some(w) = input.windows(2).find(|w| w[0] >= w[1]) {
        return Err(FlowcutError::animation(format!(
            "breakpoints must be strictly increasing, got {} then {}",
            w[0], w[1]
        )));
    }
    Ok(())
}

fn sample_validated(input: &[f64], output: &[f64], opts: InterpOpts, x: f64) -> f64 {
    if x.is_nan() {
        return x;
    }
    let last = input.len() - 1;

    if x < input[0] {
        return extrapolate(opts.left, x, [input[0], input[1]], [output[0], output[1]], 0);
    }
    if x > input[last] {
        return extrapolate(
            opts.right,
            x,
            [input[last - 1], input[last]],
            [output[last - 1], output[last]],
            1,
        );
    }

    // `x >= input[0]` here, so at least one breakpoint is <= x.
    let i = input.partition_point(|&b| b <= x) - 1;
    if input[i] == x {
        return output[i];
    }

    let t = (x - input[i]) / (input[i + 1] - input[i]);
    let t = opts.ease.map_or(t, |e| e.apply(t));
    lerp(output[i], output[i + 1], t)
}

fn extrapolate(
    policy: Extrapolate,
    x: f64,
    seg_in: [f64; 2],
    seg_out: [f64; 2],
    edge: usize,
) -> f64 {
    match policy {
        Extrapolate::Clamp => seg_out[edge],
        Extrapolate::Extend => {
            let t = (x - seg_in[0]) / (seg_in[1] - seg_in[0]);
            lerp(seg_out[0], seg_out[1], t)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interp.rs"]
mod tests;
