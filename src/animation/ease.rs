/// Easing curves applied to normalized progress before blending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Identity.
    #[default]
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out (`power2.out`).
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out (`power3.out`).
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
}

impl Ease {
    /// Every variant, in declaration order.
    pub const ALL: [Ease; 7] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
    ];

    /// Map `t` through the curve. Input is clamped to `[0, 1]`; endpoints are exact.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => ease_in(t, 2),
            Self::OutQuad => ease_out(t, 2),
            Self::InOutQuad => ease_in_out(t, 2),
            Self::InCubic => ease_in(t, 3),
            Self::OutCubic => ease_out(t, 3),
            Self::InOutCubic => ease_in_out(t, 3),
        }
    }
}

fn ease_in(t: f64, power: i32) -> f64 {
    t.powi(power)
}

fn ease_out(t: f64, power: i32) -> f64 {
    1.0 - (1.0 - t).powi(power)
}

fn ease_in_out(t: f64, power: i32) -> f64 {
    if t < 0.5 {
        ease_in(2.0 * t, power) / 2.0
    } else {
        1.0 - ease_in(2.0 - 2.0 * t, power) / 2.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
