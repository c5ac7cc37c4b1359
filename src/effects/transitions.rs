use crate::{
    animation::ease::Ease,
    composition::model::TransitionSpec,
    foundation::color::ColorDef,
    foundation::core::Rgba8Premul,
    foundation::error::{FlowcutError, FlowcutResult},
};

/// Default peak slice displacement for glitch transitions, in px.
pub const DEFAULT_GLITCH_DISPLACEMENT: f64 = 60.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WipeDir {
    LeftToRight,
    RightToLeft,
    TopToBottom,
    BottomToTop,
}

/// Presentation rule used to combine two scenes inside a transition window.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TransitionKind {
    /// Outgoing scene breaks up and fades over the incoming one.
    Glitch { max_displacement: f64 },
    /// Solid color flashes in, peaking at the midpoint, and hides the cut.
    Flash { color: Rgba8Premul },
    /// Incoming scene is revealed along `dir`; the outgoing remainder is displaced along it.
    GlitchWipe { dir: WipeDir, max_displacement: f64 },
}

impl TransitionKind {
    /// Short name for logs and `info` output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Glitch { .. } => "glitch",
            Self::Flash { .. } => "flash",
            Self::GlitchWipe { .. } => "glitch_wipe",
        }
    }
}

/// Progress-weight function applied to the raw window position.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub enum TransitionTiming {
    #[default]
    Linear,
    Eased(Ease),
}

impl TransitionTiming {
    pub fn from_ease(ease: Ease) -> Self {
        match ease {
            Ease::Linear => Self::Linear,
            other => Self::Eased(other),
        }
    }

    /// Weighted progress for raw progress `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::Eased(ease) => ease.apply(t),
        }
    }
}

pub fn parse_transition_kind_params(
    kind: &str,
    params: &serde_json::Value,
) -> FlowcutResult<TransitionKind> {
    let kind = kind.trim().to_ascii_lowercase();
    if kind.is_empty() {
        return Err(FlowcutError::validation("transition kind must be non-empty"));
    }

    let params = if params.is_null() {
        None
    } else {
        Some(params.as_object().ok_or_else(|| {
            FlowcutError::validation(format!("{kind} params must be an object"))
        })?)
    };

    let max_displacement = match params
        .and_then(|p| p.get("max_displacement"))
        .and_then(|v| v.as_f64())
    {
        None => DEFAULT_GLITCH_DISPLACEMENT,
        Some(v) => {
            if !v.is_finite() || v < 0.0 {
                return Err(FlowcutError::validation(format!(
                    "{kind}.max_displacement must be finite and >= 0"
                )));
            }
            v
        }
    };

    match kind.as_str() {
        "glitch" | "crossfade" => Ok(TransitionKind::Glitch { max_displacement }),
        "flash_white" | "flashwhite" => Ok(TransitionKind::Flash {
            color: Rgba8Premul::white(),
        }),
        "flash_black" | "flashblack" => Ok(TransitionKind::Flash {
            color: Rgba8Premul::black(),
        }),
        "flash" => {
            let color = match params.and_then(|p| p.get("color")) {
                None => Rgba8Premul::white(),
                Some(v) => serde_json::from_value::<ColorDef>(v.clone())
                    .map_err(|e| FlowcutError::validation(format!("flash.color: {e}")))?
                    .to_rgba8_premul(),
            };
            Ok(TransitionKind::Flash { color })
        }
        "glitch_wipe" | "glitchwipe" => {
            let dir = match params.and_then(|p| p.get("dir")).and_then(|v| v.as_str()) {
                None => WipeDir::LeftToRight,
                Some(s) => match s.trim().to_ascii_lowercase().as_str() {
                    "left_to_right" | "lefttoright" | "ltr" => WipeDir::LeftToRight,
                    "right_to_left" | "righttoleft" | "rtl" => WipeDir::RightToLeft,
                    "top_to_bottom" | "toptobottom" | "ttb" => WipeDir::TopToBottom,
                    "bottom_to_top" | "bottomtotop" | "btt" => WipeDir::BottomToTop,
                    other => {
                        return Err(FlowcutError::validation(format!(
                            "unknown glitch_wipe.dir '{other}'"
                        )));
                    }
                },
            };
            Ok(TransitionKind::GlitchWipe {
                dir,
                max_displacement,
            })
        }
        _ => Err(FlowcutError::validation(format!(
            "unknown transition kind '{kind}'"
        ))),
    }
}

pub fn parse_transition(spec: &TransitionSpec) -> FlowcutResult<TransitionKind> {
    parse_transition_kind_params(&spec.kind, &spec.params)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transitions.rs"]
mod tests;
