/// Convenience result type used throughout flowcut.
pub type FlowcutResult<T> = Result<T, FlowcutError>;

/// Error type for configuration, animation, evaluation, and asset failures.
#[derive(thiserror::Error, Debug)]
pub enum FlowcutError {
    /// Timeline or configuration validation error.
    #[error("validation error: {0}")]
    Validation(String),

    /// Curve or spring construction error.
    #[error("animation error: {0}")]
    Animation(String),

    /// Runtime evaluation error.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Failure reported by an external asset source. Recoverable per frame.
    #[error("asset error: {0}")]
    Asset(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped foreign error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FlowcutError {
    /// Build a [`FlowcutError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FlowcutError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`FlowcutError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`FlowcutError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`FlowcutError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
