/// Convenience result type used across scrollmorph.
pub type MorphResult<T> = Result<T, MorphError>;

/// Top-level error taxonomy used by configuration, loaders and asset commands.
///
/// The controller itself never surfaces these from event handling: failures there are
/// logged and recovered locally.
#[derive(thiserror::Error, Debug)]
pub enum MorphError {
    /// Invalid user-provided configuration or data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A layout element could not be resolved or measured.
    #[error("layout error: {0}")]
    Layout(String),

    /// Errors while loading or interpreting an animation asset.
    #[error("asset error: {0}")]
    Asset(String),

    /// An animation asset rejected a seek or play command.
    #[error("playback error: {0}")]
    Playback(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MorphError {
    /// Build a [`MorphError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MorphError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`MorphError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`MorphError::Playback`] value.
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }

    /// Build a [`MorphError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for MorphError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
