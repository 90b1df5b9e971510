/// Convenience result type used across the engine.
pub type PictographResult<T> = Result<T, PictographError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Placement and propagation are total and never return these; only input
/// loading, configuration persistence and explicit validation do.
#[derive(thiserror::Error, Debug)]
pub enum PictographError {
    /// Invalid user-provided pictograph or sequence data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while reading or writing the placement configuration tree.
    #[error("config error: {0}")]
    Config(String),

    /// Errors while building or querying the reference dataset.
    #[error("classification error: {0}")]
    Classification(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PictographError {
    /// Build a [`PictographError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PictographError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`PictographError::Classification`] value.
    pub fn classification(msg: impl Into<String>) -> Self {
        Self::Classification(msg.into())
    }

    /// Build a [`PictographError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for PictographError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
