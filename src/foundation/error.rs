/// Convenience result type used across Morphyte.
pub type MorphyteResult<T> = Result<T, MorphyteError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum MorphyteError {
    /// Non-monotonic, under-specified, or ambiguous timeline input.
    #[error("timeline error: {0}")]
    Timeline(String),

    /// Attribute mismatch between snapshots. Reserved for a future strict
    /// mode; the engine currently skips mismatched attributes instead.
    #[error("attribute error: {0}")]
    Attribute(String),

    /// Degenerate geometry. Reserved: degenerate loops resolve to the
    /// documented zero-offset/zero-size fallbacks and never raise this.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MorphyteError {
    /// Build a [`MorphyteError::Timeline`] value.
    pub fn timeline(msg: impl Into<String>) -> Self {
        Self::Timeline(msg.into())
    }

    /// Build a [`MorphyteError::Attribute`] value.
    pub fn attribute(msg: impl Into<String>) -> Self {
        Self::Attribute(msg.into())
    }

    /// Build a [`MorphyteError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`MorphyteError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
