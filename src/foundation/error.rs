/// Convenience result type used across arcbadge.
pub type BadgeResult<T> = Result<T, BadgeError>;

/// Top-level error taxonomy for badge rendering and its supporting assets.
#[derive(thiserror::Error, Debug)]
pub enum BadgeError {
    /// Invalid caller-provided sizes or style values.
    #[error("validation error: {0}")]
    Validation(String),

    /// The source image could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The accent or text color is not a color the parser understands.
    #[error("color error: {0}")]
    Color(String),

    /// No usable font, or shaping failed.
    #[error("font error: {0}")]
    Font(String),

    /// PNG encoding or writing failed.
    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BadgeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn color(msg: impl Into<String>) -> Self {
        Self::Color(msg.into())
    }

    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
