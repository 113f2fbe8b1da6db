//! Error types for cable setup.

use crate::anchor::Endpoint;
use alloc::string::String;
use thiserror::Error;

/// Errors raised while configuring or building a cable.
///
/// Everything here is a setup-time failure. Numerical edge cases during
/// stepping are tolerated silently.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CableError {
    #[error("segment count must be at least 1 after density resolution")]
    InvalidSegmentCount,

    #[error("cable length must be positive and finite, got {0}")]
    InvalidLength(f64),

    #[error("tube width must be positive and finite, got {0}")]
    InvalidWidth(f64),

    #[error("tube needs between 3 and 1024 sides, got {sides}")]
    InvalidSides { sides: usize },

    #[error("value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("no anchor provided for the {0} of the cable")]
    MissingAnchor(Endpoint),

    #[error("particle index {index} out of bounds (count: {count})")]
    ParticleOutOfBounds { index: usize, count: usize },

    #[error("particle {index} is a cable endpoint and must stay bound")]
    EndpointBinding { index: usize },

    #[error("TOML parse error: {0}")]
    TomlParse(String),
}

/// Result type alias for cable operations.
pub type Result<T> = core::result::Result<T, CableError>;

#[cfg(feature = "std")]
impl From<toml::de::Error> for CableError {
    fn from(err: toml::de::Error) -> Self {
        use alloc::string::ToString;
        CableError::TomlParse(err.to_string())
    }
}
