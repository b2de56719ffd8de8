//! Error types for geometry construction.

use std::fmt;

/// Result type for geoarc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A curve was given fewer control points than it needs.
    TooFewPoints { required: usize, actual: usize },
    /// A mesh generator was asked for too few segments along some axis.
    TooFewSegments {
        context: &'static str,
        minimum: u32,
        actual: u32,
    },
    /// A color string could not be parsed.
    InvalidColor { input: String, detail: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewPoints { required, actual } => {
                write!(
                    f,
                    "curve needs at least {required} points, got {actual}"
                )
            }
            Self::TooFewSegments {
                context,
                minimum,
                actual,
            } => {
                write!(f, "{context} must be at least {minimum}, got {actual}")
            }
            Self::InvalidColor { input, detail } => {
                write!(f, "invalid color '{input}': {detail}")
            }
        }
    }
}

impl std::error::Error for Error {}
