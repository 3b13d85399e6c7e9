//! Errors reported for rejected input.
//!
//! Degenerate geometry is never an error (see [`crate::Rect::is_valid`]); only malformed
//! configuration and malformed geographic input are.

use crate::bounds::Bounds;
use std::fmt::Display;

/// Input rejected by the planner, a strategy or the configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The fragment budget must be at least one.
    InvalidBudget {
        /// Requested budget
        max_areas: usize,
    },
    /// The coordinate domain name is not known.
    UnknownDomain {
        /// Name as given
        name: String,
    },
    /// A configuration value could not be parsed or is out of range.
    InvalidPreference {
        /// Preference key as given, with its prefix if it had one
        key: String,
        /// Rejected value
        value: String,
    },
    /// The extension margin is negative or not finite.
    InvalidMargin {
        /// Rejected margin
        margin: f64,
    },
    /// Geographic bounds with non-finite or inverted coordinates.
    InvalidBounds {
        /// Rejected bounds
        bounds: Bounds,
    },
}

impl Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::InvalidBudget { max_areas } => {
                write!(f, "Fragment budget must be at least 1, got {}", max_areas)
            }
            FetchError::UnknownDomain { name } => {
                write!(f, "Unknown coordinate domain '{}'", name)
            }
            FetchError::InvalidPreference { key, value } => {
                write!(f, "Invalid value '{}' for preference '{}'", value, key)
            }
            FetchError::InvalidMargin { margin } => {
                write!(f, "Extension margin must be finite and non-negative, got {}", margin)
            }
            FetchError::InvalidBounds { bounds } => {
                write!(f, "Invalid geographic bounds {}", bounds)
            }
        }
    }
}

impl std::error::Error for FetchError {}

/// Result with [`FetchError`] as the error type.
pub type Result<T> = std::result::Result<T, FetchError>;
