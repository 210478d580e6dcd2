//! Error type shared by every component of the editor.

use thiserror::Error;

use crate::editor::ClusterId;

/// Errors returned by the label-editing components in this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Parallel input sequences disagree in length.
    #[error("length mismatch for {what}: expected {expected}, found {found}")]
    LengthMismatch {
        /// Which input was the wrong length.
        what: &'static str,
        /// Expected length (the number of points).
        expected: usize,
        /// Length actually supplied.
        found: usize,
    },

    /// A point index outside `[0, len)`.
    #[error("point index {index} out of range for {len} points")]
    OutOfRange {
        /// Offending index.
        index: usize,
        /// Number of points in the session.
        len: usize,
    },

    /// The action needs at least one selected point.
    #[error("selection is empty")]
    EmptySelection,

    /// The cluster id does not name a live cluster (never issued, or retired).
    #[error("unknown cluster {0}")]
    UnknownCluster(ClusterId),

    /// A color string that is not `#rrggbb`.
    #[error("invalid color {0:?}: expected #rrggbb")]
    InvalidColor(String),

    /// A palette name that is not one of the built-in palettes.
    #[error("unknown palette {0:?}")]
    UnknownPalette(String),

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
