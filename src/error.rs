//! Error types for plotgeom.
//!
//! This module provides a unified error handling approach using `thiserror`.

use crate::layout::{PanelKind, Side};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for plotgeom operations.
pub type Result<T> = std::result::Result<T, PlotError>;

/// Errors that can occur while building charts.
#[derive(Debug, Error)]
pub enum PlotError {
    /// An axis domain with zero or non-finite span.
    #[error("Degenerate domain: [{min}, {max}]")]
    DegenerateDomain {
        /// Lower limit.
        min: f64,
        /// Upper limit.
        max: f64,
    },

    /// A tick interval that is not a positive finite number.
    #[error("Invalid tick interval: {0}")]
    InvalidInterval(f64),

    /// The requested interval would generate an unreasonable number of ticks.
    #[error("Too many ticks: {count} exceeds the limit of {limit}")]
    TooManyTicks {
        /// Number of ticks requested.
        count: usize,
        /// Maximum allowed.
        limit: usize,
    },

    /// A color map was built with fewer than two stops.
    #[error("Color map needs at least 2 stops, got {0}")]
    TooFewStops(usize),

    /// Explicit color stop positions are not increasing within [0, 1].
    #[error("Color stop positions must increase within [0, 1]: {0:?}")]
    InvalidStops(Vec<f64>),

    /// A color literal could not be parsed.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Two collaborating inputs disagree on a dimension.
    #[error("Shape mismatch in {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// What was being checked.
        what: String,
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// An index that does not address the collection it refers to.
    #[error("Index {index} out of range for {what} of length {len}")]
    IndexOutOfRange {
        /// What was being indexed.
        what: String,
        /// Offending index.
        index: usize,
        /// Collection length.
        len: usize,
    },

    /// Dendrogram coordinates are malformed.
    #[error("Invalid dendrogram: {0}")]
    InvalidTree(String),

    /// A panel was assigned to a side it cannot attach to.
    #[error("Panel {kind} cannot be placed on the {side} side")]
    InvalidPanelSide {
        /// Panel kind.
        kind: PanelKind,
        /// Requested side.
        side: Side,
    },

    /// A panel thickness that is negative or not finite.
    #[error("Panel {kind} has invalid size {size}")]
    InvalidPanelSize {
        /// Panel kind.
        kind: PanelKind,
        /// Requested size.
        size: f64,
    },

    /// A dot plot was requested without the percent matrix.
    #[error("Dot plot requires a percent matrix")]
    MissingPercent,

    /// A percent cell outside `[0, 1]`.
    #[error("Percent value {value} at ({row}, {col}) is outside [0, 1]")]
    InvalidPercent {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// Offending value.
        value: f64,
    },

    /// A named column does not exist in the table.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Failed to open a file.
    #[error("Failed to open file: {path}")]
    FileOpen {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed tabular input.
    #[error("Parse error on line {line}: {message}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal error.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl PlotError {
    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(what: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            what: what.into(),
            expected,
            actual,
        }
    }

    /// Create an IndexOutOfRange error.
    pub fn index_out_of_range(what: impl Into<String>, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            what: what.into(),
            index,
            len,
        }
    }

    /// Create a FileOpen error.
    pub fn file_open(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileOpen { path, source }
    }

    /// Create a Parse error.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
