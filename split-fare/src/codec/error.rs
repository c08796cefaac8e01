//! Codec error types.

use std::io;

use crate::domain::{InvalidFare, TimeError};
use crate::matrix::MatrixError;

/// Errors from reading or writing an interchange file.
///
/// Row and column numbers are 1-based, as shown by a spreadsheet.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed tab-separated data: {0}")]
    Csv(#[from] csv::Error),

    /// The file ends before a required row
    #[error("missing row {row}")]
    MissingRow { row: usize },

    /// More stop rows than named stops
    #[error("expected {expected} rows, found {found}")]
    ExtraRows { expected: usize, found: usize },

    #[error("row {row}: expected {expected} columns, found {found}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid date {token:?}, expected DD.MM.YYYY")]
    InvalidDate { token: String },

    #[error("row {row}, column {column}: {source}")]
    InvalidTime {
        row: usize,
        column: usize,
        #[source]
        source: TimeError,
    },

    #[error("column {column}: empty stop name")]
    EmptyStopName { column: usize },

    /// A stop row names a different stop than the header
    #[error("row {row}: expected stop {expected:?}, found {found:?}")]
    StopNameMismatch {
        row: usize,
        expected: String,
        found: String,
    },

    #[error("row {row}, column {column}: diagonal cell must be 0, found {token:?}")]
    InvalidDiagonal {
        row: usize,
        column: usize,
        token: String,
    },

    #[error("row {row}, column {column}: cell below the diagonal must be empty, found {token:?}")]
    UnexpectedCell {
        row: usize,
        column: usize,
        token: String,
    },

    #[error("row {row}, column {column}: missing fare")]
    EmptyFare { row: usize, column: usize },

    #[error("row {row}, column {column}: {token:?} is not a fare ({source})")]
    BadFare {
        row: usize,
        column: usize,
        token: String,
        #[source]
        source: InvalidFare,
    },

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}
