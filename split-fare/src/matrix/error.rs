//! Matrix error types.

use crate::domain::StopIndex;

/// Errors from building or querying a price matrix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    /// A journey needs an origin and a destination
    #[error("a price matrix needs at least 2 stops, found {found}")]
    TooFewStops { found: usize },

    /// Every stop needs a name
    #[error("stop {stop} has an empty name")]
    EmptyStopName { stop: StopIndex },

    /// The pair is not a forward segment of this matrix
    #[error("({from}, {to}) is not a forward segment of this matrix")]
    NotForward { from: StopIndex, to: StopIndex },

    /// The cell was already written
    #[error("cell ({from}, {to}) has already been recorded")]
    AlreadyRecorded { from: StopIndex, to: StopIndex },

    /// Assembly has not attempted every cell
    #[error("cell ({from}, {to}) has not been assembled")]
    Incomplete { from: StopIndex, to: StopIndex },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MatrixError::TooFewStops { found: 1 };
        assert_eq!(err.to_string(), "a price matrix needs at least 2 stops, found 1");

        let err = MatrixError::AlreadyRecorded {
            from: StopIndex(0),
            to: StopIndex(2),
        };
        assert_eq!(err.to_string(), "cell (0, 2) has already been recorded");

        let err = MatrixError::Incomplete {
            from: StopIndex(1),
            to: StopIndex(3),
        };
        assert_eq!(err.to_string(), "cell (1, 3) has not been assembled");
    }
}
