//! The segment price matrix.
//!
//! A matrix holds the fare (or an explicit "unavailable" marker) for every
//! forward stop pair of one train run. It is filled through a
//! [`MatrixBuilder`], where each cell may be written exactly once, and
//! becomes an immutable [`PriceMatrix`] only when no cell is left pending.

mod builder;
mod cell;
mod error;
mod price_matrix;

pub use builder::MatrixBuilder;
pub use cell::PriceCell;
pub use error::MatrixError;
pub use price_matrix::{JourneyHeader, PriceMatrix};

use crate::domain::StopIndex;

/// Iterate over every forward pair `(i, j)` with `i < j < stop_count`, row by row.
///
/// # Examples
///
/// ```
/// use split_fare::domain::StopIndex;
/// use split_fare::matrix::forward_pairs;
///
/// let pairs: Vec<_> = forward_pairs(3).collect();
/// assert_eq!(
///     pairs,
///     vec![
///         (StopIndex(0), StopIndex(1)),
///         (StopIndex(0), StopIndex(2)),
///         (StopIndex(1), StopIndex(2)),
///     ]
/// );
/// ```
pub fn forward_pairs(stop_count: usize) -> impl Iterator<Item = (StopIndex, StopIndex)> {
    (0..stop_count)
        .flat_map(move |i| ((i + 1)..stop_count).map(move |j| (StopIndex(i), StopIndex(j))))
}

/// Number of forward pairs among `stop_count` stops.
pub fn pair_count(stop_count: usize) -> usize {
    stop_count * stop_count.saturating_sub(1) / 2
}

/// Position of a forward pair in row-major triangular storage.
///
/// Returns `None` unless `from < to < stop_count`.
fn pair_offset(stop_count: usize, from: StopIndex, to: StopIndex) -> Option<usize> {
    let (i, j) = (from.0, to.0);
    if i >= j || j >= stop_count {
        return None;
    }
    Some(i * stop_count - i * (i + 1) / 2 + (j - i - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_follow_iteration_order() {
        for n in 0..8 {
            let offsets: Vec<usize> = forward_pairs(n)
                .map(|(i, j)| pair_offset(n, i, j).unwrap())
                .collect();
            let expected: Vec<usize> = (0..pair_count(n)).collect();
            assert_eq!(offsets, expected, "stop count {n}");
        }
    }

    #[test]
    fn non_forward_pairs_have_no_offset() {
        assert_eq!(pair_offset(4, StopIndex(2), StopIndex(2)), None);
        assert_eq!(pair_offset(4, StopIndex(3), StopIndex(1)), None);
        assert_eq!(pair_offset(4, StopIndex(1), StopIndex(4)), None);
    }

    #[test]
    fn pair_counts() {
        assert_eq!(pair_count(0), 0);
        assert_eq!(pair_count(1), 0);
        assert_eq!(pair_count(2), 1);
        assert_eq!(pair_count(4), 6);
        assert_eq!(pair_count(10), 45);
    }
}
