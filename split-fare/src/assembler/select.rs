//! Candidate selection against the reference run.

use crate::domain::{Fare, RunId};
use crate::matrix::PriceCell;
use crate::provider::Candidate;

/// Outcome of filtering one search listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The reference run is listed with a fare.
    Priced(Fare),
    /// The reference run is listed without a fare.
    Unpriced,
    /// Only other runs were listed.
    Mismatch,
    /// The listing was empty.
    NoResults,
}

impl Selection {
    /// The cell value this selection records.
    pub fn cell(&self) -> PriceCell {
        match self {
            Selection::Priced(fare) => PriceCell::Fare(*fare),
            _ => PriceCell::Unavailable,
        }
    }
}

/// Pick the reference run's fare from a listing.
///
/// Only the first `max_candidates` entries are considered. The first entry
/// whose run equals `reference` decides the outcome; fares quoted for other
/// runs are never accepted.
///
/// # Examples
///
/// ```
/// use split_fare::assembler::{Selection, select};
/// use split_fare::domain::{Fare, RunId};
/// use split_fare::provider::Candidate;
///
/// let reference = RunId::new("ICE 503").unwrap();
/// let listing = vec![
///     Candidate::new(RunId::new("RE 3").unwrap(), Fare::from_cents(990).ok()),
///     Candidate::new(reference.clone(), Fare::from_cents(2990).ok()),
/// ];
///
/// assert_eq!(
///     select(&listing, &reference, 5),
///     Selection::Priced(Fare::from_cents(2990).unwrap())
/// );
/// assert_eq!(select(&listing, &reference, 1), Selection::Mismatch);
/// ```
pub fn select(candidates: &[Candidate], reference: &RunId, max_candidates: usize) -> Selection {
    if candidates.is_empty() {
        return Selection::NoResults;
    }

    candidates
        .iter()
        .take(max_candidates)
        .find(|c| &c.run == reference)
        .map_or(Selection::Mismatch, |c| match c.fare {
            Some(fare) => Selection::Priced(fare),
            None => Selection::Unpriced,
        })
}
