//! The completed, immutable price matrix.

use chrono::NaiveDate;

use crate::domain::{Stop, StopIndex};

use super::{PriceCell, forward_pairs, pair_offset};

/// Metadata stored alongside a matrix in the interchange file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyHeader {
    /// Travel date.
    pub date: NaiveDate,
    /// Human-readable label of the train run, e.g. `ICE 503`.
    pub run_label: String,
}

impl JourneyHeader {
    pub fn new(date: NaiveDate, run_label: impl Into<String>) -> Self {
        Self {
            date,
            run_label: run_label.into(),
        }
    }
}

/// Fares for every forward segment of one train run.
///
/// Every forward pair holds either a fare or [`PriceCell::Unavailable`];
/// no pair is missing. Instances are only produced by
/// [`MatrixBuilder::finish`](super::MatrixBuilder::finish).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceMatrix {
    pub(super) header: JourneyHeader,
    pub(super) stops: Vec<Stop>,
    pub(super) cells: Vec<PriceCell>,
}

impl PriceMatrix {
    /// Returns the header metadata.
    pub fn header(&self) -> &JourneyHeader {
        &self.header
    }

    /// Returns the stops in travel order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Returns the stop at `idx`, if any.
    pub fn stop(&self, idx: StopIndex) -> Option<&Stop> {
        self.stops.get(idx.0)
    }

    /// Number of stops (always at least 2).
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Index of the final stop.
    pub fn last(&self) -> StopIndex {
        StopIndex(self.stops.len() - 1)
    }

    /// Number of forward segments.
    pub fn segment_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns the cell for a forward pair, or `None` if `from >= to` or
    /// either index is out of range.
    pub fn cell(&self, from: StopIndex, to: StopIndex) -> Option<PriceCell> {
        pair_offset(self.stops.len(), from, to).map(|offset| self.cells[offset])
    }

    /// The end-to-end cell from the first to the last stop.
    pub fn direct(&self) -> PriceCell {
        self.cell(StopIndex(0), self.last())
            .unwrap_or(PriceCell::Unavailable)
    }

    /// Iterate over all forward cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (StopIndex, StopIndex, PriceCell)> + '_ {
        forward_pairs(self.stops.len())
            .zip(self.cells.iter())
            .map(|((from, to), cell)| (from, to, *cell))
    }

    /// Number of cells that carry a fare.
    pub fn priced_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_available()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClockTime, Fare};
    use crate::matrix::MatrixBuilder;

    fn stops(names: &[&str]) -> Vec<Stop> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Stop::at(*name, ClockTime::from_hm(10, i as u32 * 10).unwrap()))
            .collect()
    }

    fn header() -> JourneyHeader {
        JourneyHeader::new(NaiveDate::from_ymd_opt(2025, 10, 24).unwrap(), "ICE 503")
    }

    fn fare(cents: u64) -> PriceCell {
        PriceCell::Fare(Fare::from_cents(cents).unwrap())
    }

    #[test]
    fn lookup_and_direct() {
        let mut builder = MatrixBuilder::new(header(), stops(&["A", "B", "C"])).unwrap();
        builder.record(StopIndex(0), StopIndex(1), fare(1000)).unwrap();
        builder
            .record(StopIndex(0), StopIndex(2), PriceCell::Unavailable)
            .unwrap();
        builder.record(StopIndex(1), StopIndex(2), fare(1200)).unwrap();
        let matrix = builder.finish().unwrap();

        assert_eq!(matrix.stop_count(), 3);
        assert_eq!(matrix.segment_count(), 3);
        assert_eq!(matrix.last(), StopIndex(2));
        assert_eq!(matrix.cell(StopIndex(0), StopIndex(1)), Some(fare(1000)));
        assert_eq!(matrix.cell(StopIndex(1), StopIndex(1)), None);
        assert_eq!(matrix.cell(StopIndex(2), StopIndex(0)), None);
        assert_eq!(matrix.direct(), PriceCell::Unavailable);
        assert_eq!(matrix.priced_count(), 2);
        assert_eq!(matrix.stop(StopIndex(1)).unwrap().name, "B");
    }

    #[test]
    fn cells_iterate_row_major() {
        let mut builder = MatrixBuilder::new(header(), stops(&["A", "B", "C"])).unwrap();
        builder.record(StopIndex(1), StopIndex(2), fare(3)).unwrap();
        builder.record(StopIndex(0), StopIndex(2), fare(2)).unwrap();
        builder.record(StopIndex(0), StopIndex(1), fare(1)).unwrap();
        let matrix = builder.finish().unwrap();

        let cells: Vec<_> = matrix.cells().collect();
        assert_eq!(
            cells,
            vec![
                (StopIndex(0), StopIndex(1), fare(1)),
                (StopIndex(0), StopIndex(2), fare(2)),
                (StopIndex(1), StopIndex(2), fare(3)),
            ]
        );
    }
}
