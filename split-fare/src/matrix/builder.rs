//! Write-once matrix assembly state.

use crate::domain::{Stop, StopIndex};

use super::{
    JourneyHeader, MatrixError, PriceCell, PriceMatrix, forward_pairs, pair_count, pair_offset,
};

/// A price matrix under construction.
///
/// Each forward cell starts pending and may be recorded exactly once.
/// [`finish`](Self::finish) refuses to produce a [`PriceMatrix`] while any
/// cell is still pending.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use split_fare::domain::{ClockTime, Stop, StopIndex};
/// use split_fare::matrix::{JourneyHeader, MatrixBuilder, PriceCell};
///
/// let date = NaiveDate::from_ymd_opt(2025, 10, 24).unwrap();
/// let stops = vec![
///     Stop::at("Berlin Hbf", ClockTime::parse_hhmm("10:00").unwrap()),
///     Stop::at("Halle (Saale) Hbf", ClockTime::parse_hhmm("11:10").unwrap()),
/// ];
/// let mut builder = MatrixBuilder::new(JourneyHeader::new(date, "ICE 503"), stops).unwrap();
/// assert!(builder.clone().finish().is_err());
///
/// builder.record(StopIndex(0), StopIndex(1), PriceCell::Unavailable).unwrap();
/// // Cells are write-once
/// assert!(builder.record(StopIndex(0), StopIndex(1), PriceCell::Unavailable).is_err());
///
/// let matrix = builder.finish().unwrap();
/// assert_eq!(matrix.direct(), PriceCell::Unavailable);
/// ```
#[derive(Debug, Clone)]
pub struct MatrixBuilder {
    header: JourneyHeader,
    stops: Vec<Stop>,
    cells: Vec<Option<PriceCell>>,
}

impl MatrixBuilder {
    /// Start an empty matrix over a fixed stop sequence.
    ///
    /// Stop names and the run label are stored with surrounding whitespace
    /// removed; a stop whose name is then empty is rejected.
    pub fn new(mut header: JourneyHeader, mut stops: Vec<Stop>) -> Result<Self, MatrixError> {
        if stops.len() < 2 {
            return Err(MatrixError::TooFewStops { found: stops.len() });
        }
        for (i, stop) in stops.iter_mut().enumerate() {
            let name = stop.name.trim();
            if name.is_empty() {
                return Err(MatrixError::EmptyStopName { stop: StopIndex(i) });
            }
            if name.len() != stop.name.len() {
                stop.name = name.to_string();
            }
        }
        let label = header.run_label.trim();
        if label.len() != header.run_label.len() {
            header.run_label = label.to_string();
        }

        let cells = vec![None; pair_count(stops.len())];
        Ok(Self {
            header,
            stops,
            cells,
        })
    }

    /// Record the outcome for a forward cell.
    ///
    /// Fails if the pair is not a forward segment or was already recorded;
    /// an existing value is never overwritten.
    pub fn record(
        &mut self,
        from: StopIndex,
        to: StopIndex,
        cell: PriceCell,
    ) -> Result<(), MatrixError> {
        let offset = pair_offset(self.stops.len(), from, to)
            .ok_or(MatrixError::NotForward { from, to })?;

        let slot = &mut self.cells[offset];
        if slot.is_some() {
            return Err(MatrixError::AlreadyRecorded { from, to });
        }
        *slot = Some(cell);
        Ok(())
    }

    /// Number of cells not yet recorded.
    pub fn pending_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Freeze into an immutable matrix.
    ///
    /// Fails with [`MatrixError::Incomplete`] naming the first pending cell.
    pub fn finish(self) -> Result<PriceMatrix, MatrixError> {
        let n = self.stops.len();
        let mut cells = Vec::with_capacity(self.cells.len());
        for ((from, to), cell) in forward_pairs(n).zip(self.cells) {
            cells.push(cell.ok_or(MatrixError::Incomplete { from, to })?);
        }

        Ok(PriceMatrix {
            header: self.header,
            stops: self.stops,
            cells,
        })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::ClockTime;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    proptest! {
        /// Recording every cell in any order completes the matrix, and a
        /// second write to any cell is always rejected
        #[test]
        fn any_order_completes(n in 2usize..8, seed in any::<u64>()) {
            let stops = (0..n)
                .map(|i| Stop::at(format!("S{i}"), ClockTime::from_hm(9, i as u32).unwrap()))
                .collect();
            let header = JourneyHeader::new(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(), "X");
            let mut b = MatrixBuilder::new(header, stops).unwrap();

            let mut pairs: Vec<_> = forward_pairs(n).collect();
            // Deterministic shuffle driven by the seed
            let len = pairs.len();
            for k in 0..len {
                let swap = (seed.wrapping_mul(k as u64 + 1) % len as u64) as usize;
                pairs.swap(k, swap);
            }

            for (from, to) in &pairs {
                b.record(*from, *to, PriceCell::Unavailable).unwrap();
            }
            for (from, to) in &pairs {
                prop_assert!(b.record(*from, *to, PriceCell::Unavailable).is_err());
            }
            prop_assert_eq!(b.pending_count(), 0);
            prop_assert!(b.finish().is_ok());
        }
    }
}
