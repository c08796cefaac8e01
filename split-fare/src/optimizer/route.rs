//! Minimum-cost route over a price matrix.

use crate::domain::{Fare, Segment, StopIndex};
use crate::matrix::PriceMatrix;

/// Error from route optimization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptimizeError {
    /// No combination of priced segments reaches the final stop
    #[error("no route found: stop {destination} cannot be reached from stop 0")]
    Unreachable { destination: StopIndex },

    /// The summed fare does not fit the fare type
    #[error("route cost overflows")]
    Overflow,
}

/// The cheapest ticket combination from the first to the last stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Tickets in travel order; consecutive segments share a stop.
    pub segments: Vec<Segment>,
    /// Sum of the segment fares.
    pub total: Fare,
}

impl Route {
    /// Number of tickets to buy.
    pub fn ticket_count(&self) -> usize {
        self.segments.len()
    }

    /// Whether the route is a single ticket from first to last stop.
    pub fn is_direct(&self) -> bool {
        self.segments.len() == 1
    }

    /// The stops where tickets start or end, including both ends.
    pub fn checkpoints(&self) -> Vec<StopIndex> {
        let mut stops: Vec<StopIndex> = self.segments.iter().map(|s| s.from).collect();
        if let Some(last) = self.segments.last() {
            stops.push(last.to);
        }
        stops
    }
}

/// Find the cheapest combination of segment tickets covering the journey.
///
/// `cost[k]` is the cheapest way to reach stop `k` using priced segments.
/// For each stop, predecessors are scanned in increasing order and only a
/// strictly cheaper total replaces the current best, so ties resolve to the
/// smallest predecessor: the longest final ticket, and fewest tickets.
/// Stops that cannot be reached are skipped; only an unreachable final stop
/// is an error.
///
/// Runs in O(n²) time and O(n) space for n stops.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use split_fare::domain::{ClockTime, Fare, Stop, StopIndex};
/// use split_fare::matrix::{JourneyHeader, MatrixBuilder, PriceCell};
/// use split_fare::optimizer::optimize;
///
/// let stops: Vec<Stop> = ["A", "B", "C"]
///     .iter()
///     .map(|n| Stop::at(*n, ClockTime::parse_hhmm("10:00").unwrap()))
///     .collect();
/// let header = JourneyHeader::new(NaiveDate::from_ymd_opt(2025, 10, 24).unwrap(), "ICE 1");
/// let mut builder = MatrixBuilder::new(header, stops).unwrap();
/// let fare = |c| PriceCell::Fare(Fare::from_cents(c).unwrap());
/// builder.record(StopIndex(0), StopIndex(1), fare(1000)).unwrap();
/// builder.record(StopIndex(1), StopIndex(2), fare(1000)).unwrap();
/// builder.record(StopIndex(0), StopIndex(2), fare(2500)).unwrap();
///
/// let route = optimize(&builder.finish().unwrap()).unwrap();
/// assert_eq!(route.total.cents(), 2000);
/// assert_eq!(route.ticket_count(), 2);
/// ```
pub fn optimize(matrix: &PriceMatrix) -> Result<Route, OptimizeError> {
    let n = matrix.stop_count();
    // Stop 0 costs nothing to reach; every other entry is a sum of fares
    let mut cost: Vec<Option<Fare>> = vec![None; n];
    let mut predecessor: Vec<Option<(StopIndex, Fare)>> = vec![None; n];

    for k in 1..n {
        for j in 0..k {
            let Some(fare) = matrix
                .cell(StopIndex(j), StopIndex(k))
                .and_then(|c| c.fare())
            else {
                continue;
            };

            let candidate = if j == 0 {
                fare
            } else {
                let Some(reach_j) = cost[j] else { continue };
                reach_j.checked_add(fare).ok_or(OptimizeError::Overflow)?
            };

            if cost[k].is_none_or(|best| candidate < best) {
                cost[k] = Some(candidate);
                predecessor[k] = Some((StopIndex(j), fare));
            }
        }
    }

    let destination = matrix.last();
    let total = cost[destination.0].ok_or(OptimizeError::Unreachable { destination })?;

    let mut segments = Vec::new();
    let mut current = destination;
    while let Some((from, fare)) = predecessor[current.0] {
        segments.push(Segment {
            from,
            to: current,
            fare,
        });
        current = from;
    }
    segments.reverse();

    Ok(Route { segments, total })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{ClockTime, Stop};
    use crate::matrix::{JourneyHeader, MatrixBuilder, PriceCell, forward_pairs, pair_count};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    /// A stop count and one optional fare per forward pair.
    fn arb_matrix() -> impl Strategy<Value = PriceMatrix> {
        (2usize..9).prop_flat_map(|n| {
            proptest::collection::vec(proptest::option::weighted(0.6, 1u64..20_000), pair_count(n))
                .prop_map(move |fares| {
                    let stops = (0..n)
                        .map(|i| Stop::at(format!("S{i}"), ClockTime::from_hm(6, i as u32).unwrap()))
                        .collect();
                    let header =
                        JourneyHeader::new(NaiveDate::from_ymd_opt(2025, 5, 5).unwrap(), "X");
                    let mut builder = MatrixBuilder::new(header, stops).unwrap();
                    for ((from, to), cents) in forward_pairs(n).zip(fares) {
                        let cell = PriceCell::from(cents.map(|c| Fare::from_cents(c).unwrap()));
                        builder.record(from, to, cell).unwrap();
                    }
                    builder.finish().unwrap()
                })
        })
    }

    /// Cheapest cost over all routes, by exhaustive enumeration.
    fn brute_force(matrix: &PriceMatrix) -> Option<u64> {
        fn go(matrix: &PriceMatrix, at: usize) -> Option<u64> {
            let last = matrix.last().0;
            if at == last {
                return Some(0);
            }
            ((at + 1)..=last)
                .filter_map(|next| {
                    let fare = matrix.cell(StopIndex(at), StopIndex(next))?.fare()?;
                    go(matrix, next).map(|rest| rest + fare.cents())
                })
                .min()
        }
        go(matrix, 0)
    }

    proptest! {
        /// The optimum is never dearer than the direct fare
        #[test]
        fn never_exceeds_direct(m in arb_matrix()) {
            if let Some(direct) = m.direct().fare() {
                let route = optimize(&m).unwrap();
                prop_assert!(route.total <= direct);
            }
        }

        /// The route is well formed and its total is the sum of its fares
        #[test]
        fn route_is_consistent(m in arb_matrix()) {
            if let Ok(route) = optimize(&m) {
                prop_assert_eq!(route.segments.first().unwrap().from, StopIndex(0));
                prop_assert_eq!(route.segments.last().unwrap().to, m.last());
                for pair in route.segments.windows(2) {
                    prop_assert_eq!(pair[0].to, pair[1].from);
                }
                let sum: u64 = route.segments.iter().map(|s| s.fare.cents()).sum();
                prop_assert_eq!(route.total.cents(), sum);
                for seg in &route.segments {
                    prop_assert_eq!(m.cell(seg.from, seg.to).and_then(|c| c.fare()), Some(seg.fare));
                }
            }
        }

        /// Optimal cost matches exhaustive search, and unreachability agrees
        #[test]
        fn matches_brute_force(m in arb_matrix()) {
            match (optimize(&m), brute_force(&m)) {
                (Ok(route), Some(best)) => prop_assert_eq!(route.total.cents(), best),
                (Err(OptimizeError::Unreachable { .. }), None) => {}
                (got, expected) => prop_assert!(false, "got {:?}, expected {:?}", got, expected),
            }
        }

        /// Repeated runs give identical output
        #[test]
        fn deterministic(m in arb_matrix()) {
            prop_assert_eq!(optimize(&m), optimize(&m));
        }
    }
}
