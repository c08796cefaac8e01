//! Cell request generation.

use chrono::NaiveDate;

use crate::domain::{ClockTime, Stop, StopIndex, TimeError, resolve_time_sequence};
use crate::matrix::forward_pairs;
use crate::provider::SearchQuery;

/// One search needed to fill cell `(from, to)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRequest {
    pub from: StopIndex,
    pub to: StopIndex,
    pub query: SearchQuery,
}

/// List the searches needed to fill every forward cell, row by row.
///
/// Each search departs at the origin stop's scheduled departure, resolved
/// against `date` so that stops after midnight fall on the next day.
/// Adjacent pairs are always included.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use split_fare::assembler::cell_requests;
/// use split_fare::domain::{ClockTime, Stop, StopIndex};
///
/// let stops: Vec<Stop> = [("A", "10:00"), ("B", "10:30"), ("C", "11:00")]
///     .iter()
///     .map(|(name, t)| Stop::at(*name, ClockTime::parse_hhmm(t).unwrap()))
///     .collect();
/// let date = NaiveDate::from_ymd_opt(2025, 10, 24).unwrap();
///
/// let requests = cell_requests(&stops, date).unwrap();
/// assert_eq!(requests.len(), 3);
/// assert_eq!((requests[2].from, requests[2].to), (StopIndex(1), StopIndex(2)));
/// assert_eq!(requests[2].query.origin, "B");
/// ```
pub fn cell_requests(stops: &[Stop], date: NaiveDate) -> Result<Vec<CellRequest>, TimeError> {
    let departures: Vec<ClockTime> = stops.iter().map(|s| s.departure).collect();
    let departures = resolve_time_sequence(&departures, date)?;

    Ok(forward_pairs(stops.len())
        .map(|(from, to)| CellRequest {
            from,
            to,
            query: SearchQuery::new(
                stops[from.0].name.clone(),
                stops[to.0].name.clone(),
                departures[from.0],
            ),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::pair_count;

    fn stops(data: &[(&str, &str)]) -> Vec<Stop> {
        data.iter()
            .map(|(name, t)| Stop::at(*name, ClockTime::parse_hhmm(t).unwrap()))
            .collect()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 24).unwrap()
    }

    #[test]
    fn one_request_per_forward_pair() {
        let stops = stops(&[("A", "10:00"), ("B", "10:20"), ("C", "10:40"), ("D", "11:00")]);
        let requests = cell_requests(&stops, date()).unwrap();

        assert_eq!(requests.len(), pair_count(4));
        let pairs: Vec<(usize, usize)> = requests.iter().map(|r| (r.from.0, r.to.0)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn adjacent_pairs_always_present() {
        let stops = stops(&[("A", "10:00"), ("B", "10:20"), ("C", "10:40"), ("D", "11:00")]);
        let requests = cell_requests(&stops, date()).unwrap();

        for i in 0..3 {
            assert!(
                requests.iter().any(|r| r.from.0 == i && r.to.0 == i + 1),
                "missing adjacent pair ({i}, {})",
                i + 1
            );
        }
    }

    #[test]
    fn departs_at_origin_stop_departure() {
        let mut stops = stops(&[("A", "10:00"), ("B", "10:20"), ("C", "10:40")]);
        stops[1].departure = ClockTime::parse_hhmm("10:24").unwrap();
        let requests = cell_requests(&stops, date()).unwrap();

        let b_to_c = requests.iter().find(|r| r.from.0 == 1).unwrap();
        assert_eq!(b_to_c.query.origin, "B");
        assert_eq!(b_to_c.query.destination, "C");
        assert_eq!(
            b_to_c.query.departure,
            date().and_hms_opt(10, 24, 0).unwrap()
        );
    }

    #[test]
    fn overnight_departures_move_to_next_day() {
        let stops = stops(&[("A", "23:30"), ("B", "00:15"), ("C", "01:00")]);
        let requests = cell_requests(&stops, date()).unwrap();

        let from_b = requests.iter().find(|r| r.from.0 == 1).unwrap();
        assert_eq!(from_b.query.departure.date(), date().succ_opt().unwrap());

        let from_a = requests.iter().find(|r| r.from.0 == 0).unwrap();
        assert_eq!(from_a.query.departure.date(), date());
    }

    #[test]
    fn no_stops_no_requests() {
        assert!(cell_requests(&[], date()).unwrap().is_empty());
    }
}
