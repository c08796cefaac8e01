//! Timetable times.
//!
//! Stops carry "HH:MM" wall-clock times. Queries need full date-times, so a
//! run's sequence of clock times is resolved against the travel date,
//! handling runs that cross midnight.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A wall-clock time of day as printed in a timetable.
///
/// # Examples
///
/// ```
/// use split_fare::domain::ClockTime;
///
/// let t = ClockTime::parse_hhmm("09:05").unwrap();
/// assert_eq!(t.to_string(), "09:05");
///
/// assert!(ClockTime::parse_hhmm("9:05").is_err());
/// assert!(ClockTime::parse_hhmm("24:00").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Create a clock time from hour and minute, if valid.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(ClockTime)
    }

    /// Parse a time from "HH:MM" format.
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();
        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        Self::from_hm(hour, minute).ok_or_else(|| TimeError::new("invalid time"))
    }

    /// Minutes since midnight.
    pub fn minutes_of_day(&self) -> i64 {
        i64::from(self.0.hour()) * 60 + i64::from(self.0.minute())
    }

    /// Combine with a date.
    pub fn on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.0)
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({self})")
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

/// If a time appears more than 6 hours before the previous time in a
/// sequence, it has rolled over to the next day.
const ROLLOVER_THRESHOLD_HOURS: i64 = 6;

/// Resolve a chronological sequence of clock times to date-times.
///
/// The first time is placed on `base_date`. Whenever a time is more than
/// 6 hours earlier than its predecessor the date advances by one day.
///
/// # Examples
///
/// ```
/// use split_fare::domain::{ClockTime, resolve_time_sequence};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2025, 10, 24).unwrap();
/// let times: Vec<ClockTime> = ["23:10", "23:55", "00:40"]
///     .iter()
///     .map(|s| ClockTime::parse_hhmm(s).unwrap())
///     .collect();
///
/// let resolved = resolve_time_sequence(&times, date).unwrap();
/// assert_eq!(resolved[1].date(), date);
/// assert_eq!(resolved[2].date(), date.succ_opt().unwrap());
/// ```
pub fn resolve_time_sequence(
    times: &[ClockTime],
    base_date: NaiveDate,
) -> Result<Vec<NaiveDateTime>, TimeError> {
    let mut result = Vec::with_capacity(times.len());
    let mut current_date = base_date;
    let mut prev: Option<ClockTime> = None;

    for time in times {
        if let Some(prev) = prev {
            let diff_minutes = time.minutes_of_day() - prev.minutes_of_day();
            if diff_minutes < -(ROLLOVER_THRESHOLD_HOURS * 60) {
                current_date = current_date
                    .succ_opt()
                    .ok_or_else(|| TimeError::new("date overflow"))?;
            }
        }

        result.push(time.on(current_date));
        prev = Some(*time);
    }

    Ok(result)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Display then parse returns the original time
        #[test]
        fn roundtrip(h in 0u32..24, m in 0u32..60) {
            let time = ClockTime::from_hm(h, m).unwrap();
            prop_assert_eq!(ClockTime::parse_hhmm(&time.to_string()).unwrap(), time);
        }

        /// Resolved sequences never go backwards by more than the threshold
        #[test]
        fn resolved_sequence_is_nearly_monotonic(mins in proptest::collection::vec(0u32..1440, 1..12)) {
            let times: Vec<ClockTime> = mins
                .iter()
                .map(|m| ClockTime::from_hm(m / 60, m % 60).unwrap())
                .collect();
            let d = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
            let resolved = resolve_time_sequence(&times, d).unwrap();
            for pair in resolved.windows(2) {
                let diff = pair[1].signed_duration_since(pair[0]).num_minutes();
                prop_assert!(diff >= -(ROLLOVER_THRESHOLD_HOURS * 60));
            }
        }
    }
}
