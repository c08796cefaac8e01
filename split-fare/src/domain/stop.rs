//! Stops along a train run and ticket segments between them.

use std::fmt;

use super::{ClockTime, Fare};

/// Position of a stop along the journey, in travel order.
///
/// # Examples
///
/// ```
/// use split_fare::domain::StopIndex;
///
/// let idx = StopIndex(2);
/// assert!(StopIndex(0) < idx);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopIndex(pub usize);

impl fmt::Display for StopIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for StopIndex {
    fn from(value: usize) -> Self {
        StopIndex(value)
    }
}

/// A station served by the run, with its timetable times.
///
/// The stop's ordinal is its position in the owning stop list; stops are
/// never reordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    /// Station name as used for searches.
    pub name: String,
    /// Scheduled arrival.
    pub arrival: ClockTime,
    /// Scheduled departure, used as the query time for segments starting here.
    pub departure: ClockTime,
}

impl Stop {
    /// Create a stop with distinct arrival and departure times.
    pub fn new(name: impl Into<String>, arrival: ClockTime, departure: ClockTime) -> Self {
        Self {
            name: name.into(),
            arrival,
            departure,
        }
    }

    /// Create a stop whose arrival and departure coincide.
    pub fn at(name: impl Into<String>, time: ClockTime) -> Self {
        Self::new(name, time, time)
    }
}

/// One purchasable ticket: a forward stop pair and its fare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub from: StopIndex,
    pub to: StopIndex,
    pub fare: Fare,
}
