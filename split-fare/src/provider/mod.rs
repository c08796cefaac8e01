//! Journey search provider boundary.
//!
//! The assembler never talks to a booking site directly. It consumes two
//! capabilities:
//!
//! - [`TrainRunSource`] finds the end-to-end connection for a journey and
//!   reports its run identity and calling pattern.
//! - [`JourneySearchProvider`] searches one origin/destination pair and
//!   returns the listed connections with their run identities and fares.
//!
//! [`HttpSearchClient`] implements both against a JSON search endpoint;
//! [`FixtureProvider`] serves canned results from a file.

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{ClientConfig, HttpSearchClient};
pub use convert::{
    ConversionError, convert_candidates, convert_run, parse_price_label, serves_journey,
};
pub use error::ProviderError;
pub use mock::{Fixture, FixtureProvider, FixtureSearch};
pub use types::{ConnectionDto, SearchResponse, StopDto};

use chrono::NaiveDateTime;

use crate::domain::{Fare, RunId, Stop};

/// One search against the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub origin: String,
    pub destination: String,
    pub departure: NaiveDateTime,
}

impl SearchQuery {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure: NaiveDateTime,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            departure,
        }
    }
}

/// A connection listed in a search result.
///
/// `fare` is `None` when the listing shows the connection without a price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub run: RunId,
    pub fare: Option<Fare>,
}

impl Candidate {
    pub fn new(run: RunId, fare: Option<Fare>) -> Self {
        Self { run, fare }
    }
}

/// The reference train run of a journey: its identity and calling pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainRun {
    pub run: RunId,
    pub stops: Vec<Stop>,
}

/// Searches one origin/destination pair.
///
/// Results are ordered by the provider's own ranking. A failed search is
/// reported as an error; callers decide whether that is fatal.
pub trait JourneySearchProvider {
    fn query(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<Candidate>, ProviderError>>;
}

/// Finds the train run that serves a journey end to end.
pub trait TrainRunSource {
    fn find_run(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<TrainRun, ProviderError>>;
}
