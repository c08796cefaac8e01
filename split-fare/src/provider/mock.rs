//! Fixture-backed provider for offline use and tests.
//!
//! Loads a reference run and canned search listings from a JSON file and
//! serves them as if they were live search responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

use super::convert::{convert_candidates, convert_run, serves_journey};
use super::error::ProviderError;
use super::types::{ConnectionDto, SearchResponse};
use super::{Candidate, JourneySearchProvider, SearchQuery, TrainRun, TrainRunSource};

/// On-disk fixture format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    /// The end-to-end connection, including its calling pattern.
    pub run: ConnectionDto,

    /// Canned listings per origin/destination pair.
    #[serde(default)]
    pub searches: Vec<FixtureSearch>,
}

/// Canned listing for one origin/destination pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureSearch {
    pub from: String,
    pub to: String,

    #[serde(default)]
    pub connections: Vec<ConnectionDto>,

    /// Simulate a failed search (timeout, error page).
    #[serde(default)]
    pub fail: bool,
}

/// Provider that serves data from a [`Fixture`].
///
/// Pairs without a canned listing return an empty result.
#[derive(Debug)]
pub struct FixtureProvider {
    run: SearchResponse,
    searches: HashMap<(String, String), FixtureSearch>,
    queries: AtomicUsize,
}

impl FixtureProvider {
    /// Build a provider from an in-memory fixture.
    pub fn new(fixture: Fixture) -> Self {
        let searches = fixture
            .searches
            .into_iter()
            .map(|s| ((s.from.trim().to_string(), s.to.trim().to_string()), s))
            .collect();

        Self {
            run: SearchResponse {
                connections: vec![fixture.run],
            },
            searches,
            queries: AtomicUsize::new(0),
        }
    }

    /// Load a fixture from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ProviderError::Fixture(format!("failed to read {:?}: {}", path, e)))?;
        Self::from_json(&json)
            .map_err(|e| ProviderError::Fixture(format!("failed to parse {:?}: {}", path, e)))
    }

    /// Parse a fixture from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let fixture: Fixture = serde_json::from_str(json)?;
        Ok(Self::new(fixture))
    }

    /// Number of searches served so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }
}

impl JourneySearchProvider for FixtureProvider {
    async fn query(&self, query: &SearchQuery) -> Result<Vec<Candidate>, ProviderError> {
        self.queries.fetch_add(1, Ordering::Relaxed);

        let key = (
            query.origin.trim().to_string(),
            query.destination.trim().to_string(),
        );
        let Some(search) = self.searches.get(&key) else {
            return Ok(Vec::new());
        };

        if search.fail {
            return Err(ProviderError::Api {
                status: 503,
                message: format!("simulated failure for {} -> {}", key.0, key.1),
            });
        }

        let response = SearchResponse {
            connections: search.connections.clone(),
        };
        Ok(convert_candidates(&response))
    }
}

impl TrainRunSource for FixtureProvider {
    async fn find_run(&self, query: &SearchQuery) -> Result<TrainRun, ProviderError> {
        let run = convert_run(&self.run).map_err(|e| ProviderError::Fixture(e.to_string()))?;

        if !serves_journey(&run, query) {
            return Err(ProviderError::NoConnections {
                origin: query.origin.clone(),
                destination: query.destination.clone(),
            });
        }

        Ok(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    const FIXTURE: &str = r#"{
        "run": {
            "run": "ICE 503",
            "stops": [
                {"name": "Berlin Hbf", "departure": "10:00"},
                {"name": "Leipzig Hbf", "arrival": "11:10", "departure": "11:14"},
                {"name": "Bamberg", "arrival": "13:02"}
            ]
        },
        "searches": [
            {"from": "Berlin Hbf", "to": "Leipzig Hbf", "connections": [
                {"run": "RE 3", "price": "19,90 €"},
                {"run": "ICE 503", "price": "ab 29,90 €"}
            ]},
            {"from": "Leipzig Hbf", "to": "Bamberg", "fail": true}
        ]
    }"#;

    fn query(from: &str, to: &str) -> SearchQuery {
        let dt = NaiveDate::from_ymd_opt(2025, 10, 24)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        SearchQuery::new(from, to, dt)
    }

    #[tokio::test]
    async fn serves_run() {
        let provider = FixtureProvider::from_json(FIXTURE).unwrap();
        let run = provider
            .find_run(&query("Berlin Hbf", "Bamberg"))
            .await
            .unwrap();
        assert_eq!(run.run.as_str(), "ICE 503");
        assert_eq!(run.stops.len(), 3);
    }

    #[tokio::test]
    async fn run_must_serve_journey() {
        let provider = FixtureProvider::from_json(FIXTURE).unwrap();
        let result = provider.find_run(&query("Berlin Hbf", "Hamburg Hbf")).await;
        assert!(matches!(result, Err(ProviderError::NoConnections { .. })));
    }

    #[tokio::test]
    async fn serves_listings_in_order() {
        let provider = FixtureProvider::from_json(FIXTURE).unwrap();
        let candidates = provider
            .query(&query("Berlin Hbf", "Leipzig Hbf"))
            .await
            .unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].run.as_str(), "RE 3");
        assert_eq!(candidates[1].fare.unwrap().cents(), 2990);
        assert_eq!(provider.query_count(), 1);
    }

    #[tokio::test]
    async fn unknown_pair_is_empty_and_failure_is_error() {
        let provider = FixtureProvider::from_json(FIXTURE).unwrap();
        let empty = provider
            .query(&query("Berlin Hbf", "Bamberg"))
            .await
            .unwrap();
        assert!(empty.is_empty());

        let failed = provider.query(&query("Leipzig Hbf", "Bamberg")).await;
        assert!(matches!(failed, Err(ProviderError::Api { status: 503, .. })));
        assert_eq!(provider.query_count(), 2);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();
        assert!(FixtureProvider::load(file.path()).is_ok());
    }

    #[test]
    fn load_reports_bad_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        assert!(matches!(
            FixtureProvider::load(file.path()),
            Err(ProviderError::Fixture(_))
        ));
        assert!(FixtureProvider::load("/nonexistent/fixture.json").is_err());
    }
}
