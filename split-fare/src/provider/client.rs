//! HTTP search client.
//!
//! Queries a JSON connection-search endpoint. Handles authentication,
//! bounded concurrency, and conversion to domain types.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue};
use tokio::sync::Semaphore;
use tracing::debug;

use super::convert::{convert_candidates, convert_run, serves_journey};
use super::error::ProviderError;
use super::types::SearchResponse;
use super::{Candidate, JourneySearchProvider, SearchQuery, TrainRun, TrainRunSource};

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Timestamp format for the `departure` query parameter.
const DEPARTURE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Configuration for the HTTP search client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the search endpoint
    pub base_url: String,
    /// API key sent as `x-apikey`, if the endpoint requires one
    pub api_key: Option<String>,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Create a new config for the given endpoint.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Connection search client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl HttpSearchClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();

        if let Some(key) = &config.api_key {
            let api_key = HeaderValue::from_str(key).map_err(|_| ProviderError::Api {
                status: 0,
                message: "Invalid API key format".to_string(),
            })?;
            headers.insert("x-apikey", api_key);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Fetch the raw connection listing for a query.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, ProviderError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ProviderError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/connections", self.base_url);
        let departure = query.departure.format(DEPARTURE_FORMAT).to_string();

        debug!(
            origin = %query.origin,
            destination = %query.destination,
            departure = %departure,
            "Searching connections"
        );

        let response = self
            .http
            .get(&url)
            .query(&[
                ("from", query.origin.as_str()),
                ("to", query.destination.as_str()),
                ("departure", departure.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProviderError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| ProviderError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl JourneySearchProvider for HttpSearchClient {
    async fn query(&self, query: &SearchQuery) -> Result<Vec<Candidate>, ProviderError> {
        let response = self.search(query).await?;
        Ok(convert_candidates(&response))
    }
}

impl TrainRunSource for HttpSearchClient {
    async fn find_run(&self, query: &SearchQuery) -> Result<TrainRun, ProviderError> {
        let response = self.search(query).await?;
        if response.connections.is_empty() {
            return Err(ProviderError::NoConnections {
                origin: query.origin.clone(),
                destination: query.destination.clone(),
            });
        }
        let run = convert_run(&response).map_err(|e| ProviderError::Json {
            message: e.to_string(),
            body: None,
        })?;
        if !serves_journey(&run, query) {
            debug!(
                run = %run.run,
                origin = %query.origin,
                destination = %query.destination,
                "First listed connection does not run end to end"
            );
            return Err(ProviderError::NoConnections {
                origin: query.origin.clone(),
                destination: query.destination.clone(),
            });
        }
        Ok(run)
    }
}
