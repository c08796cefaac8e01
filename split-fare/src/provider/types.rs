//! Search endpoint DTOs.
//!
//! These types map directly to the JSON search endpoint and to fixture
//! files. Fields the listing may omit are `Option`.

use serde::{Deserialize, Serialize};

/// Response to a connection search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Listed connections, best-ranked first.
    #[serde(default)]
    pub connections: Vec<ConnectionDto>,
}

/// One listed connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDto {
    /// Run identity as shown on the listing, e.g. "ICE 503".
    pub run: Option<String>,

    /// Price label, e.g. "ab 79,99 €". Absent when no fare is offered.
    pub price: Option<String>,

    /// Calling pattern. Only present when details were requested.
    #[serde(default)]
    pub stops: Vec<StopDto>,
}

/// A stop in a connection's calling pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopDto {
    /// Station name.
    pub name: String,

    /// Scheduled arrival ("HH:MM"). Usually absent at the origin.
    pub arrival: Option<String>,

    /// Scheduled departure ("HH:MM"). Usually absent at the destination.
    pub departure: Option<String>,
}
