//! Conversion from search DTOs to domain types.

use tracing::trace;

use crate::domain::{ClockTime, Fare, RunId, Stop};

use super::types::{ConnectionDto, SearchResponse, StopDto};
use super::{Candidate, SearchQuery, TrainRun};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// The search listed no connections at all
    #[error("search returned no connections")]
    NoConnections,

    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Failed to parse a time string
    #[error("invalid time at {stop}: {value}")]
    InvalidTime { stop: String, value: String },

    /// Invalid connection structure
    #[error("invalid connection: {0}")]
    InvalidConnection(String),
}

/// Convert a search listing to candidates, preserving the provider's order.
///
/// Connections without a usable run identity can never match a reference
/// run and are dropped. Unreadable price labels become `fare: None`.
pub fn convert_candidates(response: &SearchResponse) -> Vec<Candidate> {
    response
        .connections
        .iter()
        .filter_map(|conn| {
            let run = conn.run.as_deref().and_then(|r| RunId::new(r).ok());
            let Some(run) = run else {
                trace!("skipping connection without run identity");
                return None;
            };
            let fare = conn.price.as_deref().and_then(parse_price_label);
            Some(Candidate::new(run, fare))
        })
        .collect()
}

/// Convert the best-ranked connection of a listing to a train run.
pub fn convert_run(response: &SearchResponse) -> Result<TrainRun, ConversionError> {
    let first = response
        .connections
        .first()
        .ok_or(ConversionError::NoConnections)?;
    convert_connection(first)
}

fn convert_connection(conn: &ConnectionDto) -> Result<TrainRun, ConversionError> {
    let run = conn
        .run
        .as_deref()
        .ok_or(ConversionError::MissingField("run"))?;
    let run = RunId::new(run).map_err(|e| ConversionError::InvalidConnection(e.to_string()))?;

    let stops = conn
        .stops
        .iter()
        .map(convert_stop)
        .collect::<Result<Vec<_>, _>>()?;

    if stops.len() < 2 {
        return Err(ConversionError::InvalidConnection(format!(
            "calling pattern has {} stops, need at least 2",
            stops.len()
        )));
    }

    Ok(TrainRun { run, stops })
}

/// Whether `run` starts at the query's origin and ends at its destination.
///
/// Searches also list connections that merely pass through both stations;
/// only an end-to-end run can serve as the reference.
pub fn serves_journey(run: &TrainRun, query: &SearchQuery) -> bool {
    let first = run.stops.first().map(|s| s.name.trim());
    let last = run.stops.last().map(|s| s.name.trim());
    first == Some(query.origin.trim()) && last == Some(query.destination.trim())
}

/// Convert a stop. A missing arrival or departure takes the other time.
fn convert_stop(dto: &StopDto) -> Result<Stop, ConversionError> {
    let parse = |value: &str| {
        ClockTime::parse_hhmm(value.trim()).map_err(|_| ConversionError::InvalidTime {
            stop: dto.name.clone(),
            value: value.to_string(),
        })
    };

    let arrival = dto.arrival.as_deref().map(parse).transpose()?;
    let departure = dto.departure.as_deref().map(parse).transpose()?;

    match (arrival, departure) {
        (Some(arr), Some(dep)) => Ok(Stop::new(dto.name.trim(), arr, dep)),
        (Some(t), None) | (None, Some(t)) => Ok(Stop::at(dto.name.trim(), t)),
        (None, None) => Err(ConversionError::MissingField("stop arrival or departure")),
    }
}

/// Read a fare from a listing label such as `ab 79,99 €` or `12,50 EUR`.
///
/// Returns `None` if the label holds no readable positive amount.
///
/// # Examples
///
/// ```
/// use split_fare::provider::parse_price_label;
///
/// assert_eq!(parse_price_label("ab 79,99 €").unwrap().cents(), 7999);
/// assert_eq!(parse_price_label("12,50 EUR").unwrap().cents(), 1250);
/// assert!(parse_price_label("ausgebucht").is_none());
/// ```
pub fn parse_price_label(label: &str) -> Option<Fare> {
    let mut amount = label.trim();
    amount = amount.strip_prefix("ab").unwrap_or(amount).trim_start();
    amount = amount.strip_suffix('€').unwrap_or(amount).trim_end();
    amount = amount.strip_suffix("EUR").unwrap_or(amount).trim_end();
    Fare::parse(amount).ok()
}
