//! Provider error types.

use std::fmt;

/// Errors from a journey search provider.
#[derive(Debug)]
pub enum ProviderError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// Response body could not be parsed or converted
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    Api { status: u16, message: String },

    /// Rate limited by the API
    RateLimited,

    /// Invalid API key or unauthorized
    Unauthorized,

    /// No connection serves the journey
    NoConnections {
        origin: String,
        destination: String,
    },

    /// Fixture data could not be loaded
    Fixture(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Http(e) => write!(f, "HTTP error: {e}"),
            ProviderError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            ProviderError::Api { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            ProviderError::RateLimited => write!(f, "rate limited by search provider"),
            ProviderError::Unauthorized => write!(f, "unauthorized (invalid API key)"),
            ProviderError::NoConnections {
                origin,
                destination,
            } => write!(f, "no connection found from {origin} to {destination}"),
            ProviderError::Fixture(msg) => write!(f, "fixture error: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProviderError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ProviderError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");

        let err = ProviderError::NoConnections {
            origin: "Berlin Hbf".into(),
            destination: "Bamberg".into(),
        };
        assert_eq!(
            err.to_string(),
            "no connection found from Berlin Hbf to Bamberg"
        );

        let err = ProviderError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("<html>"));
    }
}
