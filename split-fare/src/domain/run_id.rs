//! Train run identity.

use std::fmt;

/// Error returned when constructing an invalid run identity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid run identity: {reason}")]
pub struct InvalidRunId {
    reason: &'static str,
}

/// Identifies one physical train run, e.g. `ICE 503`.
///
/// The token is opaque: two observations belong to the same run exactly when
/// their identities are equal. Surrounding whitespace is trimmed because
/// search result listings pad it inconsistently.
///
/// # Examples
///
/// ```
/// use split_fare::domain::RunId;
///
/// let run = RunId::new(" ICE 503 ").unwrap();
/// assert_eq!(run.as_str(), "ICE 503");
/// assert_eq!(run, RunId::new("ICE 503").unwrap());
///
/// // Blank identities are rejected
/// assert!(RunId::new("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RunId(String);

impl RunId {
    /// Create a run identity, trimming surrounding whitespace.
    pub fn new(s: impl AsRef<str>) -> Result<Self, InvalidRunId> {
        let trimmed = s.as_ref().trim();
        if trimmed.is_empty() {
            return Err(InvalidRunId {
                reason: "run identity cannot be empty",
            });
        }
        Ok(RunId(trimmed.to_string()))
    }

    /// Returns the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RunId({})", self.0)
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
