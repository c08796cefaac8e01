//! Fare amounts.

use std::fmt;

/// Error returned when parsing or constructing an invalid fare.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid fare: {reason}")]
pub struct InvalidFare {
    reason: &'static str,
}

impl InvalidFare {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A strictly positive ticket price, held in minor units (cents).
///
/// Fares are exact: comparisons and sums never suffer from binary floating
/// point rounding, so the optimizer's tie-break is well defined.
///
/// # Examples
///
/// ```
/// use split_fare::domain::Fare;
///
/// let fare = Fare::parse("79,99").unwrap();
/// assert_eq!(fare.cents(), 7999);
/// assert_eq!(fare.to_string(), "79,99");
///
/// // A dot is accepted as well
/// assert_eq!(Fare::parse("79.9").unwrap().to_string(), "79,90");
///
/// // Zero is not a fare
/// assert!(Fare::parse("0").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fare(u64);

impl Fare {
    /// Create a fare from an amount in cents.
    ///
    /// Returns an error if the amount is zero.
    pub fn from_cents(cents: u64) -> Result<Self, InvalidFare> {
        if cents == 0 {
            return Err(InvalidFare::new("fare must be positive"));
        }
        Ok(Fare(cents))
    }

    /// Parse a decimal amount such as `79,99`, `79.9` or `80`.
    ///
    /// The comma is treated as the decimal separator. At most two
    /// fractional digits are allowed.
    pub fn parse(s: &str) -> Result<Self, InvalidFare> {
        let normalized = s.trim().replace(',', ".");

        let (whole, frac) = match normalized.split_once('.') {
            Some((whole, frac)) => {
                if frac.is_empty() {
                    return Err(InvalidFare::new("missing digits after decimal separator"));
                }
                (whole, frac)
            }
            None => (normalized.as_str(), ""),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidFare::new("expected digits before decimal separator"));
        }
        if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidFare::new("at most two fractional digits allowed"));
        }

        let whole: u64 = whole
            .parse()
            .map_err(|_| InvalidFare::new("amount too large"))?;
        let frac_cents = match frac.len() {
            0 => 0,
            1 => u64::from(frac.as_bytes()[0] - b'0') * 10,
            _ => u64::from(frac.as_bytes()[0] - b'0') * 10 + u64::from(frac.as_bytes()[1] - b'0'),
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .ok_or_else(|| InvalidFare::new("amount too large"))?;

        Self::from_cents(cents)
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> u64 {
        self.0
    }

    /// Add two fares, returning `None` on overflow.
    pub fn checked_add(self, other: Fare) -> Option<Fare> {
        self.0.checked_add(other.0).map(Fare)
    }
}

impl fmt::Debug for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fare({self})")
    }
}

/// Renders with a comma separator and exactly two fractional digits.
impl fmt::Display for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{:02}", self.0 / 100, self.0 % 100)
    }
}
