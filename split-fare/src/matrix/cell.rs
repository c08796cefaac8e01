//! Price cell values.

use crate::domain::Fare;

/// The assembled state of one forward segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceCell {
    /// A fare observed on the reference run.
    Fare(Fare),
    /// No fare could be obtained for the reference run.
    Unavailable,
}

impl PriceCell {
    /// Returns the fare, if this cell carries one.
    pub fn fare(&self) -> Option<Fare> {
        match self {
            PriceCell::Fare(fare) => Some(*fare),
            PriceCell::Unavailable => None,
        }
    }

    /// Whether the cell carries a fare.
    pub fn is_available(&self) -> bool {
        matches!(self, PriceCell::Fare(_))
    }
}

impl From<Option<Fare>> for PriceCell {
    fn from(fare: Option<Fare>) -> Self {
        fare.map_or(PriceCell::Unavailable, PriceCell::Fare)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_option() {
        let fare = Fare::from_cents(1299).unwrap();
        assert_eq!(PriceCell::from(Some(fare)), PriceCell::Fare(fare));
        assert_eq!(PriceCell::from(None), PriceCell::Unavailable);
    }

    #[test]
    fn accessors() {
        let fare = Fare::from_cents(500).unwrap();
        assert_eq!(PriceCell::Fare(fare).fare(), Some(fare));
        assert!(PriceCell::Fare(fare).is_available());
        assert_eq!(PriceCell::Unavailable.fare(), None);
        assert!(!PriceCell::Unavailable.is_available());
    }
}
