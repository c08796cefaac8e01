//! Savings classification and rendering.

use std::fmt;

use tracing::warn;

use crate::domain::Fare;
use crate::matrix::{JourneyHeader, PriceMatrix};
use crate::optimizer::Route;

/// How the cheapest combination compares with the direct ticket.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// The end-to-end cell is unavailable; the combination is the only option.
    NoDirectFare,
    /// Buy the direct ticket.
    ///
    /// `anomaly` is set if the combination came out dearer than the direct
    /// fare, which indicates inconsistent data.
    DirectIsBest { anomaly: bool },
    /// The combination is strictly cheaper.
    SplitIsCheaper { savings: Fare, percent: f64 },
}

/// The outcome of optimizing one price matrix.
#[derive(Debug, Clone)]
pub struct SavingsReport {
    header: JourneyHeader,
    stop_names: Vec<String>,
    direct: Option<Fare>,
    route: Route,
    verdict: Verdict,
}

impl SavingsReport {
    /// Classify `route` against the matrix's direct fare.
    pub fn new(matrix: &PriceMatrix, route: Route) -> Self {
        let direct = matrix.direct().fare();
        let verdict = classify(direct, route.total);

        if let Verdict::DirectIsBest { anomaly: true } = verdict {
            warn!(
                run = %matrix.header().run_label,
                direct = %direct.map(|f| f.to_string()).unwrap_or_default(),
                combination = %route.total,
                "Cheapest combination costs more than the direct fare"
            );
        }

        Self {
            header: matrix.header().clone(),
            stop_names: matrix.stops().iter().map(|s| s.name.clone()).collect(),
            direct,
            route,
            verdict,
        }
    }

    pub fn header(&self) -> &JourneyHeader {
        &self.header
    }

    /// The direct fare, if available.
    pub fn direct(&self) -> Option<Fare> {
        self.direct
    }

    /// The cheapest combination.
    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn verdict(&self) -> &Verdict {
        &self.verdict
    }

    /// Savings in cents; zero unless the combination is strictly cheaper.
    pub fn savings_cents(&self) -> u64 {
        match self.verdict {
            Verdict::SplitIsCheaper { savings, .. } => savings.cents(),
            _ => 0,
        }
    }

    /// Whether the report recommends buying the segment tickets.
    pub fn recommends_split(&self) -> bool {
        match self.verdict {
            Verdict::SplitIsCheaper { .. } => true,
            Verdict::NoDirectFare => !self.route.is_direct(),
            Verdict::DirectIsBest { .. } => false,
        }
    }

    fn stop_name(&self, idx: usize) -> &str {
        self.stop_names.get(idx).map_or("?", String::as_str)
    }
}

fn classify(direct: Option<Fare>, optimal: Fare) -> Verdict {
    let Some(direct) = direct else {
        return Verdict::NoDirectFare;
    };

    if optimal > direct {
        return Verdict::DirectIsBest { anomaly: true };
    }

    // A zero difference is not a fare
    match Fare::from_cents(direct.cents() - optimal.cents()) {
        Ok(savings) => Verdict::SplitIsCheaper {
            savings,
            percent: savings.cents() as f64 / direct.cents() as f64 * 100.0,
        },
        Err(_) => Verdict::DirectIsBest { anomaly: false },
    }
}

impl fmt::Display for SavingsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let first = self.stop_name(0);
        let last = self.stop_name(self.stop_names.len().saturating_sub(1));

        writeln!(
            f,
            "{} on {}: {} → {}",
            self.header.run_label,
            self.header.date.format("%d.%m.%Y"),
            first,
            last
        )?;
        writeln!(f, "Number of stations: {}", self.stop_names.len())?;
        writeln!(f, "Stations: {}", self.stop_names.join(" → "))?;
        writeln!(f)?;

        match self.direct {
            Some(direct) => writeln!(f, "Direct ticket price: {direct} EUR")?,
            None => writeln!(f, "No direct ticket available from start to end")?,
        }
        writeln!(f, "Cheapest combination: {} EUR", self.route.total)?;

        match &self.verdict {
            Verdict::SplitIsCheaper { savings, percent } => {
                writeln!(f, "SAVINGS: {savings} EUR ({percent:.1}%)")?;
            }
            Verdict::DirectIsBest { anomaly: true } => {
                writeln!(
                    f,
                    "Warning: the combination is dearer than the direct ticket; check the data"
                )?;
            }
            Verdict::DirectIsBest { anomaly: false } => {
                writeln!(f, "Same price as the direct ticket")?;
            }
            Verdict::NoDirectFare => {}
        }

        if self.recommends_split() {
            let checkpoints: Vec<&str> = self
                .route
                .checkpoints()
                .iter()
                .map(|idx| self.stop_name(idx.0))
                .collect();
            writeln!(f, "Ticket route: {}", checkpoints.join(" → "))?;
            writeln!(f, "Tickets to buy:")?;
            for (n, segment) in self.route.segments.iter().enumerate() {
                writeln!(
                    f,
                    "  {}. {} → {}: {} EUR",
                    n + 1,
                    self.stop_name(segment.from.0),
                    self.stop_name(segment.to.0),
                    segment.fare
                )?;
            }
        } else {
            writeln!(f, "Buy a single direct ticket (no savings from splitting)")?;
        }

        Ok(())
    }
}
