//! Batched dispatch of cell requests.

use chrono::{NaiveDate, NaiveDateTime};
use futures::future::join_all;
use tracing::{debug, info};

use crate::domain::TimeError;
use crate::matrix::{JourneyHeader, MatrixBuilder, MatrixError, PriceCell, PriceMatrix};
use crate::provider::{
    JourneySearchProvider, ProviderError, SearchQuery, TrainRun, TrainRunSource,
};

use super::config::AssemblerConfig;
use super::request::cell_requests;
use super::select::{Selection, select};

/// Error from matrix assembly.
///
/// Per-cell search failures are not errors; they leave the cell unavailable.
#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    /// The reference run could not be found
    #[error("failed to find train run: {0}")]
    Run(#[from] ProviderError),

    /// The run's timetable could not be resolved to query times
    #[error("invalid timetable: {0}")]
    Timetable(#[from] TimeError),

    /// The run's stops do not form a valid matrix
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

/// How each cell of an assembly was resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyStats {
    /// Reference run listed with a fare.
    pub priced: usize,
    /// Reference run listed without a fare.
    pub unpriced: usize,
    /// Only other runs listed.
    pub mismatched: usize,
    /// Empty listing.
    pub empty: usize,
    /// Search failed.
    pub failed: usize,
}

impl AssemblyStats {
    /// Total number of cells attempted.
    pub fn total(&self) -> usize {
        self.priced + self.unpriced + self.mismatched + self.empty + self.failed
    }

    /// Number of cells left unavailable.
    pub fn unavailable(&self) -> usize {
        self.total() - self.priced
    }

    fn tally(&mut self, outcome: Option<Selection>) {
        match outcome {
            Some(Selection::Priced(_)) => self.priced += 1,
            Some(Selection::Unpriced) => self.unpriced += 1,
            Some(Selection::Mismatch) => self.mismatched += 1,
            Some(Selection::NoResults) => self.empty += 1,
            None => self.failed += 1,
        }
    }
}

/// A completed matrix and how its cells were obtained.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub matrix: PriceMatrix,
    pub stats: AssemblyStats,
}

/// Fills a price matrix from a journey search provider.
pub struct Assembler<'a, P: JourneySearchProvider> {
    provider: &'a P,
    config: &'a AssemblerConfig,
}

impl<'a, P: JourneySearchProvider> Assembler<'a, P> {
    /// Create a new assembler.
    pub fn new(provider: &'a P, config: &'a AssemblerConfig) -> Self {
        Self { provider, config }
    }

    /// Search every forward cell of `run` once and return the completed matrix.
    ///
    /// Searches are dispatched `batch_size` at a time. Results are recorded
    /// on the calling task, so each cell is written exactly once regardless
    /// of completion order. The matrix is only returned once every cell has
    /// been attempted.
    pub async fn assemble(&self, run: &TrainRun, date: NaiveDate) -> Result<Assembly, AssemblyError> {
        let header = JourneyHeader::new(date, run.run.as_str());
        let mut builder = MatrixBuilder::new(header, run.stops.clone())?;
        let requests = cell_requests(&run.stops, date)?;
        let total = requests.len();

        info!(
            run = %run.run,
            stops = run.stops.len(),
            segments = total,
            "Assembling price matrix"
        );

        let mut stats = AssemblyStats::default();

        for batch in requests.chunks(self.config.batch_size.max(1)) {
            let futures: Vec<_> = batch
                .iter()
                .map(|request| async move {
                    let result = self.provider.query(&request.query).await;
                    (request, result)
                })
                .collect();

            let results = join_all(futures).await;

            for (request, result) in results {
                let outcome = match result {
                    Ok(candidates) => {
                        Some(select(&candidates, &run.run, self.config.max_candidates))
                    }
                    Err(e) => {
                        debug!(
                            origin = %request.query.origin,
                            destination = %request.query.destination,
                            error = %e,
                            "Search failed, marking unavailable"
                        );
                        None
                    }
                };

                let cell = outcome.map_or(PriceCell::Unavailable, |s| s.cell());
                debug!(
                    cell = stats.total() + 1,
                    of = total,
                    origin = %request.query.origin,
                    destination = %request.query.destination,
                    outcome = ?outcome,
                    "Cell resolved"
                );

                stats.tally(outcome);
                builder.record(request.from, request.to, cell)?;
            }

            debug!(pending = builder.pending_count(), "Batch recorded");
        }

        let matrix = builder.finish()?;

        info!(
            priced = stats.priced,
            unavailable = stats.unavailable(),
            failed = stats.failed,
            "Price matrix complete"
        );

        Ok(Assembly { matrix, stats })
    }
}

/// Find the run serving `origin` to `destination` and assemble its matrix.
///
/// The date of `departure` becomes the matrix date.
pub async fn assemble_journey<S, P>(
    source: &S,
    provider: &P,
    config: &AssemblerConfig,
    origin: &str,
    destination: &str,
    departure: NaiveDateTime,
) -> Result<Assembly, AssemblyError>
where
    S: TrainRunSource,
    P: JourneySearchProvider,
{
    let run = source
        .find_run(&SearchQuery::new(origin, destination, departure))
        .await?;

    debug!(
        run = %run.run,
        stops = ?run.stops.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
        "Found reference run"
    );

    Assembler::new(provider, config)
        .assemble(&run, departure.date())
        .await
}
