//! Batch analysis of interchange files.
//!
//! Each file is decoded, optimized, and reported on independently; a
//! malformed or unroutable file never affects the others.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::codec::{self, CodecError};
use crate::optimizer::{OptimizeError, optimize};
use crate::report::SavingsReport;

/// Error analyzing a single file.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("failed to read price matrix: {0}")]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Optimize(#[from] OptimizeError),
}

/// Decode `path`, find its cheapest ticket combination, and classify it.
pub fn analyze_file(path: impl AsRef<Path>) -> Result<SavingsReport, AnalyzeError> {
    let path = path.as_ref();
    let matrix = codec::read_file(path)?;
    let route = optimize(&matrix)?;
    let report = SavingsReport::new(&matrix, route);

    info!(
        path = %path.display(),
        tickets = report.route().ticket_count(),
        savings_cents = report.savings_cents(),
        "Analyzed price matrix"
    );

    Ok(report)
}

/// Analyze every file in `paths`, in order.
pub fn analyze_files<I, P>(paths: I) -> Vec<(PathBuf, Result<SavingsReport, AnalyzeError>)>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths
        .into_iter()
        .map(|path| {
            let path = path.as_ref().to_path_buf();
            let result = analyze_file(&path);
            if let Err(e) = &result {
                warn!(path = %path.display(), error = %e, "Analysis failed");
            }
            (path, result)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Verdict;
    use std::fs;

    const SPLIT: &str = "24.10.2025\tICE 1\t08:00\t09:00\t10:00\t11:00\r\n\
                         \t\tA\tB\tC\tD\r\n\
                         08:00\tA\t0\t10,00\t18,00\t35,00\r\n\
                         09:00\tB\t\t0\t10,00\t25,00\r\n\
                         10:00\tC\t\t\t0\t10,00\r\n\
                         11:00\tD\t\t\t\t0\r\n";

    const UNREACHABLE: &str = "24.10.2025\tICE 1\t08:00\t09:00\t10:00\r\n\
                               \t\tA\tB\tC\r\n\
                               08:00\tA\t0\t10,00\t?\r\n\
                               09:00\tB\t\t0\t?\r\n\
                               10:00\tC\t\t\t0\r\n";

    #[test]
    fn analyzes_split_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("split.tsv");
        fs::write(&path, SPLIT).unwrap();

        let report = analyze_file(&path).unwrap();
        assert_eq!(report.route().total.cents(), 2800);
        assert_eq!(report.savings_cents(), 700);
        assert!(matches!(report.verdict(), Verdict::SplitIsCheaper { .. }));
    }

    #[test]
    fn unreachable_destination_is_named() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unreachable.tsv");
        fs::write(&path, UNREACHABLE).unwrap();

        let err = analyze_file(&path).unwrap_err();
        assert!(matches!(
            err,
            AnalyzeError::Optimize(OptimizeError::Unreachable { .. })
        ));
        assert!(err.to_string().starts_with("no route found"));
    }

    #[test]
    fn batch_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.tsv");
        let bad = dir.path().join("bad.tsv");
        let missing = dir.path().join("missing.tsv");
        fs::write(&good, SPLIT).unwrap();
        fs::write(&bad, "24.10.2025\tICE 1\t08:00\r\nnot a matrix\r\n").unwrap();

        let results = analyze_files([&bad, &missing, &good, &dir.path().join("x")]);
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].0, bad);
        assert!(matches!(results[0].1, Err(AnalyzeError::Codec(_))));
        assert!(matches!(
            results[1].1,
            Err(AnalyzeError::Codec(CodecError::Io(_)))
        ));
        assert_eq!(results[2].0, good);
        assert_eq!(results[2].1.as_ref().unwrap().savings_cents(), 700);
        assert!(results[3].1.is_err());
    }
}
