use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;
use tracing::{debug, info, trace, warn};

use crate::classify::FileRecord;
use crate::errors::{SearchError, SearchResult};
use crate::extract::extractor_for;
use crate::matcher::SearchTerm;
use crate::results::SearchReport;
use crate::scan::scan;

/// What happened to a single candidate file.
enum FileOutcome {
    Match,
    NoMatch,
    Failed(SearchError),
}

/// Dispatches candidate files across a bounded worker pool and aggregates
/// the matches.
///
/// The pool is built once and reused across searches; rayon joins every
/// worker before `install` returns, so aggregation never races an in-flight
/// extraction. Workers share no mutable state: each invocation reads one
/// file and returns one outcome.
pub struct SearchCoordinator {
    pool: ThreadPool,
}

impl SearchCoordinator {
    /// Creates a coordinator with a fixed-size worker pool.
    pub fn new(thread_count: NonZeroUsize) -> SearchResult<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(thread_count.get())
            .thread_name(|i| format!("docscout-worker-{}", i))
            .build()
            .map_err(|e| SearchError::config_error(e.to_string()))?;
        Ok(Self { pool })
    }

    /// Searches every candidate file under `root` for `term`.
    ///
    /// Fails only if the root itself is unreadable at scan start; every
    /// per-file problem is demoted to a diagnostic in the report. The match
    /// list preserves scan order regardless of worker completion order.
    pub fn search(&self, root: &Path, term: &SearchTerm) -> SearchResult<SearchReport> {
        fs::read_dir(root).map_err(|e| SearchError::scan_failed(root, e))?;

        info!("Searching for '{}' in {}", term.as_str(), root.display());
        let candidates: Vec<FileRecord> = scan(root).collect();
        debug!("Found {} candidate files", candidates.len());

        let outcomes: Vec<FileOutcome> = self.pool.install(|| {
            candidates
                .par_iter()
                .map(|record| examine(record, term))
                .collect()
        });

        let mut report = SearchReport::new(candidates.len());
        for (record, outcome) in candidates.iter().zip(outcomes) {
            match outcome {
                FileOutcome::Match => report.add_match(record.path.clone()),
                FileOutcome::NoMatch => {}
                FileOutcome::Failed(err) => {
                    warn!("{}", err);
                    report.add_failure(err);
                }
            }
        }

        info!(
            "Search complete: {} of {} files matched, {} unreadable",
            report.matches.len(),
            report.files_searched,
            report.failures.len()
        );
        Ok(report)
    }
}

fn examine(record: &FileRecord, term: &SearchTerm) -> FileOutcome {
    let Some(extractor) = extractor_for(record.kind) else {
        // The scanner filters Ignored records out of the candidate list.
        return FileOutcome::NoMatch;
    };
    trace!(
        "Examining {} as {}",
        record.path.display(),
        record.kind.as_str()
    );
    match extractor.contains_term(&record.path, term) {
        Ok(true) => FileOutcome::Match,
        Ok(false) => FileOutcome::NoMatch,
        Err(err) => FileOutcome::Failed(err),
    }
}
