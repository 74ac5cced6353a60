//! Run summaries printed once a command finishes.

use std::path::Path;

use seedcat_corpus::{Corpus, FetchOutcome, PersistSummary};

/// Download tallies for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FetchTally {
    pub(crate) downloaded: usize,
    pub(crate) failed: usize,
}

impl FetchTally {
    pub(crate) fn from_outcomes(outcomes: &[FetchOutcome]) -> Self {
        let downloaded = outcomes.iter().filter(|outcome| outcome.is_success()).count();
        Self {
            downloaded,
            failed: outcomes.len() - downloaded,
        }
    }
}

pub(crate) fn corpus_summary(path: &Path, corpus: &Corpus, tally: FetchTally) -> String {
    let filled = corpus.slots().iter().filter(|slot| !slot.is_empty()).count();
    format!(
        "wrote {} ({} lines, {filled} filled); downloaded {}, failed {}",
        path.display(),
        corpus.len(),
        tally.downloaded,
        tally.failed
    )
}

pub(crate) fn persist_summary(directory: &Path, summary: &PersistSummary) -> String {
    let write_failures = if summary.write_failures.is_empty() {
        String::new()
    } else {
        format!(", failed writes {}", summary.write_failures.len())
    };
    format!(
        "wrote {} files to {}; failed downloads {}{write_failures}",
        summary.written.len(),
        directory.display(),
        summary.failed_fetches
    )
}
