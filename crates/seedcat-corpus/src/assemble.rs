//! Reduction of fetch outcomes into corpus outputs, run after every download completed.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{CorpusError, CorpusResult};
use crate::key::OrderingIndex;
use crate::outcome::FetchOutcome;

/// Position-ordered corpus; slot `i - 1` holds the content of index `i`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Corpus {
    slots: Vec<String>,
}

impl Corpus {
    /// Corpus of `declared_size` empty slots.
    #[must_use]
    pub fn new(declared_size: usize) -> Self {
        Self {
            slots: vec![String::new(); declared_size],
        }
    }

    /// Declared size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the corpus has no slots at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Content at `index`, if the index maps to a slot.
    #[must_use]
    pub fn get(&self, index: OrderingIndex) -> Option<&str> {
        index
            .slot(self.slots.len())
            .map(|slot| self.slots[slot].as_str())
    }

    /// All slots in order.
    #[must_use]
    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    /// One line per slot, each terminated by a newline.
    #[must_use]
    pub fn render(&self) -> String {
        let mut rendered = String::new();
        for slot in &self.slots {
            rendered.push_str(slot);
            rendered.push('\n');
        }
        rendered
    }

    /// Write [`Self::render`] to `path`, creating missing parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::Io`] when the directory or file cannot be written.
    pub fn write_to(&self, path: &Path) -> CorpusResult<()> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|source| CorpusError::io("create_dir_all", parent, source))?;
        }
        fs::write(path, self.render())
            .map_err(|source| CorpusError::io("write_corpus", path, source))?;
        info!(path = %path.display(), slots = self.slots.len(), "wrote corpus");
        Ok(())
    }
}

/// Keep one success per index; the greatest key wins so arrival order never matters.
fn winners(outcomes: &[FetchOutcome]) -> BTreeMap<OrderingIndex, (&str, &str)> {
    let mut winners: BTreeMap<OrderingIndex, (&str, &str)> = BTreeMap::new();
    for outcome in outcomes {
        let FetchOutcome::Success {
            index,
            key,
            content,
        } = outcome
        else {
            continue;
        };
        let candidate = (key.as_str(), content.as_str());
        let entry = winners.entry(*index).or_insert(candidate);
        if candidate.0 > entry.0 {
            *entry = candidate;
        }
    }
    winners
}

/// Place each success into slot `index - 1` of a corpus of `declared_size` slots.
///
/// Failures and indices outside `[1, declared_size]` leave their slots empty.
#[must_use]
pub fn assemble_ordered(outcomes: &[FetchOutcome], declared_size: usize) -> Corpus {
    let mut corpus = Corpus::new(declared_size);
    for (index, (_, content)) in winners(outcomes) {
        if let Some(slot) = index.slot(declared_size) {
            corpus.slots[slot] = content.to_string();
        }
    }
    corpus
}

/// Tally of a per-index persist run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistSummary {
    /// Files written successfully.
    pub written: Vec<PathBuf>,
    /// Outcomes skipped because their download failed.
    pub failed_fetches: usize,
    /// Files that could not be written.
    pub write_failures: Vec<PathBuf>,
}

/// Write each success to `<directory>/<index>.<extension>`.
///
/// A failed write is logged and recorded; remaining items are still written.
///
/// # Errors
///
/// Returns [`CorpusError::Io`] only when `directory` cannot be created.
pub fn persist_per_index(
    outcomes: &[FetchOutcome],
    directory: &Path,
    extension: &str,
) -> CorpusResult<PersistSummary> {
    fs::create_dir_all(directory)
        .map_err(|source| CorpusError::io("create_dir_all", directory, source))?;

    let mut summary = PersistSummary {
        failed_fetches: outcomes.iter().filter(|outcome| !outcome.is_success()).count(),
        ..PersistSummary::default()
    };

    for (index, (key, content)) in winners(outcomes) {
        let path = directory.join(format!("{index}.{extension}"));
        match fs::write(&path, content) {
            Ok(()) => summary.written.push(path),
            Err(source) => {
                let err = CorpusError::io("write_item", &path, source);
                warn!(key, error = %err.detail(), "failed to write object");
                summary.write_failures.push(path);
            }
        }
    }

    info!(
        directory = %directory.display(),
        written = summary.written.len(),
        failed_fetches = summary.failed_fetches,
        write_failures = summary.write_failures.len(),
        "persisted objects"
    );
    Ok(summary)
}
