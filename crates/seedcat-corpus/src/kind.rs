//! Storage layout of the two corpora kept by the annotation app.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::key::{KEY_DELIMITER, OrderingIndex, SuffixFilter};

/// Kind of object stored under `<language>/<index>/<file name>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorpusKind {
    /// Plain-text translations, `translation.txt`.
    Translation,
    /// Provenance documents, `prov.json`.
    Provenance,
}

impl CorpusKind {
    /// Final key segment of objects of this kind.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Translation => "translation.txt",
            Self::Provenance => "prov.json",
        }
    }

    /// Extension used for per-index files.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Translation => "txt",
            Self::Provenance => "json",
        }
    }

    /// Suffix filter selecting objects of this kind from a listing.
    #[must_use]
    pub fn suffix_filter(self) -> SuffixFilter {
        SuffixFilter::new(self.file_name())
    }

    /// Key of the object for `language` at `index`.
    #[must_use]
    pub fn object_key(self, language: &str, index: OrderingIndex) -> String {
        let language = language.trim_end_matches(KEY_DELIMITER);
        format!(
            "{language}{KEY_DELIMITER}{index}{KEY_DELIMITER}{}",
            self.file_name()
        )
    }
}

impl Display for CorpusKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Translation => "translation",
            Self::Provenance => "provenance",
        })
    }
}
