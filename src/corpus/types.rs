//! Verse Corpus Data Types

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Chapter or verse identifier.
///
/// Spreadsheet exports carry these either as numbers or as text
/// (e.g. `"12-13"` for a verse range), so both forms are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VerseId {
    Number(i64),
    Text(String),
}

impl Default for VerseId {
    fn default() -> Self {
        VerseId::Text(String::new())
    }
}

impl fmt::Display for VerseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerseId::Number(n) => write!(f, "{}", n),
            VerseId::Text(s) => f.write_str(s),
        }
    }
}

/// One verse of the corpus.
///
/// `translation` is the reference text for semantic similarity and is never
/// empty in a loaded corpus. `explanation` is returned to clients but not scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerseRecord {
    pub title: String,
    pub chapter: VerseId,
    pub verse: VerseId,
    pub translation: String,
    pub explanation: String,
    /// Free text searched for the detected emotion label.
    pub emotional_themes: String,
    /// Comma-separated tag list as stored in the dataset.
    pub keyword_tags: String,
}

impl VerseRecord {
    /// Parses `keyword_tags` into a set: entries are trimmed and lower-cased,
    /// blanks are dropped.
    pub fn tags(&self) -> HashSet<String> {
        parse_tags(&self.keyword_tags)
    }

    /// Returns true if `label` appears within `emotional_themes`, ignoring case.
    /// An empty label never matches.
    pub fn has_theme(&self, label: &str) -> bool {
        let label = label.trim();
        if label.is_empty() {
            return false;
        }
        self.emotional_themes
            .to_lowercase()
            .contains(&label.to_lowercase())
    }

    /// Human readable reference, e.g. `"2.47"`.
    pub fn reference(&self) -> String {
        format!("{}.{}", self.chapter, self.verse)
    }
}

pub fn parse_tags(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corpus is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corpus must be a JSON array of rows")]
    NotAnArray,

    #[error("malformed corpus entry at row {row}: {reason}")]
    MalformedEntry { row: usize, reason: String },
}
