use crate::corpus::types::VerseRecord;
use crate::oracles::OracleError;
use std::collections::HashSet;
use thiserror::Error;

pub const EMOTION_WEIGHT: f32 = 0.3;
pub const KEYWORD_WEIGHT: f32 = 0.3;
pub const SEMANTIC_WEIGHT: f32 = 0.4;

/// Number of verses returned per query.
pub const TOP_N: usize = 3;

/// Everything derived from one query, held for the duration of a request.
#[derive(Debug, Clone)]
pub struct QueryContext {
    pub query: String,
    pub emotion: String,
    pub keywords: HashSet<String>,
    /// Aligned positionally with the corpus.
    pub similarities: Vec<f32>,
}

/// A verse paired with its relevance score.
#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate<'a> {
    pub verse: &'a VerseRecord,
    pub total_score: f32,
}

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("oracle failure: {0}")]
    Oracle(#[from] OracleError),

    #[error("malformed corpus entry at index {index}: {reason}")]
    MalformedCorpusEntry { index: usize, reason: String },
}
