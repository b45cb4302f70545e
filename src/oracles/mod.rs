//! Oracle Module
//!
//! The three signal providers consumed by the recommendation engine. Each one is
//! an opaque capability behind a single-method trait, so models can be swapped
//! without touching the scoring logic and tests can inject fixed outputs.
//!
//! ## Oracles
//! - **`EmotionClassifier`**: text -> one emotion label.
//! - **`KeywordExtractor`**: text -> up to three salient terms, most salient first.
//! - **`SimilarityScorer`**: (query, references) -> one cosine similarity per reference,
//!   computed in a single batched call.
//!
//! ## Submodules
//! - **`lexicon`**: In-process cue-word emotion classifier.
//! - **`tfidf`**: In-process TF-IDF keyword extractor and similarity scorer.
//! - **`remote`**: Adapters for a hosted model inference endpoint (HTTP).

pub mod lexicon;
pub mod remote;
pub mod tfidf;


use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use lexicon::LexiconEmotionClassifier;
use remote::{InferenceClient, RemoteEmotionClassifier, RemoteSettings, RemoteSimilarityScorer};
use tfidf::{TfIdfKeywordExtractor, TfIdfSimilarityScorer};

/// Maximum number of keywords an extractor returns.
pub const MAX_KEYWORDS: usize = 3;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("{oracle} request failed: {message}")]
    Request {
        oracle: &'static str,
        message: String,
    },

    #[error("{oracle} returned HTTP {status}: {body}")]
    Status {
        oracle: &'static str,
        status: u16,
        body: String,
    },

    #[error("{oracle} returned an unusable response: {message}")]
    InvalidResponse {
        oracle: &'static str,
        message: String,
    },
}

#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    /// Returns the single best emotion label for `text`.
    async fn classify(&self, text: &str) -> Result<String, OracleError>;
}

#[async_trait]
pub trait KeywordExtractor: Send + Sync {
    /// Returns at most `MAX_KEYWORDS` terms, most salient first. May be empty.
    async fn extract(&self, text: &str) -> Result<Vec<String>, OracleError>;
}

#[async_trait]
pub trait SimilarityScorer: Send + Sync {
    /// Returns one score in [-1, 1] per reference, in reference order.
    async fn similarity(&self, query: &str, references: &[String])
    -> Result<Vec<f32>, OracleError>;
}

/// The oracle handles shared by every request.
///
/// Built once at start-up; cloning only clones the `Arc`s.
#[derive(Clone)]
pub struct Oracles {
    pub emotion: Arc<dyn EmotionClassifier>,
    pub keywords: Arc<dyn KeywordExtractor>,
    pub similarity: Arc<dyn SimilarityScorer>,
}

impl Oracles {
    pub fn new(
        emotion: Arc<dyn EmotionClassifier>,
        keywords: Arc<dyn KeywordExtractor>,
        similarity: Arc<dyn SimilarityScorer>,
    ) -> Self {
        Self {
            emotion,
            keywords,
            similarity,
        }
    }

    /// In-process oracles; no network access, fully deterministic.
    pub fn local() -> Self {
        Self::new(
            Arc::new(LexiconEmotionClassifier::new()),
            Arc::new(TfIdfKeywordExtractor::default()),
            Arc::new(TfIdfSimilarityScorer),
        )
    }

    /// Hosted models for emotion and similarity. Keywords stay local.
    pub fn remote(settings: RemoteSettings) -> Result<Self, OracleError> {
        let client = Arc::new(InferenceClient::new(&settings)?);

        Ok(Self::new(
            Arc::new(RemoteEmotionClassifier::new(
                client.clone(),
                &settings.emotion_model,
            )),
            Arc::new(TfIdfKeywordExtractor::default()),
            Arc::new(RemoteSimilarityScorer::new(
                client,
                &settings.similarity_model,
            )),
        ))
    }
}
