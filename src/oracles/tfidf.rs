//! TF-IDF oracles.
//!
//! Both oracles share the tokenizer and stop-word list from `crate::text`, so a
//! term that counts as a keyword is also a dimension of the similarity vectors.

use super::{KeywordExtractor, MAX_KEYWORDS, OracleError, SimilarityScorer};
use crate::text::tokenizer::content_terms;
use async_trait::async_trait;
use std::collections::HashMap;

/// Keyword extractor over a single document.
///
/// With one document every IDF weight is equal, so salience reduces to term
/// frequency. Terms are ranked by frequency, then alphabetically.
#[derive(Debug, Clone)]
pub struct TfIdfKeywordExtractor {
    max_keywords: usize,
}

impl TfIdfKeywordExtractor {
    pub fn new(max_keywords: usize) -> Self {
        Self { max_keywords }
    }

    pub fn keywords(&self, text: &str) -> Vec<String> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for term in content_terms(text) {
            *counts.entry(term).or_insert(0) += 1;
        }

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
            .into_iter()
            .take(self.max_keywords)
            .map(|(term, _)| term)
            .collect()
    }
}

impl Default for TfIdfKeywordExtractor {
    fn default() -> Self {
        Self::new(MAX_KEYWORDS)
    }
}

#[async_trait]
impl KeywordExtractor for TfIdfKeywordExtractor {
    async fn extract(&self, text: &str) -> Result<Vec<String>, OracleError> {
        Ok(self.keywords(text))
    }
}

type SparseVector = HashMap<String, f32>;

/// Cosine similarity between TF-IDF vectors.
///
/// IDF weights are fitted on the references plus the query for every call.
/// All weights are non-negative, so scores fall in [0, 1].
#[derive(Debug, Default, Clone)]
pub struct TfIdfSimilarityScorer;

impl TfIdfSimilarityScorer {
    pub fn scores(&self, query: &str, references: &[String]) -> Vec<f32> {
        let documents: Vec<Vec<String>> = references
            .iter()
            .map(|r| content_terms(r))
            .chain(std::iter::once(content_terms(query)))
            .collect();

        let idf = fit_idf(&documents);
        let vectors: Vec<SparseVector> = documents.iter().map(|d| embed(d, &idf)).collect();

        let Some((query_vec, reference_vecs)) = vectors.split_last() else {
            return Vec::new();
        };
        reference_vecs.iter().map(|r| dot(query_vec, r)).collect()
    }
}

#[async_trait]
impl SimilarityScorer for TfIdfSimilarityScorer {
    async fn similarity(
        &self,
        query: &str,
        references: &[String],
    ) -> Result<Vec<f32>, OracleError> {
        Ok(self.scores(query, references))
    }
}

// Smoothed IDF: ln((1 + n) / (1 + df)) + 1
fn fit_idf(documents: &[Vec<String>]) -> HashMap<String, f32> {
    let mut doc_freq: HashMap<&str, usize> = HashMap::new();
    for doc in documents {
        let mut seen: Vec<&str> = doc.iter().map(String::as_str).collect();
        seen.sort_unstable();
        seen.dedup();
        for term in seen {
            *doc_freq.entry(term).or_insert(0) += 1;
        }
    }

    let n = documents.len() as f32;
    doc_freq
        .into_iter()
        .map(|(term, df)| {
            let idf = ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0;
            (term.to_string(), idf)
        })
        .collect()
}

fn embed(terms: &[String], idf: &HashMap<String, f32>) -> SparseVector {
    let mut vector: SparseVector = HashMap::new();
    for term in terms {
        *vector.entry(term.clone()).or_insert(0.0) += 1.0;
    }
    for (term, weight) in vector.iter_mut() {
        *weight *= idf.get(term).copied().unwrap_or(0.0);
    }

    let norm = vector.values().map(|w| w * w).sum::<f32>().sqrt();
    if norm > 0.0 {
        for weight in vector.values_mut() {
            *weight /= norm;
        }
    }
    vector
}

fn dot(a: &SparseVector, b: &SparseVector) -> f32 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let sum: f32 = small
        .iter()
        .filter_map(|(term, w)| large.get(term).map(|v| w * v))
        .sum();
    // Unit vectors; rounding can push an identical pair just past 1.
    sum.min(1.0)
}
