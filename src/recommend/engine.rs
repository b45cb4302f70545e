use super::types::{
    EMOTION_WEIGHT, KEYWORD_WEIGHT, QueryContext, RecommendError, SEMANTIC_WEIGHT,
    ScoredCandidate, TOP_N,
};
use crate::corpus::types::VerseRecord;
use crate::oracles::{MAX_KEYWORDS, OracleError, Oracles};
use std::collections::HashSet;

pub struct RecommendationEngine {
    oracles: Oracles,
}

impl RecommendationEngine {
    pub fn new(oracles: Oracles) -> Self {
        Self { oracles }
    }

    /// Returns the `min(3, corpus.len())` most relevant verses, best first.
    ///
    /// An empty corpus yields an empty list without calling any oracle.
    pub async fn recommend(
        &self,
        query: &str,
        corpus: &[VerseRecord],
    ) -> Result<Vec<VerseRecord>, RecommendError> {
        let ranked = self.rank(query, corpus).await?;

        Ok(ranked
            .into_iter()
            .take(TOP_N)
            .map(|candidate| candidate.verse.clone())
            .collect())
    }

    /// Scores and sorts the whole corpus.
    pub async fn rank<'a>(
        &self,
        query: &str,
        corpus: &'a [VerseRecord],
    ) -> Result<Vec<ScoredCandidate<'a>>, RecommendError> {
        if corpus.is_empty() {
            tracing::debug!("Empty corpus, nothing to rank");
            return Ok(Vec::new());
        }
        validate_corpus(corpus)?;

        let context = self.query_context(query, corpus).await?;
        Ok(rank_candidates(corpus, &context))
    }

    /// Runs the three oracles concurrently and collects their outputs.
    pub async fn query_context(
        &self,
        query: &str,
        corpus: &[VerseRecord],
    ) -> Result<QueryContext, RecommendError> {
        let references: Vec<String> = corpus.iter().map(|v| v.translation.clone()).collect();

        let (emotion, keywords, similarities) = tokio::try_join!(
            self.oracles.emotion.classify(query),
            self.oracles.keywords.extract(query),
            self.oracles.similarity.similarity(query, &references),
        )?;

        if similarities.len() != corpus.len() {
            return Err(OracleError::InvalidResponse {
                oracle: "similarity scorer",
                message: format!(
                    "{} scores for {} verses",
                    similarities.len(),
                    corpus.len()
                ),
            }
            .into());
        }
        if let Some(bad) = similarities.iter().find(|s| !s.is_finite()) {
            return Err(OracleError::InvalidResponse {
                oracle: "similarity scorer",
                message: format!("non-finite score {}", bad),
            }
            .into());
        }

        let keywords = normalize_keywords(keywords);
        tracing::debug!(
            "Query context: emotion='{}' keywords={:?}",
            emotion,
            keywords
        );

        Ok(QueryContext {
            query: query.to_string(),
            emotion,
            keywords,
            similarities,
        })
    }
}

fn validate_corpus(corpus: &[VerseRecord]) -> Result<(), RecommendError> {
    match corpus
        .iter()
        .position(|verse| verse.translation.trim().is_empty())
    {
        Some(index) => Err(RecommendError::MalformedCorpusEntry {
            index,
            reason: "missing translation".to_string(),
        }),
        None => Ok(()),
    }
}

fn normalize_keywords(keywords: Vec<String>) -> HashSet<String> {
    keywords
        .into_iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .take(MAX_KEYWORDS)
        .collect()
}

/// Weighted relevance of `verse`, the corpus entry at `index`.
///
/// The total lies in [0, 1] when the similarity does; a negative cosine
/// similarity lowers it below the emotion and keyword contributions.
///
/// # Panics
/// If `context.similarities` has no entry for `index`. `query_context` only
/// builds contexts whose similarities align with the corpus.
pub fn score_verse(verse: &VerseRecord, index: usize, context: &QueryContext) -> f32 {
    let emotion_score = if verse.has_theme(&context.emotion) {
        EMOTION_WEIGHT
    } else {
        0.0
    };

    let overlap = context.keywords.intersection(&verse.tags()).count();
    let keyword_score = KEYWORD_WEIGHT * (overlap as f32 / context.keywords.len().max(1) as f32);

    let semantic_score = SEMANTIC_WEIGHT * context.similarities[index];

    emotion_score + keyword_score + semantic_score
}

/// Scores every verse and sorts by descending score. The sort is stable, so
/// equal scores keep their corpus order.
pub fn rank_candidates<'a>(
    corpus: &'a [VerseRecord],
    context: &QueryContext,
) -> Vec<ScoredCandidate<'a>> {
    let mut candidates: Vec<ScoredCandidate<'a>> = corpus
        .iter()
        .enumerate()
        .map(|(index, verse)| ScoredCandidate {
            verse,
            total_score: score_verse(verse, index, context),
        })
        .collect();

    candidates.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
    candidates
}
