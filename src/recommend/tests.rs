//! Recommendation Engine Tests
//!
//! All oracles are replaced with fixed-output stand-ins so rankings are exact.
//!
//! ## Test Scopes
//! - **Scoring**: Weighted sub-scores, bounds, the empty keyword set.
//! - **Ranking**: Result size, ordering, tie-breaking, determinism, monotonicity.
//! - **Failures**: Oracle errors and malformed corpus entries.

#[cfg(test)]
mod tests {
    use crate::corpus::types::{VerseId, VerseRecord};
    use crate::oracles::{
        EmotionClassifier, KeywordExtractor, OracleError, Oracles, SimilarityScorer,
    };
    use crate::recommend::engine::{RecommendationEngine, rank_candidates, score_verse};
    use crate::recommend::types::{QueryContext, RecommendError};
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ============================================================
    // FIXED ORACLES
    // ============================================================

    struct FixedEmotion(&'static str);

    #[async_trait]
    impl EmotionClassifier for FixedEmotion {
        async fn classify(&self, _text: &str) -> Result<String, OracleError> {
            Ok(self.0.to_string())
        }
    }

    struct FixedKeywords(Vec<&'static str>);

    #[async_trait]
    impl KeywordExtractor for FixedKeywords {
        async fn extract(&self, _text: &str) -> Result<Vec<String>, OracleError> {
            Ok(self.0.iter().map(|k| k.to_string()).collect())
        }
    }

    struct FixedSimilarity(Vec<f32>);

    #[async_trait]
    impl SimilarityScorer for FixedSimilarity {
        async fn similarity(
            &self,
            _query: &str,
            _references: &[String],
        ) -> Result<Vec<f32>, OracleError> {
            Ok(self.0.clone())
        }
    }

    /// Counts calls and fails every one of them.
    #[derive(Default)]
    struct Failing {
        calls: AtomicUsize,
    }

    fn unavailable() -> OracleError {
        OracleError::Request {
            oracle: "test oracle",
            message: "model unavailable".to_string(),
        }
    }

    #[async_trait]
    impl EmotionClassifier for Failing {
        async fn classify(&self, _text: &str) -> Result<String, OracleError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(unavailable())
        }
    }

    #[async_trait]
    impl KeywordExtractor for Failing {
        async fn extract(&self, _text: &str) -> Result<Vec<String>, OracleError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(unavailable())
        }
    }

    #[async_trait]
    impl SimilarityScorer for Failing {
        async fn similarity(
            &self,
            _query: &str,
            _references: &[String],
        ) -> Result<Vec<f32>, OracleError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(unavailable())
        }
    }

    fn engine(
        emotion: &'static str,
        keywords: Vec<&'static str>,
        sims: Vec<f32>,
    ) -> RecommendationEngine {
        RecommendationEngine::new(Oracles::new(
            Arc::new(FixedEmotion(emotion)),
            Arc::new(FixedKeywords(keywords)),
            Arc::new(FixedSimilarity(sims)),
        ))
    }

    fn verse(title: &str, themes: &str, tags: &str) -> VerseRecord {
        VerseRecord {
            title: title.to_string(),
            chapter: VerseId::Number(2),
            verse: VerseId::Number(47),
            translation: format!("translation of {}", title),
            explanation: format!("explanation of {}", title),
            emotional_themes: themes.to_string(),
            keyword_tags: tags.to_string(),
        }
    }

    fn titles(verses: &[VerseRecord]) -> Vec<&str> {
        verses.iter().map(|v| v.title.as_str()).collect()
    }

    fn context(emotion: &str, keywords: &[&str], sims: Vec<f32>) -> QueryContext {
        QueryContext {
            query: "query".to_string(),
            emotion: emotion.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect::<HashSet<_>>(),
            similarities: sims,
        }
    }

    fn sample_corpus() -> Vec<VerseRecord> {
        vec![
            verse("A", "joy", "peace,duty"),
            verse("B", "fear", "war"),
            verse("C", "sadness", "soul"),
        ]
    }

    // ============================================================
    // SCORING TESTS
    // ============================================================

    #[test]
    fn test_score_full_match() {
        let corpus = sample_corpus();
        let ctx = context("joy", &["duty"], vec![0.9, 0.1, 0.5]);

        let score = score_verse(&corpus[0], 0, &ctx);

        assert!((score - 0.96).abs() < 1e-6, "got {}", score);
    }

    #[test]
    fn test_score_partial_keyword_overlap() {
        let v = verse("A", "", "peace,duty");
        let ctx = context("joy", &["duty", "anger", "work"], vec![0.0]);

        let score = score_verse(&v, 0, &ctx);

        assert!((score - 0.1).abs() < 1e-6, "got {}", score);
    }

    #[test]
    fn test_score_empty_keywords_is_zero_keyword_score() {
        let v = verse("A", "", "peace,duty");
        let ctx = context("joy", &[], vec![0.0]);

        assert_eq!(score_verse(&v, 0, &ctx), 0.0);
    }

    #[test]
    fn test_score_emotion_only() {
        let v = verse("A", "Fear, Doubt", "");
        let ctx = context("fear", &["duty"], vec![0.0]);

        assert!((score_verse(&v, 0, &ctx) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_score_bounds() {
        let v = verse("A", "joy", "duty");

        let max = score_verse(&v, 0, &context("joy", &["duty"], vec![1.0]));
        assert!((max - 1.0).abs() < 1e-6);

        let min = score_verse(&v, 0, &context("anger", &["war"], vec![0.0]));
        assert_eq!(min, 0.0);

        for s in [0.0f32, 0.25, 0.5, 0.75, 1.0] {
            let score = score_verse(&v, 0, &context("joy", &["duty", "war"], vec![s]));
            assert!((0.0..=1.0 + 1e-6).contains(&score), "got {}", score);
        }
    }

    #[test]
    fn test_score_negative_similarity_weighted_as_is() {
        let v = verse("A", "", "");

        let score = score_verse(&v, 0, &context("joy", &[], vec![-0.5]));

        assert!((score + 0.2).abs() < 1e-6, "got {}", score);
    }

    #[test]
    fn test_ranking_mixed_sign_similarities() {
        let corpus = vec![
            verse("A", "joy", ""),
            verse("B", "", ""),
            verse("X", "", ""),
            verse("Y", "", ""),
        ];
        let ctx = context("joy", &[], vec![-0.9, 0.1, -0.8, -0.1]);

        let ranked = rank_candidates(&corpus, &ctx);
        let order: Vec<&str> = ranked.iter().map(|c| c.verse.title.as_str()).collect();

        // B 0.04, Y -0.04, A 0.3 - 0.36 = -0.06, X -0.32
        assert_eq!(order, vec!["B", "Y", "A", "X"]);
        assert!((ranked[2].total_score + 0.06).abs() < 1e-6);
    }

    #[test]
    #[should_panic]
    fn test_score_without_similarity_entry_panics() {
        let v = verse("A", "joy", "");
        score_verse(&v, 3, &context("joy", &[], vec![0.5]));
    }

    #[test]
    fn test_ranking_stable_on_ties() {
        let corpus = vec![
            verse("first", "", ""),
            verse("second", "", ""),
            verse("third", "", ""),
            verse("fourth", "", ""),
        ];
        let ctx = context("joy", &[], vec![0.5, 0.5, 0.5, 0.5]);

        let ranked = rank_candidates(&corpus, &ctx);
        let order: Vec<&str> = ranked.iter().map(|c| c.verse.title.as_str()).collect();

        assert_eq!(order, vec!["first", "second", "third", "fourth"]);
    }

    // ============================================================
    // ENGINE TESTS
    // ============================================================

    #[tokio::test]
    async fn test_example_scenario_ranks_a_first() {
        let corpus = sample_corpus();
        let engine = engine("joy", vec!["duty"], vec![0.9, 0.1, 0.5]);

        let result = engine.recommend("I want to do my duty", &corpus).await.unwrap();

        assert_eq!(titles(&result), vec!["A", "C", "B"]);
    }

    #[tokio::test]
    async fn test_returns_top_three() {
        let corpus: Vec<VerseRecord> = (0..6)
            .map(|i| verse(&format!("v{}", i), "", ""))
            .collect();
        let engine = engine("joy", vec![], vec![0.1, 0.6, 0.3, 0.9, 0.0, 0.5]);

        let result = engine.recommend("query", &corpus).await.unwrap();

        assert_eq!(titles(&result), vec!["v3", "v1", "v5"]);
    }

    #[tokio::test]
    async fn test_small_corpus_returns_all_ranked() {
        let corpus = vec![verse("low", "", ""), verse("high", "", "")];
        let engine = engine("joy", vec![], vec![0.2, 0.8]);

        let result = engine.recommend("query", &corpus).await.unwrap();

        assert_eq!(titles(&result), vec!["high", "low"]);
    }

    #[tokio::test]
    async fn test_result_size_and_no_duplicates() {
        for size in 1..=7 {
            let corpus: Vec<VerseRecord> = (0..size)
                .map(|i| verse(&format!("v{}", i), "", ""))
                .collect();
            let sims: Vec<f32> = (0..size).map(|i| (i % 3) as f32 / 3.0).collect();
            let engine = engine("joy", vec![], sims);

            let result = engine.recommend("query", &corpus).await.unwrap();

            assert_eq!(result.len(), size.min(3));
            let unique: HashSet<&str> = titles(&result).into_iter().collect();
            assert_eq!(unique.len(), result.len());
        }
    }

    #[tokio::test]
    async fn test_deterministic() {
        let corpus = sample_corpus();
        let engine = engine("fear", vec!["war", "soul"], vec![0.3, 0.3, 0.3]);

        let first = engine.recommend("query", &corpus).await.unwrap();
        let second = engine.recommend("query", &corpus).await.unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_monotonic_in_similarity() {
        let corpus: Vec<VerseRecord> = (0..5)
            .map(|i| verse(&format!("v{}", i), "", ""))
            .collect();
        let base = vec![0.5, 0.4, 0.3, 0.2, 0.1];

        let mut previous = usize::MAX;
        for boosted in [0.1f32, 0.25, 0.35, 0.45, 0.6, 0.9] {
            let mut sims = base.clone();
            sims[4] = boosted;
            let ranked = rank_candidates(&corpus, &context("joy", &[], sims));
            let pos = ranked.iter().position(|c| c.verse.title == "v4").unwrap();
            assert!(pos <= previous, "v4 dropped from {} to {}", previous, pos);
            previous = pos;
        }
        assert_eq!(previous, 0);
    }

    #[tokio::test]
    async fn test_keyword_normalization() {
        let corpus = vec![verse("tagged", "", "Duty"), verse("other", "", "")];
        let engine = engine("joy", vec![" DUTY "], vec![0.0, 0.1]);

        let ranked = engine.rank("query", &corpus).await.unwrap();

        assert_eq!(ranked[0].verse.title, "tagged");
        assert!((ranked[0].total_score - 0.3).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_empty_corpus_calls_no_oracle() {
        let failing = Arc::new(Failing::default());
        let engine = RecommendationEngine::new(Oracles::new(
            failing.clone(),
            failing.clone(),
            failing.clone(),
        ));

        let result = engine.recommend("query", &[]).await.unwrap();

        assert!(result.is_empty());
        assert_eq!(failing.calls.load(Ordering::SeqCst), 0);
    }

    // ============================================================
    // FAILURE TESTS
    // ============================================================

    #[tokio::test]
    async fn test_oracle_failure_propagates() {
        let corpus = sample_corpus();
        let engine = RecommendationEngine::new(Oracles::new(
            Arc::new(FixedEmotion("joy")),
            Arc::new(FixedKeywords(vec!["duty"])),
            Arc::new(Failing::default()),
        ));

        let err = engine.recommend("query", &corpus).await.unwrap_err();

        assert!(matches!(err, RecommendError::Oracle(OracleError::Request { .. })));
        assert!(err.to_string().contains("model unavailable"));
    }

    #[tokio::test]
    async fn test_similarity_length_mismatch_is_oracle_failure() {
        let corpus = sample_corpus();
        let engine = engine("joy", vec![], vec![0.9, 0.1]);

        let err = engine.recommend("query", &corpus).await.unwrap_err();

        assert!(matches!(
            err,
            RecommendError::Oracle(OracleError::InvalidResponse { .. })
        ));
    }

    #[tokio::test]
    async fn test_non_finite_similarity_is_oracle_failure() {
        let corpus = sample_corpus();
        let engine = engine("joy", vec![], vec![0.9, f32::NAN, 0.1]);

        let err = engine.recommend("query", &corpus).await.unwrap_err();

        assert!(matches!(err, RecommendError::Oracle(_)));
    }

    #[tokio::test]
    async fn test_missing_translation_is_malformed() {
        let mut corpus = sample_corpus();
        corpus[1].translation = "  ".to_string();
        let failing = Arc::new(Failing::default());
        let engine = RecommendationEngine::new(Oracles::new(
            failing.clone(),
            failing.clone(),
            failing.clone(),
        ));

        let err = engine.recommend("query", &corpus).await.unwrap_err();

        assert!(matches!(
            err,
            RecommendError::MalformedCorpusEntry { index: 1, .. }
        ));
        assert_eq!(failing.calls.load(Ordering::SeqCst), 0);
    }
}
