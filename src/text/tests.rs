//! Text Module Tests
//!
//! Validates tokenization and stop-word filtering used by the keyword extractor
//! and the TF-IDF similarity scorer.

#[cfg(test)]
mod tests {
    use crate::text::stopwords::is_stop_word;
    use crate::text::tokenizer::{content_terms, tokenize};

    #[test]
    fn test_tokenize_lowercases_and_preserves_order() {
        let tokens = tokenize("Duty Before Desire");

        assert_eq!(tokens, vec!["duty", "before", "desire"]);
    }

    #[test]
    fn test_tokenize_drops_single_characters() {
        let tokens = tokenize("I am a seeker");

        assert_eq!(tokens, vec!["am", "seeker"]);
    }

    #[test]
    fn test_tokenize_strips_punctuation() {
        let tokens = tokenize("Why, O Krishna, am I afraid?");

        assert_eq!(tokens, vec!["why", "krishna", "am", "afraid"]);
    }

    #[test]
    fn test_tokenize_keeps_digits() {
        // \w matches digits, same as TF-IDF vectorizers
        let tokens = tokenize("chapter 18 verse 66");

        assert!(tokens.contains(&"18".to_string()));
        assert!(tokens.contains(&"66".to_string()));
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("?! ...").is_empty());
    }

    #[test]
    fn test_content_terms_remove_stop_words() {
        let terms = content_terms("I am worried about the future of my family");

        assert_eq!(terms, vec!["worried", "future", "family"]);
    }

    #[test]
    fn test_content_terms_keep_duplicates() {
        let terms = content_terms("peace peace peace");
        assert_eq!(terms.len(), 3);
    }

    #[test]
    fn test_stop_words() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("yourselves"));
        assert!(is_stop_word("about"));
        assert!(!is_stop_word("duty"));
        assert!(!is_stop_word("The"), "Lookup expects lower-cased input");
    }
}
