use super::stopwords::is_stop_word;
use regex::Regex;
use std::sync::LazyLock;

// Two or more word characters, the default term pattern of TF-IDF vectorizers.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

/// Lower-cased word tokens in order of appearance, duplicates kept.
pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN_RE
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Tokens with stop words removed, duplicates kept.
pub fn content_terms(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|word| !is_stop_word(word))
        .collect()
}
