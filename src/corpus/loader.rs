use super::types::{CorpusError, VerseId, VerseRecord};
use serde_json::{Map, Value};
use std::path::Path;

// Each field accepts the spreadsheet column header and the snake_case name.
// "Enlgish Translation" is the header as it appears in the source workbook.
const TITLE_KEYS: &[&str] = &["title", "Title"];
const CHAPTER_KEYS: &[&str] = &["chapter", "Chapter"];
const VERSE_KEYS: &[&str] = &["verse", "Verse"];
const TRANSLATION_KEYS: &[&str] = &["translation", "English Translation", "Enlgish Translation"];
const EXPLANATION_KEYS: &[&str] = &["explanation", "Explanation"];
const THEMES_KEYS: &[&str] = &["emotional_themes", "Emotional Themes"];
const TAGS_KEYS: &[&str] = &["keyword_tags", "Keywords Tags", "Keyword Tags"];

/// Reads and validates the corpus file at `path`.
pub fn load_corpus(path: &Path) -> Result<Vec<VerseRecord>, CorpusError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let verses = parse_corpus(&raw)?;
    tracing::info!("Loaded {} verses from {}", verses.len(), path.display());
    Ok(verses)
}

/// Parses a JSON array of rows into verse records, preserving row order.
///
/// Missing or `null` cells become empty strings. The first row that fails
/// validation aborts the load with `CorpusError::MalformedEntry`.
pub fn parse_corpus(raw: &str) -> Result<Vec<VerseRecord>, CorpusError> {
    let value: Value = serde_json::from_str(raw)?;
    let rows = value.as_array().ok_or(CorpusError::NotAnArray)?;

    rows.iter()
        .enumerate()
        .map(|(row, value)| parse_row(row, value))
        .collect()
}

fn parse_row(row: usize, value: &Value) -> Result<VerseRecord, CorpusError> {
    let malformed = |reason: String| CorpusError::MalformedEntry { row, reason };

    let fields = value
        .as_object()
        .ok_or_else(|| malformed("row is not a JSON object".to_string()))?;

    let translation = text_cell(fields, TRANSLATION_KEYS).map_err(malformed)?;
    if translation.trim().is_empty() {
        return Err(malformed("missing translation".to_string()));
    }

    Ok(VerseRecord {
        title: text_cell(fields, TITLE_KEYS).map_err(malformed)?,
        chapter: id_cell(fields, CHAPTER_KEYS).map_err(malformed)?,
        verse: id_cell(fields, VERSE_KEYS).map_err(malformed)?,
        translation,
        explanation: text_cell(fields, EXPLANATION_KEYS).map_err(malformed)?,
        emotional_themes: text_cell(fields, THEMES_KEYS).map_err(malformed)?,
        keyword_tags: tags_cell(fields, TAGS_KEYS).map_err(malformed)?,
    })
}

fn lookup<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|key| fields.get(*key))
        .filter(|value| !value.is_null())
}

fn text_cell(fields: &Map<String, Value>, keys: &[&str]) -> Result<String, String> {
    match lookup(fields, keys) {
        None => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(format!("'{}' must be text, got {}", keys[0], other)),
    }
}

fn id_cell(fields: &Map<String, Value>, keys: &[&str]) -> Result<VerseId, String> {
    match lookup(fields, keys) {
        None => Ok(VerseId::default()),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                return Ok(VerseId::Number(i));
            }
            // Spreadsheet exports turn integer columns into floats (2 -> 2.0).
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 => Ok(VerseId::Number(f as i64)),
                _ => Ok(VerseId::Text(n.to_string())),
            }
        }
        Some(Value::String(s)) => {
            let s = s.trim();
            Ok(s.parse::<i64>()
                .map(VerseId::Number)
                .unwrap_or_else(|_| VerseId::Text(s.to_string())))
        }
        Some(other) => Err(format!(
            "'{}' must be a number or text, got {}",
            keys[0], other
        )),
    }
}

fn tags_cell(fields: &Map<String, Value>, keys: &[&str]) -> Result<String, String> {
    match lookup(fields, keys) {
        None => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| format!("'{}' entries must be text, got {}", keys[0], item))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|tags| tags.join(",")),
        Some(other) => Err(format!(
            "'{}' must be a comma-separated string or a list, got {}",
            keys[0], other
        )),
    }
}
