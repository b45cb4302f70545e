use super::{EmotionClassifier, OracleError};
use crate::text::tokenizer::tokenize;
use async_trait::async_trait;

/// Label set of the emotion model the corpus themes were written against.
pub const EMOTION_LABELS: [&str; 7] = [
    "anger", "disgust", "fear", "joy", "neutral", "sadness", "surprise",
];

pub const NEUTRAL: &str = "neutral";

// A trailing '*' marks a prefix cue ("anxi*" matches "anxious", "anxiety").
const CUES: &[(&str, &[&str])] = &[
    (
        "anger",
        &[
            "angry", "anger", "rage*", "furious", "mad", "irritat*", "annoy*", "hate*",
            "hatred", "resent*", "frustrat*", "betray*", "outrage*",
        ],
    ),
    (
        "disgust",
        &[
            "disgust*", "gross", "revolt*", "repuls*", "vile", "nause*", "loath*", "sickening",
        ],
    ),
    (
        "fear",
        &[
            "afraid", "fear*", "scare*", "scary", "anxi*", "worr*", "nervous", "panic*",
            "terrif*", "dread*", "uncertain*", "insecur*", "stress*",
        ],
    ),
    (
        "joy",
        &[
            "happy", "happi*", "joy*", "glad", "delight*", "excit*", "grateful", "gratitude",
            "love*", "bliss*", "cheer*", "content*", "peaceful",
        ],
    ),
    (
        "sadness",
        &[
            "sad", "sadness", "unhappy", "depress*", "grief", "griev*", "lonely", "loneli*",
            "miser*", "heartbr*", "hopeless*", "cry", "crying", "lost", "loss", "mourn*",
            "despair*", "empty",
        ],
    ),
    (
        "surprise",
        &[
            "surpris*", "shock*", "astonish*", "amaz*", "unexpected*", "sudden*", "stunned",
        ],
    ),
];

/// Cue-word emotion classifier.
///
/// Counts cue matches per label over the query tokens. The label with the most
/// matches wins; ties go to the label listed first; no match at all is `neutral`.
#[derive(Debug, Default, Clone)]
pub struct LexiconEmotionClassifier;

impl LexiconEmotionClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn label_for(&self, text: &str) -> &'static str {
        let tokens = tokenize(text);

        let mut best = NEUTRAL;
        let mut best_hits = 0usize;
        for &(label, cues) in CUES {
            let hits = tokens
                .iter()
                .filter(|token| cues.iter().any(|cue| cue_matches(cue, token)))
                .count();
            if hits > best_hits {
                best = label;
                best_hits = hits;
            }
        }

        best
    }
}

fn cue_matches(cue: &str, token: &str) -> bool {
    match cue.strip_suffix('*') {
        Some(prefix) => token.starts_with(prefix),
        None => token == cue,
    }
}

#[async_trait]
impl EmotionClassifier for LexiconEmotionClassifier {
    async fn classify(&self, text: &str) -> Result<String, OracleError> {
        let label = self.label_for(text);
        tracing::debug!("Lexicon classifier picked '{}'", label);
        Ok(label.to_string())
    }
}
