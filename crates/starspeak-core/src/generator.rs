use serde::{Deserialize, Serialize};

use crate::dictionary::default_example;
use crate::types::{NO_TRANSLATION, WordEntry};

/// Generative lookup provider interface
///
/// Implementations decide on their own whether the input is a word, a
/// sentence or a reverse lookup from the student's native language, and
/// return the same record shape for all three.
#[async_trait::async_trait]
pub trait AiGenerator: Send + Sync {
    /// Produce a definition record for a raw (non-normalized) query
    async fn lookup(&self, query: &str) -> Result<GeneratedEntry, GenerateError>;

    /// Provider name for logs
    fn name(&self) -> &str;
}

/// Structured record returned by a generator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratedEntry {
    pub word: String,
    pub phonetic: String,
    pub definition: String,
    pub translation_cn: String,
    pub example: String,
}

impl GeneratedEntry {
    /// Shape into a `WordEntry`, filling gaps the model left empty
    pub fn into_word_entry(self, query: &str, added_at: u64, in_drill: bool) -> WordEntry {
        let word = match self.word.trim() {
            "" => query.trim().to_string(),
            w => w.to_string(),
        };
        let translation_cn = match self.translation_cn.trim() {
            "" => NO_TRANSLATION.to_string(),
            t => t.to_string(),
        };
        let example = match self.example.trim() {
            "" => default_example(&word, None),
            e => e.to_string(),
        };

        WordEntry {
            word,
            phonetic: self.phonetic.trim().to_string(),
            definition: self.definition.trim().to_string(),
            translation_cn,
            example,
            added_at,
            in_drill,
        }
    }

    /// A record with nothing but a headword is not worth keeping
    pub fn is_empty(&self) -> bool {
        self.definition.trim().is_empty()
            && self.translation_cn.trim().is_empty()
            && self.phonetic.trim().is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: HTTP {status}")]
    Api { status: u16 },

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Authentication error")]
    Authentication,

    #[error("Request timed out")]
    Timeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_word_falls_back_to_query() {
        let generated = GeneratedEntry {
            definition: "easy".to_string(),
            translation_cn: "小菜一碟".to_string(),
            example: "The test was a piece of cake.".to_string(),
            ..Default::default()
        };
        let entry = generated.into_word_entry("  piece of cake ", 7, false);
        assert_eq!(entry.word, "piece of cake");
        assert_eq!(entry.added_at, 7);
        assert!(!entry.in_drill);
    }

    #[test]
    fn blank_translation_gets_placeholder() {
        let generated = GeneratedEntry {
            word: "Resilience".to_string(),
            definition: "ability to recover".to_string(),
            ..Default::default()
        };
        let entry = generated.into_word_entry("resilience", 0, true);
        assert_eq!(entry.translation_cn, NO_TRANSLATION);
        assert_eq!(
            entry.example,
            "The word \"Resilience\" is commonly used in English."
        );
        assert!(entry.in_drill);
    }

    #[test]
    fn detects_hollow_records() {
        let hollow = GeneratedEntry {
            word: "x".to_string(),
            ..Default::default()
        };
        assert!(hollow.is_empty());
    }
}
