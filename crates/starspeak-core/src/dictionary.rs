use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::types::{LookupKey, NO_DEFINITION, NO_TRANSLATION, WordEntry};

/// Read-only dictionary table consulted before AI generation
#[async_trait::async_trait]
pub trait DictionarySource: Send + Sync {
    /// Source identity and precedence
    fn metadata(&self) -> SourceMetadata;

    /// Records whose normalized headword equals `key`
    async fn lookup_exact(&self, key: &LookupKey) -> Result<Vec<SourceRecord>, SourceError>;

    /// Display words starting with `prefix`, at most `limit`
    async fn search_prefix(&self, prefix: &str, limit: usize) -> Result<Vec<String>, SourceError>;
}

/// Single row of a dictionary source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceRecord {
    /// Normalized headword
    pub word: String,
    pub display_word: Option<String>,
    pub phonetic: Option<String>,
    pub definition: Option<String>,
    pub translation: Option<String>,
    pub example: Option<String>,
    pub pos: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMetadata {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Lower wins
    pub priority: u32,
    pub is_ai_generated: bool,
    pub entry_count: usize,
}

/// A record together with the source it came from
#[derive(Debug, Clone)]
pub struct SourceHit {
    pub record: SourceRecord,
    pub priority: u32,
    pub source: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    #[error("Query error: {0}")]
    Query(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Other,
}

impl PartOfSpeech {
    /// Parse the leading tag of ECDICT-style strings such as `n:46/v:54` or `vt. & n.`
    pub fn parse(pos: &str) -> Self {
        let lowered = pos.trim().to_lowercase();
        let first = lowered
            .split(|c: char| c == '/' || c == '&' || c == ',' || c == ';' || c.is_whitespace())
            .find(|part| !part.is_empty())
            .unwrap_or("");
        let tag = first
            .split(':')
            .next()
            .unwrap_or("")
            .trim_end_matches('.');

        match tag {
            "n" | "noun" => PartOfSpeech::Noun,
            "v" | "vt" | "vi" | "verb" => PartOfSpeech::Verb,
            "a" | "adj" | "adjective" => PartOfSpeech::Adjective,
            "ad" | "adv" | "adverb" => PartOfSpeech::Adverb,
            _ => PartOfSpeech::Other,
        }
    }
}

/// Deterministic example sentence for a word lacking one
pub fn default_example(word: &str, pos: Option<&str>) -> String {
    match pos.map(PartOfSpeech::parse) {
        Some(PartOfSpeech::Noun) => format!("This is a {word}."),
        Some(PartOfSpeech::Verb) => format!("I {word} every day."),
        Some(PartOfSpeech::Adjective) => format!("It is very {word}."),
        Some(PartOfSpeech::Adverb) => format!("She speaks {word}."),
        _ => format!("The word \"{word}\" is commonly used in English."),
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl SourceRecord {
    /// Convert to a `WordEntry`, never leaving translation or example empty
    pub fn to_word_entry(&self, added_at: u64, in_drill: bool) -> WordEntry {
        let word = non_blank(&self.display_word)
            .unwrap_or(self.word.trim())
            .to_string();
        let example = match non_blank(&self.example) {
            Some(e) => e.to_string(),
            None => default_example(&word, self.pos.as_deref()),
        };

        WordEntry {
            phonetic: non_blank(&self.phonetic).unwrap_or_default().to_string(),
            definition: non_blank(&self.definition)
                .unwrap_or(NO_DEFINITION)
                .to_string(),
            translation_cn: non_blank(&self.translation)
                .unwrap_or(NO_TRANSLATION)
                .to_string(),
            example,
            word,
            added_at,
            in_drill,
        }
    }
}

/// Ordered set of dictionary sources
#[derive(Default, Clone)]
pub struct TieredDictionary {
    sources: Vec<Arc<dyn DictionarySource>>,
}

impl TieredDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, source: Arc<dyn DictionarySource>) {
        let meta = source.metadata();
        tracing::info!(
            "Registered dictionary source '{}' (priority {}, {} entries)",
            meta.name,
            meta.priority,
            meta.entry_count
        );
        self.sources.push(source);
    }

    pub fn with_source(mut self, source: Arc<dyn DictionarySource>) -> Self {
        self.register(source);
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Sources sorted by priority, ties kept in registration order
    fn ordered(&self) -> Vec<(SourceMetadata, &Arc<dyn DictionarySource>)> {
        let mut ordered: Vec<_> = self.sources.iter().map(|s| (s.metadata(), s)).collect();
        ordered.sort_by_key(|(meta, _)| meta.priority);
        ordered
    }

    /// All hits for `key`, highest precedence first. Failing sources are skipped.
    pub async fn query(&self, key: &LookupKey) -> Vec<SourceHit> {
        let mut hits = Vec::new();

        for (meta, source) in self.ordered() {
            match source.lookup_exact(key).await {
                Ok(records) => {
                    tracing::debug!("Source '{}': {} records for '{}'", meta.name, records.len(), key);
                    hits.extend(records.into_iter().map(|record| SourceHit {
                        record,
                        priority: meta.priority,
                        source: meta.name.clone(),
                    }));
                }
                Err(e) => {
                    tracing::warn!("Dictionary source '{}' failed for '{}': {}", meta.name, key, e);
                }
            }
        }

        hits
    }

    /// Highest-precedence hit for `key`
    pub async fn best(&self, key: &LookupKey) -> Option<SourceHit> {
        self.query(key).await.into_iter().next()
    }

    /// Prefix search merged across sources in priority order, without duplicates
    pub async fn search_prefix(&self, prefix: &str, limit: usize) -> Vec<String> {
        let prefix = crate::preprocess::normalize_query(prefix);
        let mut words: Vec<String> = Vec::new();

        if prefix.is_empty() || limit == 0 {
            return words;
        }

        for (meta, source) in self.ordered() {
            match source.search_prefix(&prefix, limit).await {
                Ok(found) => {
                    for word in found {
                        if words.len() >= limit {
                            return words;
                        }
                        if !words.iter().any(|w| w.eq_ignore_ascii_case(&word)) {
                            words.push(word);
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("Prefix search failed in '{}': {}", meta.name, e);
                }
            }
        }

        words
    }

    /// Metadata of every source in priority order
    pub fn stats(&self) -> Vec<SourceMetadata> {
        self.ordered().into_iter().map(|(meta, _)| meta).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(word: &str, pos: Option<&str>) -> SourceRecord {
        SourceRecord {
            word: word.to_string(),
            pos: pos.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn pos_parsing_handles_ecdict_forms() {
        assert_eq!(PartOfSpeech::parse("n:46/v:54"), PartOfSpeech::Noun);
        assert_eq!(PartOfSpeech::parse("vt. & n."), PartOfSpeech::Verb);
        assert_eq!(PartOfSpeech::parse("adj."), PartOfSpeech::Adjective);
        assert_eq!(PartOfSpeech::parse("adv"), PartOfSpeech::Adverb);
        assert_eq!(PartOfSpeech::parse("Adverb"), PartOfSpeech::Adverb);
        assert_eq!(PartOfSpeech::parse("prep."), PartOfSpeech::Other);
        assert_eq!(PartOfSpeech::parse(""), PartOfSpeech::Other);
    }

    #[test]
    fn verb_without_example_gets_template() {
        let entry = record("run", Some("verb")).to_word_entry(0, false);
        assert_eq!(entry.example, "I run every day.");
    }

    #[test]
    fn templates_per_part_of_speech() {
        assert_eq!(default_example("apple", Some("noun")), "This is a apple.");
        assert_eq!(default_example("quiet", Some("adj")), "It is very quiet.");
        assert_eq!(default_example("softly", Some("adverb")), "She speaks softly.");
        assert_eq!(
            default_example("of", None),
            "The word \"of\" is commonly used in English."
        );
    }

    #[test]
    fn missing_fields_get_placeholders() {
        let entry = record("apple", None).to_word_entry(0, false);
        assert_eq!(entry.translation_cn, NO_TRANSLATION);
        assert_eq!(entry.definition, NO_DEFINITION);
        assert_eq!(entry.phonetic, "");
    }

    #[test]
    fn display_word_wins_over_headword() {
        let mut rec = record("new york", None);
        rec.display_word = Some("New York".to_string());
        rec.example = Some("I live in New York.".to_string());
        rec.translation = Some("纽约".to_string());
        let entry = rec.to_word_entry(5, true);
        assert_eq!(entry.word, "New York");
        assert_eq!(entry.example, "I live in New York.");
        assert_eq!(entry.translation_cn, "纽约");
        assert!(entry.in_drill);
    }
}
