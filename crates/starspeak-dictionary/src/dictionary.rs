use std::collections::BTreeMap;

use starspeak_core::dictionary::{DictionarySource, SourceError, SourceMetadata, SourceRecord};
use starspeak_core::preprocess::normalize_query;
use starspeak_core::types::LookupKey;

/// Read-only in-memory dictionary table
#[derive(Debug, Clone)]
pub struct StaticDictionary {
    name: String,
    description: String,
    priority: u32,
    entries: Vec<SourceRecord>,
    index: BTreeMap<String, Vec<usize>>,
}

impl StaticDictionary {
    pub fn new(name: impl Into<String>, priority: u32) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            priority,
            entries: Vec::new(),
            index: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Build from records. Headwords are normalized; blank ones are dropped.
    pub fn from_records(name: impl Into<String>, priority: u32, records: Vec<SourceRecord>) -> Self {
        let mut dict = Self::new(name, priority);
        for record in records {
            dict.insert(record);
        }
        dict
    }

    fn insert(&mut self, mut record: SourceRecord) {
        let key = normalize_query(&record.word);
        if key.is_empty() {
            return;
        }

        if record.display_word.as_deref().is_none_or(|d| d.trim().is_empty()) {
            record.display_word = Some(record.word.trim().to_string());
        }
        record.word = key.clone();

        let idx = self.entries.len();
        self.entries.push(record);
        self.index.entry(key).or_default().push(idx);
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Merge another dictionary into this one.
    /// Records from `other` replace existing records with the same headword.
    pub fn merge(self, other: StaticDictionary) -> Self {
        let mut merged = Self::new(self.name, self.priority).with_description(self.description);

        for record in self.entries {
            if !other.index.contains_key(&record.word) {
                merged.insert(record);
            }
        }
        for record in other.entries {
            merged.insert(record);
        }

        merged
    }

    fn records_for(&self, key: &str) -> Vec<SourceRecord> {
        self.index
            .get(key)
            .map(|indices| {
                indices
                    .iter()
                    .filter_map(|&idx| self.entries.get(idx))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn words_with_prefix(&self, prefix: &str, limit: usize) -> Vec<String> {
        self.index
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .filter_map(|(_, indices)| indices.first())
            .filter_map(|&idx| self.entries.get(idx))
            .map(|r| r.display_word.clone().unwrap_or_else(|| r.word.clone()))
            .take(limit)
            .collect()
    }
}

#[async_trait::async_trait]
impl DictionarySource for StaticDictionary {
    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            id: self.name.to_lowercase().replace(' ', "_"),
            name: self.name.clone(),
            description: self.description.clone(),
            priority: self.priority,
            is_ai_generated: false,
            entry_count: self.entries.len(),
        }
    }

    async fn lookup_exact(&self, key: &LookupKey) -> Result<Vec<SourceRecord>, SourceError> {
        Ok(self.records_for(key.as_str()))
    }

    async fn search_prefix(&self, prefix: &str, limit: usize) -> Result<Vec<String>, SourceError> {
        Ok(self.words_with_prefix(&normalize_query(prefix), limit))
    }
}
