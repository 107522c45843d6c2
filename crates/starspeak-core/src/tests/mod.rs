//! Fake collaborators shared by the resolver tests

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::dictionary::{DictionarySource, SourceError, SourceMetadata, SourceRecord};
use crate::generator::{AiGenerator, GenerateError, GeneratedEntry};
use crate::store::{MemoryWordStore, StoreError, WordStore};
use crate::types::{LookupKey, UserId, WordEntry};


/// Generator answering from a canned table and counting calls
pub struct CountingGenerator {
    pub calls: AtomicUsize,
    pub answers: HashMap<String, GeneratedEntry>,
    pub delay: Duration,
    pub fail: bool,
}

impl CountingGenerator {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            answers: HashMap::new(),
            delay: Duration::ZERO,
            fail: false,
        }
    }

    pub fn answer(mut self, query: &str, word: &str, translation: &str) -> Self {
        self.answers.insert(
            query.to_string(),
            GeneratedEntry {
                word: word.to_string(),
                phonetic: String::new(),
                definition: format!("definition of {word}"),
                translation_cn: translation.to_string(),
                example: format!("An example with {word}."),
            },
        );
        self
    }

    /// Answer `query` with a bare headword and nothing else
    pub fn hollow(mut self, query: &str) -> Self {
        self.answers.insert(
            query.to_string(),
            GeneratedEntry {
                word: query.to_string(),
                ..Default::default()
            },
        );
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl AiGenerator for CountingGenerator {
    async fn lookup(&self, query: &str) -> Result<GeneratedEntry, GenerateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(GenerateError::Network("connection refused".to_string()));
        }
        Ok(self.answers.get(query).cloned().unwrap_or_else(|| GeneratedEntry {
            word: query.to_string(),
            phonetic: "/test/".to_string(),
            definition: format!("generated {query}"),
            translation_cn: "测试".to_string(),
            example: String::new(),
        }))
    }

    fn name(&self) -> &str {
        "counting"
    }
}

/// Fixed in-memory source
pub struct FixedSource {
    pub name: String,
    pub priority: u32,
    pub records: Vec<SourceRecord>,
    pub broken: bool,
}

impl FixedSource {
    pub fn new(name: &str, priority: u32) -> Self {
        Self {
            name: name.to_string(),
            priority,
            records: Vec::new(),
            broken: false,
        }
    }

    pub fn word(mut self, word: &str, definition: &str, pos: Option<&str>) -> Self {
        self.records.push(SourceRecord {
            word: word.to_lowercase(),
            display_word: Some(word.to_string()),
            definition: Some(definition.to_string()),
            pos: pos.map(str::to_string),
            ..Default::default()
        });
        self
    }

    pub fn broken(mut self) -> Self {
        self.broken = true;
        self
    }
}

#[async_trait::async_trait]
impl DictionarySource for FixedSource {
    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            id: self.name.clone(),
            name: self.name.clone(),
            description: String::new(),
            priority: self.priority,
            is_ai_generated: false,
            entry_count: self.records.len(),
        }
    }

    async fn lookup_exact(&self, key: &LookupKey) -> Result<Vec<SourceRecord>, SourceError> {
        if self.broken {
            return Err(SourceError::Unavailable(self.name.clone()));
        }
        Ok(self
            .records
            .iter()
            .filter(|r| r.word == key.as_str())
            .cloned()
            .collect())
    }

    async fn search_prefix(&self, prefix: &str, limit: usize) -> Result<Vec<String>, SourceError> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.word.starts_with(prefix))
            .take(limit)
            .map(|r| r.display_word.clone().unwrap_or_else(|| r.word.clone()))
            .collect())
    }
}

/// Store that reads fine but refuses every write
pub struct ReadOnlyStore {
    pub inner: MemoryWordStore,
    pub writes: AtomicUsize,
}

impl ReadOnlyStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryWordStore::new(),
            writes: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl WordStore for ReadOnlyStore {
    async fn get(&self, user: &UserId, key: &LookupKey) -> Result<Option<WordEntry>, StoreError> {
        self.inner.get(user, key).await
    }

    async fn upsert(&self, _user: &UserId, _key: &LookupKey, _entry: &WordEntry) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Unavailable("read-only".to_string()))
    }

    async fn recent(&self, user: &UserId, limit: usize) -> Result<Vec<WordEntry>, StoreError> {
        self.inner.recent(user, limit).await
    }

    async fn drill_words(&self, user: &UserId) -> Result<Vec<WordEntry>, StoreError> {
        self.inner.drill_words(user).await
    }

    async fn set_in_drill(&self, _user: &UserId, _key: &LookupKey, _in_drill: bool) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("read-only".to_string()))
    }

    async fn delete(&self, _user: &UserId, _key: &LookupKey) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("read-only".to_string()))
    }

    async fn len(&self, user: &UserId) -> Result<usize, StoreError> {
        self.inner.len(user).await
    }
}

/// Store whose reads always fail
pub struct UnreadableStore {
    pub inner: MemoryWordStore,
}

#[async_trait::async_trait]
impl WordStore for UnreadableStore {
    async fn get(&self, _user: &UserId, _key: &LookupKey) -> Result<Option<WordEntry>, StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }

    async fn upsert(&self, user: &UserId, key: &LookupKey, entry: &WordEntry) -> Result<(), StoreError> {
        self.inner.upsert(user, key, entry).await
    }

    async fn recent(&self, user: &UserId, limit: usize) -> Result<Vec<WordEntry>, StoreError> {
        self.inner.recent(user, limit).await
    }

    async fn drill_words(&self, user: &UserId) -> Result<Vec<WordEntry>, StoreError> {
        self.inner.drill_words(user).await
    }

    async fn set_in_drill(&self, user: &UserId, key: &LookupKey, in_drill: bool) -> Result<bool, StoreError> {
        self.inner.set_in_drill(user, key, in_drill).await
    }

    async fn delete(&self, user: &UserId, key: &LookupKey) -> Result<bool, StoreError> {
        self.inner.delete(user, key).await
    }

    async fn len(&self, user: &UserId) -> Result<usize, StoreError> {
        self.inner.len(user).await
    }
}

pub fn shared<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
