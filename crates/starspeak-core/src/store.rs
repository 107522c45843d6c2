use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::types::{LookupKey, UserId, WordEntry};

/// Per-user word persistence, one row per (user, key)
#[async_trait::async_trait]
pub trait WordStore: Send + Sync {
    async fn get(&self, user: &UserId, key: &LookupKey) -> Result<Option<WordEntry>, StoreError>;

    /// Insert or replace the row for (user, key)
    async fn upsert(&self, user: &UserId, key: &LookupKey, entry: &WordEntry) -> Result<(), StoreError>;

    /// Most recently added entries first
    async fn recent(&self, user: &UserId, limit: usize) -> Result<Vec<WordEntry>, StoreError>;

    /// Entries marked for drilling
    async fn drill_words(&self, user: &UserId) -> Result<Vec<WordEntry>, StoreError>;

    /// Flip drill membership. Returns false when there is no such entry.
    async fn set_in_drill(&self, user: &UserId, key: &LookupKey, in_drill: bool) -> Result<bool, StoreError>;

    async fn delete(&self, user: &UserId, key: &LookupKey) -> Result<bool, StoreError>;

    async fn len(&self, user: &UserId) -> Result<usize, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Sort newest first and cut to `limit`
pub fn newest_first(mut entries: Vec<WordEntry>, limit: usize) -> Vec<WordEntry> {
    entries.sort_by(|a, b| b.added_at.cmp(&a.added_at).then_with(|| a.word.cmp(&b.word)));
    entries.truncate(limit);
    entries
}

/// In-process store, lost on exit
#[derive(Default)]
pub struct MemoryWordStore {
    rows: RwLock<HashMap<(UserId, LookupKey), WordEntry>>,
}

impl MemoryWordStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn user_rows(&self, user: &UserId) -> Vec<WordEntry> {
        let rows = self.rows.read().await;
        rows.iter()
            .filter(|((owner, _), _)| owner == user)
            .map(|(_, entry)| entry.clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl WordStore for MemoryWordStore {
    async fn get(&self, user: &UserId, key: &LookupKey) -> Result<Option<WordEntry>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.get(&(user.clone(), key.clone())).cloned())
    }

    async fn upsert(&self, user: &UserId, key: &LookupKey, entry: &WordEntry) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        rows.insert((user.clone(), key.clone()), entry.clone());
        Ok(())
    }

    async fn recent(&self, user: &UserId, limit: usize) -> Result<Vec<WordEntry>, StoreError> {
        Ok(newest_first(self.user_rows(user).await, limit))
    }

    async fn drill_words(&self, user: &UserId) -> Result<Vec<WordEntry>, StoreError> {
        let drills = self
            .user_rows(user)
            .await
            .into_iter()
            .filter(|e| e.in_drill)
            .collect();
        Ok(newest_first(drills, usize::MAX))
    }

    async fn set_in_drill(&self, user: &UserId, key: &LookupKey, in_drill: bool) -> Result<bool, StoreError> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&(user.clone(), key.clone())) {
            Some(entry) => {
                entry.in_drill = in_drill;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, user: &UserId, key: &LookupKey) -> Result<bool, StoreError> {
        let mut rows = self.rows.write().await;
        Ok(rows.remove(&(user.clone(), key.clone())).is_some())
    }

    async fn len(&self, user: &UserId) -> Result<usize, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.keys().filter(|(owner, _)| owner == user).count())
    }
}
