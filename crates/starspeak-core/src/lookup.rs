use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::dictionary::TieredDictionary;
use crate::error::{LookupError, PersistenceFailed};
use crate::generator::{AiGenerator, GenerateError};
use crate::inflight::{InflightGuard, InflightLocks};
use crate::preprocess::{DefaultPreprocessor, Preprocessor};
use crate::store::WordStore;
use crate::types::{LookupKey, LookupMode, Origin, UserId, WordEntry, now_millis};

#[derive(Debug, Clone)]
pub struct ResolverOptions {
    /// Serialize concurrent lookups of the same (user, key)
    pub dedupe_inflight: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            dedupe_inflight: true,
        }
    }
}

/// A single resolution request
#[derive(Debug, Clone)]
pub struct LookupRequest {
    pub user: UserId,
    pub query: String,
    pub mode: LookupMode,
    /// Drill flag for freshly resolved entries
    pub in_drill: bool,
    pub cancel: Option<CancellationToken>,
}

impl LookupRequest {
    pub fn new(user: UserId, query: impl Into<String>, mode: LookupMode) -> Self {
        Self {
            user,
            query: query.into(),
            mode,
            in_drill: false,
            cancel: None,
        }
    }

    pub fn in_drill(mut self, in_drill: bool) -> Self {
        self.in_drill = in_drill;
        self
    }

    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// Outcome of a successful resolution.
///
/// `persistence` is the side channel for write-back failures: the entry is
/// valid but will not show up in history.
#[must_use]
#[derive(Debug)]
pub struct Resolved {
    pub entry: WordEntry,
    pub origin: Origin,
    pub persistence: Option<PersistenceFailed>,
}

impl Resolved {
    pub fn is_saved(&self) -> bool {
        self.persistence.is_none()
    }
}

/// Cache first, then tiered dictionaries, then AI generation
pub struct LookupResolver {
    store: Arc<dyn WordStore>,
    dictionary: TieredDictionary,
    generator: Arc<dyn AiGenerator>,
    inflight: InflightLocks,
    options: ResolverOptions,
}

/// Race a suspension point against the caller's cancellation token
async fn guarded<F: Future>(cancel: Option<&CancellationToken>, fut: F) -> Result<F::Output, LookupError> {
    match cancel {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => Err(LookupError::Cancelled),
            out = fut => Ok(out),
        },
        None => Ok(fut.await),
    }
}

impl LookupResolver {
    pub fn new(
        store: Arc<dyn WordStore>,
        dictionary: TieredDictionary,
        generator: Arc<dyn AiGenerator>,
    ) -> Self {
        Self::with_options(store, dictionary, generator, ResolverOptions::default())
    }

    pub fn with_options(
        store: Arc<dyn WordStore>,
        dictionary: TieredDictionary,
        generator: Arc<dyn AiGenerator>,
        options: ResolverOptions,
    ) -> Self {
        Self {
            store,
            dictionary,
            generator,
            inflight: InflightLocks::new(),
            options,
        }
    }

    pub fn store(&self) -> &Arc<dyn WordStore> {
        &self.store
    }

    pub fn dictionary(&self) -> &TieredDictionary {
        &self.dictionary
    }

    pub async fn resolve(&self, user: &UserId, query: &str, mode: LookupMode) -> Result<Resolved, LookupError> {
        self.resolve_request(LookupRequest::new(user.clone(), query, mode))
            .await
    }

    pub async fn resolve_request(&self, request: LookupRequest) -> Result<Resolved, LookupError> {
        let key = LookupKey::parse(&request.query)?;
        let query = DefaultPreprocessor.process(&request.query);
        let user = &request.user;
        let cancel = request.cancel.as_ref();

        let _guard: Option<InflightGuard> = if self.options.dedupe_inflight {
            Some(guarded(cancel, self.inflight.acquire(user, &key)).await?)
        } else {
            None
        };

        tracing::debug!("[{}] checking cache for '{}'", user, key);
        if let Some(entry) = self.cached(user, &key, cancel).await? {
            tracing::debug!("[{}] cache hit for '{}'", user, key);
            return Ok(Resolved {
                entry,
                origin: Origin::Cache,
                persistence: None,
            });
        }

        tracing::debug!("[{}] checking {} dictionary sources", user, self.dictionary.len());
        if let Some(hit) = guarded(cancel, self.dictionary.best(&key)).await? {
            tracing::info!("Resolved '{}' from source '{}'", key, hit.source);
            let entry = hit.record.to_word_entry(now_millis(), request.in_drill);
            let persistence = self.persist(user, &key, &entry).await;
            return Ok(Resolved {
                entry,
                origin: Origin::Dictionary { source: hit.source },
                persistence,
            });
        }

        if request.mode == LookupMode::Offline {
            tracing::debug!("[{}] '{}' not found offline", user, key);
            return Err(LookupError::NotFound { query });
        }

        tracing::debug!("[{}] generating '{}' with {}", user, query, self.generator.name());
        let generated = guarded(cancel, self.generator.lookup(&query)).await?;
        let generated = generated.inspect_err(|e| {
            tracing::warn!("Generator {} failed for '{}': {}", self.generator.name(), query, e);
        })?;

        if generated.is_empty() {
            return Err(GenerateError::Malformed(format!("empty record for '{query}'")).into());
        }

        let entry = generated.into_word_entry(&query, now_millis(), request.in_drill);
        tracing::info!("Resolved '{}' with AI as '{}'", key, entry.word);
        let persistence = self.persist(user, &key, &entry).await;

        Ok(Resolved {
            entry,
            origin: Origin::Ai,
            persistence,
        })
    }

    /// Read-only lookup: cache then dictionaries, never generates or writes
    pub async fn peek(&self, user: &UserId, query: &str) -> Result<Option<WordEntry>, LookupError> {
        let key = LookupKey::parse(query)?;

        if let Some(entry) = self.cached(user, &key, None).await? {
            return Ok(Some(entry));
        }

        Ok(self
            .dictionary
            .best(&key)
            .await
            .map(|hit| hit.record.to_word_entry(now_millis(), false)))
    }

    async fn cached(
        &self,
        user: &UserId,
        key: &LookupKey,
        cancel: Option<&CancellationToken>,
    ) -> Result<Option<WordEntry>, LookupError> {
        match guarded(cancel, self.store.get(user, key)).await? {
            Ok(entry) => Ok(entry),
            Err(e) => {
                tracing::warn!("Cache read failed for '{}', treating as miss: {}", key, e);
                Ok(None)
            }
        }
    }

    async fn persist(&self, user: &UserId, key: &LookupKey, entry: &WordEntry) -> Option<PersistenceFailed> {
        match self.store.upsert(user, key, entry).await {
            Ok(()) => {
                tracing::debug!("[{}] saved '{}'", user, key);
                None
            }
            Err(source) => {
                tracing::warn!("[{}] failed to save '{}': {}", user, key, source);
                Some(PersistenceFailed {
                    key: key.clone(),
                    source,
                })
            }
        }
    }
}
