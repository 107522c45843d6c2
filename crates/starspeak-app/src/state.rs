use std::sync::{Arc, Mutex};
use std::time::Duration;

use starspeak_ai::{ChatTurn, Coach, GeminiProxyClient};
use starspeak_config::Config;
use starspeak_config::ai::AiConfig;
use starspeak_config::store::StoreBackend;
use starspeak_core::store::{MemoryWordStore, WordStore};
use starspeak_core::types::{LookupMode, UserId};
use starspeak_core::{LookupResolver, ResolverOptions};
use starspeak_dictionary::DictionaryLoader;
use starspeak_store::JsonFileWordStore;
use tokio::sync::{Mutex as AsyncMutex, RwLock};
use tokio_util::sync::CancellationToken;

/// Drill round waiting for an answer
#[derive(Debug, Clone)]
pub struct PracticeRound {
    pub scenario: String,
    pub words: Vec<String>,
}

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub resolver: LookupResolver,
    pub user: UserId,
    pub default_mode: LookupMode,
    /// Conversation helpers; absent when AI is disabled
    pub coach: Option<Arc<dyn Coach>>,
    pub practice: AsyncMutex<Option<PracticeRound>>,
    pub conversation: AsyncMutex<Vec<ChatTurn>>,
    /// Token of the lookup currently on screen
    pending: Mutex<Option<CancellationToken>>,
}

fn gemini_client(ai: &AiConfig) -> anyhow::Result<Arc<GeminiProxyClient>> {
    match ai.provider.as_str() {
        "gemini-proxy" => Ok(Arc::new(GeminiProxyClient::new(
            ai.api_url.clone(),
            ai.api_key.clone(),
            Duration::from_secs(ai.timeout_seconds),
        )?)),
        other => anyhow::bail!("Unknown AI provider '{other}'"),
    }
}

impl AppState {
    /// Wire store, dictionaries and AI client from config
    pub async fn build(config: Config, user: UserId, mode: LookupMode) -> anyhow::Result<Self> {
        let generator = gemini_client(&config.ai)?;

        let store: Arc<dyn WordStore> = match config.store.backend {
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory store, history is lost on exit");
                Arc::new(MemoryWordStore::new())
            }
            StoreBackend::File => Arc::new(JsonFileWordStore::open(&config.store.data_dir).await?),
        };

        // Dictionary files can be large, keep them off the async workers
        let dictionary_config = config.dictionary.clone();
        let dictionary = tokio::task::spawn_blocking(move || DictionaryLoader::load_all(&dictionary_config)).await?;

        let options = ResolverOptions {
            dedupe_inflight: config.lookup.dedupe_inflight,
        };
        let resolver = LookupResolver::with_options(store, dictionary, generator.clone(), options);

        let (default_mode, coach) = if config.ai.enabled {
            (mode, Some(generator as Arc<dyn Coach>))
        } else {
            tracing::warn!("AI disabled, lookups are offline only");
            (LookupMode::Offline, None)
        };

        let mut state = Self::from_parts(config, resolver, user, default_mode);
        state.coach = coach;
        Ok(state)
    }

    pub fn from_parts(config: Config, resolver: LookupResolver, user: UserId, default_mode: LookupMode) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            resolver,
            user,
            default_mode,
            coach: None,
            practice: AsyncMutex::new(None),
            conversation: AsyncMutex::new(Vec::new()),
            pending: Mutex::new(None),
        }
    }

    pub fn with_coach(mut self, coach: Arc<dyn Coach>) -> Self {
        self.coach = Some(coach);
        self
    }

    /// Start a new lookup, cancelling the one it replaces
    pub fn begin_lookup(&self) -> CancellationToken {
        let token = CancellationToken::new();
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = pending.replace(token.clone()) {
            previous.cancel();
        }
        token
    }
}
