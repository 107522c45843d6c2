//! Fakes for driving the event loop without network or disk

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;


use kanal::{AsyncReceiver, AsyncSender};
use starspeak_ai::{ChatTurn, Coach, DrillVerdict, SosSuggestion};
use starspeak_config::Config;
use starspeak_core::dictionary::SourceRecord;
use starspeak_core::generator::{AiGenerator, GenerateError, GeneratedEntry};
use starspeak_core::store::{MemoryWordStore, StoreError, WordStore};
use starspeak_core::types::{LookupKey, LookupMode, UserId, WordEntry};
use starspeak_core::{LookupResolver, TieredDictionary};
use starspeak_dictionary::StaticDictionary;

use crate::events::event_loop;
use crate::state::AppState;
use crate::types::AppEvent;

mod state_tests;

pub struct FakeGenerator {
    pub calls: AtomicUsize,
    pub delay: Duration,
    pub fail: bool,
}

impl FakeGenerator {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
            fail: false,
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self { delay, ..Self::new() }
    }

    pub fn failing() -> Self {
        Self { fail: true, ..Self::new() }
    }
}

#[async_trait::async_trait]
impl AiGenerator for FakeGenerator {
    async fn lookup(&self, query: &str) -> Result<GeneratedEntry, GenerateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        if self.fail {
            return Err(GenerateError::Timeout);
        }

        let word = if query == "尴尬" { "awkward" } else { query };
        Ok(GeneratedEntry {
            word: word.to_string(),
            phonetic: String::new(),
            definition: format!("generated {word}"),
            translation_cn: "生成".to_string(),
            example: String::new(),
        })
    }

    fn name(&self) -> &str {
        "fake"
    }
}

/// Coach that passes any answer mentioning `pass_word`
pub struct FakeCoach {
    pub pass_word: String,
    pub scenario_words: Mutex<Vec<Vec<String>>>,
    pub history_lens: Mutex<Vec<usize>>,
    pub fail_talk: bool,
}

impl FakeCoach {
    pub fn new(pass_word: &str) -> Self {
        Self {
            pass_word: pass_word.to_string(),
            scenario_words: Mutex::new(Vec::new()),
            history_lens: Mutex::new(Vec::new()),
            fail_talk: false,
        }
    }
}

#[async_trait::async_trait]
impl Coach for FakeCoach {
    async fn sos(&self, query: &str) -> Result<SosSuggestion, GenerateError> {
        Ok(SosSuggestion {
            native: format!("native {query}"),
            explanation: String::new(),
        })
    }

    async fn drill_scenario(&self, words: &[String]) -> Result<String, GenerateError> {
        self.scenario_words.lock().unwrap().push(words.to_vec());
        Ok("You are at a cafe and spilled your drink.".to_string())
    }

    async fn check_drill(&self, _scenario: &str, user_said: &str) -> Result<DrillVerdict, GenerateError> {
        let passed = user_said.contains(&self.pass_word);
        Ok(DrillVerdict {
            passed,
            feedback: if passed { "Natural!" } else { "Use the word." }.to_string(),
        })
    }

    async fn free_talk(&self, history: &[ChatTurn]) -> Result<String, GenerateError> {
        self.history_lens.lock().unwrap().push(history.len());
        if self.fail_talk {
            return Err(GenerateError::RateLimited);
        }
        let last = history.last().map(|t| t.text.clone()).unwrap_or_default();
        Ok(format!("You said: {last}"))
    }
}

/// Reads from memory, refuses every write
pub struct ReadOnlyStore(MemoryWordStore);

#[async_trait::async_trait]
impl WordStore for ReadOnlyStore {
    async fn get(&self, user: &UserId, key: &LookupKey) -> Result<Option<WordEntry>, StoreError> {
        self.0.get(user, key).await
    }

    async fn upsert(&self, _user: &UserId, _key: &LookupKey, _entry: &WordEntry) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("disk full".to_string()))
    }

    async fn recent(&self, user: &UserId, limit: usize) -> Result<Vec<WordEntry>, StoreError> {
        self.0.recent(user, limit).await
    }

    async fn drill_words(&self, user: &UserId) -> Result<Vec<WordEntry>, StoreError> {
        self.0.drill_words(user).await
    }

    async fn set_in_drill(&self, _user: &UserId, _key: &LookupKey, _in_drill: bool) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("disk full".to_string()))
    }

    async fn delete(&self, _user: &UserId, _key: &LookupKey) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("disk full".to_string()))
    }

    async fn len(&self, user: &UserId) -> Result<usize, StoreError> {
        self.0.len(user).await
    }
}

pub fn dictionary() -> TieredDictionary {
    let records = vec![
        SourceRecord {
            word: "piece of cake".to_string(),
            display_word: Some("Piece of cake".to_string()),
            definition: Some("something very easy".to_string()),
            translation: Some("小菜一碟".to_string()),
            ..Default::default()
        },
        SourceRecord {
            word: "tea".to_string(),
            translation: Some("茶".to_string()),
            pos: Some("n".to_string()),
            ..Default::default()
        },
        SourceRecord {
            word: "team".to_string(),
            translation: Some("团队".to_string()),
            ..Default::default()
        },
    ];

    TieredDictionary::new().with_source(Arc::new(
        StaticDictionary::from_records("Core idioms", 1, records).with_description("test words"),
    ))
}

pub fn app_state(store: Arc<dyn WordStore>, generator: Arc<FakeGenerator>) -> AppState {
    let resolver = LookupResolver::new(store, dictionary(), generator);
    AppState::from_parts(Config::default(), resolver, UserId::new("tester"), LookupMode::Ai)
}

pub fn state_with(store: Arc<dyn WordStore>, generator: Arc<FakeGenerator>) -> Arc<AppState> {
    Arc::new(app_state(store, generator))
}

/// Event loop running in the background with both channel ends exposed
pub struct Harness {
    pub input: AsyncSender<AppEvent>,
    pub output: AsyncReceiver<AppEvent>,
}

pub fn start(state: Arc<AppState>) -> Harness {
    let (input_tx, input_rx) = kanal::unbounded_async();
    let (output_tx, output_rx) = kanal::unbounded_async();

    tokio::spawn(async move {
        if let Err(e) = event_loop(state, input_rx, output_tx).await {
            tracing::error!("event_loop exited: {e}");
        }
    });

    Harness {
        input: input_tx,
        output: output_rx,
    }
}

impl Harness {
    pub async fn send(&self, event: AppEvent) {
        self.input.send(event).await.expect("send failed");
    }

    pub async fn lookup(&self, query: &str) {
        self.send(AppEvent::Lookup {
            query: query.to_string(),
            mode: None,
        })
        .await;
    }

    pub async fn next(&self) -> AppEvent {
        match tokio::time::timeout(Duration::from_secs(2), self.output.recv()).await {
            Ok(Ok(event)) => event,
            Ok(Err(e)) => panic!("Channel error: {}", e),
            Err(_) => panic!("Timeout - event never arrived!"),
        }
    }

    /// True when nothing else shows up for `wait`
    pub async fn quiet_for(&self, wait: Duration) -> bool {
        tokio::time::timeout(wait, self.output.recv()).await.is_err()
    }
}
