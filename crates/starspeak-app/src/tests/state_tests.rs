use starspeak_config::Config;
use starspeak_config::dictionary::{SourceConfig, SourceFormat};
use starspeak_config::store::StoreBackend;
use starspeak_core::types::{LookupMode, UserId};
use tempfile::TempDir;

use crate::state::AppState;

fn memory_config() -> Config {
    let mut config = Config::default();
    config.store.backend = StoreBackend::Memory;
    config
}

#[tokio::test]
async fn build_loads_configured_dictionaries() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("toefl.txt");
    std::fs::write(&path, "abandon\tvt. 放弃\nabide\tv. 遵守\n").unwrap();

    let mut config = memory_config();
    config.dictionary.sources.push(SourceConfig {
        name: "TOEFL".to_string(),
        path: path.to_string_lossy().to_string(),
        priority: 1,
        format: SourceFormat::Tsv,
        description: String::new(),
    });

    let state = AppState::build(config, UserId::new("tester"), LookupMode::Ai)
        .await
        .unwrap();

    let stats = state.resolver.dictionary().stats();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].entry_count, 2);
    assert!(state.coach.is_some());
    assert_eq!(state.default_mode, LookupMode::Ai);
}

#[tokio::test]
async fn unknown_provider_fails_build() {
    let mut config = memory_config();
    config.ai.provider = "carrier-pigeon".to_string();

    let result = AppState::build(config, UserId::new("tester"), LookupMode::Ai).await;

    match result {
        Err(e) => assert!(e.to_string().contains("carrier-pigeon")),
        Ok(_) => panic!("build should reject the provider"),
    }
}

#[tokio::test]
async fn disabled_ai_builds_offline_without_coach() {
    let mut config = memory_config();
    config.ai.enabled = false;

    let state = AppState::build(config, UserId::new("tester"), LookupMode::Ai)
        .await
        .unwrap();

    assert_eq!(state.default_mode, LookupMode::Offline);
    assert!(state.coach.is_none());
}
