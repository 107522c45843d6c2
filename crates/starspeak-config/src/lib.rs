use std::env;

use serde::{Deserialize, Serialize};

use self::ai::AiConfig;
use self::dictionary::DictionaryConfig;
use self::lookup::LookupConfig;
use self::store::StoreConfig;

pub mod ai;
pub mod dictionary;
pub mod lookup;
pub mod store;

fn default_user() -> String {
    "local".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ai: AiConfig,
    pub dictionary: DictionaryConfig,
    pub store: StoreConfig,
    pub lookup: LookupConfig,

    /// User id used when none is given on the command line
    #[serde(default = "default_user")]
    pub default_user: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ai: AiConfig::default(),
            dictionary: DictionaryConfig::default(),
            store: StoreConfig::default(),
            lookup: LookupConfig::default(),
            default_user: default_user(),
        }
    }
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Layer `STARSPEAK_*` variables over a loaded config
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| env::var(name).ok());
    }

    /// Same as `apply_env`, reading variables through `var`
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        self.ai.apply_overrides(&var);
        self.store.apply_overrides(&var);
        self.lookup.apply_overrides(&var);
        if let Some(user) = var("STARSPEAK_USER") {
            self.default_user = user;
        }
    }
}
