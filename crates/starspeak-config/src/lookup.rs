use serde::{Deserialize, Serialize};

fn default_mode() -> String {
    "ai".to_string()
}

fn default_dedupe() -> bool {
    true
}

fn default_history_limit() -> usize {
    50
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LookupConfig {
    /// "ai" or "offline"
    #[serde(default = "default_mode")]
    pub mode: String,
    /// Collapse concurrent identical lookups into one generator call
    #[serde(default = "default_dedupe")]
    pub dedupe_inflight: bool,
    /// Mark fresh lookups for drilling
    #[serde(default)]
    pub add_to_drill: bool,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            dedupe_inflight: default_dedupe(),
            add_to_drill: false,
            history_limit: default_history_limit(),
        }
    }
}

impl LookupConfig {
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(mode) = var("STARSPEAK_LOOKUP_MODE") {
            self.mode = mode;
        }
    }
}
