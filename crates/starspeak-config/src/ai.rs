use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_provider() -> String {
    "gemini-proxy".to_string()
}

fn default_api_url() -> String {
    "http://localhost:8888/.netlify/functions/gemini-proxy".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AiConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Proxy endpoint accepting `{action, payload}` bodies
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Optional, the proxy usually holds the model key itself
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            provider: default_provider(),
            api_url: default_api_url(),
            api_key: String::new(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl AiConfig {
    /// Apply `STARSPEAK_AI_*` and `STARSPEAK_API_KEY` overrides
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("STARSPEAK_AI_URL") {
            self.api_url = url;
        }
        if let Some(key) = var("STARSPEAK_API_KEY") {
            self.api_key = key;
        }
        if let Some(timeout) = var("STARSPEAK_AI_TIMEOUT_SECONDS").and_then(|v| v.parse().ok()) {
            self.timeout_seconds = timeout;
        }
    }
}
