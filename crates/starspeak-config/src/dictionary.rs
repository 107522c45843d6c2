use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_priority() -> u32 {
    100
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// JSON array of records (ECDICT export)
    #[default]
    Json,
    /// `word<TAB>pos. definition` vocabulary lists
    Tsv,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SourceConfig {
    pub name: String,
    pub path: String,
    #[serde(default = "default_priority")]
    pub priority: u32,
    #[serde(default)]
    pub format: SourceFormat,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            sources: vec![],
        }
    }
}
