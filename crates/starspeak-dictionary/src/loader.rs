use std::path::Path;
use std::sync::Arc;

use starspeak_config::dictionary::{DictionaryConfig, SourceConfig, SourceFormat};
use starspeak_core::dictionary::TieredDictionary;

use crate::dictionary::StaticDictionary;
use crate::error::LoadError;
use crate::loaders::{parse_ecdict_json, parse_vocab_list};

pub struct DictionaryLoader;

impl DictionaryLoader {
    /// Load one configured source from disk
    pub fn load_source(source: &SourceConfig) -> Result<StaticDictionary, LoadError> {
        let path = Path::new(&source.path);
        if !path.exists() {
            return Err(LoadError::FileNotFound(source.path.clone()));
        }

        tracing::info!("Loading dictionary '{}' from {}", source.name, path.display());
        let content = std::fs::read_to_string(path)?;
        let dict = Self::load_str(source, &content)?;
        tracing::info!("Loaded {} entries into '{}'", dict.entry_count(), source.name);
        Ok(dict)
    }

    /// Parse already-read source content
    pub fn load_str(source: &SourceConfig, content: &str) -> Result<StaticDictionary, LoadError> {
        let records = match source.format {
            SourceFormat::Json => parse_ecdict_json(content)?,
            SourceFormat::Tsv => parse_vocab_list(content),
        };

        Ok(StaticDictionary::from_records(source.name.clone(), source.priority, records)
            .with_description(source.description.clone()))
    }

    /// Build the tiered registry, skipping sources that fail to load
    pub fn load_all(config: &DictionaryConfig) -> TieredDictionary {
        let mut tiered = TieredDictionary::new();

        if !config.enabled {
            tracing::warn!("Dictionary disabled, lookups go straight to AI");
            return tiered;
        }

        for source in &config.sources {
            match Self::load_source(source) {
                Ok(dict) => tiered.register(Arc::new(dict)),
                Err(e) => tracing::warn!("Failed to load dictionary '{}': {}", source.name, e),
            }
        }

        tiered
    }
}
