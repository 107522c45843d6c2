use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::LookupError;
use crate::preprocess::normalize_query;

/// Shown when a source has no Chinese gloss for a word
pub const NO_TRANSLATION: &str = "暂无中文释义";

/// Shown when a source has no definition for a word
pub const NO_DEFINITION: &str = "No definition available";

/// Canonical resolved record, one per (user, key)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    /// Display form, keeps original casing
    pub word: String,
    /// IPA, empty for full sentences
    #[serde(default)]
    pub phonetic: String,
    #[serde(default)]
    pub definition: String,
    pub translation_cn: String,
    #[serde(default)]
    pub example: String,
    /// Milliseconds since the Unix epoch
    #[serde(default)]
    pub added_at: u64,
    #[serde(default)]
    pub in_drill: bool,
}

/// Current wall-clock time in epoch milliseconds
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Normalized lookup key. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LookupKey(String);

impl LookupKey {
    /// Normalize a raw query into a key
    pub fn parse(query: &str) -> Result<Self, LookupError> {
        let normalized = normalize_query(query);
        if normalized.is_empty() {
            return Err(LookupError::InvalidQuery);
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LookupKey {
    type Error = LookupError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LookupKey> for String {
    fn from(key: LookupKey) -> Self {
        key.0
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque user identity supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupMode {
    /// Cache and dictionary sources only
    Offline,
    /// Fall back to AI generation when nothing else matches
    #[default]
    Ai,
}

impl LookupMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupMode::Offline => "offline",
            LookupMode::Ai => "ai",
        }
    }
}

impl FromStr for LookupMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "offline" => Ok(LookupMode::Offline),
            "ai" => Ok(LookupMode::Ai),
            other => Err(format!("unknown lookup mode: {other}")),
        }
    }
}

impl fmt::Display for LookupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a resolved entry came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Cache,
    Dictionary { source: String },
    Ai,
}
