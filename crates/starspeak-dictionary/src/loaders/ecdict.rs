use serde::Deserialize;
use starspeak_core::dictionary::SourceRecord;

use crate::error::LoadError;

// ECDICT exports come either as a bare array or wrapped in `{"words": [...]}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EcdictJson {
    Wrapped { words: Vec<EcdictRow> },
    Bare(Vec<EcdictRow>),
}

#[derive(Debug, Deserialize)]
struct EcdictRow {
    word: String,
    #[serde(default)]
    display_word: Option<String>,
    #[serde(default)]
    phonetic: Option<String>,
    #[serde(default)]
    definition: Option<String>,
    #[serde(default)]
    translation: Option<String>,
    #[serde(default)]
    example: Option<String>,
    #[serde(default)]
    pos: Option<String>,
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.replace("\\n", "\n").trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse ECDICT-style JSON into source records
pub fn parse_ecdict_json(json: &str) -> Result<Vec<SourceRecord>, LoadError> {
    let rows = match serde_json::from_str::<EcdictJson>(json)? {
        EcdictJson::Wrapped { words } => words,
        EcdictJson::Bare(rows) => rows,
    };

    Ok(rows
        .into_iter()
        .filter(|row| !row.word.trim().is_empty())
        .map(|row| SourceRecord {
            word: row.word,
            display_word: clean(row.display_word),
            phonetic: clean(row.phonetic),
            definition: clean(row.definition),
            translation: clean(row.translation),
            example: clean(row.example),
            pos: clean(row.pos),
        })
        .collect())
}
