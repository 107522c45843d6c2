use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use starspeak_core::generator::GenerateError;

use crate::client::GeminiProxyClient;

/// Natural phrasing for something the student wants to say
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SosSuggestion {
    pub native: String,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DrillVerdict {
    pub passed: bool,
    #[serde(default)]
    pub feedback: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }

    /// Gemini chat history shape: `{role, parts: [{text}]}`
    pub fn to_wire(&self) -> serde_json::Value {
        serde_json::json!({
            "role": self.role,
            "parts": [{ "text": self.text }],
        })
    }
}

#[derive(Deserialize)]
struct ScenarioResponse {
    #[serde(default)]
    scenario: String,
}

#[derive(Deserialize)]
struct TextResponse {
    #[serde(default)]
    text: String,
}

const FALLBACK_SCENARIO: &str = "Tell me about your day.";

/// Speaking-practice helpers beyond word lookup
#[async_trait]
pub trait Coach: Send + Sync {
    /// Turn a literal (often native-language) query into colloquial English
    async fn sos(&self, query: &str) -> Result<SosSuggestion, GenerateError>;

    /// One-line roleplay setup that forces use of `words`
    async fn drill_scenario(&self, words: &[String]) -> Result<String, GenerateError>;

    /// Grade a spoken answer to a drill scenario
    async fn check_drill(&self, scenario: &str, user_said: &str) -> Result<DrillVerdict, GenerateError>;

    /// Next conversational reply. `history` ends with the user's new message.
    async fn free_talk(&self, history: &[ChatTurn]) -> Result<String, GenerateError>;
}

#[async_trait]
impl Coach for GeminiProxyClient {
    async fn sos(&self, query: &str) -> Result<SosSuggestion, GenerateError> {
        let suggestion: SosSuggestion = self
            .invoke("sos", serde_json::json!({ "query": query }))
            .await?;

        if suggestion.native.trim().is_empty() {
            return Err(GenerateError::Malformed("empty SOS suggestion".to_string()));
        }
        Ok(suggestion)
    }

    async fn drill_scenario(&self, words: &[String]) -> Result<String, GenerateError> {
        let response: ScenarioResponse = self
            .invoke("drill-scenario", serde_json::json!({ "words": words }))
            .await?;

        let scenario = response.scenario.trim();
        if scenario.is_empty() {
            return Ok(FALLBACK_SCENARIO.to_string());
        }
        Ok(scenario.to_string())
    }

    async fn check_drill(&self, scenario: &str, user_said: &str) -> Result<DrillVerdict, GenerateError> {
        self.invoke(
            "drill-check",
            serde_json::json!({ "scenario": scenario, "userSaid": user_said }),
        )
        .await
    }

    async fn free_talk(&self, history: &[ChatTurn]) -> Result<String, GenerateError> {
        let message = match history.last() {
            Some(turn) if turn.role == ChatRole::User => turn.text.clone(),
            _ => return Err(GenerateError::Malformed("history must end with a user turn".to_string())),
        };
        let wire: Vec<_> = history.iter().map(ChatTurn::to_wire).collect();

        let response: TextResponse = self
            .invoke(
                "freetalk",
                serde_json::json!({ "message": message, "history": wire }),
            )
            .await?;

        Ok(response.text.trim().to_string())
    }
}
