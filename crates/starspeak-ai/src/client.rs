use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use starspeak_core::generator::{AiGenerator, GenerateError, GeneratedEntry};

use crate::parse::decode_body;

/// Client for the serverless proxy in front of the Gemini API
#[derive(Clone)]
pub struct GeminiProxyClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct ProxyRequest<'a> {
    action: &'a str,
    payload: serde_json::Value,
}

pub(crate) fn map_reqwest_error(e: reqwest::Error) -> GenerateError {
    if e.is_timeout() {
        GenerateError::Timeout
    } else {
        GenerateError::Network(e.to_string())
    }
}

impl GeminiProxyClient {
    pub fn new(api_url: String, api_key: String, timeout: Duration) -> Result<Self, GenerateError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(map_reqwest_error)?;

        Ok(Self {
            client,
            api_url,
            api_key,
        })
    }

    /// POST `{action, payload}` and decode the JSON result
    pub(crate) async fn invoke<T: DeserializeOwned>(
        &self,
        action: &str,
        payload: serde_json::Value,
    ) -> Result<T, GenerateError> {
        let request = ProxyRequest { action, payload };

        let mut builder = self.client.post(&self.api_url).json(&request);
        if !self.api_key.is_empty() {
            builder = builder.bearer_auth(&self.api_key);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();

        if status == 429 {
            return Err(GenerateError::RateLimited);
        }

        if status == 401 || status == 403 {
            return Err(GenerateError::Authentication);
        }

        if !status.is_success() {
            tracing::warn!("AI proxy returned HTTP {} for '{}'", status, action);
            return Err(GenerateError::Api {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(map_reqwest_error)?;
        decode_body(&body)
    }
}

#[async_trait]
impl AiGenerator for GeminiProxyClient {
    async fn lookup(&self, query: &str) -> Result<GeneratedEntry, GenerateError> {
        tracing::debug!("AI lookup for '{}'", query);
        self.invoke("lookup", serde_json::json!({ "word": query }))
            .await
    }

    fn name(&self) -> &str {
        "gemini-proxy"
    }
}
