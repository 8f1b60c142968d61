use crate::traits::Translator;
use crate::types::{RelayError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    pub language: String,
    pub timeout_seconds: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            language: "German".to_string(),
            timeout_seconds: 60,
        }
    }
}

/// Translator backed by an OpenAI-compatible chat completions endpoint.
pub struct LlmTranslator {
    client: Client,
    config: TranslatorConfig,
}

impl LlmTranslator {
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { client, config })
    }

    fn system_prompt(&self) -> String {
        format!(
            "Translate the following HTML into {}. Keep every tag, attribute and link unchanged. \
             Reply with the translated HTML only.",
            self.config.language
        )
    }
}

#[async_trait]
impl Translator for LlmTranslator {
    fn translator_name(&self) -> String {
        format!("LLM translator ({})", self.config.model)
    }

    async fn translate(&self, text: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.config.api_base.trim_end_matches('/'));
        let payload = json!({
            "model": self.config.model,
            "temperature": 0.0,
            "messages": [
                { "role": "system", "content": self.system_prompt() },
                { "role": "user", "content": text },
            ],
        });

        debug!("Requesting translation of {} bytes into {}", text.len(), self.config.language);
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "unknown".to_string());
            return Err(RelayError::Translation(format!(
                "request failed ({}): {}",
                status, body
            )));
        }

        let value: Value = response.json().await?;
        extract_chat_message(&value)
            .ok_or_else(|| RelayError::Translation("response carried no message".to_string()))
    }
}

fn extract_chat_message(value: &Value) -> Option<String> {
    let choices = value.get("choices")?.as_array()?;
    let first = choices.first()?;
    let message = first.get("message")?;
    message.get("content")?.as_str().map(|v| v.to_string())
}
