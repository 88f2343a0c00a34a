//! groundrag-llm
//!
//! [`Generator`] implementations: an OpenAI-compatible chat-completions
//! client (Groq by default) and a disabled generator for extractive-only runs.

use std::time::Duration;

use anyhow::{bail, ensure, Context, Result};
use async_trait::async_trait;
use groundrag_core::config::GeneratorSettings;
use groundrag_core::traits::Generator;
use groundrag_core::types::GenerationRequest;
use serde_json::{json, Value};
use tracing::debug;

/// Chat-completions client for any OpenAI-compatible endpoint.
pub struct OpenAiCompatibleGenerator {
    name: String,
    base_url: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl OpenAiCompatibleGenerator {
    pub fn new(base_url: &str, model: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let client = reqwest::Client::builder().timeout(timeout).build().context("building HTTP client")?;
        let name = if base_url.contains("groq.com") { "groq" } else { "openai-compatible" };
        Ok(Self { name: name.to_string(), base_url, model: model.to_string(), api_key, client })
    }

    pub fn from_settings(settings: &GeneratorSettings) -> Result<Self> {
        Self::new(
            &settings.base_url,
            &settings.model,
            settings.resolve_api_key(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn apply_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) if !key.is_empty() => req.bearer_auth(key),
            _ => req,
        }
    }
}

/// Request body in the standard OpenAI format.
pub fn request_body(model: &str, request: &GenerationRequest) -> Value {
    json!({
        "model": model,
        "temperature": request.temperature,
        "max_tokens": request.max_tokens,
        "messages": [
            { "role": "system", "content": request.system_prompt },
            { "role": "user", "content": request.user_prompt },
        ],
    })
}

/// `choices[0].message.content`; a missing choice or null content reads as
/// empty text, which the engine treats as "nothing found".
pub fn parse_content(body: &Value) -> Result<String> {
    ensure!(body.is_object(), "response body is not a JSON object");
    let content = body["choices"].get(0).and_then(|choice| choice["message"]["content"].as_str());
    Ok(content.unwrap_or_default().trim().to_string())
}

#[async_trait]
impl Generator for OpenAiCompatibleGenerator {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let req = self.client.post(&url).json(&request_body(&self.model, request));
        let resp = self
            .apply_auth(req)
            .send()
            .await
            .with_context(|| format!("{} connection failed ({url})", self.name))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            bail!("{} API error {}: {}", self.name, status, text);
        }
        let body: Value = resp.json().await.with_context(|| format!("{} returned invalid JSON", self.name))?;
        let content = parse_content(&body)?;
        debug!(generator = %self.name, model = %self.model, chars = content.chars().count(), "completion received");
        Ok(content)
    }
}

/// Always fails, so the engine answers from extraction alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledGenerator;

#[async_trait]
impl Generator for DisabledGenerator {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn generate(&self, _request: &GenerationRequest) -> Result<String> {
        bail!("generation is disabled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerationRequest {
        GenerationRequest { system_prompt: "sys".into(), user_prompt: "user".into(), temperature: 0.0, max_tokens: 600 }
    }

    #[test]
    fn body_has_system_then_user() {
        let body = request_body("llama", &request());
        assert_eq!(body["model"], "llama");
        assert_eq!(body["max_tokens"], 600);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "user");
    }

    #[test]
    fn content_is_trimmed_and_null_is_empty() {
        let ok = json!({ "choices": [ { "message": { "content": "  Pasal 28 \n" } } ] });
        assert_eq!(parse_content(&ok).unwrap(), "Pasal 28");
        let null = json!({ "choices": [ { "message": { "content": null } } ] });
        assert_eq!(parse_content(&null).unwrap(), "");
    }

    #[test]
    fn missing_choice_reads_as_empty() {
        assert_eq!(parse_content(&json!({ "choices": [] })).unwrap(), "");
        assert_eq!(parse_content(&json!({ "id": "x" })).unwrap(), "");
        assert!(parse_content(&json!("oops")).is_err());
    }

    #[test]
    fn groq_urls_are_named_groq() {
        let g = OpenAiCompatibleGenerator::new("https://api.groq.com/openai/v1/", "m", None, Duration::from_secs(1)).unwrap();
        assert_eq!(g.name(), "groq");
        assert_eq!(g.base_url, "https://api.groq.com/openai/v1");
    }

    #[tokio::test]
    async fn disabled_generator_always_errors() {
        assert!(DisabledGenerator.generate(&request()).await.is_err());
    }
}
