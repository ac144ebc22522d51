use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::LlmSettings;
use crate::core::capabilities::{
    CapabilityError, ParameterExtraction, QueryExpansion, SuggestionProvider,
};
use crate::models::ExtractedParameters;

/// Attempts before giving up on malformed model output
const MAX_PARSE_ATTEMPTS: usize = 3;

const MAX_DID_YOU_MEAN: usize = 3;
const MAX_RELATED_SEARCHES: usize = 5;

/// Errors that can occur when calling the language-model capability
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl From<LlmError> for CapabilityError {
    fn from(value: LlmError) -> Self {
        match value {
            LlmError::RequestError(e) => CapabilityError::Transport(e.to_string()),
            LlmError::ApiError(msg) => CapabilityError::Unavailable(msg),
            LlmError::InvalidResponse(msg) => CapabilityError::InvalidResponse(msg),
        }
    }
}

/// Client for the language-model capability
///
/// Backs three pipeline stages over one chat-completions API: structured
/// parameter extraction, query expansion, and query suggestions
/// (did-you-mean, related searches).
pub struct LlmClient {
    api_base: String,
    api_key: String,
    model: String,
    temperature: f64,
    client: Client,
}

impl LlmClient {
    pub fn new(settings: &LlmSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            client,
        }
    }

    async fn chat(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.api_base);
        let body = serde_json::json!({
            "model": self.model,
            "temperature": self.temperature,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LlmError::ApiError(format!(
                "chat request returned {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        parse_choice_content(&json)
    }
}

#[async_trait]
impl ParameterExtraction for LlmClient {
    async fn extract(&self, raw_query: &str) -> Result<ExtractedParameters, CapabilityError> {
        let system = "Extract search filters from an event-planning query. \
                      Respond with only a JSON object with these keys, using null \
                      when a value is not present: budget_max (number), \
                      capacity_min (integer), location (string), food_type \
                      (string), venue_type (string).";

        let mut last_error = LlmError::InvalidResponse("no attempts made".into());
        for _ in 0..MAX_PARSE_ATTEMPTS {
            let content = self.chat(system, raw_query).await.map_err(CapabilityError::from)?;
            match parse_parameters(&content) {
                Ok(params) => return Ok(params),
                Err(e) => last_error = e,
            }
        }

        Err(CapabilityError::from(last_error))
    }
}

#[async_trait]
impl QueryExpansion for LlmClient {
    async fn expand(&self, text: &str) -> Result<String, CapabilityError> {
        let system = "Expand this event-package search with a few closely \
                      related terms. Respond with only the expanded query text \
                      on a single line.";

        let content = self.chat(system, text).await.map_err(CapabilityError::from)?;
        let expanded = content.trim();
        if expanded.is_empty() {
            return Err(CapabilityError::InvalidResponse(
                "empty expansion".to_string(),
            ));
        }
        Ok(expanded.to_string())
    }
}

#[async_trait]
impl SuggestionProvider for LlmClient {
    async fn did_you_mean(&self, query: &str) -> Result<Vec<String>, CapabilityError> {
        let system = "The query below returned almost no event packages. \
                      Suggest up to 3 alternative queries. Respond with only a \
                      JSON array of strings.";

        let content = self.chat(system, query).await.map_err(CapabilityError::from)?;
        let alternatives = parse_string_array(&content).map_err(CapabilityError::from)?;
        Ok(alternatives.into_iter().take(MAX_DID_YOU_MEAN).collect())
    }

    async fn related_searches(&self, query: &str) -> Result<Vec<String>, CapabilityError> {
        let system = "Suggest up to 5 related event-package searches for the \
                      query below. Respond with only a JSON array of strings.";

        let content = self.chat(system, query).await.map_err(CapabilityError::from)?;
        let related = parse_string_array(&content).map_err(CapabilityError::from)?;
        Ok(related.into_iter().take(MAX_RELATED_SEARCHES).collect())
    }
}

/// Pull the first choice's message content out of a chat response
fn parse_choice_content(json: &Value) -> Result<String, LlmError> {
    json.get("choices")
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|msg| msg.get("content"))
        .and_then(|c| c.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| LlmError::InvalidResponse("missing message content".into()))
}

/// Wire shape the extraction prompt asks for
#[derive(Debug, Deserialize)]
struct RawParameters {
    #[serde(default)]
    budget_max: Option<f64>,
    #[serde(default)]
    capacity_min: Option<u32>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    food_type: Option<String>,
    #[serde(default)]
    venue_type: Option<String>,
}

fn parse_parameters(content: &str) -> Result<ExtractedParameters, LlmError> {
    let raw: RawParameters = serde_json::from_str(content.trim())
        .map_err(|e| LlmError::InvalidResponse(format!("parameters are not valid JSON: {}", e)))?;

    Ok(ExtractedParameters {
        budget_max: raw.budget_max,
        capacity_min: raw.capacity_min,
        location: raw.location,
        food_type: raw.food_type,
        venue_type: raw.venue_type,
    })
}

fn parse_string_array(content: &str) -> Result<Vec<String>, LlmError> {
    serde_json::from_str(content.trim())
        .map_err(|e| LlmError::InvalidResponse(format!("expected a JSON string array: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice_content() {
        let json = serde_json::json!({
            "choices": [
                { "message": { "content": "{\"budget_max\": 5000}" } }
            ]
        });
        let content = parse_choice_content(&json).expect("parse failed");
        assert_eq!(content, "{\"budget_max\": 5000}");
    }

    #[test]
    fn test_parse_choice_content_missing() {
        let json = serde_json::json!({ "choices": [] });
        assert!(parse_choice_content(&json).is_err());
    }

    #[test]
    fn test_parse_parameters_full() {
        let content = r#"{
            "budget_max": 5000,
            "capacity_min": 150,
            "location": "Austin",
            "food_type": "bbq",
            "venue_type": "outdoor"
        }"#;
        let params = parse_parameters(content).expect("parse failed");
        assert_eq!(params.budget_max, Some(5000.0));
        assert_eq!(params.capacity_min, Some(150));
        assert_eq!(params.location.as_deref(), Some("Austin"));
    }

    #[test]
    fn test_parse_parameters_nulls_become_absent() {
        let content = r#"{"budget_max": null, "capacity_min": null}"#;
        let params = parse_parameters(content).expect("parse failed");
        assert_eq!(params, ExtractedParameters::default());
    }

    #[test]
    fn test_parse_parameters_rejects_prose() {
        assert!(parse_parameters("Sure! Here are the filters:").is_err());
    }

    #[test]
    fn test_parse_string_array() {
        let strings = parse_string_array(r#"["barn wedding", "garden party"]"#).unwrap();
        assert_eq!(strings, vec!["barn wedding", "garden party"]);
    }

    #[tokio::test]
    async fn test_extract_parses_mock_response() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "choices": [
                { "message": { "content": "{\"budget_max\": 4000, \"food_type\": \"bbq\"}" } }
            ]
        });
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let settings = LlmSettings {
            api_base: server.url(),
            api_key: "test".to_string(),
            model: "test-model".to_string(),
            temperature: 0.0,
            timeout_ms: 5000,
        };
        let client = LlmClient::new(&settings);

        let params = client.extract("bbq under $4000").await.expect("extract failed");
        assert_eq!(params.budget_max, Some(4000.0));
        assert_eq!(params.food_type.as_deref(), Some("bbq"));
        mock.assert_async().await;
    }
}
