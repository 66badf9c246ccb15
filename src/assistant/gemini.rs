//! Gemini text-completion client
//!
//! Implements [`CompletionService`] over the `generateContent` REST method.

use log::debug;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use super::config::AssistantConfig;
use super::{CompletionRequest, CompletionService, ServiceError};
use crate::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

fn build_body(request: &CompletionRequest) -> GenerateContentRequest {
    GenerateContentRequest {
        system_instruction: Content::text(None, &request.system_instruction),
        contents: vec![Content::text(Some("user"), &request.prompt)],
    }
}

/// Extract the generated text from a `generateContent` response body
///
/// The text parts of the first candidate are concatenated. Returns `None`
/// when the response has no candidate or no text part.
pub fn parse_response(body: &str) -> std::result::Result<Option<String>, ServiceError> {
    let response: GenerateContentResponse = serde_json::from_str(body)?;

    let texts: Vec<String> = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if texts.is_empty() {
        Ok(None)
    } else {
        Ok(Some(texts.concat()))
    }
}

/// Blocking HTTP client for the Gemini API
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    endpoint: String,
}

impl GeminiClient {
    /// Create a client for `api_key` using the endpoint and timeout in `config`
    pub fn new(api_key: &str, config: &AssistantConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            api_key: api_key.to_string(),
            endpoint: config.endpoint.clone(),
        })
    }

    /// URL of the `generateContent` method for `model`
    pub fn url_for(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, model)
    }
}

impl CompletionService for GeminiClient {
    fn generate(
        &self,
        request: &CompletionRequest,
    ) -> std::result::Result<Option<String>, ServiceError> {
        let url = self.url_for(&request.model);
        debug!("POST {} ({} prompt chars)", url, request.prompt.len());

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&build_body(request))
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_response(&body)
    }
}
