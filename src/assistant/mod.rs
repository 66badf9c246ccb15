//! Conversational assistant bridge
//!
//! Turns one user question into one answer by delegating to an external
//! text-completion service under a fixed astronomy-educator persona.
//!
//! The bridge never surfaces a technical failure: [`AssistantBridge::ask`]
//! maps every error to a fixed, user-displayable message.
//! [`AssistantBridge::try_ask`] exposes the underlying [`AssistantError`]
//! for callers that want to distinguish the cases.
//!
//! The bridge holds no session state. The completion service is built once
//! from [`AssistantConfig`] and injected; tests substitute their own
//! [`CompletionService`].

pub mod config;
pub mod gemini;

use std::fmt;
use std::sync::Arc;

use log::{debug, error, warn};
use thiserror::Error;

pub use config::AssistantConfig;
pub use gemini::GeminiClient;

/// Persona and style instruction sent with every prompt
pub const PERSONA: &str = "You are a friendly, enthusiastic astronomy educator for beginners. Keep answers concise (under 100 words), engaging, and easy to understand. Use emojis occasionally.";

/// Reply when no credential is configured
pub const UNCONFIGURED_REPLY: &str = "AI service is not configured. Please check your API key.";
/// Reply when the service answered without any text
pub const EMPTY_RESULT_REPLY: &str =
    "I couldn't generate a response about that celestial object right now.";
/// Reply when the service call failed
pub const SERVICE_ERROR_REPLY: &str =
    "Sorry, there was a disturbance in the space-time continuum (API Error).";
/// Reply to a blank prompt; no service call is made
pub const EMPTY_PROMPT_REPLY: &str = "Ask me anything about the solar system! 🌌";

/// One completion call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub system_instruction: String,
}

impl CompletionRequest {
    pub fn new(model: &str, prompt: &str, system_instruction: &str) -> Self {
        Self {
            model: model.to_string(),
            prompt: prompt.to_string(),
            system_instruction: system_instruction.to_string(),
        }
    }
}

/// Failure of the external completion service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Why the bridge could not produce a real answer
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("no API credential configured")]
    Unconfigured,

    #[error("service returned no text")]
    EmptyResult,

    #[error("completion service failed: {0}")]
    Service(#[from] ServiceError),
}

impl AssistantError {
    /// Fixed user-facing message for this failure
    pub fn reply(&self) -> &'static str {
        match self {
            AssistantError::EmptyPrompt => EMPTY_PROMPT_REPLY,
            AssistantError::Unconfigured => UNCONFIGURED_REPLY,
            AssistantError::EmptyResult => EMPTY_RESULT_REPLY,
            AssistantError::Service(_) => SERVICE_ERROR_REPLY,
        }
    }
}

/// A text-completion backend
///
/// `Ok(None)` means the call succeeded but produced no text.
pub trait CompletionService: Send + Sync {
    fn generate(&self, request: &CompletionRequest) -> Result<Option<String>, ServiceError>;
}

/// Stateless question/answer bridge over an optional completion service
#[derive(Clone)]
pub struct AssistantBridge {
    service: Option<Arc<dyn CompletionService>>,
    model: String,
}

impl fmt::Debug for AssistantBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssistantBridge")
            .field("configured", &self.is_configured())
            .field("model", &self.model)
            .finish()
    }
}

impl AssistantBridge {
    /// Create a bridge; `None` makes every question answer with
    /// [`UNCONFIGURED_REPLY`]
    pub fn new(service: Option<Arc<dyn CompletionService>>) -> Self {
        Self {
            service,
            model: config::DEFAULT_MODEL.to_string(),
        }
    }

    /// Create a bridge with no service
    pub fn unconfigured() -> Self {
        Self::new(None)
    }

    /// Build the Gemini client described by `config`, if it has a credential
    pub fn from_config(config: &AssistantConfig) -> crate::Result<Self> {
        let service: Option<Arc<dyn CompletionService>> = match &config.api_key {
            Some(api_key) => Some(Arc::new(GeminiClient::new(api_key, config)?)),
            None => {
                warn!("No API key configured; the assistant will answer with a configuration notice");
                None
            }
        };

        Ok(Self::new(service).with_model(&config.model))
    }

    /// Set the model identifier sent with each request
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.service.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Answer `prompt`, reporting why no real answer was produced
    ///
    /// Blank prompts and a missing service are rejected before any call.
    /// The service's text is returned verbatim.
    pub fn try_ask(&self, prompt: &str) -> Result<String, AssistantError> {
        if prompt.trim().is_empty() {
            return Err(AssistantError::EmptyPrompt);
        }
        let service = self.service.as_ref().ok_or(AssistantError::Unconfigured)?;

        let request = CompletionRequest::new(&self.model, prompt, PERSONA);
        debug!("Asking {} ({} chars)", self.model, prompt.len());

        match service.generate(&request)? {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(AssistantError::EmptyResult),
        }
    }

    /// Answer `prompt`, converting any failure into its fixed reply
    pub fn ask(&self, prompt: &str) -> String {
        match self.try_ask(prompt) {
            Ok(text) => text,
            Err(AssistantError::Service(e)) => {
                error!("Completion service error: {}", e);
                SERVICE_ERROR_REPLY.to_string()
            }
            Err(e) => {
                debug!("No answer: {}", e);
                e.reply().to_string()
            }
        }
    }
}
