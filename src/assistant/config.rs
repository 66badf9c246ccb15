//! Assistant configuration
//!
//! Read once at startup, immutable afterwards. A missing credential is not
//! an error here; it puts the bridge into its unconfigured mode instead.

use std::env;
use std::time::Duration;

/// Default completion model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default base URL of the completion API
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variable holding the API credential
pub const API_KEY_VAR: &str = "API_KEY";
/// Secondary credential variable, consulted when [`API_KEY_VAR`] is unset
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Environment variable overriding [`DEFAULT_MODEL`]
pub const MODEL_VAR: &str = "COSMOSLEARN_MODEL";
/// Environment variable overriding [`DEFAULT_ENDPOINT`]
pub const ENDPOINT_VAR: &str = "COSMOSLEARN_ENDPOINT";

/// Settings for the completion service
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantConfig {
    /// Service credential; `None` leaves the assistant unconfigured
    pub api_key: Option<String>,
    pub model: String,
    /// Base URL, without a trailing slash
    pub endpoint: String,
    /// HTTP timeout; `None` leaves it to the HTTP client
    pub timeout: Option<Duration>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
        }
    }
}

impl AssistantConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load the configuration through an arbitrary variable lookup
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self {
            api_key: get(API_KEY_VAR).or_else(|| get(GEMINI_API_KEY_VAR)),
            ..Self::default()
        };
        if let Some(model) = get(MODEL_VAR) {
            config.model = model;
        }
        if let Some(endpoint) = get(ENDPOINT_VAR) {
            config = config.with_endpoint(&endpoint);
        }
        config
    }

    /// Set the API credential
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        self.api_key = if api_key.trim().is_empty() {
            None
        } else {
            Some(api_key)
        };
        self
    }

    /// Set the completion model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the API base URL
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    /// Set an HTTP timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Whether a credential is available
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
