//! Process configuration.
//!
//! The credential is resolved once, at startup, and handed to providers
//! explicitly. Nothing else in the workspace reads the environment.

use crate::error::BlueprintError;
use std::fmt;
use std::time::Duration;

/// Default generation model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default transport timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Runtime configuration for a Blueprint process.
#[derive(Clone)]
pub struct Config {
    api_key: String,
    model: String,
    api_base: Option<String>,
    timeout: Duration,
    validate_response: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .field("validate_response", &self.validate_response)
            .finish()
    }
}

impl Config {
    /// Environment variable holding the provider credential.
    pub const API_KEY_VAR: &'static str = "API_KEY";
    /// Optional model override.
    pub const MODEL_VAR: &'static str = "BLUEPRINT_MODEL";
    /// Optional API base URL override.
    pub const API_BASE_VAR: &'static str = "BLUEPRINT_API_BASE";
    /// Optional transport timeout, in seconds.
    pub const TIMEOUT_VAR: &'static str = "BLUEPRINT_TIMEOUT_SECS";

    /// Create a configuration from an explicit credential.
    pub fn new(api_key: impl Into<String>) -> Result<Self, BlueprintError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(BlueprintError::configuration(format!(
                "{} environment variable is not set.",
                Self::API_KEY_VAR
            )));
        }

        Ok(Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            api_base: None,
            timeout: DEFAULT_TIMEOUT,
            validate_response: true,
        })
    }

    /// Read the configuration from the process environment.
    ///
    /// A missing `API_KEY` is fatal: callers are expected to abort startup.
    pub fn from_env() -> Result<Self, BlueprintError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BlueprintError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(lookup(Self::API_KEY_VAR).unwrap_or_default())?;

        if let Some(model) = lookup(Self::MODEL_VAR).filter(|m| !m.trim().is_empty()) {
            config = config.with_model(model);
        }
        if let Some(base) = lookup(Self::API_BASE_VAR).filter(|b| !b.trim().is_empty()) {
            config = config.with_api_base(base);
        }
        if let Some(raw) = lookup(Self::TIMEOUT_VAR) {
            let secs = raw.trim().parse::<u64>().map_err(|e| {
                BlueprintError::configuration(format!(
                    "{} must be a number of seconds: {}",
                    Self::TIMEOUT_VAR,
                    e
                ))
            })?;
            if secs == 0 {
                return Err(BlueprintError::configuration(format!(
                    "{} must be at least 1 second",
                    Self::TIMEOUT_VAR
                )));
            }
            config = config.with_timeout(Duration::from_secs(secs));
        }

        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    }

    /// Set the generation model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set the transport timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Toggle local re-validation of responses against the output schema
    pub fn with_validate_response(mut self, validate: bool) -> Self {
        self.validate_response = validate;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn api_base(&self) -> Option<&str> {
        self.api_base.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn validate_response(&self) -> bool {
        self.validate_response
    }
}
