use crate::{OPENROUTER_API_BASE, OPENROUTER_DEFAULT_MODEL, OPENROUTER_MODEL_NAME};
use std::env;

/// Referer sent with every request to identify the calling application.
pub const DEFAULT_REFERER: &str = "http://localhost";

/// Endpoint and identification settings for a completion client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub model: String,
    pub referer: String,
    pub site_title: String,
}

impl ClientConfig {
    pub fn new(site_title: impl Into<String>) -> Self {
        ClientConfig {
            base_url: format!("https://{}", OPENROUTER_API_BASE),
            model: String::from(OPENROUTER_DEFAULT_MODEL),
            referer: String::from(DEFAULT_REFERER),
            site_title: site_title.into(),
        }
    }

    /// Defaults, with the model id taken from `OPENROUTER_MODEL` when set.
    pub fn from_env(site_title: impl Into<String>) -> Self {
        let mut config = ClientConfig::new(site_title);
        if let Ok(model) = env::var(OPENROUTER_MODEL_NAME) {
            if !model.is_empty() {
                config.model = model;
            }
        }
        config
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Resolves the API key at request time.
pub trait CredentialSource: Send + Sync {
    /// Name shown in the error raised when no key is available.
    fn name(&self) -> &str;

    fn api_key(&self) -> Option<String>;
}

/// Reads the key from a process environment variable.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    pub fn new(var: impl Into<String>) -> Self {
        EnvCredentials { var: var.into() }
    }
}

impl CredentialSource for EnvCredentials {
    fn name(&self) -> &str {
        &self.var
    }

    fn api_key(&self) -> Option<String> {
        env::var(&self.var).ok().filter(|key| !key.is_empty())
    }
}

/// A fixed key, or none at all.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    name: String,
    key: Option<String>,
}

impl StaticCredentials {
    pub fn new(key: impl Into<String>) -> Self {
        StaticCredentials {
            name: String::from("static credentials"),
            key: Some(key.into()),
        }
    }

    pub fn missing(name: impl Into<String>) -> Self {
        StaticCredentials {
            name: name.into(),
            key: None,
        }
    }
}

impl CredentialSource for StaticCredentials {
    fn name(&self) -> &str {
        &self.name
    }

    fn api_key(&self) -> Option<String> {
        self.key.clone()
    }
}

/// Loads `.env` from the working directory into the process environment.
///
/// A missing file is fine; anything already set in the environment wins.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_openrouter() {
        let config = ClientConfig::new("Structured Extraction Demo");
        assert_eq!(config.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.model, "openai/gpt-4o");
        assert_eq!(config.referer, "http://localhost");
        assert_eq!(config.site_title, "Structured Extraction Demo");
    }

    #[test]
    fn builder_overrides_model_and_base_url() {
        let config = ClientConfig::new("demo")
            .model("anthropic/claude-3.5-sonnet")
            .base_url("http://127.0.0.1:9");
        assert_eq!(config.model, "anthropic/claude-3.5-sonnet");
        assert_eq!(config.base_url, "http://127.0.0.1:9");
    }

    #[test]
    fn static_credentials() {
        assert_eq!(StaticCredentials::new("k").api_key(), Some(String::from("k")));
        let missing = StaticCredentials::missing("OPENROUTER_API_KEY");
        assert_eq!(missing.api_key(), None);
        assert_eq!(missing.name(), "OPENROUTER_API_KEY");
    }

    #[test]
    fn env_credentials_treat_unset_as_missing() {
        let source = EnvCredentials::new("LLM_EXTRACTION_TEST_KEY_THAT_IS_NEVER_SET");
        assert_eq!(source.api_key(), None);
    }
}
