use std::env;

use crate::error::ConfigError;

static DEFAULT_API_BASE_URL: &str = "https://api.ticktick.com/open/v1";
static DEFAULT_AUTH_BASE_URL: &str = "https://ticktick.com";
static DEFAULT_REDIRECT_URI: &str = "http://localhost:8501";

static ENV_CLIENT_ID: &str = "TICKTICK_CLIENT_ID";
static ENV_CLIENT_SECRET: &str = "TICKTICK_CLIENT_SECRET";
static ENV_REDIRECT_URI: &str = "TICKTICK_REDIRECT_URI";
static ENV_API_BASE_URL: &str = "TICKTICK_API_BASE_URL";
static ENV_ACCESS_TOKEN: &str = "TICKTICK_ACCESS_TOKEN";

/// Values the core consumes; how they are loaded is the caller's concern
/// beyond the environment fallback here. Nothing is ever written to disk.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    client_id: Option<String>,
    client_secret: Option<String>,
    redirect_uri: Option<String>,
    api_base_url: Option<String>,
    access_token: Option<String>,
}

impl AppConfig {
    /// Resolve configuration from the process environment.
    pub fn discover() -> Self {
        Self {
            client_id: non_empty(env::var(ENV_CLIENT_ID).ok()),
            client_secret: non_empty(env::var(ENV_CLIENT_SECRET).ok()),
            redirect_uri: non_empty(env::var(ENV_REDIRECT_URI).ok()),
            api_base_url: non_empty(env::var(ENV_API_BASE_URL).ok()),
            access_token: non_empty(env::var(ENV_ACCESS_TOKEN).ok()),
        }
    }

    pub fn with_client(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: Some(client_id.into()),
            client_secret: Some(client_secret.into()),
            redirect_uri: Some(redirect_uri.into()),
            api_base_url: None,
            access_token: None,
        }
    }

    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = non_empty(Some(token.into()));
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    pub fn auth_base_url(&self) -> &str {
        DEFAULT_AUTH_BASE_URL
    }

    pub fn redirect_uri(&self) -> &str {
        self.redirect_uri.as_deref().unwrap_or(DEFAULT_REDIRECT_URI)
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Pre-provisioned token for non-interactive use. `ConfigError` here is
    /// reported before any network call is attempted.
    pub fn require_access_token(&self) -> Result<&str, ConfigError> {
        self.access_token
            .as_deref()
            .ok_or(ConfigError::MissingAccessToken)
    }

    /// Client credentials for the OAuth flow, validated up front.
    pub fn require_client_credentials(&self) -> Result<(&str, &str), ConfigError> {
        let id = self
            .client_id
            .as_deref()
            .ok_or(ConfigError::MissingClientId)?;
        let secret = self
            .client_secret
            .as_deref()
            .ok_or(ConfigError::MissingClientSecret)?;
        Ok((id, secret))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url(), "https://api.ticktick.com/open/v1");
        assert_eq!(config.redirect_uri(), "http://localhost:8501");
        assert!(config.access_token().is_none());
    }

    #[test]
    fn missing_credentials_surface_as_config_errors() {
        let config = AppConfig::default();
        assert_eq!(
            config.require_client_credentials(),
            Err(ConfigError::MissingClientId)
        );
        assert_eq!(
            config.require_access_token(),
            Err(ConfigError::MissingAccessToken)
        );
    }

    #[test]
    fn whitespace_only_values_count_as_missing() {
        let mut config = AppConfig::with_client("id", "secret", "http://localhost:9000/cb");
        config.set_access_token("   ");
        assert!(config.access_token().is_none());
        assert_eq!(config.require_client_credentials(), Ok(("id", "secret")));
        assert_eq!(config.redirect_uri(), "http://localhost:9000/cb");
    }
}
