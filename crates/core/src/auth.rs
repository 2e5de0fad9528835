use reqwest::Url;

use crate::config::AppConfig;
use crate::error::AuthError;
use crate::http::{HttpTransport, Transport};
use crate::model::Token;

pub const DEFAULT_SCOPE: &str = "tasks:read tasks:write";

/// Fixed `state` value used when the caller supplies none. A constant state
/// defeats the parameter's CSRF purpose; kept for compatibility with the
/// remote service's registered app. Callers that care should pass a
/// per-session random value to [`OauthClient::authorization_url`].
pub const DEFAULT_STATE: &str = "tickmat_auth";

/// OAuth2 client for the remote task service. Exchanges and refreshes are
/// single POSTs with HTTP Basic client credentials; nothing here retries or
/// re-authenticates silently. An expired token surfaces as an API failure
/// and the caller restarts the flow.
pub struct OauthClient {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    scope: String,
    authorize_url: Url,
    token_url: String,
    transport: Box<dyn Transport>,
}

impl OauthClient {
    /// Build from configuration. Missing client id/secret is detected here,
    /// before any network call is attempted.
    pub fn from_config(config: &AppConfig) -> Result<Self, AuthError> {
        let transport = HttpTransport::new()?;
        Self::with_transport(config, Box::new(transport))
    }

    pub fn with_transport(
        config: &AppConfig,
        transport: Box<dyn Transport>,
    ) -> Result<Self, AuthError> {
        let (client_id, client_secret) = config.require_client_credentials()?;
        let authorize_url = Url::parse(&format!("{}/oauth/authorize", config.auth_base_url()))
            .map_err(|err| AuthError::InvalidEndpoint(err.to_string()))?;
        Ok(Self {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            redirect_uri: config.redirect_uri().to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            authorize_url,
            token_url: format!("{}/oauth/token", config.auth_base_url()),
            transport,
        })
    }

    /// Deterministic construction of the browser redirect target. Pure; no
    /// network.
    pub fn authorization_url(&self, state: Option<&str>) -> Url {
        let mut url = self.authorize_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("scope", &self.scope)
            .append_pair("state", state.unwrap_or(DEFAULT_STATE))
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("response_type", "code");
        url
    }

    /// Exchange an authorization code for tokens.
    pub fn exchange_code(&self, code: &str) -> Result<Token, AuthError> {
        self.request_token(&[
            ("code", code),
            ("grant_type", "authorization_code"),
            ("scope", &self.scope),
            ("redirect_uri", &self.redirect_uri),
        ])
    }

    /// Trade a refresh token for fresh token material. Never invoked
    /// automatically by any other component.
    pub fn refresh_access_token(&self, refresh_token: &str) -> Result<Token, AuthError> {
        self.request_token(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
    }

    fn request_token(&self, fields: &[(&str, &str)]) -> Result<Token, AuthError> {
        let response = self.transport.post_form(
            &self.token_url,
            &self.client_id,
            &self.client_secret,
            fields,
        )?;
        if !response.is_success() {
            // Raw body kept for diagnostics; the service explains rejections there.
            return Err(AuthError::Rejected {
                status: response.status,
                body: response.body,
            });
        }
        Ok(serde_json::from_str(&response.body)?)
    }
}

/// Pull the `code` query parameter out of a callback URL. Returns `None`
/// when absent or empty; never errors.
pub fn extract_code_from_callback(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .query_pairs()
        .find(|(key, value)| key == "code" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::http::fake::FakeTransport;
    use pretty_assertions::assert_eq;

    fn oauth_config() -> AppConfig {
        AppConfig::with_client("my-id", "my-secret", "http://localhost:8501")
    }

    fn client_with(transport: FakeTransport) -> OauthClient {
        OauthClient::with_transport(&oauth_config(), Box::new(transport)).unwrap()
    }

    #[test]
    fn missing_credentials_fail_before_any_request() {
        let err = OauthClient::with_transport(&AppConfig::default(), Box::new(FakeTransport::new()))
            .err()
            .unwrap();
        match err {
            AuthError::Config(ConfigError::MissingClientId) => {}
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn authorization_url_carries_expected_parameters() {
        let client = client_with(FakeTransport::new());
        let url = client.authorization_url(None);
        assert_eq!(url.host_str(), Some("ticktick.com"));
        assert_eq!(url.path(), "/oauth/authorize");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("client_id".into(), "my-id".into())));
        assert!(pairs.contains(&("scope".into(), DEFAULT_SCOPE.into())));
        assert!(pairs.contains(&("state".into(), DEFAULT_STATE.into())));
        assert!(pairs.contains(&("redirect_uri".into(), "http://localhost:8501".into())));
        assert!(pairs.contains(&("response_type".into(), "code".into())));
    }

    #[test]
    fn caller_supplied_state_overrides_the_default() {
        let client = client_with(FakeTransport::new());
        let url = client.authorization_url(Some("nonce-42"));
        assert!(url
            .query_pairs()
            .any(|(k, v)| k == "state" && v == "nonce-42"));
    }

    #[test]
    fn exchange_code_posts_form_and_parses_token() {
        let transport = FakeTransport::new().respond(
            "https://ticktick.com/oauth/token",
            200,
            r#"{"access_token":"tok","refresh_token":"ref","expires_in":1000,"token_type":"bearer"}"#,
        );
        let calls = transport.calls();
        let client = client_with(transport);

        let token = client.exchange_code("the-code").unwrap();
        assert_eq!(token.access_token, "tok");
        assert_eq!(token.refresh_token.as_deref(), Some("ref"));

        let recorded = calls.lock().unwrap();
        let fields = recorded[0].form_fields.clone().unwrap();
        assert!(fields.contains(&("code".into(), "the-code".into())));
        assert!(fields.contains(&("grant_type".into(), "authorization_code".into())));
        assert!(fields.contains(&("redirect_uri".into(), "http://localhost:8501".into())));
    }

    #[test]
    fn refresh_sends_refresh_grant() {
        let transport = FakeTransport::new().respond(
            "https://ticktick.com/oauth/token",
            200,
            r#"{"access_token":"tok2"}"#,
        );
        let calls = transport.calls();
        let client = client_with(transport);

        let token = client.refresh_access_token("old-refresh").unwrap();
        assert_eq!(token.access_token, "tok2");

        let recorded = calls.lock().unwrap();
        let fields = recorded[0].form_fields.clone().unwrap();
        assert!(fields.contains(&("grant_type".into(), "refresh_token".into())));
        assert!(fields.contains(&("refresh_token".into(), "old-refresh".into())));
    }

    #[test]
    fn non_2xx_surfaces_status_and_body() {
        let transport = FakeTransport::new().respond(
            "https://ticktick.com/oauth/token",
            401,
            r#"{"error":"invalid_client"}"#,
        );
        let client = client_with(transport);

        match client.exchange_code("bad") {
            Err(AuthError::Rejected { status, body }) => {
                assert_eq!(status, 401);
                assert!(body.contains("invalid_client"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn extract_code_handles_presence_absence_and_noise() {
        assert_eq!(
            extract_code_from_callback("http://localhost:8501?code=abc123&state=x"),
            Some("abc123".to_string())
        );
        assert_eq!(extract_code_from_callback("http://localhost:8501?state=x"), None);
        assert_eq!(extract_code_from_callback("http://localhost:8501?code="), None);
        assert_eq!(extract_code_from_callback("not a url"), None);
    }
}
