use std::time::Duration;

use crate::error::TransportError;

/// Every outbound call uses the same short timeout; a timeout is treated as
/// an ordinary failure, there is no cancellation or retry.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Seam between the protocol logic and the wire. The production
/// implementation is blocking reqwest; tests script responses in memory.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str, bearer: &str) -> Result<HttpResponse, TransportError>;

    fn post_json(
        &self,
        url: &str,
        bearer: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, TransportError>;

    /// Form-encoded POST with HTTP Basic credentials (the token endpoint).
    fn post_form(
        &self,
        url: &str,
        client_id: &str,
        client_secret: &str,
        fields: &[(&str, &str)],
    ) -> Result<HttpResponse, TransportError>;
}

pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|err| TransportError(err.to_string()))?;
        Ok(Self { client })
    }

    fn finish(response: reqwest::blocking::Response) -> Result<HttpResponse, TransportError> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|err| TransportError(err.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, bearer: &str) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(bearer)
            .send()
            .map_err(|err| TransportError(err.to_string()))?;
        Self::finish(response)
    }

    fn post_json(
        &self,
        url: &str,
        bearer: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(bearer)
            .json(body)
            .send()
            .map_err(|err| TransportError(err.to_string()))?;
        Self::finish(response)
    }

    fn post_form(
        &self,
        url: &str,
        client_id: &str,
        client_secret: &str,
        fields: &[(&str, &str)],
    ) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .basic_auth(client_id, Some(client_secret))
            .form(fields)
            .send()
            .map_err(|err| TransportError(err.to_string()))?;
        Self::finish(response)
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use super::{HttpResponse, Transport};
    use crate::error::TransportError;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct RecordedCall {
        pub url: String,
        pub json_body: Option<serde_json::Value>,
        pub form_fields: Option<Vec<(String, String)>>,
    }

    /// Scripted transport: maps URLs to canned outcomes and records every
    /// request so tests can assert on merged payloads.
    #[derive(Default)]
    pub(crate) struct FakeTransport {
        routes: HashMap<String, Result<HttpResponse, TransportError>>,
        calls: Arc<Mutex<Vec<RecordedCall>>>,
    }

    impl FakeTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn respond(mut self, url: &str, status: u16, body: &str) -> Self {
            self.routes.insert(
                url.to_string(),
                Ok(HttpResponse {
                    status,
                    body: body.to_string(),
                }),
            );
            self
        }

        pub(crate) fn fail(mut self, url: &str, reason: &str) -> Self {
            self.routes
                .insert(url.to_string(), Err(TransportError(reason.to_string())));
            self
        }

        pub(crate) fn calls(&self) -> Arc<Mutex<Vec<RecordedCall>>> {
            Arc::clone(&self.calls)
        }

        fn dispatch(&self, call: RecordedCall) -> Result<HttpResponse, TransportError> {
            let outcome = self
                .routes
                .get(&call.url)
                .cloned()
                .unwrap_or_else(|| Err(TransportError(format!("unexpected request: {}", call.url))));
            self.calls.lock().unwrap().push(call);
            outcome
        }
    }

    impl Transport for FakeTransport {
        fn get(&self, url: &str, _bearer: &str) -> Result<HttpResponse, TransportError> {
            self.dispatch(RecordedCall {
                url: url.to_string(),
                json_body: None,
                form_fields: None,
            })
        }

        fn post_json(
            &self,
            url: &str,
            _bearer: &str,
            body: &serde_json::Value,
        ) -> Result<HttpResponse, TransportError> {
            self.dispatch(RecordedCall {
                url: url.to_string(),
                json_body: Some(body.clone()),
                form_fields: None,
            })
        }

        fn post_form(
            &self,
            url: &str,
            _client_id: &str,
            _client_secret: &str,
            fields: &[(&str, &str)],
        ) -> Result<HttpResponse, TransportError> {
            self.dispatch(RecordedCall {
                url: url.to_string(),
                json_body: None,
                form_fields: Some(
                    fields
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                ),
            })
        }
    }
}
