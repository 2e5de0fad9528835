use thiserror::Error;

/// Raised before any network call when the OAuth client cannot be built.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing OAuth client id (set TICKTICK_CLIENT_ID)")]
    MissingClientId,
    #[error("missing OAuth client secret (set TICKTICK_CLIENT_SECRET)")]
    MissingClientSecret,
    #[error("no access token available (authenticate first or set TICKTICK_ACCESS_TOKEN)")]
    MissingAccessToken,
}

/// Non-2xx or transport failure while talking to the token endpoint.
///
/// The raw response body is carried for diagnostics; callers must restart
/// the authorization flow, there is no automatic retry.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token endpoint returned {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("token request failed: {0}")]
    Transport(#[from] TransportError),
    #[error("malformed token response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid authorization endpoint: {0}")]
    InvalidEndpoint(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failure while listing one project's tasks. Recovered locally: the
/// project's tasks are omitted from the aggregate, never raised to callers.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("GET {url} returned {status}")]
    Status { url: String, status: u16 },
    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },
    #[error("unexpected payload from {url}: {source}")]
    Malformed {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure while updating a task. Surfaced to callers as `None`; the
/// in-memory list must not be mutated when a write fails.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("POST {url} returned {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },
    #[error("POST {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },
    #[error("unexpected payload from {url}: {source}")]
    Malformed {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Connection-level failure (DNS, TLS, timeout) before an HTTP status exists.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);
