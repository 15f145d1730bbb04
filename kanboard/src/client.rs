//! Authenticated JSON-RPC transport for a single Kanboard endpoint.

use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::AUTHORIZATION;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::HeaderValue;
use serde_json::Value;
use thiserror::Error;

use crate::config::ConfigError;
use crate::config::KanboardConfig;
use crate::protocol::RpcRequest;
use crate::protocol::RpcResponse;

const USER_AGENT: &str = concat!("dotkit/", env!("CARGO_PKG_VERSION"));

/// Longest slice of an unexpected response body kept in error messages.
const MAX_ERROR_BODY: usize = 512;

/// Failures below the JSON-RPC layer.
///
/// A well-formed `error` envelope is not a `ClientError`; it is handed back in
/// the [`RpcResponse`] for the caller to classify.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("credentials cannot be sent in an Authorization header")]
    InvalidCredentials,

    #[error("failed to build HTTP client: {0}")]
    Builder(#[source] reqwest::Error),

    #[error("request to {endpoint} failed: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {endpoint}: {body}")]
    Http {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("malformed JSON-RPC response from {endpoint}: {source}")]
    Parse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type ClientResult<T> = Result<T, ClientError>;

/// `Basic base64(user:token)`.
pub fn basic_authorization(user: &str, token: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{token}")))
}

pub struct KanboardClient {
    http: reqwest::Client,
    endpoint: String,
    authorization: HeaderValue,
    last_id: AtomicI64,
}

impl KanboardClient {
    /// Fails with [`ConfigError::MissingToken`] before any network activity.
    pub fn new(config: &KanboardConfig) -> ClientResult<Self> {
        let token = config.token()?;
        let mut authorization = HeaderValue::from_str(&basic_authorization(&config.user, token))
            .map_err(|_| ClientError::InvalidCredentials)?;
        authorization.set_sensitive(true);

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(ClientError::Builder)?;

        Ok(Self {
            http,
            endpoint: config.url.clone(),
            authorization,
            last_id: AtomicI64::new(0),
        })
    }

    /// Send one request and return the parsed envelope.
    ///
    /// Error envelopes come back as `Ok`; only transport and decoding problems
    /// are `Err`. Nothing is retried.
    pub async fn call(&self, method: &str, params: Value) -> ClientResult<RpcResponse> {
        let request = RpcRequest::new(method, self.next_request_id(), params);
        tracing::debug!(method, id = request.id, "sending JSON-RPC request");

        let response = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, self.authorization.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|source| self.network_error(source))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| self.network_error(source))?;

        let parsed = serde_json::from_str::<Value>(&body).and_then(RpcResponse::from_raw);
        if !status.is_success() {
            return match parsed {
                // Some deployments pair an error envelope with a 4xx/5xx status.
                Ok(envelope) if envelope.is_error() => Ok(envelope),
                _ => Err(ClientError::Http {
                    endpoint: self.endpoint.clone(),
                    status: status.as_u16(),
                    body: truncate_body(&body),
                }),
            };
        }

        let envelope = parsed.map_err(|source| ClientError::Parse {
            endpoint: self.endpoint.clone(),
            source,
        })?;

        if let Some(error) = &envelope.error {
            tracing::debug!(method, code = error.code, "JSON-RPC error: {}", error.message);
        } else {
            tracing::debug!(method, "JSON-RPC call succeeded");
        }
        Ok(envelope)
    }

    /// Milliseconds since the epoch, bumped so ids never repeat within a client.
    fn next_request_id(&self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        let previous = self
            .last_id
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        now.max(previous + 1)
    }

    fn network_error(&self, source: reqwest::Error) -> ClientError {
        ClientError::Network {
            endpoint: self.endpoint.clone(),
            source,
        }
    }
}

fn truncate_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.len() <= MAX_ERROR_BODY {
        return trimmed.to_string();
    }
    let mut end = MAX_ERROR_BODY;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &trimmed[..end])
}
