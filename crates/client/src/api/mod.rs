//! Request gateway for the storefront REST API.
//!
//! # Architecture
//!
//! - A small [`Transport`] trait carries one HTTP exchange; [`HttpTransport`]
//!   is the `reqwest` implementation, and integration tests substitute a
//!   scripted stub
//! - [`ApiClient`] adds the contract on top: bearer-token attachment,
//!   non-2xx message extraction, schema decoding
//! - No retries, no caching, no per-method special-casing, no layer-enforced
//!   timeout - the transport's defaults apply
//!
//! Typed endpoint wrappers live in [`products`], [`users`], and [`orders`],
//! one method per remote operation.

pub mod orders;
pub mod products;
pub mod types;
pub mod users;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::error::{AppError, Result};

/// One request handed to the transport.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path and query, starting with `/`.
    pub path: String,
    /// JSON body, if any.
    pub body: Option<serde_json::Value>,
    /// Bearer token; attached as `Authorization: Bearer <token>` when present.
    pub token: Option<String>,
}

/// One settled response from the transport.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

impl ApiResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// A single HTTP exchange with the remote API.
///
/// The only suspension point in the data layer; everything above it is
/// synchronous state manipulation.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one exchange. `Err` means no usable response arrived.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// `reqwest`-backed transport.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for the API at `base_url`.
    #[must_use]
    pub fn new(base_url: &url::Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.client.request(request.method, url);

        if let Some(token) = &request.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(ApiResponse { status, body })
    }
}

/// Client for the storefront REST API.
///
/// Cheaply cloneable; holds the transport behind an `Arc`.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Create a client over the given transport.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Perform one call and decode the success payload.
    ///
    /// # Errors
    ///
    /// - [`AppError::Transport`] when no response arrived
    /// - [`AppError::Api`] with the server's `message` field (or an
    ///   `HTTP <status>` fallback) on any non-2xx response
    /// - [`AppError::Decode`] when a 2xx body does not match `T`
    #[instrument(skip(self, body, token), fields(path = %path))]
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        token: Option<&str>,
    ) -> Result<T> {
        let response = self
            .transport
            .send(ApiRequest {
                method,
                path: path.to_string(),
                body,
                token: token.map(String::from),
            })
            .await?;

        if !response.is_success() {
            let reason = extract_message(response.status, &response.body);
            tracing::debug!(status = response.status, reason = %reason, "API call failed");
            return Err(AppError::Api(reason));
        }

        match serde_json::from_str(&response.body) {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::error!(
                    error = %err,
                    body = %response.body.chars().take(500).collect::<String>(),
                    "failed to decode API response"
                );
                Err(AppError::Decode(err))
            }
        }
    }
}

/// Extract the failure reason from a non-2xx response.
///
/// The server's `message` field is surfaced verbatim when the body is a
/// well-formed error payload; otherwise the status with a body snippet
/// stands in. Status codes are not otherwise interpreted.
fn extract_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| {
            let snippet: String = body.chars().take(200).collect();
            if snippet.is_empty() {
                format!("HTTP {status}")
            } else {
                format!("HTTP {status}: {snippet}")
            }
        })
}
