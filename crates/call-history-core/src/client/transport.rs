//! Collaborator seams between the client and the host SDK
//!
//! The crate never owns transport policy: retry/backoff, token refresh, and
//! the wire authentication scheme belong to the host. Each external
//! dependency is consumed through one of the narrow traits below, injected at
//! construction time, which is also what makes the core testable with plain
//! in-memory fakes.
//!
//! [`HttpReadStateTransport`] is the shipped implementation of the
//! read-state POST primitive, built on `reqwest`.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use url::Url;

use crate::client::types::{HistoryPayload, HistoryQuery};
use crate::error::{CallHistoryError, Result};
use crate::events::{SessionChannel, SessionEventCallback};

/// Credential collaborator
///
/// Awaited once per read-state update to populate the Authorization header.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// The current user token, in the form the backend expects as an
    /// `Authorization` header value
    async fn user_token(&self) -> String;
}

/// Transport collaborator for the paginated history query
///
/// Resolves with a payload carrying a status code and the session list, or
/// fails with an error carrying the rejection's status code.
#[async_trait]
pub trait HistoryTransport: Send + Sync {
    async fn fetch_sessions(&self, query: &HistoryQuery) -> Result<HistoryPayload>;
}

/// Outcome of the read-state POST primitive
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Whether the status is in the 2xx range
    pub ok: bool,
    /// Response body, if it parsed as JSON
    pub body: Option<Value>,
}

/// Transport collaborator for the read-state POST
///
/// A generic JSON POST primitive; header assembly and request encoding live
/// behind this seam so the sync flow itself stays transport-agnostic.
#[async_trait]
pub trait ReadStateTransport: Send + Sync {
    async fn post_json(&self, url: &Url, token: &str, body: &Value) -> Result<HttpResponse>;
}

/// Event source collaborator
///
/// `on` is invoked exactly three times at client construction, once per
/// underlying channel, in the fixed order inclusive, legacy, viewed.
pub trait SessionEventSource: Send + Sync {
    fn on(&self, channel: SessionChannel, callback: SessionEventCallback);
}

/// Read-state POST primitive over `reqwest`
///
/// Sets `Content-Type: application/json` and the caller-supplied
/// `Authorization` value; performs exactly one attempt per call.
pub struct HttpReadStateTransport {
    client: reqwest::Client,
}

impl HttpReadStateTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpReadStateTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadStateTransport for HttpReadStateTransport {
    async fn post_json(&self, url: &Url, token: &str, body: &Value) -> Result<HttpResponse> {
        let response = self
            .client
            .post(url.clone())
            .header(AUTHORIZATION, token)
            .json(body)
            .send()
            .await
            .map_err(|source| CallHistoryError::Transport {
                reason: source.to_string(),
            })?;

        let status = response.status().as_u16();
        let ok = response.status().is_success();
        // Body parse failures are reported through `body: None`; the caller
        // decides how a missing body classifies.
        let body = response.json::<Value>().await.ok();

        Ok(HttpResponse { status, ok, body })
    }
}
