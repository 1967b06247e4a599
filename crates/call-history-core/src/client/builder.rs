//! Builder for creating call-history clients
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use call_history_core::{CallHistoryClientBuilder, LogLevel, Sort, SortBy};
//! # use async_trait::async_trait;
//! # use call_history_core::{
//! #     HistoryPayload, HistoryQuery, HistoryTransport, SessionChannel, SessionEventCallback,
//! #     SessionEventSource, TokenProvider,
//! # };
//! # struct Tokens;
//! # #[async_trait]
//! # impl TokenProvider for Tokens {
//! #     async fn user_token(&self) -> String {
//! #         "Bearer token".to_string()
//! #     }
//! # }
//! # struct History;
//! # #[async_trait]
//! # impl HistoryTransport for History {
//! #     async fn fetch_sessions(&self, _query: &HistoryQuery) -> call_history_core::Result<HistoryPayload> {
//! #         Ok(HistoryPayload { status_code: 200, user_sessions: Vec::new() })
//! #     }
//! # }
//! # struct Mercury;
//! # impl SessionEventSource for Mercury {
//! #     fn on(&self, _channel: SessionChannel, _callback: SessionEventCallback) {}
//! # }
//! # tokio_test::block_on(async {
//! let client = CallHistoryClientBuilder::new()
//!     .read_state_url("https://history.example.com/v1/userSessions/setReadState")
//!     .log_level(LogLevel::Info)
//!     .token_provider(Arc::new(Tokens))
//!     .history_transport(Arc::new(History))
//!     .event_source(Arc::new(Mercury))
//!     .build()
//!     .expect("Failed to build client");
//!
//! let result = client
//!     .get_call_history_data(0, 20, Sort::Desc, SortBy::StartTime)
//!     .await;
//! assert!(result.is_success());
//! # })
//! ```

use std::sync::Arc;

use url::Url;

use crate::client::config::{CallHistoryConfig, LogLevel, LoggerConfig};
use crate::client::transport::{
    HistoryTransport, HttpReadStateTransport, ReadStateTransport, SessionEventSource,
    TokenProvider,
};
use crate::client::CallHistoryClient;
use crate::error::{CallHistoryError, Result};

/// Builder for a [`CallHistoryClient`]
///
/// The read-state URL, the token provider, the history transport, and the
/// event source are required; the read-state transport defaults to the
/// shipped [`HttpReadStateTransport`].
pub struct CallHistoryClientBuilder {
    read_state_url: Option<String>,
    logger: LoggerConfig,
    token_provider: Option<Arc<dyn TokenProvider>>,
    history_transport: Option<Arc<dyn HistoryTransport>>,
    read_state_transport: Option<Arc<dyn ReadStateTransport>>,
    event_source: Option<Arc<dyn SessionEventSource>>,
}

impl CallHistoryClientBuilder {
    /// Create a new client builder
    pub fn new() -> Self {
        Self {
            read_state_url: None,
            logger: LoggerConfig::default(),
            token_provider: None,
            history_transport: None,
            read_state_transport: None,
            event_source: None,
        }
    }

    /// Set the read-state endpoint URL
    pub fn read_state_url(mut self, url: impl Into<String>) -> Self {
        self.read_state_url = Some(url.into());
        self
    }

    /// Set the diagnostic log level for this client instance
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.logger = LoggerConfig { level };
        self
    }

    /// Set the credential collaborator
    pub fn token_provider(mut self, provider: Arc<dyn TokenProvider>) -> Self {
        self.token_provider = Some(provider);
        self
    }

    /// Set the history fetch transport
    pub fn history_transport(mut self, transport: Arc<dyn HistoryTransport>) -> Self {
        self.history_transport = Some(transport);
        self
    }

    /// Override the read-state POST transport
    pub fn read_state_transport(mut self, transport: Arc<dyn ReadStateTransport>) -> Self {
        self.read_state_transport = Some(transport);
        self
    }

    /// Set the session event source
    pub fn event_source(mut self, source: Arc<dyn SessionEventSource>) -> Self {
        self.event_source = Some(source);
        self
    }

    /// Build the client, subscribing to the event channels
    pub fn build(self) -> Result<Arc<CallHistoryClient>> {
        let raw_url = self
            .read_state_url
            .ok_or_else(|| missing("read_state_url"))?;
        let read_state_url =
            Url::parse(&raw_url).map_err(|source| CallHistoryError::InvalidConfiguration {
                field: "read_state_url".to_string(),
                reason: source.to_string(),
            })?;

        let config = CallHistoryConfig::new(read_state_url).with_logger(self.logger);
        let token_provider = self.token_provider.ok_or_else(|| missing("token_provider"))?;
        let history_transport = self
            .history_transport
            .ok_or_else(|| missing("history_transport"))?;
        let event_source = self.event_source.ok_or_else(|| missing("event_source"))?;
        let read_state_transport = self
            .read_state_transport
            .unwrap_or_else(|| Arc::new(HttpReadStateTransport::new()));

        Ok(CallHistoryClient::new(
            config,
            token_provider,
            history_transport,
            read_state_transport,
            event_source,
        ))
    }
}

impl Default for CallHistoryClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn missing(field: &str) -> CallHistoryError {
    CallHistoryError::MissingConfiguration {
        field: field.to_string(),
    }
}
