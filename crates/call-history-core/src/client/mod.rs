//! High-level call-history client implementation
//!
//! The client module is organized into several sub-modules:
//!
//! - **`builder`** - Fluent construction of a client with its collaborators
//! - **`config`** - Endpoint and logger configuration
//! - **`history`** - Paginated history retrieval and client-side sorting
//! - **`missed_calls`** - Missed-call read-state synchronization
//! - **`events`** - Bridge from the underlying channels to public events
//! - **`transport`** - Collaborator traits and the shipped HTTP transport
//! - **`types`** - Data model shared by all operations
//!
//! # Usage Guide
//!
//! ```rust,no_run
//! # use std::sync::Arc;
//! # use call_history_core::{
//! #     CallHistoryClientBuilder, CallHistoryEventKind, OperationResult, Sort, SortBy,
//! #     client::transport::{HistoryTransport, SessionEventSource, TokenProvider},
//! # };
//! # async fn example(
//! #     tokens: Arc<dyn TokenProvider>,
//! #     history: Arc<dyn HistoryTransport>,
//! #     events: Arc<dyn SessionEventSource>,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! // 1. Create the client; event channels are subscribed during build
//! let client = CallHistoryClientBuilder::new()
//!     .read_state_url("https://history.example.com/v1/userSessions/setReadState")
//!     .token_provider(tokens)
//!     .history_transport(history)
//!     .event_source(events)
//!     .build()?;
//!
//! // 2. Listen for session updates from either generation of the stream
//! client.on(CallHistoryEventKind::UserSessionInfo, |event| {
//!     println!("session update: {}", event.data);
//! });
//!
//! // 3. Fetch a page of history
//! let page = client
//!     .get_call_history_data(0, 10, Sort::Desc, SortBy::StartTime)
//!     .await;
//! if let OperationResult::Success { data, .. } = page {
//!     println!("{} sessions", data.user_sessions.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod events;
pub mod history;
pub mod missed_calls;
pub mod transport;
pub mod types;

mod tests;

use std::sync::Arc;

use crate::client::config::{CallHistoryConfig, LogLevel};
use crate::client::events::EventBridge;
use crate::client::transport::{
    HistoryTransport, HttpReadStateTransport, ReadStateTransport, SessionEventSource,
    TokenProvider,
};
use crate::events::{CallHistoryEventKind, SessionEvent};

pub use builder::CallHistoryClientBuilder;

/// Client for call-history retrieval, session events, and read-state sync
///
/// Each public operation constructs its own request and result, so
/// concurrent invocations are safe without locking. The event subscription
/// established at construction lasts for the lifetime of the client.
pub struct CallHistoryClient {
    pub(crate) config: CallHistoryConfig,
    pub(crate) token_provider: Arc<dyn TokenProvider>,
    pub(crate) history_transport: Arc<dyn HistoryTransport>,
    pub(crate) read_state_transport: Arc<dyn ReadStateTransport>,
    // Held so the subscription outlives construction.
    #[allow(dead_code)]
    pub(crate) event_source: Arc<dyn SessionEventSource>,
    pub(crate) bridge: EventBridge,
}

impl std::fmt::Debug for CallHistoryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallHistoryClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CallHistoryClient {
    /// Create a client and subscribe to the underlying event channels
    ///
    /// Subscription happens here, exactly once, in the fixed channel order.
    pub fn new(
        config: CallHistoryConfig,
        token_provider: Arc<dyn TokenProvider>,
        history_transport: Arc<dyn HistoryTransport>,
        read_state_transport: Arc<dyn ReadStateTransport>,
        event_source: Arc<dyn SessionEventSource>,
    ) -> Arc<Self> {
        let bridge = EventBridge::new();
        bridge.subscribe(event_source.as_ref());
        if config.logger.allows(LogLevel::Debug) {
            tracing::debug!(
                read_state_url = %config.read_state_url,
                "call history client constructed"
            );
        }
        Arc::new(Self {
            config,
            token_provider,
            history_transport,
            read_state_transport,
            event_source,
            bridge,
        })
    }

    /// Register a listener for one of the public event identifiers
    ///
    /// Registration is append-only; every registered listener receives every
    /// forwarded event for its identifier, in registration order.
    pub fn on<F>(&self, kind: CallHistoryEventKind, listener: F)
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        self.bridge.on(kind, Arc::new(listener));
    }

    pub(crate) fn log_enabled(&self, level: LogLevel) -> bool {
        self.config.logger.allows(level)
    }
}

/// Convenience factory mirroring the host SDK's construction style
///
/// Uses the shipped HTTP read-state transport.
pub fn create_call_history_client(
    config: CallHistoryConfig,
    token_provider: Arc<dyn TokenProvider>,
    history_transport: Arc<dyn HistoryTransport>,
    event_source: Arc<dyn SessionEventSource>,
) -> Arc<CallHistoryClient> {
    CallHistoryClient::new(
        config,
        token_provider,
        history_transport,
        Arc::new(HttpReadStateTransport::new()),
        event_source,
    )
}
