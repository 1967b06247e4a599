//! Call-history-core: client coordination layer for call-history data
//!
//! This crate provides the client-side component that retrieves a user's
//! call-history records from a backend service, bridges two generations of
//! real-time session-event notifications into one stable event API, and
//! synchronizes missed-call read state with the backend read-state store.
//!
//! ## Layer Separation
//! ```text
//! application / UI  ->  call-history-core  ->  host SDK collaborators
//! ```
//!
//! Call-history-core focuses on:
//! - Result normalization and client-side sorting of paginated history pages
//! - Bridging legacy and inclusive session-event channels under two public
//!   event identifiers
//! - Missed-call read-state updates with status-code-driven error
//!   classification
//!
//! Transport mechanics, token refresh, and the wire authentication scheme are
//! handled by the host SDK and reach this crate only through the collaborator
//! traits in [`client::transport`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use call_history_core::{
//!     CallHistoryClientBuilder, CallHistoryEventKind, LogLevel, OperationResult,
//!     Sort, SortBy,
//! };
//! # use call_history_core::client::transport::{
//! #     HistoryTransport, SessionEventSource, TokenProvider,
//! # };
//! # async fn example(
//! #     tokens: Arc<dyn TokenProvider>,
//! #     history: Arc<dyn HistoryTransport>,
//! #     events: Arc<dyn SessionEventSource>,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let client = CallHistoryClientBuilder::new()
//!     .read_state_url("https://history.example.com/v1/userSessions/setReadState")
//!     .log_level(LogLevel::Info)
//!     .token_provider(tokens)
//!     .history_transport(history)
//!     .event_source(events)
//!     .build()?;
//!
//! client.on(CallHistoryEventKind::UserSessionInfo, |event| {
//!     println!("session update: {}", event.data);
//! });
//!
//! match client.get_call_history_data(0, 20, Sort::Asc, SortBy::StartTime).await {
//!     OperationResult::Success { data, .. } => {
//!         println!("fetched {} sessions", data.user_sessions.len());
//!     }
//!     OperationResult::Failure { status_code } => {
//!         eprintln!("fetch failed with status {status_code}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod events;

// Public API exports (only high-level call-history types)
pub use client::{
    create_call_history_client, CallHistoryClient, CallHistoryClientBuilder,
};
pub use client::config::{CallHistoryConfig, LogLevel, LoggerConfig};
pub use client::history::sort_sessions;
pub use client::transport::{
    HistoryTransport, HttpReadStateTransport, HttpResponse, ReadStateTransport,
    SessionEventSource, TokenProvider,
};
pub use client::types::{
    CallDirection, CallHistoryPage, CallSessionRecord, ConvertedEndTimeSessionId,
    EndTimeSessionId, HistoryPayload, HistoryQuery, OperationResult, Participant,
    Sort, SortBy,
};
pub use error::{
    classify_error, classify_status, CallHistoryError, MethodContext, Result,
    CALL_HISTORY_FILE,
};
pub use events::{
    CallHistoryEventKind, SessionChannel, SessionEvent, SessionEventCallback,
    SessionEventListener, CHANNEL_ROUTES,
};

/// Call-history-core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_history_core_compiles() {
        assert!(!VERSION.is_empty());
    }
}
