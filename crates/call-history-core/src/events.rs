//! Event taxonomy for call-history notifications
//!
//! Two generations of the real-time session-event mechanism are still active
//! upstream: a newer inclusive channel and the legacy per-event channel, plus
//! a third channel that reports sessions the user has viewed. This module
//! defines the underlying channel names, the two public event identifiers
//! they are bridged to, and the event envelope that is forwarded verbatim.
//!
//! Both the inclusive and the legacy channel can fire for semantically
//! related events. The bridge does not deduplicate them; consumers must
//! tolerate duplicates. This is an explicit design property of the component,
//! not a bug.
//!
//! # Routing
//!
//! ```text
//! callSessions          -\
//!                         +-> UserSessionInfo
//! callSessionsLegacy    -/
//! callSessionsViewed   ----> UserViewedSessions
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Underlying real-time channels this component subscribes to
///
/// Subscription happens exactly once per client instance, at construction,
/// in the fixed order inclusive, legacy, viewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionChannel {
    /// Newer inclusive session-event stream
    Inclusive,
    /// Legacy per-event session stream, still active for older call paths
    Legacy,
    /// Stream reporting sessions the user has viewed
    Viewed,
}

impl SessionChannel {
    /// Wire name the event source collaborator knows this channel by
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Inclusive => "callSessions",
            Self::Legacy => "callSessionsLegacy",
            Self::Viewed => "callSessionsViewed",
        }
    }
}

impl std::fmt::Display for SessionChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Public event identifiers exposed to application code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallHistoryEventKind {
    /// Session lifecycle updates, fed by both the inclusive and the legacy
    /// channel
    UserSessionInfo,
    /// Viewed-session notifications, fed by the viewed channel only
    UserViewedSessions,
}

impl CallHistoryEventKind {
    /// Stable public identifier string for this event kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserSessionInfo => "callHistory:user_session_info",
            Self::UserViewedSessions => "callHistory:user_viewed_sessions",
        }
    }
}

impl std::fmt::Display for CallHistoryEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed routing table from underlying channel to public identifier
///
/// Iterated once at construction; the subscription order is part of the
/// component contract.
pub const CHANNEL_ROUTES: [(SessionChannel, CallHistoryEventKind); 3] = [
    (SessionChannel::Inclusive, CallHistoryEventKind::UserSessionInfo),
    (SessionChannel::Legacy, CallHistoryEventKind::UserSessionInfo),
    (SessionChannel::Viewed, CallHistoryEventKind::UserViewedSessions),
];

/// Envelope carried by every session-event notification
///
/// The `data` payload's shape depends on which underlying channel produced
/// the event; it is forwarded to listeners verbatim, unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEvent {
    /// Notification identifier assigned upstream
    pub id: String,
    /// Channel-specific payload, forwarded without inspection
    pub data: serde_json::Value,
    /// Epoch-millisecond timestamp assigned upstream
    pub timestamp: i64,
    /// Correlation id for diagnostics
    pub tracking_id: String,
}

/// Listener registered by application code for a public event kind
///
/// Invoked synchronously from whatever context the underlying channel uses;
/// listeners must not block delivery of subsequent events.
pub type SessionEventListener = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

/// Callback handed to the event source collaborator, one per channel
pub type SessionEventCallback = Box<dyn Fn(SessionEvent) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_cover_every_channel_once_in_order() {
        let channels: Vec<SessionChannel> =
            CHANNEL_ROUTES.iter().map(|(channel, _)| *channel).collect();
        assert_eq!(
            channels,
            vec![
                SessionChannel::Inclusive,
                SessionChannel::Legacy,
                SessionChannel::Viewed
            ]
        );
    }

    #[test]
    fn both_session_channels_feed_user_session_info() {
        let fed: Vec<CallHistoryEventKind> = CHANNEL_ROUTES
            .iter()
            .filter(|(channel, _)| *channel != SessionChannel::Viewed)
            .map(|(_, kind)| *kind)
            .collect();
        assert_eq!(
            fed,
            vec![
                CallHistoryEventKind::UserSessionInfo,
                CallHistoryEventKind::UserSessionInfo
            ]
        );
    }
}
