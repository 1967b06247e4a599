//! Type definitions for the call-history-core library
//!
//! This module contains the data structures exchanged with the backend and
//! returned to application code: the uniform operation envelope, the
//! call-session record, pagination and sorting parameters, and the transient
//! read-state request shapes.
//!
//! Wire field names follow the backend's camelCase convention (`statusCode`,
//! `userSessions`, `endTimeSessionIds`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Uniform envelope returned by every public operation
///
/// The discriminant is explicit: consumers pattern-match on the variant
/// instead of probing for the presence of a `data` field. On the wire the
/// variant is carried by the `message` field as `"SUCCESS"` or `"FAILURE"`.
///
/// ```rust
/// use call_history_core::OperationResult;
///
/// let result: OperationResult<Vec<u32>> = OperationResult::Success {
///     status_code: 200,
///     data: vec![1, 2, 3],
/// };
/// match result {
///     OperationResult::Success { status_code, data } => {
///         assert_eq!(status_code, 200);
///         assert_eq!(data.len(), 3);
///     }
///     OperationResult::Failure { status_code } => panic!("unexpected {status_code}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "message")]
pub enum OperationResult<T> {
    /// The operation completed; `data` carries the operation payload
    #[serde(rename = "SUCCESS", rename_all = "camelCase")]
    Success { status_code: u16, data: T },
    /// The operation failed; the status code is the backend's, unmodified
    #[serde(rename = "FAILURE", rename_all = "camelCase")]
    Failure { status_code: u16 },
}

impl<T> OperationResult<T> {
    /// Status code carried by either variant
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Success { status_code, .. } | Self::Failure { status_code } => *status_code,
        }
    }

    /// Whether this is the success variant
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Consume the envelope, yielding the payload if successful
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Failure { .. } => None,
        }
    }
}

/// Direction of a recorded call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallDirection {
    Incoming,
    Outgoing,
}

/// Remote-party metadata attached to a session record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// One call's lifecycle record as delivered by the backend
///
/// Immutable once received; owned by the caller after being returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallSessionRecord {
    /// Record identifier assigned by the backend
    pub id: String,
    /// Session identifier, stable across the call's lifecycle
    pub session_id: String,
    /// Session kind reported by the backend (e.g. "SPARK")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_type: Option<String>,
    pub direction: CallDirection,
    /// When the call started
    pub start_time: DateTime<Utc>,
    /// When the call ended; absent until the call ends
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u64>,
    /// The remote party, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<Participant>,
    /// Backend resource URL for this record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Ordered page of call-session records returned by a fetch
///
/// Constructed fresh per fetch call and never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallHistoryPage {
    pub user_sessions: Vec<CallSessionRecord>,
}

/// Sort direction requested for a history fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sort {
    Asc,
    Desc,
    /// Server-delivered order, no client-side sorting
    Default,
}

/// Sort key requested for a history fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortBy {
    StartTime,
    /// Server-delivered order, no client-side sorting
    Default,
}

/// Parameters forwarded to the history transport collaborator
///
/// Offset and limit are not validated locally; out-of-range values are
/// forwarded and the backend's response governs the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub offset: u32,
    pub limit: u32,
    pub sort: Sort,
    pub sort_by: SortBy,
}

/// Successful payload resolved by the history transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPayload {
    pub status_code: u16,
    pub user_sessions: Vec<CallSessionRecord>,
}

/// Caller-supplied read-state entry, `end_time` still a date-like string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndTimeSessionId {
    pub session_id: String,
    pub end_time: String,
}

/// Read-state entry after conversion, `end_time` in epoch milliseconds
///
/// Transient; exists only for the duration of one update call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedEndTimeSessionId {
    pub session_id: String,
    pub end_time: i64,
}
