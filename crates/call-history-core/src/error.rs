//! Error types and status classification for call-history operations
//!
//! Every backend-facing failure in this crate is converted at the public
//! boundary into an [`OperationResult::Failure`] carrying the original status
//! code; no raw transport error crosses the public API. The typed
//! [`CallHistoryError`] enum is internal plumbing between the collaborator
//! seams and the classifier.
//!
//! # Error Categories
//!
//! - **Rejected** - the backend signaled failure with a status code, which is
//!   passed through unmodified (400 stays 400, 404 stays 404)
//! - **Transport** - the request never produced an HTTP status (connection
//!   refused, DNS failure); classified as 503
//! - **InvalidResponseBody** - a response that could not be parsed into the
//!   expected shape; classified as 500
//! - **InvalidTimestamp** - a date-like string that could not be converted to
//!   epoch milliseconds; classified as 422
//! - **Configuration** - builder-time problems, surfaced as a normal
//!   `Result::Err` before a client exists

use thiserror::Error;

use crate::client::types::OperationResult;

/// Result type alias for call-history-core operations
pub type Result<T> = std::result::Result<T, CallHistoryError>;

/// Module context tag used in diagnostics for this component
pub const CALL_HISTORY_FILE: &str = "CallHistory";

/// Errors raised by collaborators and internal transforms
///
/// These never escape a public operation; they are folded into an
/// [`OperationResult`] by [`classify_error`].
#[derive(Debug, Error)]
pub enum CallHistoryError {
    /// The backend rejected the request with an HTTP status code
    #[error("request rejected with status {status_code}")]
    Rejected { status_code: u16 },

    /// The request failed before any HTTP status was produced
    #[error("transport failure: {reason}")]
    Transport { reason: String },

    /// A response body was missing or not in the expected shape
    #[error("invalid response body: {reason}")]
    InvalidResponseBody { reason: String },

    /// A caller-supplied date-like string could not be converted
    #[error("could not parse timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },

    /// Builder-time configuration errors
    #[error("invalid configuration: {field} - {reason}")]
    InvalidConfiguration { field: String, reason: String },

    #[error("missing required configuration: {field}")]
    MissingConfiguration { field: String },
}

impl CallHistoryError {
    /// The status code this error classifies to
    ///
    /// Backend rejections keep their original code; failures that never
    /// produced one map onto the closest HTTP equivalent.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Rejected { status_code } => *status_code,
            Self::Transport { .. } => 503,
            Self::InvalidResponseBody { .. } => 500,
            Self::InvalidTimestamp { .. } => 422,
            Self::InvalidConfiguration { .. } | Self::MissingConfiguration { .. } => 500,
        }
    }
}

/// File/method context attached to every classified failure
///
/// Mirrors the `{file, method}` tag the host SDK uses in its diagnostics, so
/// log lines from this component can be correlated with the rest of the SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodContext {
    /// Component file tag, normally [`CALL_HISTORY_FILE`]
    pub file: &'static str,
    /// Operation name, e.g. `"updateMissedCalls"`
    pub method: &'static str,
}

/// Classify a failed outcome by status code into a structured result
///
/// Pure mapping plus an error-severity log entry carrying the status code and
/// the method context. Unrecognized codes still produce a structurally valid
/// failure; this function never panics.
///
/// ```rust
/// use call_history_core::{classify_status, MethodContext, OperationResult, CALL_HISTORY_FILE};
///
/// let context = MethodContext { file: CALL_HISTORY_FILE, method: "updateMissedCalls" };
/// let result: OperationResult<()> = classify_status(404, &context);
/// assert_eq!(result, OperationResult::Failure { status_code: 404 });
/// ```
pub fn classify_status<T>(status_code: u16, context: &MethodContext) -> OperationResult<T> {
    tracing::error!(
        status_code,
        file = context.file,
        method = context.method,
        "{}",
        status_reason(status_code)
    );
    OperationResult::Failure { status_code }
}

/// Classify an internal error into a structured result
///
/// Delegates to [`classify_status`] with the status code the error maps to.
pub fn classify_error<T>(error: &CallHistoryError, context: &MethodContext) -> OperationResult<T> {
    tracing::debug!(
        file = context.file,
        method = context.method,
        "classifying failure: {error}"
    );
    classify_status(error.status_code(), context)
}

/// Human-readable reason for the status codes observed in this domain
fn status_reason(status_code: u16) -> &'static str {
    match status_code {
        400 => "Bad request to the backend service",
        401 => "User is unauthorized, possible token expiry",
        403 => "User request is forbidden",
        404 => "Device or resource not found",
        408 => "Request to the backend service timed out",
        422 => "Request payload could not be processed",
        500 => "Internal server error occurred",
        503 => "Backend service is unavailable",
        _ => "Unknown error occurred",
    }
}
