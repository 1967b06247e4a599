//! Paginated call-history retrieval and client-side sorting

use uuid::Uuid;

use crate::client::config::LogLevel;
use crate::client::types::{
    CallHistoryPage, CallSessionRecord, HistoryQuery, OperationResult, Sort, SortBy,
};
use crate::client::CallHistoryClient;
use crate::error::{classify_error, MethodContext, CALL_HISTORY_FILE};

/// Deterministically order session records by the requested field
///
/// Returns a new vector; the input is not mutated. The sort is stable, so
/// records sharing a start time (concurrent calls) keep their server-delivered
/// relative order. `Default` for either parameter is a passthrough.
///
/// ```rust
/// use call_history_core::{sort_sessions, Sort, SortBy};
///
/// let unsorted: Vec<call_history_core::CallSessionRecord> = vec![];
/// let sorted = sort_sessions(&unsorted, SortBy::StartTime, Sort::Asc);
/// assert!(sorted.is_empty());
/// ```
pub fn sort_sessions(
    records: &[CallSessionRecord],
    sort_by: SortBy,
    sort: Sort,
) -> Vec<CallSessionRecord> {
    let mut sorted = records.to_vec();
    match (sort_by, sort) {
        (SortBy::StartTime, Sort::Asc) => {
            sorted.sort_by(|a, b| a.start_time.cmp(&b.start_time));
        }
        (SortBy::StartTime, Sort::Desc) => {
            // Reversed comparator rather than sort-then-reverse keeps equal
            // keys in their original relative order.
            sorted.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        }
        (SortBy::Default, _) | (_, Sort::Default) => {}
    }
    sorted
}

impl CallHistoryClient {
    /// Fetch one page of the user's call history
    ///
    /// Offset and limit are forwarded as given; values of 0 are legal and
    /// simply paginate to an empty or first window. On success the session
    /// list is passed through [`sort_sessions`] with the supplied parameters
    /// and wrapped in a success envelope carrying the payload's status code.
    /// On rejection the backend's status code is returned unmodified in a
    /// failure envelope.
    pub async fn get_call_history_data(
        &self,
        offset: u32,
        limit: u32,
        sort: Sort,
        sort_by: SortBy,
    ) -> OperationResult<CallHistoryPage> {
        let context = MethodContext {
            file: CALL_HISTORY_FILE,
            method: "getCallHistoryData",
        };
        let tracking_id = Uuid::new_v4();
        let query = HistoryQuery {
            offset,
            limit,
            sort,
            sort_by,
        };

        match self.history_transport.fetch_sessions(&query).await {
            Ok(payload) => {
                let user_sessions = sort_sessions(&payload.user_sessions, sort_by, sort);
                if self.log_enabled(LogLevel::Info) {
                    tracing::info!(
                        %tracking_id,
                        file = context.file,
                        method = context.method,
                        status_code = payload.status_code,
                        sessions = user_sessions.len(),
                        "call history fetch succeeded"
                    );
                }
                OperationResult::Success {
                    status_code: payload.status_code,
                    data: CallHistoryPage { user_sessions },
                }
            }
            Err(error) => {
                if self.log_enabled(LogLevel::Info) {
                    tracing::info!(
                        %tracking_id,
                        file = context.file,
                        method = context.method,
                        "call history fetch failed: {error}"
                    );
                }
                classify_error(&error, &context)
            }
        }
    }
}
