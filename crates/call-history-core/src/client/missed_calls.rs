//! Missed-call read-state synchronization
//!
//! Converts caller-supplied date-like end times to epoch milliseconds,
//! issues exactly one POST to the backend read-state endpoint, and routes
//! failures through the status classifier. The backend's own envelope is
//! trusted as-is on a successful response.

use chrono::{DateTime, NaiveDateTime};
use serde_json::json;
use uuid::Uuid;

use crate::client::config::LogLevel;
use crate::client::types::{ConvertedEndTimeSessionId, EndTimeSessionId, OperationResult};
use crate::client::CallHistoryClient;
use crate::error::{
    classify_error, classify_status, CallHistoryError, MethodContext, Result, CALL_HISTORY_FILE,
};

/// Convert a date-like string to epoch milliseconds
///
/// Accepted forms, tried in order: an all-digit string (already epoch
/// milliseconds, passed through numerically), RFC 3339, and a bare
/// `YYYY-MM-DD HH:MM:SS` timestamp treated as UTC.
pub(crate) fn to_epoch_ms(value: &str) -> Result<i64> {
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        return value
            .parse::<i64>()
            .map_err(|source| CallHistoryError::InvalidTimestamp {
                value: value.to_string(),
                reason: source.to_string(),
            });
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.timestamp_millis());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc().timestamp_millis())
        .map_err(|source| CallHistoryError::InvalidTimestamp {
            value: value.to_string(),
            reason: source.to_string(),
        })
}

/// Map every entry's `end_time` to epoch milliseconds; session ids pass
/// through unchanged. An empty input produces an empty output.
pub(crate) fn convert_sessions(
    sessions: &[EndTimeSessionId],
) -> Result<Vec<ConvertedEndTimeSessionId>> {
    sessions
        .iter()
        .map(|session| {
            Ok(ConvertedEndTimeSessionId {
                session_id: session.session_id.clone(),
                end_time: to_epoch_ms(&session.end_time)?,
            })
        })
        .collect()
}

impl CallHistoryClient {
    /// Mark the given sessions' missed-call notifications as read
    ///
    /// Performs exactly one network attempt. An empty `sessions` slice is
    /// legal; the call still proceeds to the network step with an empty
    /// list. A 200 response with a parseable JSON body is returned verbatim
    /// as the operation result; any non-200 response is classified by status
    /// code.
    pub async fn update_missed_calls(
        &self,
        sessions: &[EndTimeSessionId],
    ) -> OperationResult<serde_json::Value> {
        let context = MethodContext {
            file: CALL_HISTORY_FILE,
            method: "updateMissedCalls",
        };
        let tracking_id = Uuid::new_v4();

        let converted = match convert_sessions(sessions) {
            Ok(converted) => converted,
            Err(error) => return classify_error(&error, &context),
        };

        let token = self.token_provider.user_token().await;
        let body = json!({ "endTimeSessionIds": converted });

        let response = match self
            .read_state_transport
            .post_json(&self.config.read_state_url, &token, &body)
            .await
        {
            Ok(response) => response,
            Err(error) => return classify_error(&error, &context),
        };

        if response.status == 200 && response.ok {
            let parsed = response.body.and_then(|body| {
                serde_json::from_value::<OperationResult<serde_json::Value>>(body).ok()
            });
            match parsed {
                Some(result) => {
                    if self.log_enabled(LogLevel::Info) {
                        tracing::info!(
                            %tracking_id,
                            file = context.file,
                            method = context.method,
                            sessions = sessions.len(),
                            "missed-call read state updated"
                        );
                    }
                    result
                }
                None => {
                    let error = CallHistoryError::InvalidResponseBody {
                        reason: "read-state response was not a recognizable envelope".to_string(),
                    };
                    classify_error(&error, &context)
                }
            }
        } else {
            classify_status(response.status, &context)
        }
    }
}
