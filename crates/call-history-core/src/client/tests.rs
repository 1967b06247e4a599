// Tests module

//! Unit suite for the call-history client
//!
//! Exercises the public operations against scripted in-memory collaborators:
//! history fetch wrapping and sorting, failure passthrough, event bridge
//! routing and ordering, and the missed-call read-state flow.

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use serde_json::{json, Value};
    use tracing_test::traced_test;
    use url::Url;

    use crate::client::config::LogLevel;
    use crate::client::history::sort_sessions;
    use crate::client::transport::{
        HistoryTransport, HttpResponse, ReadStateTransport, SessionEventSource, TokenProvider,
    };
    use crate::client::types::{
        CallDirection, CallSessionRecord, EndTimeSessionId, HistoryPayload, HistoryQuery,
        OperationResult, Sort, SortBy,
    };
    use crate::client::{CallHistoryClient, CallHistoryClientBuilder};
    use crate::error::CallHistoryError;
    use crate::events::{CallHistoryEventKind, SessionChannel, SessionEvent, SessionEventCallback};

    const READ_STATE_URL: &str = "https://history.example.com/v1/userSessions/setReadState";

    // ===== scripted collaborators =====

    struct FixedTokenProvider;

    #[async_trait]
    impl TokenProvider for FixedTokenProvider {
        async fn user_token(&self) -> String {
            "Bearer test-token".to_string()
        }
    }

    enum HistoryScript {
        Resolve(HistoryPayload),
        Reject(u16),
    }

    struct ScriptedHistoryTransport {
        script: HistoryScript,
        queries: Mutex<Vec<HistoryQuery>>,
    }

    impl ScriptedHistoryTransport {
        fn resolving(payload: HistoryPayload) -> Arc<Self> {
            Arc::new(Self {
                script: HistoryScript::Resolve(payload),
                queries: Mutex::new(Vec::new()),
            })
        }

        fn rejecting(status_code: u16) -> Arc<Self> {
            Arc::new(Self {
                script: HistoryScript::Reject(status_code),
                queries: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl HistoryTransport for ScriptedHistoryTransport {
        async fn fetch_sessions(
            &self,
            query: &HistoryQuery,
        ) -> crate::error::Result<HistoryPayload> {
            self.queries.lock().unwrap().push(*query);
            match &self.script {
                HistoryScript::Resolve(payload) => Ok(payload.clone()),
                HistoryScript::Reject(status_code) => Err(CallHistoryError::Rejected {
                    status_code: *status_code,
                }),
            }
        }
    }

    struct ScriptedReadStateTransport {
        status: u16,
        ok: bool,
        body: Option<Value>,
        calls: Mutex<Vec<(Url, String, Value)>>,
    }

    impl ScriptedReadStateTransport {
        fn respond(status: u16, ok: bool, body: Option<Value>) -> Arc<Self> {
            Arc::new(Self {
                status,
                ok,
                body,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ReadStateTransport for ScriptedReadStateTransport {
        async fn post_json(
            &self,
            url: &Url,
            token: &str,
            body: &Value,
        ) -> crate::error::Result<HttpResponse> {
            self.calls
                .lock()
                .unwrap()
                .push((url.clone(), token.to_string(), body.clone()));
            Ok(HttpResponse {
                status: self.status,
                ok: self.ok,
                body: self.body.clone(),
            })
        }
    }

    struct FailingReadStateTransport;

    #[async_trait]
    impl ReadStateTransport for FailingReadStateTransport {
        async fn post_json(
            &self,
            _url: &Url,
            _token: &str,
            _body: &Value,
        ) -> crate::error::Result<HttpResponse> {
            Err(CallHistoryError::Transport {
                reason: "connection refused".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct RecordingEventSource {
        callbacks: Mutex<Vec<(SessionChannel, SessionEventCallback)>>,
    }

    impl RecordingEventSource {
        fn channels(&self) -> Vec<SessionChannel> {
            self.callbacks
                .lock()
                .unwrap()
                .iter()
                .map(|(channel, _)| *channel)
                .collect()
        }

        fn fire(&self, index: usize, event: SessionEvent) {
            let callbacks = self.callbacks.lock().unwrap();
            (callbacks[index].1)(event);
        }
    }

    impl SessionEventSource for RecordingEventSource {
        fn on(&self, channel: SessionChannel, callback: SessionEventCallback) {
            self.callbacks.lock().unwrap().push((channel, callback));
        }
    }

    // ===== fixtures =====

    fn record(id: &str, start_time: &str) -> CallSessionRecord {
        CallSessionRecord {
            id: id.to_string(),
            session_id: format!("session-{id}"),
            session_type: Some("SPARK".to_string()),
            direction: CallDirection::Outgoing,
            start_time: start_time.parse::<DateTime<Utc>>().unwrap(),
            end_time: None,
            duration_secs: Some(42),
            other: None,
            url: None,
        }
    }

    fn unsorted_payload() -> HistoryPayload {
        HistoryPayload {
            status_code: 200,
            user_sessions: vec![
                record("b", "2023-03-01T10:00:00Z"),
                record("a", "2023-01-01T10:00:00Z"),
                record("c", "2023-02-01T10:00:00Z"),
            ],
        }
    }

    fn session_event(tag: &str) -> SessionEvent {
        SessionEvent {
            id: format!("event-{tag}"),
            data: json!({"eventType": tag, "userSessions": {"userSessions": []}}),
            timestamp: 123456,
            tracking_id: format!("tracking-{tag}"),
        }
    }

    fn build_client(
        history: Arc<dyn HistoryTransport>,
        read_state: Arc<dyn ReadStateTransport>,
        source: Arc<RecordingEventSource>,
    ) -> Arc<CallHistoryClient> {
        CallHistoryClientBuilder::new()
            .read_state_url(READ_STATE_URL)
            .log_level(LogLevel::Info)
            .token_provider(Arc::new(FixedTokenProvider))
            .history_transport(history)
            .read_state_transport(read_state)
            .event_source(source)
            .build()
            .expect("client should build")
    }

    fn ok_read_state() -> Arc<ScriptedReadStateTransport> {
        ScriptedReadStateTransport::respond(
            200,
            true,
            Some(json!({
                "statusCode": 200,
                "data": {"readStatusList": []},
                "message": "SUCCESS",
            })),
        )
    }

    // ===== history fetch =====

    #[tokio::test]
    async fn fetch_wraps_success_and_forwards_query() {
        let history = ScriptedHistoryTransport::resolving(unsorted_payload());
        let client = build_client(
            history.clone(),
            ok_read_state(),
            Arc::new(RecordingEventSource::default()),
        );

        let response = client
            .get_call_history_data(7, 10, Sort::Default, SortBy::Default)
            .await;

        assert_eq!(response.status_code(), 200);
        assert!(response.is_success());
        // Default sort is a passthrough of server order.
        let page = response.into_data().unwrap();
        let ids: Vec<&str> = page.user_sessions.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);

        let queries = history.queries.lock().unwrap();
        assert_eq!(
            *queries,
            vec![HistoryQuery {
                offset: 7,
                limit: 10,
                sort: Sort::Default,
                sort_by: SortBy::Default,
            }]
        );
    }

    #[tokio::test]
    async fn fetch_sorts_ascending_by_start_time() {
        let client = build_client(
            ScriptedHistoryTransport::resolving(unsorted_payload()),
            ok_read_state(),
            Arc::new(RecordingEventSource::default()),
        );

        let response = client
            .get_call_history_data(10, 20, Sort::Asc, SortBy::StartTime)
            .await;

        let page = response.into_data().unwrap();
        let ids: Vec<&str> = page.user_sessions.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
    }

    #[tokio::test]
    async fn fetch_passes_rejection_status_through() {
        for status in [400u16, 404] {
            let client = build_client(
                ScriptedHistoryTransport::rejecting(status),
                ok_read_state(),
                Arc::new(RecordingEventSource::default()),
            );

            let response = client
                .get_call_history_data(0, 0, Sort::Asc, SortBy::StartTime)
                .await;

            assert_eq!(
                response,
                OperationResult::Failure {
                    status_code: status
                }
            );
        }
    }

    // ===== sorter =====

    #[test]
    fn sorter_returns_new_sequence_and_leaves_input_alone() {
        let input = unsorted_payload().user_sessions;
        let sorted = sort_sessions(&input, SortBy::StartTime, Sort::Asc);
        assert_eq!(input[0].id, "b");
        assert_eq!(sorted[0].id, "a");
    }

    #[test]
    fn sorter_default_is_a_passthrough() {
        let input = unsorted_payload().user_sessions;
        assert_eq!(sort_sessions(&input, SortBy::Default, Sort::Asc), input);
        assert_eq!(sort_sessions(&input, SortBy::StartTime, Sort::Default), input);
    }

    #[test]
    fn sorter_is_idempotent() {
        let input = unsorted_payload().user_sessions;
        let once = sort_sessions(&input, SortBy::StartTime, Sort::Asc);
        let twice = sort_sessions(&once, SortBy::StartTime, Sort::Asc);
        assert_eq!(once, twice);
    }

    #[test]
    fn sorter_is_stable_for_shared_start_times() {
        // Concurrent calls can share a start time; server-delivered relative
        // order must survive both directions.
        let input = vec![
            record("first", "2023-01-01T10:00:00Z"),
            record("second", "2023-01-01T10:00:00Z"),
            record("earlier", "2022-12-31T10:00:00Z"),
        ];

        let asc = sort_sessions(&input, SortBy::StartTime, Sort::Asc);
        let asc_ids: Vec<&str> = asc.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(asc_ids, vec!["earlier", "first", "second"]);

        let desc = sort_sessions(&input, SortBy::StartTime, Sort::Desc);
        let desc_ids: Vec<&str> = desc.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(desc_ids, vec!["first", "second", "earlier"]);
    }

    // ===== event bridge =====

    #[tokio::test]
    async fn construction_subscribes_channels_in_fixed_order() {
        let source = Arc::new(RecordingEventSource::default());
        let _client = build_client(
            ScriptedHistoryTransport::rejecting(404),
            ok_read_state(),
            source.clone(),
        );

        assert_eq!(
            source.channels(),
            vec![
                SessionChannel::Inclusive,
                SessionChannel::Legacy,
                SessionChannel::Viewed
            ]
        );
    }

    #[tokio::test]
    async fn inclusive_and_legacy_both_reach_session_info_listeners() {
        let source = Arc::new(RecordingEventSource::default());
        let client = build_client(
            ScriptedHistoryTransport::rejecting(404),
            ok_read_state(),
            source.clone(),
        );

        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = received.clone();
        client.on(CallHistoryEventKind::UserSessionInfo, move |event| {
            sink.lock().unwrap().push(event.clone());
        });

        source.fire(0, session_event("inclusive"));
        source.fire(1, session_event("legacy"));

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 2);
        // Payloads forwarded verbatim; no dedup between the two channels.
        assert_eq!(received[0].data["eventType"], "inclusive");
        assert_eq!(received[1].data["eventType"], "legacy");
    }

    #[tokio::test]
    async fn viewed_events_reach_only_viewed_listeners() {
        let source = Arc::new(RecordingEventSource::default());
        let client = build_client(
            ScriptedHistoryTransport::rejecting(404),
            ok_read_state(),
            source.clone(),
        );

        let session_info = Arc::new(Mutex::new(Vec::new()));
        let viewed = Arc::new(Mutex::new(Vec::new()));
        let session_sink = session_info.clone();
        let viewed_sink = viewed.clone();
        client.on(CallHistoryEventKind::UserSessionInfo, move |event| {
            session_sink.lock().unwrap().push(event.clone());
        });
        client.on(CallHistoryEventKind::UserViewedSessions, move |event| {
            viewed_sink.lock().unwrap().push(event.clone());
        });

        source.fire(2, session_event("viewed"));

        assert!(session_info.lock().unwrap().is_empty());
        let viewed = viewed.lock().unwrap();
        assert_eq!(viewed.len(), 1);
        assert_eq!(viewed[0].data["eventType"], "viewed");
    }

    #[tokio::test]
    async fn listeners_are_invoked_in_registration_order() {
        let source = Arc::new(RecordingEventSource::default());
        let client = build_client(
            ScriptedHistoryTransport::rejecting(404),
            ok_read_state(),
            source.clone(),
        );

        let order = Arc::new(Mutex::new(Vec::new()));
        for tag in ["one", "two", "three"] {
            let sink = order.clone();
            client.on(CallHistoryEventKind::UserSessionInfo, move |_| {
                sink.lock().unwrap().push(tag);
            });
        }

        source.fire(0, session_event("inclusive"));

        assert_eq!(*order.lock().unwrap(), vec!["one", "two", "three"]);
    }

    // ===== missed-call read state =====

    #[tokio::test]
    async fn update_missed_calls_posts_converted_body_and_returns_envelope() {
        let read_state = ok_read_state();
        let client = build_client(
            ScriptedHistoryTransport::rejecting(404),
            read_state.clone(),
            Arc::new(RecordingEventSource::default()),
        );

        let response = client
            .update_missed_calls(&[EndTimeSessionId {
                session_id: "123".to_string(),
                end_time: "1234568".to_string(),
            }])
            .await;

        assert_eq!(
            response,
            OperationResult::Success {
                status_code: 200,
                data: json!({"readStatusList": []}),
            }
        );

        let calls = read_state.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (url, token, body) = &calls[0];
        assert_eq!(url.as_str(), READ_STATE_URL);
        assert_eq!(token, "Bearer test-token");
        assert_eq!(
            *body,
            json!({"endTimeSessionIds": [{"sessionId": "123", "endTime": 1234568}]})
        );
    }

    #[tokio::test]
    async fn update_missed_calls_classifies_backend_rejections() {
        for status in [400u16, 401] {
            let read_state = ScriptedReadStateTransport::respond(status, false, None);
            let client = build_client(
                ScriptedHistoryTransport::rejecting(404),
                read_state.clone(),
                Arc::new(RecordingEventSource::default()),
            );

            // Empty input is legal; the call still reaches the network step.
            let response = client.update_missed_calls(&[]).await;

            assert_eq!(
                response,
                OperationResult::Failure {
                    status_code: status
                }
            );
            let calls = read_state.calls.lock().unwrap();
            assert_eq!(calls.len(), 1);
            assert_eq!(calls[0].2, json!({"endTimeSessionIds": []}));
        }
    }

    #[tokio::test]
    #[traced_test]
    async fn update_missed_calls_rejection_emits_one_classified_error_event() {
        let read_state = ScriptedReadStateTransport::respond(400, false, None);
        let client = build_client(
            ScriptedHistoryTransport::rejecting(404),
            read_state.clone(),
            Arc::new(RecordingEventSource::default()),
        );

        let response = client.update_missed_calls(&[]).await;

        assert_eq!(response, OperationResult::Failure { status_code: 400 });
        assert_eq!(read_state.calls.lock().unwrap().len(), 1);
        // One POST, one classified error event carrying the status code and
        // the method context.
        logs_assert(|lines: &[&str]| {
            let classified: Vec<_> = lines
                .iter()
                .filter(|line| line.contains("updateMissedCalls"))
                .collect();
            match classified.as_slice() {
                [line] if line.contains("ERROR") && line.contains("status_code=400") => Ok(()),
                other => Err(format!("expected one classified error event, got {other:?}")),
            }
        });
    }

    #[tokio::test]
    async fn update_missed_calls_classifies_transport_failure_as_unavailable() {
        let client = build_client(
            ScriptedHistoryTransport::rejecting(404),
            Arc::new(FailingReadStateTransport),
            Arc::new(RecordingEventSource::default()),
        );

        let response = client.update_missed_calls(&[]).await;

        assert_eq!(response, OperationResult::Failure { status_code: 503 });
    }

    #[tokio::test]
    async fn update_missed_calls_classifies_unrecognizable_success_body() {
        let read_state =
            ScriptedReadStateTransport::respond(200, true, Some(json!({"weird": true})));
        let client = build_client(
            ScriptedHistoryTransport::rejecting(404),
            read_state,
            Arc::new(RecordingEventSource::default()),
        );

        let response = client.update_missed_calls(&[]).await;

        assert_eq!(response, OperationResult::Failure { status_code: 500 });
    }

    #[tokio::test]
    async fn update_missed_calls_rejects_unparseable_end_time_without_posting() {
        let read_state = ok_read_state();
        let client = build_client(
            ScriptedHistoryTransport::rejecting(404),
            read_state.clone(),
            Arc::new(RecordingEventSource::default()),
        );

        let response = client
            .update_missed_calls(&[EndTimeSessionId {
                session_id: "123".to_string(),
                end_time: "definitely-not-a-date".to_string(),
            }])
            .await;

        assert_eq!(response, OperationResult::Failure { status_code: 422 });
        assert!(read_state.calls.lock().unwrap().is_empty());
    }

    // ===== builder =====

    #[test]
    fn builder_requires_collaborators() {
        let result = CallHistoryClientBuilder::new()
            .read_state_url(READ_STATE_URL)
            .build();
        assert!(matches!(
            result.unwrap_err(),
            CallHistoryError::MissingConfiguration { .. }
        ));
    }

    #[test]
    fn builder_rejects_invalid_read_state_url() {
        let result = CallHistoryClientBuilder::new()
            .read_state_url("not a url")
            .token_provider(Arc::new(FixedTokenProvider))
            .history_transport(ScriptedHistoryTransport::rejecting(404))
            .event_source(Arc::new(RecordingEventSource::default()))
            .build();
        assert!(matches!(
            result.unwrap_err(),
            CallHistoryError::InvalidConfiguration { .. }
        ));
    }
}
