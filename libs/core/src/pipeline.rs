//! Classify, build and dispatch one webhook batch.

use line_relay_telemetry::{TelemetryLabels, record_counter, start_reply_span};
use tracing::{Instrument, debug, info, warn};

use crate::{
    EventEnvelope, EventItem, MappingError, MessageKind, MessagingApi, Reply, build_reply,
    extract_message,
};

const EVENTS_RECEIVED_COUNTER: &str = "line_events_received";
const EVENTS_SKIPPED_COUNTER: &str = "line_events_skipped";
const REPLIES_SENT_COUNTER: &str = "line_replies_sent";
const REPLY_FAILURES_COUNTER: &str = "line_reply_failures";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotAMessage,
    MissingReplyToken,
    KindMismatch,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NotAMessage => "not_a_message",
            SkipReason::MissingReplyToken => "missing_reply_token",
            SkipReason::KindMismatch => "kind_mismatch",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemPlan {
    Skip(SkipReason),
    Reply(Reply),
}

/// Per-batch counts. `dispatched + skipped + failed == received` once the
/// whole batch has been walked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub received: usize,
    pub dispatched: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Decides what to do with one event without touching the network.
pub fn plan_item(kind: MessageKind, item: &EventItem) -> Result<ItemPlan, MappingError> {
    if !item.is_message() {
        return Ok(ItemPlan::Skip(SkipReason::NotAMessage));
    }
    if !item.has_reply_token() {
        return Ok(ItemPlan::Skip(SkipReason::MissingReplyToken));
    }
    if !item.declares(kind) {
        return Ok(ItemPlan::Skip(SkipReason::KindMismatch));
    }
    let message = extract_message(kind, &item.message)?;
    debug!(kind = %kind, message_id = message.id(), "message mapped");
    Ok(ItemPlan::Reply(build_reply(&message, &item.reply_token)))
}

/// Walks the batch in order. A mapping failure stops the walk; dispatch
/// failures are logged and counted but never stop it.
pub async fn process_events(
    kind: MessageKind,
    envelope: &EventEnvelope,
    api: &dyn MessagingApi,
) -> Result<BatchOutcome, MappingError> {
    let labels = TelemetryLabels::new(kind.as_str()).with_destination(&envelope.destination);
    let mut outcome = BatchOutcome {
        received: envelope.events.len(),
        ..BatchOutcome::default()
    };
    record_counter(EVENTS_RECEIVED_COUNTER, outcome.received as u64, &labels);

    for (index, item) in envelope.events.iter().enumerate() {
        let reply = match plan_item(kind, item)? {
            ItemPlan::Reply(reply) => reply,
            ItemPlan::Skip(reason) => {
                debug!(
                    index,
                    reason = reason.as_str(),
                    event_type = %item.event_type,
                    message_type = item.message_type().unwrap_or_default(),
                    "event skipped"
                );
                outcome.skipped += 1;
                record_counter(
                    EVENTS_SKIPPED_COUNTER,
                    1,
                    &labels.clone().with("reason", reason.as_str()),
                );
                continue;
            }
        };

        let span = start_reply_span(kind.as_str(), &reply.reply_token);
        match api.reply(&reply).instrument(span).await {
            Ok(()) => {
                outcome.dispatched += 1;
                record_counter(REPLIES_SENT_COUNTER, 1, &labels);
                info!(index, kind = %kind, "reply dispatched");
            }
            Err(err) => {
                outcome.failed += 1;
                record_counter(
                    REPLY_FAILURES_COUNTER,
                    1,
                    &labels.clone().with("code", err.code()),
                );
                warn!(index, kind = %kind, code = err.code(), error = %err, "reply dispatch failed");
            }
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DispatchError, OutboundMessage, PushRequest, parse_envelope};
    use async_trait::async_trait;
    use http::StatusCode;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingApi {
        replies: Mutex<Vec<Reply>>,
        fail_tokens: Vec<String>,
    }

    impl RecordingApi {
        fn failing_for(tokens: &[&str]) -> Self {
            Self {
                replies: Mutex::new(Vec::new()),
                fail_tokens: tokens.iter().map(|t| t.to_string()).collect(),
            }
        }

        fn tokens(&self) -> Vec<String> {
            self.replies
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.reply_token.clone())
                .collect()
        }
    }

    #[async_trait]
    impl MessagingApi for RecordingApi {
        async fn reply(&self, reply: &Reply) -> Result<(), DispatchError> {
            self.replies.lock().unwrap().push(reply.clone());
            if self.fail_tokens.contains(&reply.reply_token) {
                return Err(DispatchError::Remote {
                    status: StatusCode::BAD_REQUEST,
                    body: "{\"message\":\"Invalid reply token\"}".into(),
                });
            }
            Ok(())
        }

        async fn push(&self, _request: &PushRequest) -> Result<(), DispatchError> {
            Ok(())
        }
    }

    fn envelope(events: serde_json::Value) -> EventEnvelope {
        let body = json!({"destination": "Ubot", "events": events});
        parse_envelope(body.to_string().as_bytes()).unwrap()
    }

    fn text_event(token: &str, text: &str) -> serde_json::Value {
        json!({
            "type": "message",
            "replyToken": token,
            "message": {"type": "text", "id": "1", "text": text}
        })
    }

    #[tokio::test]
    async fn empty_batch_dispatches_nothing() {
        let api = RecordingApi::default();
        let outcome = process_events(MessageKind::Text, &envelope(json!([])), &api)
            .await
            .unwrap();
        assert_eq!(outcome, BatchOutcome::default());
        assert!(api.tokens().is_empty());
    }

    #[tokio::test]
    async fn skips_foreign_items_but_keeps_siblings() {
        let api = RecordingApi::default();
        let env = envelope(json!([
            {"type": "follow", "replyToken": "follow-token"},
            text_event("", "no token"),
            {"type": "message", "replyToken": "sticker-token",
             "message": {"type": "sticker", "stickerId": "1", "packageId": "2"}},
            text_event("t-1", "hi"),
        ]));

        let outcome = process_events(MessageKind::Text, &env, &api).await.unwrap();
        assert_eq!(
            outcome,
            BatchOutcome {
                received: 4,
                dispatched: 1,
                skipped: 3,
                failed: 0,
            }
        );
        assert_eq!(api.tokens(), vec!["t-1"]);
        let replies = api.replies.lock().unwrap();
        assert_eq!(
            replies[0].messages(),
            &[OutboundMessage::Text {
                text: "You said: hi".into()
            }]
        );
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn dispatch_failure_does_not_stop_the_batch() {
        let api = RecordingApi::failing_for(&["t-1"]);
        let env = envelope(json!([text_event("t-1", "first"), text_event("t-2", "second")]));

        let outcome = process_events(MessageKind::Text, &env, &api).await.unwrap();
        assert_eq!(outcome.dispatched, 1);
        assert_eq!(outcome.failed, 1);
        assert_eq!(api.tokens(), vec!["t-1", "t-2"]);
        assert!(logs_contain("reply dispatch failed"));
    }

    #[tokio::test]
    async fn mapping_failure_aborts_the_batch() {
        let api = RecordingApi::default();
        let env = envelope(json!([
            {"type": "message", "replyToken": "bad",
             "message": {"type": "location", "address": "x", "latitude": "north", "longitude": 1}},
            {"type": "message", "replyToken": "good",
             "message": {"type": "location", "address": "x", "latitude": 1.0, "longitude": 1.0}},
        ]));

        let err = process_events(MessageKind::Location, &env, &api)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), MessageKind::Location);
        assert!(api.tokens().is_empty());
    }

    #[test]
    #[tracing_test::traced_test]
    fn mapped_message_id_is_logged() {
        let item = EventItem {
            event_type: "message".into(),
            reply_token: "tok".into(),
            message: json!({"type": "text", "id": "468789577898262530", "text": "hi"}),
            ..EventItem::default()
        };
        assert!(matches!(
            plan_item(MessageKind::Text, &item).unwrap(),
            ItemPlan::Reply(_)
        ));
        assert!(logs_contain("468789577898262530"));
    }

    #[test]
    fn plan_orders_checks() {
        let item = EventItem {
            event_type: "postback".into(),
            ..EventItem::default()
        };
        assert_eq!(
            plan_item(MessageKind::Text, &item).unwrap(),
            ItemPlan::Skip(SkipReason::NotAMessage)
        );

        let item = EventItem {
            event_type: "message".into(),
            message: json!({"type": "image"}),
            ..EventItem::default()
        };
        assert_eq!(
            plan_item(MessageKind::Image, &item).unwrap(),
            ItemPlan::Skip(SkipReason::MissingReplyToken)
        );

        let item = EventItem {
            event_type: "message".into(),
            reply_token: "tok".into(),
            message: json!({"type": "audio", "duration": 1000}),
            ..EventItem::default()
        };
        assert_eq!(
            plan_item(MessageKind::Video, &item).unwrap(),
            ItemPlan::Skip(SkipReason::KindMismatch)
        );
        assert!(matches!(
            plan_item(MessageKind::Audio, &item).unwrap(),
            ItemPlan::Reply(_)
        ));
    }
}
