//! Inbound webhook envelope as delivered by the LINE platform.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{DecodeError, MessageKind};

/// Event `type` that carries a user message.
pub const MESSAGE_EVENT: &str = "message";

/// One webhook delivery. Missing or `null` keys decode to empty values so that
/// a body without `events` is treated as an empty batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub destination: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub events: Vec<EventItem>,
}

impl EventEnvelope {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventItem {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub event_type: String,
    #[serde(rename = "replyToken", default, deserialize_with = "null_as_default")]
    pub reply_token: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: EventSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(
        rename = "webhookEventId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub webhook_event_id: Option<String>,
    /// Kind specific sub-object, narrowed later by [`crate::extract_message`].
    #[serde(default)]
    pub message: Value,
}

impl EventItem {
    pub fn is_message(&self) -> bool {
        self.event_type == MESSAGE_EVENT
    }

    pub fn has_reply_token(&self) -> bool {
        !self.reply_token.is_empty()
    }

    /// Declared `message.type`, if any.
    pub fn message_type(&self) -> Option<&str> {
        self.message.get("type").and_then(Value::as_str)
    }

    pub fn declares(&self, kind: MessageKind) -> bool {
        self.message_type() == Some(kind.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventSource {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub source_type: String,
    #[serde(rename = "userId", default, deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(rename = "groupId", default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(rename = "roomId", default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
}

/// JSON `null` decodes like an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Decodes a webhook body.
///
/// ```
/// use line_relay_core::parse_envelope;
///
/// let env = parse_envelope(br#"{"destination":"U1","events":[]}"#).unwrap();
/// assert!(env.is_empty());
/// assert!(parse_envelope(b"{not json").is_err());
/// ```
pub fn parse_envelope(body: &[u8]) -> Result<EventEnvelope, DecodeError> {
    serde_json::from_slice(body).map_err(|err| DecodeError::new("webhook envelope", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_text_event() {
        let body = br#"{
            "destination": "Uxxxxxxxx",
            "events": [{
                "type": "message",
                "mode": "active",
                "timestamp": 1462629479859,
                "webhookEventId": "01FZ74A0TDDPYRVKNK77XKC3ZR",
                "replyToken": "nHuyWiB7yP5Zw52FIkcQobQuGDXCTA",
                "source": {"type": "user", "userId": "U4af4980629"},
                "message": {"id": "444573844083572737", "type": "text", "text": "hello"}
            }]
        }"#;
        let env = parse_envelope(body).unwrap();
        assert_eq!(env.destination, "Uxxxxxxxx");
        let item = &env.events[0];
        assert!(item.is_message());
        assert!(item.has_reply_token());
        assert_eq!(item.timestamp, 1462629479859);
        assert_eq!(item.source.user_id, "U4af4980629");
        assert_eq!(item.mode.as_deref(), Some("active"));
        assert!(item.declares(MessageKind::Text));
        assert!(!item.declares(MessageKind::Sticker));
    }

    #[test]
    fn missing_events_is_an_empty_batch() {
        let env = parse_envelope(br#"{"destination":"U1"}"#).unwrap();
        assert!(env.is_empty());
    }

    #[test]
    fn missing_item_fields_default() {
        let env = parse_envelope(br#"{"events":[{}]}"#).unwrap();
        let item = &env.events[0];
        assert!(!item.is_message());
        assert!(!item.has_reply_token());
        assert_eq!(item.message_type(), None);
    }

    #[test]
    fn null_fields_decode_as_empty() {
        let env = parse_envelope(br#"{"destination":null,"events":null}"#).unwrap();
        assert!(env.is_empty());
        assert_eq!(env.destination, "");

        let env = parse_envelope(
            br#"{"events":[{"type":"message","replyToken":null,"timestamp":null,"source":null}]}"#,
        )
        .unwrap();
        let item = &env.events[0];
        assert!(item.is_message());
        assert!(!item.has_reply_token());
        assert_eq!(item.source, EventSource::default());

        let env = parse_envelope(br#"{"events":[{"source":{"type":null,"userId":null}}]}"#).unwrap();
        assert_eq!(env.events[0].source.user_id, "");
    }

    #[test]
    fn wrong_scalar_type_is_a_decode_error() {
        let err = parse_envelope(br#"{"events":[{"replyToken": 42}]}"#).unwrap_err();
        assert_eq!(err.what(), "webhook envelope");
        assert!(err.to_string().starts_with("invalid webhook envelope"));
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        assert!(parse_envelope(b"{\"events\": [").is_err());
        assert!(parse_envelope(b"").is_err());
    }
}
