use serde::{Deserialize, Serialize};

use crate::DecodeError;

/// A message object in LINE's outbound wire schema. The serde tag keeps the
/// `type` field in step with the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutboundMessage {
    Text {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    Sticker {
        package_id: String,
        sticker_id: String,
    },
    Location {
        title: String,
        address: String,
        latitude: f64,
        longitude: f64,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        original_content_url: String,
        preview_image_url: String,
    },
    #[serde(rename_all = "camelCase")]
    Audio {
        original_content_url: String,
        /// Milliseconds.
        duration: u64,
    },
    #[serde(rename_all = "camelCase")]
    Video {
        original_content_url: String,
        preview_image_url: String,
        tracking_id: String,
    },
}

/// Body of `POST /v2/bot/message/reply`.
///
/// ```
/// use line_relay_core::{OutboundMessage, Reply};
///
/// let reply = Reply::single("abc", OutboundMessage::Text { text: "You said: hi".into() });
/// assert_eq!(
///     serde_json::to_string(&reply).unwrap(),
///     r#"{"replyToken":"abc","messages":[{"type":"text","text":"You said: hi"}]}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub reply_token: String,
    messages: Vec<OutboundMessage>,
}

impl Reply {
    pub fn single(reply_token: impl Into<String>, message: OutboundMessage) -> Self {
        Self {
            reply_token: reply_token.into(),
            messages: vec![message],
        }
    }

    /// Never empty.
    pub fn messages(&self) -> &[OutboundMessage] {
        &self.messages
    }
}

/// Body of `POST /v2/bot/message/push`, forwarded as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushRequest {
    pub to: String,
    pub messages: Vec<PushMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushMessage {
    #[serde(rename = "type")]
    pub message_type: String,
    pub text: String,
}

pub fn parse_push_request(body: &[u8]) -> Result<PushRequest, DecodeError> {
    serde_json::from_slice(body).map_err(|err| DecodeError::new("push request", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_fields_are_camel_case() {
        let sticker = OutboundMessage::Sticker {
            package_id: "446".into(),
            sticker_id: "1988".into(),
        };
        assert_eq!(
            serde_json::to_value(&sticker).unwrap(),
            json!({"type": "sticker", "packageId": "446", "stickerId": "1988"})
        );

        let video = OutboundMessage::Video {
            original_content_url: "https://example.com/a.mp4".into(),
            preview_image_url: "https://example.com/a.jpg".into(),
            tracking_id: "track-id".into(),
        };
        assert_eq!(
            serde_json::to_value(&video).unwrap(),
            json!({
                "type": "video",
                "originalContentUrl": "https://example.com/a.mp4",
                "previewImageUrl": "https://example.com/a.jpg",
                "trackingId": "track-id"
            })
        );
    }

    #[test]
    fn location_keeps_coordinates_as_numbers() {
        let location = OutboundMessage::Location {
            title: "Location".into(),
            address: "Tokyo".into(),
            latitude: 35.5,
            longitude: 139.25,
        };
        let value = serde_json::to_value(&location).unwrap();
        assert_eq!(value["latitude"], json!(35.5));
        assert_eq!(value["longitude"], json!(139.25));
    }

    #[test]
    fn push_request_is_forwarded_verbatim() {
        let body = br#"{"to":"U123","messages":[{"type":"text","text":"Hello, world"}]}"#;
        let push = parse_push_request(body).unwrap();
        assert_eq!(push.to, "U123");
        assert_eq!(push.messages[0].message_type, "text");
        assert_eq!(
            serde_json::to_value(&push).unwrap(),
            serde_json::from_slice::<serde_json::Value>(body).unwrap()
        );
    }

    #[test]
    fn push_request_rejects_missing_destination() {
        let err = parse_push_request(br#"{"messages":[]}"#).unwrap_err();
        assert_eq!(err.what(), "push request");
    }
}
