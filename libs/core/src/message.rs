//! Kind specific inbound messages and the extractor that narrows a raw
//! `message` object into one of them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{MappingError, MessageKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextMessage {
    #[serde(default)]
    pub id: String,
    pub text: String,
    #[serde(rename = "quoteToken", default, skip_serializing_if = "Option::is_none")]
    pub quote_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickerMessage {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "stickerId")]
    pub sticker_id: String,
    #[serde(rename = "packageId")]
    pub package_id: String,
    #[serde(
        rename = "stickerResourceType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sticker_resource_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationMessage {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Where LINE keeps the binary content of a media message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentProvider {
    #[serde(rename = "type", default)]
    pub provider_type: String,
    #[serde(
        rename = "originalContentUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub original_content_url: Option<String>,
    #[serde(
        rename = "previewImageUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub preview_image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMessage {
    #[serde(default)]
    pub id: String,
    #[serde(
        rename = "contentProvider",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub content_provider: Option<ContentProvider>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioMessage {
    #[serde(default)]
    pub id: String,
    /// Milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(
        rename = "contentProvider",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub content_provider: Option<ContentProvider>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMessage {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(
        rename = "contentProvider",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub content_provider: Option<ContentProvider>,
}

/// A user message narrowed to its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    Text(TextMessage),
    Sticker(StickerMessage),
    Location(LocationMessage),
    Image(ImageMessage),
    Audio(AudioMessage),
    Video(VideoMessage),
}

impl InboundMessage {
    pub fn kind(&self) -> MessageKind {
        match self {
            InboundMessage::Text(_) => MessageKind::Text,
            InboundMessage::Sticker(_) => MessageKind::Sticker,
            InboundMessage::Location(_) => MessageKind::Location,
            InboundMessage::Image(_) => MessageKind::Image,
            InboundMessage::Audio(_) => MessageKind::Audio,
            InboundMessage::Video(_) => MessageKind::Video,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            InboundMessage::Text(m) => &m.id,
            InboundMessage::Sticker(m) => &m.id,
            InboundMessage::Location(m) => &m.id,
            InboundMessage::Image(m) => &m.id,
            InboundMessage::Audio(m) => &m.id,
            InboundMessage::Video(m) => &m.id,
        }
    }
}

/// Decodes `message` as the structure for `kind`.
///
/// The caller is expected to have checked the declared `type` already; this
/// only validates the shape. Extra keys (including `type`) are ignored.
///
/// ```
/// use line_relay_core::{extract_message, InboundMessage, MessageKind};
/// use serde_json::json;
///
/// let raw = json!({"type": "sticker", "id": "1", "stickerId": "52002734", "packageId": "11537"});
/// match extract_message(MessageKind::Sticker, &raw).unwrap() {
///     InboundMessage::Sticker(sticker) => assert_eq!(sticker.package_id, "11537"),
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
pub fn extract_message(kind: MessageKind, message: &Value) -> Result<InboundMessage, MappingError> {
    let extracted = match kind {
        MessageKind::Text => InboundMessage::Text(decode_as(kind, message)?),
        MessageKind::Sticker => InboundMessage::Sticker(decode_as(kind, message)?),
        MessageKind::Location => InboundMessage::Location(decode_as(kind, message)?),
        MessageKind::Image => InboundMessage::Image(decode_as(kind, message)?),
        MessageKind::Audio => InboundMessage::Audio(decode_as(kind, message)?),
        MessageKind::Video => InboundMessage::Video(decode_as(kind, message)?),
    };
    Ok(extracted)
}

fn decode_as<T: DeserializeOwned>(kind: MessageKind, value: &Value) -> Result<T, MappingError> {
    T::deserialize(value).map_err(|err| MappingError::new(kind, err))
}
