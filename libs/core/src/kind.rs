use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Message kinds the relay knows how to answer.
///
/// ```
/// use line_relay_core::MessageKind;
///
/// let kind: MessageKind = "location".parse().unwrap();
/// assert_eq!(kind, MessageKind::Location);
/// assert_eq!(kind.as_str(), "location");
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Sticker,
    Location,
    Image,
    Audio,
    Video,
}

impl MessageKind {
    pub const ALL: [MessageKind; 6] = [
        MessageKind::Text,
        MessageKind::Sticker,
        MessageKind::Location,
        MessageKind::Image,
        MessageKind::Audio,
        MessageKind::Video,
    ];

    /// Returns the `type` discriminator LINE uses for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Sticker => "sticker",
            MessageKind::Location => "location",
            MessageKind::Image => "image",
            MessageKind::Audio => "audio",
            MessageKind::Video => "video",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown message kind `{0}`")]
pub struct UnknownKind(pub String);

impl FromStr for MessageKind {
    type Err = UnknownKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        MessageKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| UnknownKind(value.to_string()))
    }
}
