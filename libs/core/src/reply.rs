//! Per-kind reply rules.

use crate::{
    AudioMessage, ImageMessage, InboundMessage, LocationMessage, OutboundMessage, Reply,
    StickerMessage, TextMessage, VideoMessage,
};

pub const TEXT_REPLY_PREFIX: &str = "You said: ";
pub const DEFAULT_LOCATION_TITLE: &str = "Location";
/// LINE rejects location messages with longer addresses.
pub const MAX_ADDRESS_CHARS: usize = 100;

pub const IMAGE_ORIGINAL_URL: &str = "https://upload.wikimedia.org/wikipedia/en/a/a9/Example.jpg";
pub const IMAGE_PREVIEW_URL: &str = "https://upload.wikimedia.org/wikipedia/commons/3/3a/Cat03.jpg";

pub const AUDIO_URL: &str =
    "https://drive.google.com/file/d/1w-0-_hJdDKwiLrXWFoqyelKwHE932uBJ/view";
pub const AUDIO_DURATION_MS: u64 = 240_000;

pub const VIDEO_ORIGINAL_URL: &str =
    "https://storage.googleapis.com/gtv-videos-bucket/sample/ForBiggerEscapes.mp4";
pub const VIDEO_PREVIEW_URL: &str =
    "https://storage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4";
pub const VIDEO_TRACKING_ID: &str = "track-id";

/// Builds the single-message reply for `message`.
///
/// ```
/// use line_relay_core::{build_reply, InboundMessage, TextMessage};
///
/// let msg = InboundMessage::Text(TextMessage { id: "1".into(), text: "hi".into(), quote_token: None });
/// let reply = build_reply(&msg, "abc");
/// assert_eq!(reply.reply_token, "abc");
/// assert_eq!(reply.messages().len(), 1);
/// ```
pub fn build_reply(message: &InboundMessage, reply_token: &str) -> Reply {
    Reply::single(reply_token, reply_message(message))
}

pub fn reply_message(message: &InboundMessage) -> OutboundMessage {
    match message {
        InboundMessage::Text(text) => text_reply(text),
        InboundMessage::Sticker(sticker) => sticker_reply(sticker),
        InboundMessage::Location(location) => location_reply(location),
        InboundMessage::Image(image) => image_reply(image),
        InboundMessage::Audio(audio) => audio_reply(audio),
        InboundMessage::Video(video) => video_reply(video),
    }
}

fn text_reply(message: &TextMessage) -> OutboundMessage {
    OutboundMessage::Text {
        text: format!("{TEXT_REPLY_PREFIX}{}", message.text),
    }
}

fn sticker_reply(message: &StickerMessage) -> OutboundMessage {
    OutboundMessage::Sticker {
        package_id: message.package_id.clone(),
        sticker_id: message.sticker_id.clone(),
    }
}

fn location_reply(message: &LocationMessage) -> OutboundMessage {
    let title = match message.title.as_deref() {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => DEFAULT_LOCATION_TITLE.to_string(),
    };
    OutboundMessage::Location {
        title,
        address: truncate_chars(&message.address, MAX_ADDRESS_CHARS).to_string(),
        latitude: message.latitude,
        longitude: message.longitude,
    }
}

fn image_reply(_message: &ImageMessage) -> OutboundMessage {
    OutboundMessage::Image {
        original_content_url: IMAGE_ORIGINAL_URL.into(),
        preview_image_url: IMAGE_PREVIEW_URL.into(),
    }
}

fn audio_reply(_message: &AudioMessage) -> OutboundMessage {
    OutboundMessage::Audio {
        original_content_url: AUDIO_URL.into(),
        duration: AUDIO_DURATION_MS,
    }
}

fn video_reply(_message: &VideoMessage) -> OutboundMessage {
    OutboundMessage::Video {
        original_content_url: VIDEO_ORIGINAL_URL.into(),
        preview_image_url: VIDEO_PREVIEW_URL.into(),
        tracking_id: VIDEO_TRACKING_ID.into(),
    }
}

/// First `max` characters of `value`, never splitting a character.
pub fn truncate_chars(value: &str, max: usize) -> &str {
    match value.char_indices().nth(max) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
