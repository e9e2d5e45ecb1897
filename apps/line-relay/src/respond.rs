use axum::Json;
use line_relay_core::MessageKind;
use serde::{Deserialize, Serialize};

pub const NO_EVENTS_MESSAGE: &str = "No events to process";
pub const PUSH_SENT_MESSAGE: &str = "Message sent successfully";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

/// 200 body for an accepted request.
pub fn ack(message: &str) -> Json<MessageBody> {
    Json(MessageBody {
        message: message.to_string(),
    })
}

/// Message returned once a batch of the given kind has been walked.
pub fn batch_message(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Text => "Success",
        MessageKind::Video => "Video message processed successfully",
        _ => "Message sent successfully",
    }
}
