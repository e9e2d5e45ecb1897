use http::StatusCode;
use thiserror::Error;

use crate::MessageKind;

/// Inbound payload could not be decoded. Caused by the caller.
#[derive(Debug, Error)]
#[error("invalid {what}: {source}")]
pub struct DecodeError {
    what: &'static str,
    #[source]
    source: serde_json::Error,
}

impl DecodeError {
    pub fn new(what: &'static str, source: serde_json::Error) -> Self {
        Self { what, source }
    }

    pub fn what(&self) -> &'static str {
        self.what
    }
}

/// A message sub-object did not match the shape expected for its kind.
///
/// The webhook envelope was valid JSON, so this points at drift between the
/// platform schema and our message types rather than at a bad request.
#[derive(Debug, Error)]
#[error("failed to map {kind} message: {source}")]
pub struct MappingError {
    kind: MessageKind,
    #[source]
    source: serde_json::Error,
}

impl MappingError {
    pub fn new(kind: MessageKind, source: serde_json::Error) -> Self {
        Self { kind, source }
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }
}

/// Outbound call to the messaging API failed.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("payload serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),
    #[error("transport error: {0}")]
    Transport(#[source] anyhow::Error),
    #[error("remote error {status}: {body}")]
    Remote { status: StatusCode, body: String },
}

impl DispatchError {
    pub fn code(&self) -> &'static str {
        match self {
            DispatchError::Serialization(_) => "E_SERIAL",
            DispatchError::Transport(_) => "E_TRANSPORT",
            DispatchError::Remote { status, .. } if status.is_server_error() => "E_SERVER",
            DispatchError::Remote { .. } => "E_CLIENT",
        }
    }
}
