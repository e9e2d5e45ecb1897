use line_relay_telemetry::{TelemetryLabels, record_counter, start_push_span};
use thiserror::Error;
use tracing::{Instrument, info};

use crate::{DecodeError, DispatchError, MessagingApi, parse_push_request};

const PUSH_FORWARDED_COUNTER: &str = "line_push_forwarded";

#[derive(Debug, Error)]
pub enum PushError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Decodes a push request and hands it to the push endpoint unchanged.
/// Returns the number of forwarded messages.
pub async fn forward_push(api: &dyn MessagingApi, body: &[u8]) -> Result<usize, PushError> {
    let request = parse_push_request(body)?;
    let span = start_push_span(&request.to, request.messages.len());
    api.push(&request).instrument(span).await?;

    record_counter(PUSH_FORWARDED_COUNTER, 1, &TelemetryLabels::new("push"));
    info!(to = %request.to, messages = request.messages.len(), "push forwarded");
    Ok(request.messages.len())
}
