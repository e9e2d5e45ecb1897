use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    routing::{MethodRouter, get, post},
};
use line_relay_core::{
    EventEnvelope, MessageKind, SharedMessagingApi, forward_push, parse_envelope,
    process_events,
};
use line_relay_telemetry::start_ingress_span;
use tracing::{Instrument, error, info, warn};

use crate::error::ApiError;
use crate::respond::{MessageBody, NO_EVENTS_MESSAGE, PUSH_SENT_MESSAGE, ack, batch_message};

const LIVENESS_BODY: &str = "Server is running";

#[derive(Clone)]
pub struct AppState {
    api: SharedMessagingApi,
}

impl AppState {
    pub fn new(api: SharedMessagingApi) -> Self {
        Self { api }
    }
}

pub fn router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(liveness))
        .route("/send", post(push_message));
    for kind in MessageKind::ALL {
        router = router.route(route_path(kind), events_route(kind));
    }
    router.with_state(state)
}

/// Webhook path for each kind. Text events arrive on `/message`.
pub fn route_path(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Text => "/message",
        MessageKind::Sticker => "/sticker",
        MessageKind::Location => "/location",
        MessageKind::Image => "/image",
        MessageKind::Audio => "/audio",
        MessageKind::Video => "/video",
    }
}

fn events_route(kind: MessageKind) -> MethodRouter<AppState> {
    post(move |State(state): State<AppState>, body: Bytes| async move {
        handle_events(&state, kind, &body).await
    })
}

async fn liveness() -> &'static str {
    LIVENESS_BODY
}

async fn handle_events(
    state: &AppState,
    kind: MessageKind,
    body: &[u8],
) -> Result<Json<MessageBody>, ApiError> {
    let envelope = parse_envelope(body).map_err(|err| {
        warn!(kind = %kind, error = %err, "rejecting webhook body");
        err
    })?;

    let span = start_ingress_span(kind.as_str(), &envelope.destination, envelope.events.len());
    run_batch(state, kind, &envelope).instrument(span).await
}

async fn run_batch(
    state: &AppState,
    kind: MessageKind,
    envelope: &EventEnvelope,
) -> Result<Json<MessageBody>, ApiError> {
    if envelope.is_empty() {
        info!("no events to process");
        return Ok(ack(NO_EVENTS_MESSAGE));
    }

    let outcome = process_events(kind, envelope, state.api.as_ref())
        .await
        .map_err(|err| {
            error!(error = %err, "failed to map event message");
            err
        })?;

    info!(
        received = outcome.received,
        dispatched = outcome.dispatched,
        skipped = outcome.skipped,
        failed = outcome.failed,
        "webhook batch processed"
    );
    Ok(ack(batch_message(kind)))
}

async fn push_message(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MessageBody>, ApiError> {
    forward_push(state.api.as_ref(), &body).await.map_err(|err| {
        error!(error = %err, "push forwarding failed");
        ApiError::from(err)
    })?;
    Ok(ack(PUSH_SENT_MESSAGE))
}
