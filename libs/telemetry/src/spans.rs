use tracing::Span;

use crate::counters::with_common_fields;

const INGRESS_SPAN_NAME: &str = "ingress.handle";
const REPLY_SPAN_NAME: &str = "egress.reply";
const PUSH_SPAN_NAME: &str = "egress.push";

pub fn start_ingress_span(kind: &str, destination: &str, events: usize) -> Span {
    tracing::info_span!(
        INGRESS_SPAN_NAME,
        kind = %kind,
        destination = %destination,
        events
    )
}

pub fn start_reply_span(kind: &str, reply_token: &str) -> Span {
    let span = tracing::info_span!(
        REPLY_SPAN_NAME,
        kind = tracing::field::Empty,
        reply_token = tracing::field::Empty
    );
    with_common_fields(&span, kind, Some(reply_token));
    span
}

pub fn start_push_span(to: &str, messages: usize) -> Span {
    tracing::info_span!(PUSH_SPAN_NAME, to = %to, messages)
}
