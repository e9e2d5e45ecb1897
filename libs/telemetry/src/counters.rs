use crate::context::TelemetryLabels;
use metrics::Label;
use tracing::Span;

pub fn record_counter(name: &'static str, value: u64, labels: &TelemetryLabels) {
    let labels: Vec<Label> = labels
        .tags()
        .into_iter()
        .map(|(key, value)| Label::new(key, value))
        .collect();
    metrics::counter!(name, labels).increment(value);
}

pub fn with_common_fields(span: &Span, kind: &str, reply_token: Option<&str>) {
    span.record("kind", tracing::field::display(kind));
    if let Some(token) = reply_token {
        span.record("reply_token", tracing::field::display(token));
    }
}
