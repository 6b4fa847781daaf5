//! OTLP JSON span serialization.
//!
//! Converts OpenTelemetry span data into OTLP JSON documents so the trace
//! file stays readable by standard OTLP collectors and viewers.

use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::Value as JsonValue;

/// Formats span batches into complete OTLP JSON documents.
///
/// Every document carries the resource attributes and a single scope named
/// `zlauncher`:
///
/// ```json
/// {
///   "resourceSpans": [{
///     "resource": {
///       "attributes": [{"key": "service.name", "value": {"stringValue": "zlauncher"}}]
///     },
///     "scopeSpans": [{
///       "scope": {"name": "zlauncher"},
///       "spans": [...]
///     }]
///   }]
/// }
/// ```
pub struct SpanFormatter {
    resource: Resource,
}

impl SpanFormatter {
    pub const fn new(resource: Resource) -> Self {
        Self { resource }
    }

    /// Formats a batch of spans as one OTLP document.
    pub fn format_batch(&self, batch: &[SpanData]) -> JsonValue {
        let resource_attrs: Vec<JsonValue> = self
            .resource
            .iter()
            .map(|(k, v)| {
                serde_json::json!({
                    "key": k.to_string(),
                    "value": Self::value_json(v)
                })
            })
            .collect();

        let spans_json: Vec<JsonValue> = batch.iter().map(Self::span_json).collect();

        serde_json::json!({
            "resourceSpans": [{
                "resource": {
                    "attributes": resource_attrs
                },
                "scopeSpans": [{
                    "scope": {
                        "name": "zlauncher",
                    },
                    "spans": spans_json
                }]
            }]
        })
    }

    /// Serializes one span: IDs as hex strings, timestamps as nanosecond
    /// strings, the parent ID empty for root spans.
    fn span_json(span: &SpanData) -> JsonValue {
        let (status_code, status_message) = Self::status_json(&span.status);

        serde_json::json!({
            "traceId": format!("{:032x}", span.span_context.trace_id()),
            "spanId": format!("{:016x}", span.span_context.span_id()),
            "parentSpanId": if span.parent_span_id == opentelemetry::trace::SpanId::INVALID {
                String::new()
            } else {
                format!("{:016x}", span.parent_span_id)
            },
            "name": span.name,
            "kind": Self::span_kind_to_int(&span.span_kind),
            "startTimeUnixNano": format!("{}", unix_nanos(span.start_time)),
            "endTimeUnixNano": format!("{}", unix_nanos(span.end_time)),
            "attributes": Self::attributes_json(&span.attributes),
            "events": Self::events_json(&span.events),
            "links": Self::links_json(&span.links),
            "status": {
                "code": status_code,
                "message": status_message,
            },
        })
    }

    /// OTLP span kind codes: Internal=1, Server=2, Client=3, Producer=4,
    /// Consumer=5.
    const fn span_kind_to_int(kind: &opentelemetry::trace::SpanKind) -> u8 {
        match kind {
            opentelemetry::trace::SpanKind::Internal => 1,
            opentelemetry::trace::SpanKind::Server => 2,
            opentelemetry::trace::SpanKind::Client => 3,
            opentelemetry::trace::SpanKind::Producer => 4,
            opentelemetry::trace::SpanKind::Consumer => 5,
        }
    }

    fn attributes_json(attributes: &[opentelemetry::KeyValue]) -> Vec<JsonValue> {
        attributes
            .iter()
            .map(|kv| {
                serde_json::json!({
                    "key": kv.key.to_string(),
                    "value": Self::value_json(&kv.value)
                })
            })
            .collect()
    }

    /// OTLP typed values. Integers travel as strings per the OTLP JSON
    /// mapping; arrays fall back to their debug rendering.
    fn value_json(value: &opentelemetry::Value) -> JsonValue {
        use opentelemetry::Value;

        match value {
            Value::Bool(b) => serde_json::json!({ "boolValue": b }),
            Value::I64(i) => serde_json::json!({ "intValue": i.to_string() }),
            Value::F64(f) => serde_json::json!({ "doubleValue": f }),
            Value::String(s) => serde_json::json!({ "stringValue": s.to_string() }),
            Value::Array(_arr) => {
                serde_json::json!({ "stringValue": format!("{:?}", value) })
            }
        }
    }

    fn events_json(events: &[opentelemetry::trace::Event]) -> Vec<JsonValue> {
        events
            .iter()
            .map(|event| {
                serde_json::json!({
                    "timeUnixNano": format!("{}", unix_nanos(event.timestamp)),
                    "name": event.name,
                    "attributes": Self::attributes_json(&event.attributes),
                })
            })
            .collect()
    }

    fn links_json(links: &[opentelemetry::trace::Link]) -> Vec<JsonValue> {
        links
            .iter()
            .map(|link| {
                serde_json::json!({
                    "traceId": format!("{:032x}", link.span_context.trace_id()),
                    "spanId": format!("{:016x}", link.span_context.span_id()),
                    "attributes": Self::attributes_json(&link.attributes),
                })
            })
            .collect()
    }

    /// Status codes: Unset=0, Ok=1, Error=2 with the description.
    fn status_json(status: &opentelemetry::trace::Status) -> (u8, String) {
        match status {
            opentelemetry::trace::Status::Unset => (0, String::new()),
            opentelemetry::trace::Status::Ok => (1, String::new()),
            opentelemetry::trace::Status::Error { description } => (2, description.to_string()),
        }
    }
}

fn unix_nanos(time: std::time::SystemTime) -> u128 {
    time.duration_since(std::time::SystemTime::UNIX_EPOCH)
        .unwrap_or(std::time::Duration::from_secs(0))
        .as_nanos()
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter").finish()
    }
}
