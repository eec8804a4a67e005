//! OTLP/JSON encoding of finished spans.
//!
//! Each exported batch becomes one self-contained `resourceSpans` document,
//! so the trace file can be fed line by line to any OTLP/JSON consumer.

use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status};
use opentelemetry::{Array, KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::{json, Value as Json};
use std::time::{SystemTime, UNIX_EPOCH};

/// Encodes span batches under a fixed resource and scope.
pub struct OtlpJsonEncoder {
    resource: Resource,
    scope: &'static str,
}

impl OtlpJsonEncoder {
    pub const fn new(resource: Resource, scope: &'static str) -> Self {
        Self { resource, scope }
    }

    /// Builds the document for one batch.
    pub fn encode_batch(&self, batch: &[SpanData]) -> Json {
        let resource_attributes: Vec<Json> = self
            .resource
            .iter()
            .map(|(key, value)| json!({ "key": key.as_str(), "value": encode_value(value) }))
            .collect();

        json!({
            "resourceSpans": [{
                "resource": { "attributes": resource_attributes },
                "scopeSpans": [{
                    "scope": { "name": self.scope },
                    "spans": batch.iter().map(encode_span).collect::<Vec<_>>(),
                }],
            }],
        })
    }
}

impl std::fmt::Debug for OtlpJsonEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtlpJsonEncoder").field("scope", &self.scope).finish_non_exhaustive()
    }
}

fn encode_span(span: &SpanData) -> Json {
    let parent = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };
    let (code, message) = encode_status(&span.status);

    json!({
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent,
        "name": span.name,
        "kind": kind_code(&span.span_kind),
        "startTimeUnixNano": unix_nanos(span.start_time),
        "endTimeUnixNano": unix_nanos(span.end_time),
        "attributes": encode_attributes(&span.attributes),
        "events": span.events.iter().map(encode_event).collect::<Vec<_>>(),
        "links": span.links.iter().map(encode_link).collect::<Vec<_>>(),
        "status": { "code": code, "message": message },
    })
}

fn encode_event(event: &Event) -> Json {
    json!({
        "timeUnixNano": unix_nanos(event.timestamp),
        "name": event.name,
        "attributes": encode_attributes(&event.attributes),
    })
}

fn encode_link(link: &Link) -> Json {
    json!({
        "traceId": format!("{:032x}", link.span_context.trace_id()),
        "spanId": format!("{:016x}", link.span_context.span_id()),
        "attributes": encode_attributes(&link.attributes),
    })
}

fn encode_attributes(attributes: &[KeyValue]) -> Vec<Json> {
    attributes
        .iter()
        .map(|kv| json!({ "key": kv.key.as_str(), "value": encode_value(&kv.value) }))
        .collect()
}

/// OTLP encodes 64-bit integers and timestamps as decimal strings.
fn encode_value(value: &Value) -> Json {
    match value {
        Value::Bool(b) => json!({ "boolValue": b }),
        Value::I64(i) => json!({ "intValue": i.to_string() }),
        Value::F64(f) => json!({ "doubleValue": f }),
        Value::String(s) => json!({ "stringValue": s.as_str() }),
        Value::Array(array) => {
            let values: Vec<Json> = match array {
                Array::Bool(items) => items.iter().map(|b| json!({ "boolValue": b })).collect(),
                Array::I64(items) => items.iter().map(|i| json!({ "intValue": i.to_string() })).collect(),
                Array::F64(items) => items.iter().map(|f| json!({ "doubleValue": f })).collect(),
                Array::String(items) => items.iter().map(|s| json!({ "stringValue": s.as_str() })).collect(),
            };
            json!({ "arrayValue": { "values": values } })
        }
    }
}

const fn kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn encode_status(status: &Status) -> (u8, String) {
    match status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    }
}

fn unix_nanos(at: SystemTime) -> String {
    at.duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_values_use_otlp_field_names() {
        assert_eq!(encode_value(&Value::I64(42)), json!({ "intValue": "42" }));
        assert_eq!(encode_value(&Value::Bool(true)), json!({ "boolValue": true }));
        assert_eq!(encode_value(&Value::from("grade")), json!({ "stringValue": "grade" }));
    }

    #[test]
    fn arrays_are_encoded_element_wise() {
        let value = Value::Array(Array::I64(vec![1, 2]));
        assert_eq!(
            encode_value(&value),
            json!({ "arrayValue": { "values": [{ "intValue": "1" }, { "intValue": "2" }] } })
        );
    }

    #[test]
    fn status_codes() {
        assert_eq!(encode_status(&Status::Unset), (0, String::new()));
        assert_eq!(encode_status(&Status::error("timed out")), (2, "timed out".to_string()));
        assert_eq!(kind_code(&SpanKind::Client), 3);
    }

    #[test]
    fn empty_batch_still_carries_resource() {
        let encoder = OtlpJsonEncoder::new(Resource::new(vec![KeyValue::new("service.name", "foodlens")]), "foodlens");
        let doc = encoder.encode_batch(&[]);

        let scope = &doc["resourceSpans"][0]["scopeSpans"][0];
        assert_eq!(scope["scope"]["name"], "foodlens");
        assert_eq!(scope["spans"], json!([]));

        let attributes = doc["resourceSpans"][0]["resource"]["attributes"].as_array().unwrap();
        assert!(attributes
            .iter()
            .any(|a| a["key"] == "service.name" && a["value"]["stringValue"] == "foodlens"));
    }
}
