//! Conversion of untrusted remote payloads into render-safe records.
//!
//! The history endpoint is loosely typed: it may answer with an array of
//! workout objects, a bare error object, or anything else JSON-shaped.
//! `normalize` is the single place that turns such a payload into records
//! the view can render without any further type checks.

use serde_json::Value;

use crate::models::WorkoutRecord;

/// Converts an arbitrary JSON payload into renderable workout records.
///
/// Total over any JSON-decoded input:
/// - a payload that is not an array yields an empty list, logged as a
///   warning and otherwise indistinguishable from "no workouts";
/// - an element that is not an object becomes a flagged entry titled with
///   its literal text, without aborting its siblings;
/// - scalar fields of unexpected type coerce to absent.
///
/// Pure apart from the warning log: equal payloads yield field-for-field
/// equal output, and server order is preserved.
pub fn normalize(payload: &Value) -> Vec<WorkoutRecord> {
    let Value::Array(items) = payload else {
        tracing::warn!(
            payload_kind = kind_name(payload),
            "workout payload is not an array; treating as empty history"
        );
        return Vec::new();
    };
    items.iter().map(normalize_entry).collect()
}

fn normalize_entry(item: &Value) -> WorkoutRecord {
    let Value::Object(fields) = item else {
        return WorkoutRecord {
            user: None,
            title: literal_text(item),
            duration: None,
            calories: None,
            feedback: None,
            date: None,
            invalid: true,
            raw: item.clone(),
        };
    };

    WorkoutRecord {
        user: string_field(fields.get("user")),
        title: title_text(fields.get("workout")),
        duration: number_field(fields.get("duration")),
        calories: number_field(fields.get("calories")),
        feedback: string_field(fields.get("feedback")),
        date: string_field(fields.get("date")),
        invalid: false,
        raw: item.clone(),
    }
}

/// Strings pass through; any other type coerces to absent.
fn string_field(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// Numbers pass through; any other type coerces to absent.
fn number_field(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    }
}

/// The title always resolves to a string. A missing or null `workout` field
/// titles the record with the empty string; anything else renders through
/// [`literal_text`].
fn title_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(value) => literal_text(value),
    }
}

/// Literal text form of a JSON value: strings unquoted, everything else in
/// its canonical JSON rendering. Object keys come out sorted (serde_json's
/// default map is ordered), so structured titles are deterministic.
fn literal_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
