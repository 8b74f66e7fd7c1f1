//! Envelope detection — classifies one decoded log line and resolves the
//! embedded message plus its metadata.
//!
//! Two export shapes are understood:
//!
//! ```text
//! Flat     {"date": …, "kubernetes.pod_name": …, "log_obj": {"log": …, "X-Request-ID": …}}
//! Nested   {"result": {"results": [{"metadata": [{key, value}…],
//!                                   "labels":   [{key, value}…],
//!                                   "userData": "<JSON text>"}, …]}}
//! ```
//!
//! A nested envelope fans out: every sub-result is resolved on its own and a
//! failure in one never affects its siblings.

use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::ExtractError;
use crate::types::ResolvedMessage;

/// Structural classification of a decoded log line.
#[derive(Debug, Clone, Copy)]
pub enum Envelope<'a> {
    /// One message carried directly under `log_obj`.
    Flat(&'a Map<String, Value>),
    /// A non-empty `result.results` container of independent sub-results.
    Nested(&'a [Value]),
    /// Neither shape, or an empty results container.
    Unrecognized,
}

impl<'a> Envelope<'a> {
    /// Classify `root`. A non-empty results container takes precedence over
    /// `log_obj` when a line somehow carries both.
    pub fn detect(root: &'a Value) -> Self {
        let Some(obj) = root.as_object() else {
            return Envelope::Unrecognized;
        };

        let results = obj
            .get("result")
            .and_then(|r| r.get("results"))
            .and_then(Value::as_array);
        if let Some(results) = results {
            if !results.is_empty() {
                return Envelope::Nested(results);
            }
        }

        if obj.contains_key("log_obj") {
            Envelope::Flat(obj)
        } else {
            Envelope::Unrecognized
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve a flat envelope. Never fails: missing keys resolve to empty text,
/// and an empty message is filtered later by the marker check.
pub fn resolve_flat(obj: &Map<String, Value>) -> ResolvedMessage {
    let log_obj = obj.get("log_obj");
    ResolvedMessage {
        message: message_text(log_obj.and_then(|l| l.get("log"))),
        timestamp: scalar_text(obj.get("date")),
        log_id: scalar_text(log_obj.and_then(|l| l.get("X-Request-ID"))),
        // Fluent Bit flattens the kubernetes block into a dotted top-level key.
        pod_name: scalar_text(obj.get("kubernetes.pod_name")),
    }
}

/// Resolve one sub-result of a nested envelope.
///
/// `userData` is normally a JSON document encoded as a string; an already
/// decoded object is accepted as well. A missing `userData` behaves like `{}`.
pub fn resolve_sub_result(sub: &Value) -> Result<ResolvedMessage, ExtractError> {
    let metadata = pair_list(sub.get("metadata"), "metadata")?;
    // Labels carry nothing we extract, but a malformed list still marks the
    // sub-result as corrupt.
    pair_list(sub.get("labels"), "labels")?;

    let decoded: Value;
    let user_data: &Value = match sub.get("userData") {
        Some(Value::String(text)) => {
            decoded = serde_json::from_str(text).map_err(ExtractError::InvalidUserData)?;
            &decoded
        }
        Some(other) => other,
        None => {
            decoded = Value::Null;
            &decoded
        }
    };

    Ok(ResolvedMessage {
        message: message_text(user_data.get("log")),
        timestamp: scalar_text(metadata.get("timestamp").copied()),
        log_id: scalar_text(metadata.get("logid").copied()),
        pod_name: scalar_text(
            user_data
                .get("kubernetes")
                .and_then(|k| k.get("pod_name")),
        ),
    })
}

/// Collapse a `[{key, value}, …]` list into a map. Absent or `null` lists are
/// empty; later duplicates overwrite earlier ones.
fn pair_list<'v>(
    list: Option<&'v Value>,
    name: &'static str,
) -> Result<HashMap<&'v str, &'v Value>, ExtractError> {
    let items = match list {
        None | Some(Value::Null) => return Ok(HashMap::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ExtractError::MalformedPair {
                list: name,
                entry: other.to_string(),
            })
        }
    };

    items
        .iter()
        .map(|item| {
            let key = item.get("key").and_then(Value::as_str);
            match (key, item.get("value")) {
                (Some(key), Some(value)) => Ok((key, value)),
                _ => Err(ExtractError::MalformedPair {
                    list: name,
                    entry: item.to_string(),
                }),
            }
        })
        .collect()
}

/// The message must be a string; anything else is treated as no message.
fn message_text(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default()
}

/// Render a metadata value as CSV text: strings verbatim, `null` as empty,
/// everything else as compact JSON.
pub(crate) fn scalar_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
