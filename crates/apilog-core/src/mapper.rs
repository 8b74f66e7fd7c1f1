//! Field mapper — turns tokenized key/values into an [`ExtractedRecord`].
//!
//! The two payload fields are normalised: text that parses as JSON is
//! re-serialized on one line with `", "` / `": "` separators (object key order
//! kept, non-ASCII left as is, numbers written exactly as read); anything else
//! is stored verbatim.

use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::Value;
use std::io;

use crate::tokenizer::KeyValues;
use crate::types::{ExtractedRecord, ResolvedMessage};

// Keys emitted by the logging interceptor.
const KEY_ENDPOINT: &str = "request_url";
const KEY_METHOD: &str = "api_method";
const KEY_REQUEST: &str = "request_body";
const KEY_RESPONSE: &str = "response";
const KEY_DURATION: &str = "api_time";
const KEY_CLIENT: &str = "clientname";

/// Build the output record for one matched message.
pub fn map_record(resolved: ResolvedMessage, kv: &KeyValues) -> ExtractedRecord {
    // Present upstream but not part of the output schema.
    if let Some(client) = kv.get(KEY_CLIENT) {
        tracing::trace!(client, "clientname not exported");
    }

    ExtractedRecord {
        timestamp: resolved.timestamp,
        log_id: resolved.log_id,
        pod_name: resolved.pod_name,
        api_endpoint: kv.text(KEY_ENDPOINT).to_string(),
        http_method: kv.text(KEY_METHOD).to_string(),
        request_json: normalize_payload(kv.text(KEY_REQUEST)),
        response_json: normalize_payload(kv.text(KEY_RESPONSE)),
        duration_ms: kv.text(KEY_DURATION).to_string(),
        ..ExtractedRecord::default()
    }
}

/// Re-serialize `raw` if it is JSON, otherwise return it unchanged.
pub fn normalize_payload(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => render_spaced(&value).unwrap_or_else(|_| raw.to_string()),
        Err(err) => {
            tracing::trace!(%err, "payload is not JSON, keeping raw text");
            raw.to_string()
        }
    }
}

fn render_spaced(value: &Value) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Single-line formatter with a space after every `,` and `:`.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}
