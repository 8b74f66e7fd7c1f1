//! Core types for apilog-core.
//!
//! This module defines the data shared across the pipeline stages: the
//! [`ResolvedMessage`] handed from envelope detection to the field extractor,
//! and the [`ExtractedRecord`] that ends up as one CSV row.

use serde::Serialize;

/// Column order of the CSV output. Matches the field order of
/// [`ExtractedRecord`], which is what the `csv` writer serializes.
pub const CSV_HEADERS: [&str; 12] = [
    "timestamp",
    "log_id",
    "request_id",
    "trace_id",
    "pod_name",
    "thread",
    "api_endpoint",
    "http_method",
    "request_json",
    "response_json",
    "status_code",
    "duration_ms",
];

/// The uniform view of one log entry after format detection.
///
/// Both supported export shapes resolve to this tuple; everything downstream
/// of the envelope module is format-agnostic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedMessage {
    /// Free-text log message that may carry the API marker section.
    pub message: String,
    pub timestamp: String,
    pub log_id: String,
    pub pod_name: String,
}

/// One API call recovered from a log message.
///
/// Every field is a plain string and defaults to empty; a row never has a
/// missing column.
///
/// `request_id`, `trace_id`, `thread` and `status_code` are part of the output
/// schema but no upstream format currently carries them, so they are always
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedRecord {
    pub timestamp: String,
    pub log_id: String,
    pub request_id: String,
    pub trace_id: String,
    pub pod_name: String,
    pub thread: String,
    pub api_endpoint: String,
    pub http_method: String,
    /// Request payload, re-serialized when it parses as JSON, raw otherwise.
    pub request_json: String,
    /// Response payload, re-serialized when it parses as JSON, raw otherwise.
    pub response_json: String,
    pub status_code: String,
    pub duration_ms: String,
}
