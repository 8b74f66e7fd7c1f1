//! Error types for apilog-core.
//!
//! Only genuine faults live here. A log entry that simply is not an API
//! record is filtered (`None`), and a payload that is not JSON falls back to
//! its raw text; neither is an error.

use thiserror::Error;

/// A single log entry could not be resolved. Scoped to one flat envelope or
/// one nested sub-result; the caller logs it and moves on.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("userData is not valid JSON: {0}")]
    InvalidUserData(#[source] serde_json::Error),

    #[error("{list} entry is not a {{key, value}} object: {entry}")]
    MalformedPair { list: &'static str, entry: String },
}

/// Writing the CSV output failed. Always fatal to the run.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot create output file {path}: {source}")]
    Create {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("flush failed: {0}")]
    Io(#[from] std::io::Error),
}
