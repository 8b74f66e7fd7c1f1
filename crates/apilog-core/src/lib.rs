//! apilog-core — extraction of API call records from JSON-wrapped logs.
//!
//! # Pipeline
//!
//! ```text
//! JSON line ──► Envelope ──► marker section ──► tokenizer ──► mapper ──► Extractor
//!                                                                          │
//!                                                                          └──► export (CSV)
//! ```
//!
//! Everything here is synchronous and single-threaded. The [`Extractor`]
//! owns the accumulated records and the run [`Stats`]; nothing is global.

pub mod config;
pub mod envelope;
pub mod error;
pub mod export;
pub mod extract;
pub mod mapper;
pub mod section;
pub mod tokenizer;
pub mod types;

pub use error::{ExportError, ExtractError};
pub use extract::{Extractor, Stats};
pub use types::{ExtractedRecord, ResolvedMessage, CSV_HEADERS};
