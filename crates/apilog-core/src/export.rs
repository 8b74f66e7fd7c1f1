//! Export — writes extracted records as CSV.
//!
//! The header row comes from the field names of [`ExtractedRecord`], so it is
//! always [`CSV_HEADERS`](crate::types::CSV_HEADERS) in that order.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::ExportError;
use crate::types::ExtractedRecord;

/// Create `path` and write a header plus one row per record.
pub fn write_csv(path: &Path, records: &[ExtractedRecord]) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write_records(file, records)?;
    tracing::debug!(path = %path.display(), rows = records.len(), "csv written");
    Ok(())
}

/// Write a header plus one row per record to any writer. Nothing is written
/// for an empty slice.
pub fn write_records<W: Write>(writer: W, records: &[ExtractedRecord]) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for record in records {
        csv.serialize(record)?;
    }
    csv.flush()?;
    Ok(())
}
