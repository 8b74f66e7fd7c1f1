//! Extraction pipeline for one input line at a time.
//!
//! ```text
//! line ─► JSON ─► Envelope ─┬─► Flat ───────────────┐
//!                           └─► Nested ─► sub-result ┴─► marker ─► tokenize ─► map ─► records
//! ```
//!
//! [`Extractor::process_line`] never fails. Malformed lines and broken
//! sub-results are logged, counted in [`Stats`] and skipped; a filtered entry
//! (unknown shape, no marker) simply produces nothing.

use serde_json::Value;

use crate::config::Config;
use crate::envelope::{resolve_flat, resolve_sub_result, Envelope};
use crate::mapper::map_record;
use crate::section::{self, DEFAULT_MARKER};
use crate::tokenizer::tokenize;
use crate::types::{ExtractedRecord, ResolvedMessage};

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Non-blank input lines seen, including ones later skipped.
    pub lines: usize,
    /// Log entries examined: one per flat or unrecognized line, one per
    /// nested sub-result.
    pub entries: usize,
    /// Records extracted.
    pub records: usize,
    /// Lines that were not a JSON object.
    pub skipped_lines: usize,
    /// Entries whose envelope could not be resolved.
    pub failed_entries: usize,
}

/// Accumulates records across a run.
#[derive(Debug)]
pub struct Extractor {
    marker: String,
    progress_every: usize,
    records: Vec<ExtractedRecord>,
    stats: Stats,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER, 100)
    }
}

impl Extractor {
    pub fn new(marker: impl Into<String>, progress_every: usize) -> Self {
        Self {
            marker: marker.into(),
            progress_every,
            records: Vec::new(),
            stats: Stats::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.extract.marker.clone(), config.progress.every)
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn records(&self) -> &[ExtractedRecord] {
        &self.records
    }

    /// Consume the extractor, returning records in input order.
    pub fn finish(self) -> (Vec<ExtractedRecord>, Stats) {
        (self.records, self.stats)
    }

    /// Process one raw input line. `line_no` is 1-based and only used for
    /// diagnostics. Blank lines are ignored entirely.
    pub fn process_line(&mut self, line_no: usize, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        self.stats.lines += 1;

        let root: Value = match serde_json::from_str(line) {
            Ok(root) => root,
            Err(err) => {
                self.stats.skipped_lines += 1;
                tracing::warn!(line = line_no, %err, "could not parse line, skipping");
                return;
            }
        };
        if !root.is_object() {
            self.stats.skipped_lines += 1;
            tracing::warn!(line = line_no, "line is not a JSON object, skipping");
            return;
        }

        match Envelope::detect(&root) {
            Envelope::Flat(obj) => {
                self.stats.entries += 1;
                self.extract(resolve_flat(obj));
            }
            Envelope::Nested(results) => {
                for (index, sub) in results.iter().enumerate() {
                    self.stats.entries += 1;
                    match resolve_sub_result(sub) {
                        Ok(resolved) => self.extract(resolved),
                        Err(err) => {
                            self.stats.failed_entries += 1;
                            tracing::warn!(line = line_no, result = index, %err, "error parsing log entry");
                        }
                    }
                }
            }
            Envelope::Unrecognized => {
                self.stats.entries += 1;
                tracing::trace!(line = line_no, "unrecognized envelope");
            }
        }
    }

    fn extract(&mut self, resolved: ResolvedMessage) {
        let Some(section) = section::locate(&resolved.message, &self.marker) else {
            return;
        };
        let kv = tokenize(section);
        if kv.unclosed_depth() > 0 {
            tracing::debug!(depth = kv.unclosed_depth(), "unbalanced braces in API section");
        }
        let record = map_record(resolved, &kv);

        self.records.push(record);
        self.stats.records += 1;

        if self.progress_every > 0 && self.stats.records % self.progress_every == 0 {
            tracing::info!(
                entries = self.stats.entries,
                lines = self.stats.lines,
                records = self.stats.records,
                "processed {} log entries from {} lines, found {} API logs",
                self.stats.entries,
                self.stats.lines,
                self.stats.records,
            );
        }
    }
}
