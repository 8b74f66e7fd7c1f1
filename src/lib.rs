//! apilog — pull API call records out of JSON-wrapped service logs.
//!
//! Reads a line-delimited JSON export (CloudWatch/Fluent Bit style or
//! Coralogix query results), finds every message carrying the API marker
//! section, and writes one CSV row per call.
//!
//! # Architecture
//!
//! ```text
//! Feed (file/stdin) ──► Extractor ──► Vec<ExtractedRecord> ──► CSV
//! ```
//!
//! The run is a single sequential batch. Per-line faults are logged and
//! skipped inside the extractor; only input/output failures end the run.

use anyhow::Context;
use std::io::BufRead;
use std::path::PathBuf;

use apilog_core::config::Config;
use apilog_core::export::write_csv;
use apilog_core::{Extractor, Stats};
use apilog_feeds::JsonlFeed;

/// Where to read log lines from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Path(PathBuf),
    Stdin,
}

impl From<&str> for Input {
    /// `-` selects stdin; anything else is a path.
    fn from(arg: &str) -> Self {
        match arg {
            "-" => Input::Stdin,
            path => Input::Path(PathBuf::from(path)),
        }
    }
}

impl std::fmt::Display for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Path(path) => write!(f, "{}", path.display()),
            Input::Stdin => write!(f, "<stdin>"),
        }
    }
}

/// Everything one run needs.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: Input,
    /// Explicit CSV path. Falls back to the timestamped name from config.
    pub output: Option<PathBuf>,
    pub config: Config,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub stats: Stats,
    /// The CSV written, or `None` when no record was found.
    pub output: Option<PathBuf>,
}

/// Run one extraction batch.
pub fn run(opts: &RunOptions) -> anyhow::Result<RunSummary> {
    tracing::info!(input = %opts.input, "starting API log extraction");
    if opts.output.is_none() {
        // Fail before the scan rather than after it.
        opts.config.output.validate().context("invalid [output] config")?;
    }

    let mut extractor = Extractor::from_config(&opts.config);
    match &opts.input {
        Input::Path(path) => drain(JsonlFeed::open(path)?, &mut extractor)?,
        Input::Stdin => drain(JsonlFeed::stdin(), &mut extractor)?,
    }
    let (records, stats) = extractor.finish();

    tracing::info!(
        lines = stats.lines,
        entries = stats.entries,
        records = stats.records,
        skipped_lines = stats.skipped_lines,
        failed_entries = stats.failed_entries,
        "processed {} JSONL lines, {} log entries, found {} API_LOGGING entries",
        stats.lines,
        stats.entries,
        stats.records,
    );

    if records.is_empty() {
        tracing::warn!("no API logs found to save");
        return Ok(RunSummary { stats, output: None });
    }

    let path = match &opts.output {
        Some(path) => path.clone(),
        None => opts
            .config
            .output
            .timestamped_path()
            .context("building output file name")?,
    };
    write_csv(&path, &records).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "saved");

    Ok(RunSummary {
        stats,
        output: Some(path),
    })
}

fn drain<R: BufRead>(feed: JsonlFeed<R>, extractor: &mut Extractor) -> anyhow::Result<()> {
    for line in feed {
        let line = line.context("reading input")?;
        extractor.process_line(line.number, &line.text);
    }
    Ok(())
}
