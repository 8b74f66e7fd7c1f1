//! JSONL feed over any buffered reader.

use std::fs::File;
use std::io::{self, BufRead, BufReader, StdinLock};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Fatal feed failures. Per-line problems are the extractor's concern.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("cannot open input file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read failed after line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
}

/// One non-blank input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedLine {
    /// 1-based position in the input, counting blank lines.
    pub number: usize,
    pub text: String,
}

/// Iterator over the non-blank lines of a line-delimited input.
pub struct JsonlFeed<R> {
    reader: R,
    line: usize,
    buf: Vec<u8>,
    done: bool,
}

impl JsonlFeed<BufReader<File>> {
    /// Open `path` for reading.
    pub fn open(path: &Path) -> Result<Self, FeedError> {
        let file = File::open(path).map_err(|source| FeedError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened input");
        Ok(Self::new(BufReader::new(file)))
    }
}

impl JsonlFeed<StdinLock<'static>> {
    /// Read from standard input.
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> JsonlFeed<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: Vec::new(),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for JsonlFeed<R> {
    type Item = Result<FeedLine, FeedError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line += 1;
                    let text = String::from_utf8_lossy(&self.buf);
                    let text = text.trim_end_matches(['\n', '\r']);
                    if text.trim().is_empty() {
                        continue;
                    }
                    return Some(Ok(FeedLine {
                        number: self.line,
                        text: text.to_string(),
                    }));
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => {
                    self.done = true;
                    return Some(Err(FeedError::Read {
                        line: self.line,
                        source,
                    }));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn collect(input: &[u8]) -> Vec<FeedLine> {
        JsonlFeed::new(Cursor::new(input.to_vec()))
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn yields_numbered_lines() {
        let lines = collect(b"{\"a\":1}\n{\"b\":2}\n");
        assert_eq!(
            lines,
            vec![
                FeedLine { number: 1, text: "{\"a\":1}".into() },
                FeedLine { number: 2, text: "{\"b\":2}".into() },
            ]
        );
    }

    #[test]
    fn blank_lines_are_skipped_but_numbered() {
        let lines = collect(b"\n  \n{}\r\n\n{}");
        let numbers: Vec<usize> = lines.iter().map(|l| l.number).collect();
        assert_eq!(numbers, [3, 5]);
        assert_eq!(lines[0].text, "{}");
    }

    #[test]
    fn missing_trailing_newline_keeps_last_line() {
        let lines = collect(b"{}\n{\"last\":true}");
        assert_eq!(lines[1].text, "{\"last\":true}");
    }

    #[test]
    fn invalid_utf8_is_lossy() {
        let lines = collect(b"{\"a\":\"\xff\"}\n");
        assert_eq!(lines[0].text, "{\"a\":\"\u{fffd}\"}");
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(collect(b"").is_empty());
    }

    #[test]
    fn open_reports_missing_file() {
        let err = JsonlFeed::open(Path::new("/definitely/not/here.jsonl")).err().unwrap();
        assert!(matches!(err, FeedError::Open { .. }));
    }

    #[test]
    fn open_reads_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.jsonl");
        std::fs::write(&path, "{}\n{}\n").unwrap();
        let feed = JsonlFeed::open(&path).unwrap();
        assert_eq!(feed.count(), 2);
    }
}
