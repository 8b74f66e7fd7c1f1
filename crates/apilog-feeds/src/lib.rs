//! apilog-feeds — line-delimited input sources for apilog.
//!
//! A feed yields numbered lines from a file or from stdin. Bytes are decoded
//! lossily so one bad byte sequence costs at most one line, never the run.

pub mod file;

pub use file::{FeedError, FeedLine, JsonlFeed};
