//! Key/value tokenizer for the API marker section.
//!
//! The section is a comma-separated list of `key=value` pairs where a value
//! may be a brace-delimited JSON object that itself contains `,` and `=`:
//!
//! ```text
//! request_url=/v1/orders, api_method=POST, request_body={"id":1,"items":["a","b"]}, api_time=42
//! ```
//!
//! Parsing is a single forward pass over an explicit state machine:
//!
//! | State          | `=`             | `{`                | `}`               | `,`          | space        | other        |
//! |----------------|-----------------|--------------------|-------------------|--------------|--------------|--------------|
//! | `ExpectKey`    | open empty key  | stay               | start key         | stay         | stay         | start key    |
//! | `InKey`        | close key       | → `ExpectKey`      | extend            | → `ExpectKey`| → `ExpectKey`| extend       |
//! | `InValue`      | append          | append, depth 1    | append            | emit pair    | append       | append       |
//! | `InBraceValue` | append          | append, depth + 1  | append, depth − 1 | append       | append       | append       |
//!
//! A key is the text between the last `,`, space or `{` and the `=`. Once a
//! value is open, `=` never starts a new key, so values are assumed to be
//! either scalars without `=`/`,` or JSON objects that open with `{`.
//!
//! Repeated keys are last-write-wins. Unbalanced braces never fail: the rest
//! of the input lands in the open value and [`KeyValues::unclosed_depth`]
//! reports how deep it was left.

use std::collections::HashMap;

/// Tokenizer state. See the module docs for the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between pairs; no key candidate yet.
    ExpectKey,
    /// Reading a key candidate that started at byte offset `start`.
    InKey { start: usize },
    /// Reading a scalar value, or the tail of a value after its braces closed.
    InValue,
    /// Inside a brace-delimited value, `depth` levels deep.
    InBraceValue { depth: usize },
}

/// Result of tokenizing one section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValues {
    pairs: HashMap<String, String>,
    unclosed_depth: usize,
}

impl KeyValues {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.get(key).map(String::as_str)
    }

    /// Like [`get`](Self::get), but absent keys read as empty text.
    pub fn text(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Brace depth still open at end of input. Zero for balanced input.
    pub fn unclosed_depth(&self) -> usize {
        self.unclosed_depth
    }

    pub fn into_map(self) -> HashMap<String, String> {
        self.pairs
    }
}

/// Tokenize a marker section into its key/value pairs.
pub fn tokenize(section: &str) -> KeyValues {
    let mut tokenizer = Tokenizer::default();
    for (offset, c) in section.char_indices() {
        tokenizer.step(section, offset, c);
    }
    tokenizer.finish()
}

#[derive(Debug)]
struct Tokenizer {
    state: State,
    key: Option<String>,
    value: String,
    pairs: HashMap<String, String>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            state: State::ExpectKey,
            key: None,
            value: String::new(),
            pairs: HashMap::new(),
        }
    }
}

fn is_key_boundary(c: char) -> bool {
    matches!(c, ',' | ' ' | '{')
}

impl Tokenizer {
    fn step(&mut self, text: &str, offset: usize, c: char) {
        self.state = match (self.state, c) {
            (State::ExpectKey, '=') => {
                self.key = Some(String::new());
                State::InValue
            }
            (State::ExpectKey, c) if is_key_boundary(c) => State::ExpectKey,
            (State::ExpectKey, _) => State::InKey { start: offset },

            (State::InKey { start }, '=') => {
                self.key = Some(text[start..offset].trim().to_string());
                State::InValue
            }
            (State::InKey { .. }, c) if is_key_boundary(c) => State::ExpectKey,
            (state @ State::InKey { .. }, _) => state,

            (State::InValue, ',') => {
                self.emit();
                State::ExpectKey
            }
            (State::InValue, '{') => {
                self.value.push(c);
                State::InBraceValue { depth: 1 }
            }
            (State::InValue, c) => {
                self.value.push(c);
                State::InValue
            }

            (State::InBraceValue { depth }, '{') => {
                self.value.push(c);
                State::InBraceValue { depth: depth + 1 }
            }
            (State::InBraceValue { depth }, '}') => {
                self.value.push(c);
                match depth - 1 {
                    0 => State::InValue,
                    depth => State::InBraceValue { depth },
                }
            }
            (state @ State::InBraceValue { .. }, c) => {
                self.value.push(c);
                state
            }
        };
    }

    /// Store the open pair. Empty keys are dropped.
    fn emit(&mut self) {
        let value = std::mem::take(&mut self.value);
        if let Some(key) = self.key.take().filter(|k| !k.is_empty()) {
            self.pairs.insert(key, value.trim().to_string());
        }
    }

    fn finish(mut self) -> KeyValues {
        let unclosed_depth = match self.state {
            State::InBraceValue { depth } => depth,
            _ => 0,
        };
        // A trailing pair without a terminating comma still counts, as long
        // as something was read for its value.
        if self.key.is_some() && !self.value.is_empty() {
            self.emit();
        }
        KeyValues {
            pairs: self.pairs,
            unclosed_depth,
        }
    }
}
