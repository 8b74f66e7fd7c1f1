//! Marker locator — finds the key=value section inside a free-text message.

/// Default marker emitted by the services whose calls we extract.
pub const DEFAULT_MARKER: &str = "API_LOGGING:";

/// Return the text after the first `marker` in `message`, trimmed, with one
/// enclosing `{…}` pair removed. `None` means the message is not an API record.
pub fn locate<'m>(message: &'m str, marker: &str) -> Option<&'m str> {
    let start = message.find(marker)? + marker.len();
    let section = message[start..].trim();
    Some(
        section
            .strip_prefix('{')
            .and_then(|inner| inner.strip_suffix('}'))
            .unwrap_or(section),
    )
}
