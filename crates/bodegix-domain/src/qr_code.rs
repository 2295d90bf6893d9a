//! Extraction of session codes from raw scanner input.
//!
//! Keyboard-wedge readers type the decoded QR payload as keystrokes and may
//! substitute punctuation depending on the host keyboard layout. Matchers run
//! in a fixed order and the first one that matches wins.

use std::sync::LazyLock;

use regex::Regex;

/// Delimiter of structured payloads (`PREFIX|ACTION|code`).
pub const PAYLOAD_DELIMITER: char = '|';

static QUERY_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"c=([A-Fa-f0-9]{16,64})").expect("valid regex"));

static TRAILING_HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Fa-f0-9]{16,64})$").expect("valid regex"));

/// A pure matcher: returns the code when its pattern applies to the input.
pub type Matcher = fn(&str) -> Option<&str>;

/// Matchers in priority order.
pub const MATCHERS: [Matcher; 3] = [structured_payload, query_parameter, trailing_hex];

/// `BODEGIX|OPEN|<code>`: everything after the last delimiter.
pub fn structured_payload(input: &str) -> Option<&str> {
    input
        .rsplit_once(PAYLOAD_DELIMITER)
        .map(|(_, code)| code.trim())
}

/// `https://host/open?c=<code>`: the hex group of the `c` parameter.
pub fn query_parameter(input: &str) -> Option<&str> {
    QUERY_PARAM
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Trailing run of 16 to 64 hex digits, for readers that garble the punctuation.
pub fn trailing_hex(input: &str) -> Option<&str> {
    TRAILING_HEX
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Convert one scanned line into the canonical session code.
///
/// Returns an empty string when no code can be found; callers treat that as
/// "nothing scanned" and must not contact the backend.
pub fn extract_code(raw: &str) -> String {
    let input = raw.trim();
    if input.is_empty() {
        return String::new();
    }
    MATCHERS
        .iter()
        .find_map(|matcher| matcher(input))
        .map(str::to_owned)
        .unwrap_or_default()
}
