pub mod issue;
pub mod scan;
pub mod status;
pub mod validate;

/// Canonical form of a scanned code: trimmed, lower-case hex.
pub(crate) fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_lowercase()
}
