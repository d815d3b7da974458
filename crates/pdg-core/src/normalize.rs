//! Natural-key normalization.
//!
//! Every raw string value passes through [`normalize`] before it reaches
//! dimension construction. The normalizer trims whitespace and collapses the
//! various "no value" spellings found in registry exports onto a single
//! sentinel token, so that downstream code only ever has to compare against
//! [`UNKNOWN_TOKEN`].

/// The canonical sentinel token for a missing or unusable value.
pub const UNKNOWN_TOKEN: &str = "unknown";

/// Spellings that registry exports use for "no value", compared
/// case-insensitively after trimming.
const UNKNOWN_SPELLINGS: &[&str] = &["", "-", "?", "n/a", "na", "none", "null", "unknown"];

/// Normalize a raw string value into its canonical form.
///
/// Trims surrounding whitespace and maps any recognized "no value" spelling
/// to [`UNKNOWN_TOKEN`]. All other values are returned trimmed but otherwise
/// untouched.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if is_unknown(trimmed) {
        UNKNOWN_TOKEN.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Check whether a value (raw or already normalized) denotes "no value".
pub fn is_unknown(value: &str) -> bool {
    let trimmed = value.trim();
    UNKNOWN_SPELLINGS
        .iter()
        .any(|s| trimmed.eq_ignore_ascii_case(s))
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
