//! Normalized block text
//!
//! Section boundaries are found by substring search over a flattened form of
//! each block: markup stripped, references resolved, every whitespace
//! character removed (not collapsed to a space) and the result lowercased.
//! Phrases are therefore written as unbroken lowercase strings such as
//! `"местодисциплинывструктуре"`, and they still match when Word splits a
//! heading across runs or wraps it over several lines.

use std::sync::OnceLock;

use regex::Regex;
use syllabus_ooxml::xml::unescape_lossy;

/// Flatten block markup into its normalized text
pub fn normalize(markup: &str) -> String {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)] // Static pattern that is guaranteed to be valid
    let re = TAG_RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

    let text = re.replace_all(markup, "");
    unescape_lossy(&text)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Normalize a human-written phrase the same way block text is normalized
///
/// ```
/// use syllabus_core::normalize::normalize_phrase;
///
/// assert_eq!(
///     normalize_phrase("Место дисциплины в структуре"),
///     "местодисциплинывструктуре"
/// );
/// ```
pub fn normalize_phrase(phrase: &str) -> String {
    phrase
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}
