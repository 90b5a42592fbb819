//! Slug normalization.
//!
//! Turns arbitrary title or slug input into a URL-safe token: lowercase,
//! trimmed, only `[a-z0-9-]` left, whitespace runs become a single hyphen and
//! repeated hyphens collapse to one. The function is idempotent.

use std::sync::LazyLock;

use regex::Regex;

static DISALLOWED_SYMBOLS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-z0-9\s-]").expect("DISALLOWED_SYMBOLS must be a valid regex")
});

static WHITESPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUNS must be a valid regex"));

static HYPHEN_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-+").expect("HYPHEN_RUNS must be a valid regex"));

pub fn normalize(input: &str) -> String {
    let lowered = input.to_lowercase();
    let stripped = DISALLOWED_SYMBOLS.replace_all(lowered.trim(), "");
    let hyphenated = WHITESPACE_RUNS.replace_all(&stripped, "-");
    HYPHEN_RUNS.replace_all(&hyphenated, "-").into_owned()
}
