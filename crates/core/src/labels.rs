//! Categorical-label validation.
//!
//! `application`, `host` and `environment` share one rule: start with a
//! letter, end with a letter or digit, interior characters alphanumeric
//! plus hyphen/underscore, 3-20 characters total.

use std::sync::LazyLock;

use regex::Regex;

/// The label rule as a regular expression.
pub const LABEL_PATTERN: &str = "^[A-Za-z][A-Za-z0-9_-]{1,18}[A-Za-z0-9]$";

static LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LABEL_PATTERN).expect("valid regex"));

/// Check whether a string is a valid categorical label.
pub fn is_valid_label(value: &str) -> bool {
    LABEL_RE.is_match(value)
}
