//! Textual CSS compression

use regex::Regex;
use std::sync::LazyLock;

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("BUG: hardcoded comment regex is invalid"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("BUG: hardcoded whitespace regex is invalid"));

/// Shrink CSS without parsing it
///
/// Removes `/* ... */` comments, collapses whitespace runs (newlines included)
/// to one space, then drops the space after `:`, `}` and `;` and before `{`.
#[must_use]
pub fn compress_css(css: &str) -> String {
    let css = COMMENT.replace_all(css, "");
    let css = WHITESPACE_RUN.replace_all(&css, " ");

    css.replace(": ", ":")
        .replace("} ", "}")
        .replace(" {", "{")
        .replace("; ", ";")
        .trim()
        .to_string()
}
