//! `@import` splicing
//!
//! Each pass finds the first `@import` rule, fetches its target and splices
//! the fetched CSS in place of the rule. Imported text is scanned again on the
//! next pass, so nested imports are followed too; they resolve against the
//! same base as the outer stylesheet.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

use super::wrap_media;
use crate::error::{InlineError, InlineResult};
use crate::fetcher::FetchOptions;
use crate::run::RunContext;
use crate::utils::{MAX_IMPORT_SPLICES, resolve_url};

/// `@import "x"`, `@import 'x' media`, `@import url(x) media`, `@import url("x")`
///
/// A rule ends at `;` or at the end of the line.
static IMPORT_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)@import\s*(?:url\(\s*)?["']?([^"'()\s;]+)["']?\s*\)?([^;\n]*);?"#)
        .expect("BUG: hardcoded @import regex is invalid")
});

struct ImportRule {
    span: Range<usize>,
    href: String,
    media: Option<String>,
}

fn next_import(css: &str) -> Option<ImportRule> {
    let captures = IMPORT_RULE.captures(css)?;
    let span = captures.get(0)?.range();
    let href = captures.get(1)?.as_str().to_string();

    let media = captures
        .get(2)
        .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|m| !m.is_empty());

    Some(ImportRule { span, href, media })
}

/// Replace every `@import` in `css` with the stylesheet it names
///
/// An import carrying a media list is wrapped in `@media <list>{...}`. An
/// import whose fetch comes back empty (non-success status) is spliced as
/// nothing. Fetch failures abort resolution.
pub async fn resolve_imports(run: &RunContext<'_>, base_url: &str, css: String) -> InlineResult<String> {
    let mut css = css;

    for _ in 0..MAX_IMPORT_SPLICES {
        let Some(rule) = next_import(&css) else {
            return Ok(css);
        };

        let target = resolve_url(base_url, &rule.href)?;
        log::debug!("Splicing @import {target}");

        let imported = run.fetch(&target, FetchOptions::default()).await?;
        let replacement = match rule.media {
            Some(media) => wrap_media(&media, &imported),
            None => imported,
        };

        css.replace_range(rule.span, &replacement);
    }

    if next_import(&css).is_some() {
        return Err(InlineError::ImportLimit {
            base: base_url.to_string(),
            limit: MAX_IMPORT_SPLICES,
        });
    }

    Ok(css)
}
