//! `url(...)` rewriting to data URIs

use futures::future::try_join_all;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::InlineResult;
use crate::fetcher::FetchOptions;
use crate::run::RunContext;
use crate::utils::{is_data_uri, resolve_url};

static CSS_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"url\(\s*['"]?([^'")]*?)['"]?\s*\)"#).expect("BUG: hardcoded url() regex is invalid")
});

/// Tokens that never name a fetchable resource
fn is_inlinable(token: &str) -> bool {
    !token.is_empty() && !token.starts_with('#') && !is_data_uri(token)
}

/// Rewrite every `url(...)` in `css` to an embedded data URI
///
/// Returns the input untouched unless image inlining is enabled. Each distinct
/// literal token is fetched once however often it appears; identical
/// resources reached through different tokens still share one fetch through
/// the run's cache. A token whose fetch comes back empty is left as written.
pub async fn inline_image_urls(run: &RunContext<'_>, base_url: &str, css: String) -> InlineResult<String> {
    if !run.options.images() {
        return Ok(css);
    }

    let mut tokens: Vec<&str> = Vec::new();
    for captures in CSS_URL.captures_iter(&css) {
        if let Some(token) = captures.get(1).map(|m| m.as_str().trim())
            && is_inlinable(token)
            && !tokens.contains(&token)
        {
            tokens.push(token);
        }
    }

    if tokens.is_empty() {
        return Ok(css);
    }

    let fetches = tokens.iter().map(|token| async move {
        let target = resolve_url(base_url, token)?;
        let data_uri = run.fetch(&target, FetchOptions::data_uri()).await?;
        InlineResult::Ok((token.to_string(), data_uri))
    });

    let inlined: HashMap<String, String> = try_join_all(fetches)
        .await?
        .into_iter()
        .filter(|(_, data_uri)| !data_uri.is_empty())
        .collect();

    log::debug!("Inlined {} of {} CSS url() references", inlined.len(), tokens.len());

    let rewritten = CSS_URL.replace_all(&css, |captures: &Captures<'_>| {
        let token = captures.get(1).map_or("", |m| m.as_str().trim());
        match inlined.get(token) {
            Some(data_uri) => format!("url({data_uri})"),
            None => captures[0].to_string(),
        }
    });

    Ok(rewritten.into_owned())
}
