//! `<script>` inlining and minification
//!
//! Two phases. First every external script is fetched concurrently and its
//! body moved into the element. Once all of those have settled, a sweep in
//! document order drops empty scripts, escapes closing tags and minifies.

use futures::future::try_join_all;
use regex::Regex;
use std::sync::LazyLock;

use super::minify::{ScriptKind, minify_js_blocking};
use crate::dom::{Element, ElementExt};
use crate::error::{InlineError, InlineResult};
use crate::fetcher::FetchOptions;
use crate::run::{AssetKind, RunContext};
use crate::utils::resolve_url;

static CLOSING_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</script>").expect("BUG: hardcoded closing script regex is invalid")
});

/// `</script>`, `</script/`, `</ script ` and friends
static CLOSING_SCRIPT_LOOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</(\s*script[/ >])").expect("BUG: hardcoded closing script regex is invalid")
});

/// Already-minified filenames: `jquery.min.js`, `app-min.js`
static MINIFIED_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bmin\b").expect("BUG: hardcoded min regex is invalid"));

/// A script element and the `src` it was parsed with
struct ScriptAsset {
    element: Element,
    src: Option<String>,
}

/// Inline external scripts, then clean up and minify every script in order
pub async fn inline_scripts(run: &RunContext<'_>, scripts: &[Element]) -> InlineResult<()> {
    let assets: Vec<ScriptAsset> = scripts
        .iter()
        .map(|element| ScriptAsset {
            src: element.attr("src").filter(|src| !src.trim().is_empty()),
            element: element.clone(),
        })
        .collect();

    try_join_all(
        assets
            .iter()
            .filter_map(|asset| asset.src.as_deref().map(|src| fetch_external(run, &asset.element, src))),
    )
    .await?;

    for asset in &assets {
        finish_script(run, asset).await?;
    }
    Ok(())
}

async fn fetch_external(run: &RunContext<'_>, element: &Element, src: &str) -> InlineResult<()> {
    let script_url = resolve_url(&run.page_url, src)?;
    if run.options.is_analytics(&script_url) {
        log::debug!("Leaving analytics script in place: {script_url}");
        return Ok(());
    }

    let body = run.fetch(&script_url, FetchOptions::rejecting("text/html")).await?;
    if body.is_empty() {
        log::warn!("No script body from {script_url}, keeping src");
        return Ok(());
    }

    element.set_text(&CLOSING_SCRIPT.replace_all(&body, r"<\/script>"));
    element.remove_attr("src");
    run.record(AssetKind::Script);
    Ok(())
}

async fn finish_script(run: &RunContext<'_>, asset: &ScriptAsset) -> InlineResult<()> {
    let element = &asset.element;
    let code = element.raw_text().unwrap_or_default();

    if code.trim().is_empty() {
        // Scripts still pointing at an external src are left as they are
        if element.attr("src").is_none_or(|src| src.trim().is_empty()) {
            element.remove();
            run.record_dropped_script();
        }
        return Ok(());
    }

    let code = escape_closing_tags(&code);
    let src = asset.src.as_deref().unwrap_or_default();

    if should_minify(run, element, src) {
        let kind = script_kind(element);
        let minified = minify_js_blocking(code, kind)
            .await
            .map_err(|message| InlineError::ScriptTransform {
                src: asset.src.clone(),
                message,
            })?;
        element.set_text(&format!("{}\n", escape_closing_tags(&minified)));
    } else {
        element.set_text(&code);
    }
    Ok(())
}

fn escape_closing_tags(code: &str) -> String {
    CLOSING_SCRIPT_LOOSE.replace_all(code, r"<\/${1}").into_owned()
}

fn should_minify(run: &RunContext<'_>, element: &Element, src: &str) -> bool {
    run.options.uglify()
        && !MINIFIED_NAME.is_match(src)
        && !run.options.is_analytics(src)
        && is_javascript(element)
}

/// JSON-LD, templates and other data blocks are not code
fn is_javascript(element: &Element) -> bool {
    let Some(script_type) = element.attr("type") else {
        return true;
    };
    let script_type = script_type.trim().to_ascii_lowercase();
    script_type.is_empty()
        || script_type == "module"
        || script_type.contains("javascript")
        || script_type.contains("ecmascript")
        || script_type.contains("jscript")
}

fn script_kind(element: &Element) -> ScriptKind {
    match element.attr("type") {
        Some(script_type) if script_type.trim().eq_ignore_ascii_case("module") => ScriptKind::Module,
        _ => ScriptKind::Classic,
    }
}
