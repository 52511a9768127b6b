//! DOM asset walker
//!
//! Selects the image, style and script elements of a document and hands each
//! group to its inliner. The three groups run concurrently on the current
//! task; the first branch to fail fails the walk.

pub mod images;
pub mod minify;
pub mod scripts;
pub mod styles;

use std::future::Future;

pub use images::inline_images;
pub use minify::{ScriptKind, minify_js};
pub use scripts::inline_scripts;
pub use styles::inline_styles;

use crate::dom::Document;
use crate::error::InlineResult;
use crate::run::{AssetKind, RunContext};

pub const SCRIPT_SELECTOR: &str = "script";
pub const STYLE_SELECTOR: &str = "style, link[rel~=stylesheet]";

/// Inline every asset `document` references
pub async fn inline_assets(document: &Document, run: &RunContext<'_>) -> InlineResult<()> {
    let scripts = document.select(SCRIPT_SELECTOR)?;
    let styles = document.select(STYLE_SELECTOR)?;
    let images = if run.options.images() {
        images::select(document)?
    } else {
        Vec::new()
    };

    log::debug!(
        "Found {} images, {} stylesheets, {} scripts",
        images.len(),
        styles.len(),
        scripts.len()
    );

    futures::try_join!(
        branch(AssetKind::Image, inline_images(run, &images)),
        branch(AssetKind::Style, inline_styles(run, &styles)),
        branch(AssetKind::Script, inline_scripts(run, &scripts)),
    )?;

    Ok(())
}

async fn branch(kind: AssetKind, work: impl Future<Output = InlineResult<()>>) -> InlineResult<()> {
    work.await
        .inspect_err(|e| log::error!("Inlining {kind} failed: {e}"))
}
