//! `<style>` and `<link rel=stylesheet>` inlining

use futures::future::try_join_all;

use crate::css::{compress_css, inline_image_urls, resolve_imports, wrap_media};
use crate::dom::{Element, ElementExt, new_style_element};
use crate::error::InlineResult;
use crate::fetcher::FetchOptions;
use crate::run::{AssetKind, RunContext};
use crate::utils::resolve_url;

/// Inline every selected stylesheet; the first failure fails the lot
pub async fn inline_styles(run: &RunContext<'_>, styles: &[Element]) -> InlineResult<()> {
    try_join_all(styles.iter().map(|element| async move {
        if element.tag() == "style" {
            inline_style_block(run, element).await
        } else {
            inline_stylesheet_link(run, element).await
        }
    }))
    .await?;
    Ok(())
}

async fn inline_style_block(run: &RunContext<'_>, style: &Element) -> InlineResult<()> {
    let css = style.text();
    let css = resolve_imports(run, &run.page_url, css).await?;
    let css = inline_image_urls(run, &run.page_url, css).await?;

    style.set_text(&finish(run, css));
    run.record(AssetKind::Style);
    Ok(())
}

async fn inline_stylesheet_link(run: &RunContext<'_>, link: &Element) -> InlineResult<()> {
    let Some(href) = link.attr("href").filter(|href| !href.trim().is_empty()) else {
        log::warn!("Skipping stylesheet link without href");
        return Ok(());
    };

    let stylesheet_url = resolve_url(&run.page_url, &href)?;
    let css = run.fetch(&stylesheet_url, FetchOptions::default()).await?;
    if css.is_empty() {
        log::warn!("Empty stylesheet from {stylesheet_url}");
    }

    let css = inline_image_urls(run, &stylesheet_url, css).await?;
    let css = resolve_imports(run, &stylesheet_url, css).await?;
    let css = finish(run, css);

    let css = match link.attr("media").filter(|media| !media.trim().is_empty()) {
        Some(media) => wrap_media(media.trim(), &css),
        None => css,
    };

    link.replace_with(new_style_element(&css)?);
    run.record(AssetKind::Style);
    Ok(())
}

fn finish(run: &RunContext<'_>, css: String) -> String {
    if run.options.compress_css() {
        compress_css(&css)
    } else {
        css
    }
}
