//! `<img>` inlining

use futures::future::try_join_all;

use crate::dom::{Document, Element, ElementExt};
use crate::error::InlineResult;
use crate::fetcher::FetchOptions;
use crate::run::{AssetKind, RunContext};
use crate::utils::{is_data_uri, resolve_url};

/// Images with a `src` that still points somewhere
pub fn select(document: &Document) -> InlineResult<Vec<Element>> {
    let mut images = document.select("img[src]")?;
    images.retain(|img| img.attr("src").is_some_and(|src| !src.trim().is_empty() && !is_data_uri(&src)));
    Ok(images)
}

/// Swap each image's `src` for a data URI
pub async fn inline_images(run: &RunContext<'_>, images: &[Element]) -> InlineResult<()> {
    try_join_all(images.iter().map(|img| inline_image(run, img))).await?;
    Ok(())
}

async fn inline_image(run: &RunContext<'_>, img: &Element) -> InlineResult<()> {
    let Some(src) = img.attr("src") else {
        return Ok(());
    };

    let target = resolve_url(&run.page_url, &src)?;
    let data_uri = run.fetch(&target, FetchOptions::data_uri()).await?;

    if data_uri.is_empty() {
        log::warn!("No image data for {target}, keeping original src");
        return Ok(());
    }

    img.set_attr("src", data_uri);
    run.record(AssetKind::Image);
    Ok(())
}
