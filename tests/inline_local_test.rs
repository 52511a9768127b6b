//! Inlining pages that live on disk

mod common;

use common::{page, plain_options};
use inliner::{InlineOptions, Inliner};
use std::fs;
use tempfile::TempDir;
use url::Url;

fn site() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    fs::create_dir(dir.path().join("css")).expect("css dir");
    fs::write(
        dir.path().join("index.html"),
        page(
            r#"<link rel="stylesheet" href="css/site.css"><script src="app.js?v=2"></script>"#,
            r#"<img src="logo.png"><pre>a
  b</pre>"#,
        ),
    )
    .expect("write page");
    fs::write(dir.path().join("css/site.css"), "@import 'reset.css';\nh1 { color: navy; }\n").expect("write css");
    fs::write(dir.path().join("css/reset.css"), "* { margin: 0; }\n").expect("write reset");
    fs::write(dir.path().join("app.js"), "console.log('local & proud');\n").expect("write js");
    fs::write(dir.path().join("logo.png"), [1u8, 2, 3]).expect("write png");
    dir
}

#[tokio::test]
async fn local_page_and_assets_inline_from_disk() {
    let dir = site();
    let index = dir.path().join("index.html");

    let options = InlineOptions::builder()
        .images(true)
        .uglify(false)
        .compress_css(true)
        .build()
        .unwrap();
    let out = Inliner::new(options).inline(&index.to_string_lossy()).await.unwrap();

    assert!(out.starts_with("<!DOCTYPE html>"));
    assert!(out.contains("<style>*{ margin:0;}h1{ color:navy;}</style>"));
    assert!(out.contains("<script>console.log('local & proud');\n</script>"));
    assert!(out.contains(r#"<img src="data:image/png;base64,AQID">"#));
}

#[tokio::test]
async fn file_urls_work_like_paths() {
    let dir = site();
    let index = Url::from_file_path(dir.path().join("index.html")).unwrap();

    let out = Inliner::new(plain_options()).inline(index.as_str()).await.unwrap();

    assert!(out.contains("h1 { color: navy; }"));
    assert!(out.contains("<img src=\"logo.png\">"));
}

#[tokio::test]
async fn collapsing_keeps_preformatted_text() {
    let dir = site();
    let index = dir.path().join("index.html");

    let options = InlineOptions::builder()
        .uglify(false)
        .collapse_whitespace(true)
        .build()
        .unwrap();
    let out = Inliner::new(options).inline(&index.to_string_lossy()).await.unwrap();

    assert!(out.contains("<pre>a\n  b</pre>"));
    assert!(out.contains("h1 { color: navy; }"));
    assert!(!out.contains("\n\n"));
}

#[tokio::test]
async fn missing_local_asset_is_a_fetch_error() {
    let dir = TempDir::new().unwrap();
    let index = dir.path().join("index.html");
    fs::write(&index, page(r#"<script src="nowhere.js"></script>"#, "")).unwrap();

    let result = Inliner::new(plain_options()).inline(&index.to_string_lossy()).await;

    assert!(result.is_err());
}
