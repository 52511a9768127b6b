//! End-to-end inlining against a local mock HTTP server

mod common;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use common::{gzip, page, plain_options, serve_once};
use inliner::{FetchError, InlineError, InlineOptions, Inliner};

#[tokio::test]
async fn shared_resources_are_fetched_once_per_run() {
    let mut server = mockito::Server::new_async().await;
    let html = page(
        r#"<link rel="stylesheet" href="/a.css"><link rel="stylesheet" href="a.css"><script src="/app.js"></script><script src="/app.js"></script>"#,
        r#"<img src="/logo.png"><img src="logo.png">"#,
    );

    let page_mock = serve_once(&mut server, "/", "text/html", html.as_bytes()).await;
    let css_mock = serve_once(&mut server, "/a.css", "text/css", b"h1{background:url(/logo.png)}").await;
    let js_mock = serve_once(&mut server, "/app.js", "application/javascript", b"boot();").await;
    let png_mock = serve_once(&mut server, "/logo.png", "image/png", b"\x89PNG").await;

    let options = InlineOptions::builder().images(true).uglify(false).build().unwrap();
    let out = Inliner::new(options).inline(&format!("{}/", server.url())).await.unwrap();

    page_mock.assert_async().await;
    css_mock.assert_async().await;
    js_mock.assert_async().await;
    png_mock.assert_async().await;

    assert_eq!(out.matches("data:image/png;base64,iVBORw==").count(), 4);
    assert_eq!(out.matches("<script>boot();</script>").count(), 2);
}

#[tokio::test]
async fn missing_page_yields_empty_output() {
    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("GET", "/gone").with_status(404).with_body("not here").create_async().await;

    let out = Inliner::new(plain_options())
        .inline(&format!("{}/gone", server.url()))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(out, "");
}

#[tokio::test]
async fn image_becomes_data_uri() {
    let mut server = mockito::Server::new_async().await;
    let bytes = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    let y_url = format!("{}/y.png", server.url());

    let _page = serve_once(&mut server, "/", "text/html", page("", &format!(r#"<img src="{y_url}">"#)).as_bytes()).await;
    let _asset = serve_once(&mut server, "/y.png", "image/png", &bytes).await;

    let options = InlineOptions::builder().images(true).build().unwrap();
    let out = Inliner::new(options).inline(&format!("{}/", server.url())).await.unwrap();

    let expected = format!(r#"src="data:image/png;base64,{}""#, STANDARD.encode(bytes));
    assert!(out.contains(&expected), "missing {expected} in {out}");
}

#[tokio::test]
async fn print_stylesheet_is_wrapped_in_media_block() {
    let mut server = mockito::Server::new_async().await;
    let html = page(r#"<link rel="stylesheet" href="s.css" media="print">"#, "<p>x</p>");

    let _page = serve_once(&mut server, "/", "text/html", html.as_bytes()).await;
    let _asset = serve_once(&mut server, "/s.css", "text/css", b"body{color:red}").await;

    let out = Inliner::new(plain_options()).inline(&format!("{}/", server.url())).await.unwrap();

    assert!(out.contains("<style>@media print{body{color:red}}</style>"));
    assert!(!out.contains("<link"));
}

#[tokio::test]
async fn comments_are_stripped_except_conditionals() {
    let mut server = mockito::Server::new_async().await;
    let html = page("<!-- note -->", "<!--[if IE]>x<![endif]--><p>kept</p>");
    let _page = serve_once(&mut server, "/", "text/html", html.as_bytes()).await;

    let out = Inliner::new(plain_options()).inline(&format!("{}/", server.url())).await.unwrap();

    assert!(!out.contains("note"));
    assert!(out.contains("<!--[if IE]>x<![endif]-->"));
    assert!(out.starts_with("<!DOCTYPE html>"));
}

#[tokio::test]
async fn closing_script_tags_inside_scripts_are_escaped() {
    let mut server = mockito::Server::new_async().await;
    let _page = serve_once(&mut server, "/", "text/html", page(r#"<script src="w.js"></script>"#, "").as_bytes()).await;
    let _asset = serve_once(
        &mut server,
        "/w.js",
        "text/javascript",
        b"document.write('<script src=x.js></script>');",
    )
    .await;

    let out = Inliner::new(plain_options()).inline(&format!("{}/", server.url())).await.unwrap();

    assert!(out.contains(r"<script>document.write('<script src=x.js><\/script>');</script>"));
}

#[tokio::test]
async fn gzip_responses_are_decoded() {
    let mut server = mockito::Server::new_async().await;
    let _page = serve_once(&mut server, "/", "text/html", page(r#"<link rel="stylesheet" href="z.css">"#, "").as_bytes()).await;
    let _css = server
        .mock("GET", "/z.css")
        .with_status(200)
        .with_header("content-type", "text/css")
        .with_header("content-encoding", "gzip")
        .with_body(gzip(b"p{margin:0}"))
        .create_async()
        .await;

    let out = Inliner::new(plain_options()).inline(&format!("{}/", server.url())).await.unwrap();

    assert!(out.contains("<style>p{margin:0}</style>"));
}

#[tokio::test]
async fn scripts_are_minified_by_default() {
    let mut server = mockito::Server::new_async().await;
    let _page = serve_once(&mut server, "/", "text/html", page(r#"<script src="app.js"></script>"#, "").as_bytes()).await;
    let _asset = serve_once(
        &mut server,
        "/app.js",
        "text/javascript",
        b"function add(leftOperand, rightOperand) {\n  return leftOperand + rightOperand;\n}\nwindow.add = add;\n",
    )
    .await;

    let out = Inliner::new(InlineOptions::default()).inline(&format!("{}/", server.url())).await.unwrap();

    assert!(out.contains("window.add"));
    assert!(out.contains("function add("));
    assert!(!out.contains("leftOperand"));
}

#[tokio::test]
async fn minified_page_keeps_handler_functions() {
    let mut server = mockito::Server::new_async().await;
    let html = page(
        "<script>function toggleMenu() {\n  document.body.classList.toggle('open');\n}</script>",
        r#"<button onclick="toggleMenu()">menu</button>"#,
    );
    let _page = serve_once(&mut server, "/", "text/html", html.as_bytes()).await;

    let out = Inliner::new(InlineOptions::default()).inline(&format!("{}/", server.url())).await.unwrap();

    assert!(out.contains("function toggleMenu("), "got {out}");
    assert!(out.contains(r#"onclick="toggleMenu()""#));
}

#[tokio::test]
async fn broken_script_fails_the_run() {
    let mut server = mockito::Server::new_async().await;
    let _page = serve_once(&mut server, "/", "text/html", page(r#"<script src="bad.js"></script>"#, "").as_bytes()).await;
    let _asset = serve_once(&mut server, "/bad.js", "text/javascript", b"function (").await;

    let err = Inliner::new(InlineOptions::default())
        .inline(&format!("{}/", server.url()))
        .await
        .unwrap_err();

    assert!(matches!(err, InlineError::ScriptTransform { src: Some(ref src), .. } if src == "bad.js"));
}

#[tokio::test]
async fn oversized_resources_are_rejected() {
    let mut server = mockito::Server::new_async().await;
    let _page = serve_once(&mut server, "/", "text/html", page(r#"<script src="big.js"></script>"#, "").as_bytes()).await;
    let _asset = serve_once(&mut server, "/big.js", "text/javascript", &vec![b'1'; 4096]).await;

    let options = InlineOptions::builder().max_resource_bytes(1024).build().unwrap();
    let err = Inliner::new(options).inline(&format!("{}/", server.url())).await.unwrap_err();

    assert!(matches!(err, InlineError::Fetch(FetchError::TooLarge { limit: 1024, .. })));
}
