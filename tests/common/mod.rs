//! Test utilities shared by the inliner integration tests

use flate2::Compression;
use flate2::write::GzEncoder;
use inliner::InlineOptions;
use mockito::{Mock, ServerGuard};
use std::io::Write;

/// Options with minification off so script bodies can be asserted verbatim
#[allow(dead_code)]
pub fn plain_options() -> InlineOptions {
    InlineOptions::builder()
        .uglify(false)
        .build()
        .expect("valid options")
}

/// Serve `body` at `path` with the given content type, expecting one request
#[allow(dead_code)]
pub async fn serve_once(server: &mut ServerGuard, path: &str, content_type: &str, body: &[u8]) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", content_type)
        .with_body(body)
        .expect(1)
        .create_async()
        .await
}

/// Wrap a page body in a minimal document
#[allow(dead_code)]
pub fn page(head: &str, body: &str) -> String {
    format!("<!DOCTYPE html><html><head>{head}</head><body>{body}</body></html>")
}

#[allow(dead_code)]
pub fn gzip(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes).expect("gzip write");
    encoder.finish().expect("gzip finish")
}
