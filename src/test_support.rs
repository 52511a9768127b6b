//! Shared helpers for unit tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::error::FetchError;
use crate::fetcher::{RawResponse, Transport, TransportFuture};

/// Transport that serves canned responses and counts every call
#[derive(Default)]
pub struct StubTransport {
    responses: HashMap<String, RawResponse>,
    calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl StubTransport {
    pub fn with(mut self, url: &str, response: RawResponse) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    /// Register a 200 response
    pub fn ok(self, url: &str, content_type: &str, body: &[u8]) -> Self {
        self.with(url, ok(content_type, body))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn calls_to(&self, url: &str) -> usize {
        self.requested.lock().iter().filter(|u| *u == url).count()
    }
}

impl Transport for StubTransport {
    fn get<'a>(&'a self, url: &'a str) -> TransportFuture<'a> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requested.lock().push(url.to_string());
            // Give concurrent callers a chance to pile up behind this fetch
            tokio::task::yield_now().await;
            self.responses
                .get(url)
                .cloned()
                .ok_or_else(|| FetchError::Http {
                    url: url.to_string(),
                    message: "connection refused".to_string(),
                })
        })
    }
}

pub fn ok(content_type: &str, body: &[u8]) -> RawResponse {
    RawResponse {
        status: 200,
        content_type: Some(content_type.to_string()),
        content_encoding: None,
        body: body.to_vec(),
    }
}

pub fn status(code: u16) -> RawResponse {
    RawResponse {
        status: code,
        content_type: Some("text/html".to_string()),
        content_encoding: None,
        body: b"<h1>error</h1>".to_vec(),
    }
}
