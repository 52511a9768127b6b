//! Type definitions for resource fetching

use base64::Engine;
use std::future::Future;
use std::pin::Pin;

use crate::error::FetchError;
use crate::utils::mime::OCTET_STREAM;

/// Per-call options for `Fetcher::fetch`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions<'a> {
    /// Return the body as `data:<content-type>;base64,<body>`
    pub decode_as_data_uri: bool,
    /// Resolve to an empty body when the response content type contains this
    pub reject_if_content_type: Option<&'a str>,
}

impl<'a> FetchOptions<'a> {
    #[must_use]
    pub fn data_uri() -> Self {
        Self {
            decode_as_data_uri: true,
            reject_if_content_type: None,
        }
    }

    #[must_use]
    pub fn rejecting(content_type: &'a str) -> Self {
        Self {
            decode_as_data_uri: false,
            reject_if_content_type: Some(content_type),
        }
    }
}

/// Raw HTTP response handed back by a `Transport`
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub content_encoding: Option<String>,
    pub body: Vec<u8>,
}

/// Type alias for transport futures
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<RawResponse, FetchError>> + Send + 'a>>;

/// Where a cached resource came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Disk,
    Network { status: u16 },
}

/// A fetched resource as stored in the per-run cache
///
/// The decoded body is kept once per key; `FetchOptions` are applied on every
/// read so callers asking for text and callers asking for a data URI share the
/// same underlying fetch.
#[derive(Debug, Clone)]
pub struct Resource {
    pub origin: Origin,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Resource {
    /// Local files always count as successful
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self.origin {
            Origin::Disk => true,
            Origin::Network { status } => (200..300).contains(&status),
        }
    }

    /// Produce the body a caller sees for the given options
    ///
    /// Non-success responses and rejected content types come back as an empty
    /// string rather than an error.
    #[must_use]
    pub fn render(&self, url: &str, options: &FetchOptions<'_>) -> String {
        if !self.is_success() {
            if let Origin::Network { status } = self.origin {
                log::warn!("{url} answered with status {status}, treating as empty");
            }
            return String::new();
        }

        if let (Origin::Network { .. }, Some(rejected), Some(content_type)) = (
            self.origin,
            options.reject_if_content_type,
            self.content_type.as_deref(),
        ) && content_type.contains(rejected)
        {
            log::warn!("{url} served {content_type}, discarding body");
            return String::new();
        }

        if options.decode_as_data_uri {
            self.to_data_uri()
        } else {
            String::from_utf8_lossy(&self.body).into_owned()
        }
    }

    fn to_data_uri(&self) -> String {
        let content_type = self.content_type.as_deref().unwrap_or(OCTET_STREAM);

        let encoded_capacity = base64::encoded_len(self.body.len(), true).unwrap_or(0);
        let mut encoded = String::with_capacity(encoded_capacity + 13 + content_type.len());

        encoded.push_str("data:");
        encoded.push_str(content_type);
        encoded.push_str(";base64,");
        base64::engine::general_purpose::STANDARD.encode_string(&self.body, &mut encoded);

        encoded
    }
}
