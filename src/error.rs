//! Error types for page inlining
//!
//! `FetchError` covers everything that can go wrong while retrieving a single
//! resource. `InlineError` is what callers of the pipeline see; a failure in
//! any asset branch surfaces here unchanged.

use thiserror::Error;

/// Result type alias for inlining operations
pub type InlineResult<T> = Result<T, InlineError>;

/// Failure to retrieve one resource from disk or the network.
///
/// Cloneable so a single failed fetch can be handed to every caller that was
/// coalesced onto it.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Local file existed but could not be read
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    /// Transport-level HTTP failure (connect, timeout, body stream)
    #[error("request to {url} failed: {message}")]
    Http { url: String, message: String },

    /// Response advertised gzip but the body did not decompress
    #[error("failed to decompress gzip body from {url}: {message}")]
    Decompress { url: String, message: String },

    /// Body exceeded the configured size cap
    #[error("{url} exceeds the resource size limit of {limit} bytes")]
    TooLarge { url: String, limit: usize },

    /// Reference could not be resolved against its base
    #[error("cannot resolve '{reference}' against '{base}': {message}")]
    InvalidUrl {
        base: String,
        reference: String,
        message: String,
    },

    /// The fetch this caller was queued behind was dropped before finishing
    #[error("fetch of {url} was abandoned before completing")]
    Abandoned { url: String },
}

/// Error surfaced by the inlining pipeline
#[derive(Debug, Error)]
pub enum InlineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Root document could not be parsed, or a query against it was invalid
    #[error("failed to parse HTML document: {0}")]
    Parse(String),

    /// Script minification failed to parse or transform the source
    #[error("failed to minify script {}: {message}", .src.as_deref().unwrap_or("<inline>"))]
    ScriptTransform {
        src: Option<String>,
        message: String,
    },

    /// A stylesheet kept producing `@import` rules past the splice cap
    #[error("@import resolution against {base} exceeded {limit} splices")]
    ImportLimit { base: String, limit: usize },

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl FetchError {
    /// URL or path the failure relates to
    #[must_use]
    pub fn location(&self) -> &str {
        match self {
            Self::Io { path, .. } => path,
            Self::Http { url, .. }
            | Self::Decompress { url, .. }
            | Self::TooLarge { url, .. }
            | Self::Abandoned { url } => url,
            Self::InvalidUrl { reference, .. } => reference,
        }
    }
}
