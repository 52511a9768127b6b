//! Core configuration types for page inlining
//!
//! This module contains the `InlineOptions` struct that decides which asset
//! kinds get inlined and how the fetch layer behaves.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::utils::{
    CHROME_USER_AGENT, DEFAULT_ANALYTICS_HOSTS, DEFAULT_MAX_RESOURCE_BYTES,
    DEFAULT_REQUEST_TIMEOUT,
};

/// Immutable configuration snapshot for one inlining run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InlineOptions {
    /// Minify inlined scripts
    pub(crate) uglify: bool,
    /// Inline `<img>` sources and CSS `url(...)` references as data URIs
    pub(crate) images: bool,
    /// Collapse whitespace runs in the serialized output
    pub(crate) collapse_whitespace: bool,
    /// Apply textual CSS compression to every inlined stylesheet
    pub(crate) compress_css: bool,

    /// Timeout applied to each HTTP request
    ///
    /// `None` disables the timeout entirely, in which case a hung server
    /// stalls the whole run.
    ///
    /// Default: 30 seconds
    pub(crate) request_timeout: Option<Duration>,

    /// Maximum size of a single fetched resource in bytes
    ///
    /// Checked against `Content-Length` before downloading and again while
    /// streaming the body.
    pub(crate) max_resource_bytes: usize,

    pub(crate) user_agent: String,

    /// Hosts whose scripts are left untouched (matched as substrings of the
    /// resolved script URL)
    pub(crate) analytics_hosts: Vec<String>,
}

impl Default for InlineOptions {
    fn default() -> Self {
        Self {
            uglify: true,
            images: false,
            collapse_whitespace: false,
            compress_css: false,
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            max_resource_bytes: DEFAULT_MAX_RESOURCE_BYTES,
            user_agent: CHROME_USER_AGENT.to_string(),
            analytics_hosts: DEFAULT_ANALYTICS_HOSTS
                .iter()
                .map(|host| (*host).to_string())
                .collect(),
        }
    }
}
