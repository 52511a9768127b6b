//! Fluent builder for `InlineOptions`
//!
//! Every field has a default, so the builder only validates the values that
//! would make a run impossible (a zero timeout, a zero size cap).

use std::time::Duration;

use super::types::InlineOptions;
use crate::error::{InlineError, InlineResult};

#[derive(Debug, Clone, Default)]
pub struct InlineOptionsBuilder {
    options: InlineOptions,
}

impl InlineOptions {
    /// Create a builder for configuring `InlineOptions` with a fluent interface
    #[must_use]
    pub fn builder() -> InlineOptionsBuilder {
        InlineOptionsBuilder::default()
    }
}

impl InlineOptionsBuilder {
    #[must_use]
    pub fn uglify(mut self, uglify: bool) -> Self {
        self.options.uglify = uglify;
        self
    }

    #[must_use]
    pub fn images(mut self, images: bool) -> Self {
        self.options.images = images;
        self
    }

    #[must_use]
    pub fn collapse_whitespace(mut self, collapse: bool) -> Self {
        self.options.collapse_whitespace = collapse;
        self
    }

    #[must_use]
    pub fn compress_css(mut self, compress: bool) -> Self {
        self.options.compress_css = compress;
        self
    }

    #[must_use]
    pub fn request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.options.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn max_resource_bytes(mut self, bytes: usize) -> Self {
        self.options.max_resource_bytes = bytes;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.options.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn analytics_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.analytics_hosts = hosts.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> InlineResult<InlineOptions> {
        if self.options.request_timeout.is_some_and(|t| t.is_zero()) {
            return Err(InlineError::Config(
                "request timeout must be greater than zero (use None to disable it)".to_string(),
            ));
        }

        if self.options.max_resource_bytes == 0 {
            return Err(InlineError::Config(
                "max_resource_bytes must be greater than zero".to_string(),
            ));
        }

        Ok(self.options)
    }
}
