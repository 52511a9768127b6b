//! Getter methods for `InlineOptions`

use std::time::Duration;

use super::types::InlineOptions;

impl InlineOptions {
    #[must_use]
    pub fn uglify(&self) -> bool {
        self.uglify
    }

    #[must_use]
    pub fn images(&self) -> bool {
        self.images
    }

    #[must_use]
    pub fn collapse_whitespace(&self) -> bool {
        self.collapse_whitespace
    }

    #[must_use]
    pub fn compress_css(&self) -> bool {
        self.compress_css
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    #[must_use]
    pub fn max_resource_bytes(&self) -> usize {
        self.max_resource_bytes
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    #[must_use]
    pub fn analytics_hosts(&self) -> &[String] {
        &self.analytics_hosts
    }

    /// Whether a resolved script URL belongs to an excluded analytics host
    #[must_use]
    pub fn is_analytics(&self, url: &str) -> bool {
        self.analytics_hosts
            .iter()
            .any(|host| !host.is_empty() && url.contains(host.as_str()))
    }
}
