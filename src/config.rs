//! Runtime options for the background logic

use serde::{Deserialize, Serialize};

/// Viewer page; the image URL goes in the fragment
pub const DEZOOMIFY_URL: &str = "https://dezoomify.ophir.dev/dezoomify/dezoomify.html#";

/// Minimum time a found image survives a navigation
pub const DEFAULT_RETENTION_MS: u64 = 1000;

pub const DEFAULT_STATUS_REFRESH_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Prefix of the viewer link. URLs starting with it are never tracked.
    pub viewer_url: String,
    pub retention_ms: u64,
    /// Reload the tab when listening starts, so tiles already loaded are requested again
    pub reload_on_activate: bool,
    /// Ignore requests issued by documents from another origin than the tab
    pub same_site_only: bool,
    pub status_refresh_ms: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            viewer_url: DEZOOMIFY_URL.to_string(),
            retention_ms: DEFAULT_RETENTION_MS,
            reload_on_activate: true,
            same_site_only: true,
            status_refresh_ms: DEFAULT_STATUS_REFRESH_MS,
        }
    }
}

impl Options {
    pub fn retention(&self) -> f64 {
        self.retention_ms as f64
    }

    /// Viewer link for a discovered image
    pub fn viewer_link(&self, image_url: &str) -> String {
        format!("{}{}", self.viewer_url, image_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.retention_ms, 1000);
        assert!(options.reload_on_activate);
        assert!(options.same_site_only);
        assert_eq!(
            options.viewer_link("https://example.com/info.json"),
            "https://dezoomify.ophir.dev/dezoomify/dezoomify.html#https://example.com/info.json"
        );
    }
}
