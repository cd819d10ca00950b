//! Recognition of zoomable image requests
//!
//! A request URL is first normalized through [`rewrite`] (a tile URL becomes
//! the descriptor URL of its image), then tested against the metadata
//! endpoint table in [`patterns`].

pub mod patterns;
pub mod rewrite;

pub use patterns::{match_metadata, TileFormat, IIIF_IMAGE_PATH, METADATA_TABLE};
pub use rewrite::{normalize, REWRITE_TABLE};

use crate::config::DEZOOMIFY_URL;

/// Outcome of classifying one request URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub normalized: String,
    pub format: Option<TileFormat>,
}

impl Classification {
    pub fn is_match(&self) -> bool {
        self.format.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct UrlClassifier {
    viewer_url: String,
}

impl UrlClassifier {
    /// `viewer_url` is the prefix of our own viewer links, which must never match
    pub fn new(viewer_url: impl Into<String>) -> Self {
        Self {
            viewer_url: viewer_url.into(),
        }
    }

    pub fn classify(&self, url: &str) -> Classification {
        let normalized = normalize(url);
        let format = if normalized.starts_with(&self.viewer_url) {
            None
        } else {
            match_metadata(&normalized)
        };
        Classification { normalized, format }
    }

    /// Normalized URL of a zoomable image, if `url` belongs to one
    pub fn zoomable_url(&self, url: &str) -> Option<String> {
        let classification = self.classify(url);
        classification.is_match().then_some(classification.normalized)
    }
}

impl Default for UrlClassifier {
    fn default() -> Self {
        Self::new(DEZOOMIFY_URL)
    }
}
