//! Error types for the extension background logic
//!
//! Every variant is a precondition violation on the caller's side. There is no
//! recovery path: the host logs the rejected event and moves on.

use crate::models::TabId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtensionError {
    /// A tab without an id or a URL, or with a URL that does not parse
    #[error("bad tab: {0}")]
    BadTab(String),

    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Asked to open the found images of a tab that has none
    #[error("no zoomable image found on tab {0}")]
    EmptyResults(TabId),

    #[error("unknown menu item: {0}")]
    UnknownMenuItem(String),
}

pub type Result<T> = std::result::Result<T, ExtensionError>;
