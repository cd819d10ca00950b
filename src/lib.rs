//! Dezoomify Extension
//!
//! Background logic of a browser extension that watches a tab's network
//! traffic, recognizes requests made to zoomable image tile servers (IIIF,
//! Zoomify, Deep Zoom, IIPImage, Google Arts & Culture, ...) and opens the
//! images it found in the Dezoomify viewer.

pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod classifier;
pub mod tracker;
pub mod status;
pub mod host;
pub mod dispatcher;
pub mod utils;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use classifier::{Classification, TileFormat, UrlClassifier};
pub use config::{Options, DEZOOMIFY_URL};
pub use dispatcher::{Background, ClickOutcome};
pub use error::ExtensionError;
pub use host::{BrowserHost, HostCall, RecordingHost};
pub use models::{Manifest, MenuAction, ObservedRequest, Tab, TabId};

use anyhow::{Context, Result};
use parser::HarCapture;

/// Replay a recorded page load and return the viewer links a click on the
/// icon would open afterwards
pub fn scan_capture(
    manifest: Manifest,
    options: Options,
    capture: &HarCapture,
    page_url: &str,
    tab_id: TabId,
) -> Result<Vec<String>> {
    // Requests are already recorded, no point reloading
    let options = Options {
        reload_on_activate: false,
        ..options
    };
    let mut background = Background::new(RecordingHost::new(), manifest, options)?;

    // 1. Start listening on the page
    background.on_icon_clicked(&Tab::new(tab_id, page_url), 0.0)?;

    // 2. Feed every captured request
    for request in &capture.requests {
        background
            .on_request(request)
            .with_context(|| format!("Failed to inspect {}", request.url))?;
    }

    // 3. Click again to open what was found
    if background.found_count(tab_id) == 0 {
        return Ok(Vec::new());
    }
    background.on_icon_clicked(&Tab::new(tab_id, page_url), 0.0)?;
    Ok(background.into_host().opened_tabs())
}
