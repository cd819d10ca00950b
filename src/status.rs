//! What the extension's icon shows for a tab

use crate::error::Result;
use crate::models::{IconSet, Manifest};

/// Badge shown right after a click, until the next status refresh
pub const WORKING_BADGE: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenState {
    Searching,
    Sleeping,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub badge: String,
    pub title: String,
    pub icon: Option<IconSet>,
}

/// Badge label for a number of found images
pub fn badge_text(state: ListenState, found: usize) -> String {
    match (state, found) {
        (ListenState::Sleeping, _) | (_, 0) => String::new(),
        (ListenState::Searching, n) => n.to_string(),
    }
}

pub fn compute_status(
    state: ListenState,
    found: usize,
    host: &str,
    manifest: &Manifest,
) -> Result<Status> {
    let status = match state {
        ListenState::Sleeping => Status {
            badge: badge_text(state, found),
            title: manifest.default_title()?,
            icon: manifest.sleeping_icon()?,
        },
        ListenState::Searching => {
            let title = match found {
                0 => format!(
                    "Listening for zoomable image requests from {}... \
                     Zoom on your image and it should be detected.",
                    host
                ),
                1 => format!("Found a zoomable image on {}. Click to open it.", host),
                n => format!("Found {} images on {}. Click to open them.", n, host),
            };
            Status {
                badge: badge_text(state, found),
                title,
                icon: manifest.active_icon(),
            }
        }
    };
    Ok(status)
}
