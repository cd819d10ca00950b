//! Reactions to host events: requests, navigation, icon and menu clicks
//!
//! Each tab is either searching (requests are inspected and zoomable images
//! recorded) or sleeping. Clicking the icon on a searching tab that has found
//! something opens the viewer once per image and puts the tab back to sleep;
//! any other click starts listening.

use std::collections::HashMap;

use tracing::{debug, info};
use url::Url;

use crate::classifier::UrlClassifier;
use crate::config::Options;
use crate::error::{ExtensionError, Result};
use crate::host::BrowserHost;
use crate::models::{CheckedTab, Manifest, MenuAction, MenuEffect, ObservedRequest, Tab, TabId, TrackedRequest};
use crate::status::{compute_status, ListenState, WORKING_BADGE};
use crate::tracker::{FoundImages, RecordOutcome};
use crate::utils::same_site;

/// A tab the extension was activated on
#[derive(Debug, Clone)]
struct Page {
    tab: CheckedTab,
    state: ListenState,
}

/// What an icon click did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    StartedListening,
    /// Viewer tabs were opened, one per found image
    Opened(usize),
}

pub struct Background<H: BrowserHost> {
    host: H,
    manifest: Manifest,
    options: Options,
    classifier: UrlClassifier,
    found: FoundImages,
    pages: HashMap<TabId, Page>,
}

impl<H: BrowserHost> Background<H> {
    pub fn new(host: H, manifest: Manifest, options: Options) -> Result<Self> {
        // Status display needs the browser action defaults
        manifest.browser_action()?;
        Ok(Self {
            host,
            classifier: UrlClassifier::new(options.viewer_url.clone()),
            found: FoundImages::new(options.retention()),
            manifest,
            options,
            pages: HashMap::new(),
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn state(&self, tab_id: TabId) -> ListenState {
        self.pages
            .get(&tab_id)
            .map_or(ListenState::Sleeping, |page| page.state)
    }

    pub fn found_count(&self, tab_id: TabId) -> usize {
        self.found.count(tab_id)
    }

    pub fn found_urls(&self, tab_id: TabId) -> Vec<String> {
        self.found.urls(tab_id)
    }

    /// Replace the icon's context menu with our entries
    pub fn install_menu(&mut self) {
        self.host.remove_all_menus();
        for action in MenuAction::ALL {
            self.host.create_menu_item(action);
        }
    }

    pub fn on_icon_clicked(&mut self, tab: &Tab, now: f64) -> Result<ClickOutcome> {
        let tab = tab.check()?;
        self.host.set_badge_text(tab.id, WORKING_BADGE);

        if self.state(tab.id) == ListenState::Searching && self.found.count(tab.id) > 0 {
            let opened = self.open_found(tab.id)?;
            self.stop(tab.id)?;
            return Ok(ClickOutcome::Opened(opened));
        }

        self.start(tab, now)?;
        Ok(ClickOutcome::StartedListening)
    }

    /// Inspect a request; returns whether it was recorded as a zoomable image
    pub fn on_request(&mut self, request: &ObservedRequest) -> Result<bool> {
        let Some(page) = self.pages.get(&request.tab_id) else {
            return Ok(false);
        };
        if page.state != ListenState::Searching {
            return Ok(false);
        }
        if self.options.same_site_only {
            if let Some(document_url) = request.document_url.as_deref() {
                if !same_site(document_url, page.tab.url.as_str())? {
                    debug!(tab_id = request.tab_id, document_url, "ignoring cross-site request");
                    return Ok(false);
                }
            }
        }
        self.track(request.tab_id, &request.url, request.time_stamp)
    }

    /// The tab's top frame navigated to `url`
    pub fn on_navigation(&mut self, tab_id: TabId, url: &str, time_stamp: f64) -> Result<()> {
        self.found.evict(tab_id, time_stamp);
        if let Some(page) = self.pages.get_mut(&tab_id) {
            page.tab.url = Url::parse(url)?;
            self.refresh(tab_id)?;
        }
        Ok(())
    }

    pub fn on_tab_removed(&mut self, tab_id: TabId) {
        if self.pages.remove(&tab_id).is_some() {
            debug!(tab_id, "tab closed, forgetting it");
        }
        self.found.clear(tab_id);
    }

    pub fn on_menu_clicked(&mut self, action: MenuAction, tab: &Tab) -> Result<()> {
        match action.effect() {
            MenuEffect::OpenLink(url) => self.host.create_tab(url, true),
            MenuEffect::OpenPageInViewer => {
                let tab = tab.check()?;
                let link = self.options.viewer_link(tab.url.as_str());
                self.host.create_tab(&link, true);
            }
            MenuEffect::StopAll => self.stop_all()?,
        }
        Ok(())
    }

    /// Periodic status refresh of every searching tab
    pub fn tick(&mut self) -> Result<()> {
        let searching: Vec<TabId> = self
            .pages
            .iter()
            .filter(|(_, page)| page.state == ListenState::Searching)
            .map(|(tab_id, _)| *tab_id)
            .collect();
        for tab_id in searching {
            self.refresh(tab_id)?;
        }
        Ok(())
    }

    /// Open one viewer tab per image found on `tab_id`
    pub fn open_found(&mut self, tab_id: TabId) -> Result<usize> {
        let urls = self.found.urls(tab_id);
        if urls.is_empty() {
            return Err(ExtensionError::EmptyResults(tab_id));
        }
        for url in &urls {
            let link = self.options.viewer_link(url);
            self.host.create_tab(&link, true);
        }
        info!(tab_id, count = urls.len(), "opened zoomable images in the viewer");
        Ok(urls.len())
    }

    /// Stop listening on every tab and forget everything found
    pub fn stop_all(&mut self) -> Result<()> {
        let tab_ids: Vec<TabId> = self.pages.keys().copied().collect();
        for tab_id in tab_ids {
            self.stop(tab_id)?;
        }
        self.found.clear_all();
        Ok(())
    }

    fn start(&mut self, tab: CheckedTab, now: f64) -> Result<()> {
        let tab_id = tab.id;
        let page_url = tab.url.to_string();
        info!(tab_id, host = %tab.host(), "listening for zoomable images");
        self.pages.insert(
            tab_id,
            Page {
                tab,
                state: ListenState::Searching,
            },
        );
        // The page itself may be a descriptor (an info.json opened directly)
        self.track(tab_id, &page_url, now)?;
        if self.options.reload_on_activate {
            self.host.reload_tab(tab_id);
        }
        self.refresh(tab_id)
    }

    fn stop(&mut self, tab_id: TabId) -> Result<()> {
        self.found.clear(tab_id);
        if let Some(mut page) = self.pages.remove(&tab_id) {
            page.state = ListenState::Sleeping;
            self.show(&page)?;
            info!(tab_id, "stopped listening");
        }
        Ok(())
    }

    fn track(&mut self, tab_id: TabId, url: &str, time_stamp: f64) -> Result<bool> {
        let Some(normalized) = self.classifier.zoomable_url(url) else {
            return Ok(false);
        };
        let outcome = self.found.record(TrackedRequest {
            url: normalized,
            tab_id,
            time_stamp,
        });
        if outcome == RecordOutcome::Skipped {
            return Ok(false);
        }
        self.refresh(tab_id)?;
        Ok(true)
    }

    fn refresh(&mut self, tab_id: TabId) -> Result<()> {
        match self.pages.get(&tab_id) {
            Some(page) => {
                let page = page.clone();
                self.show(&page)
            }
            None => Ok(()),
        }
    }

    fn show(&mut self, page: &Page) -> Result<()> {
        let status = compute_status(
            page.state,
            self.found.count(page.tab.id),
            &page.tab.host(),
            &self.manifest,
        )?;
        self.host.set_badge_text(page.tab.id, &status.badge);
        self.host.set_title(page.tab.id, &status.title);
        if let Some(icon) = &status.icon {
            self.host.set_icon(page.tab.id, icon);
        }
        Ok(())
    }
}
