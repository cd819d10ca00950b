//! The browser extension APIs the background logic drives
//!
//! In the browser these are `chrome.browserAction`, `chrome.tabs` and
//! `chrome.contextMenus` (see `wasm.rs`). Tests and the CLI use
//! [`RecordingHost`], which only remembers what it was asked to do.

use crate::models::{IconSet, MenuAction, TabId};

pub trait BrowserHost {
    fn set_badge_text(&mut self, tab_id: TabId, text: &str);
    fn set_title(&mut self, tab_id: TabId, title: &str);
    fn set_icon(&mut self, tab_id: TabId, icon: &IconSet);
    fn create_tab(&mut self, url: &str, active: bool);
    fn reload_tab(&mut self, tab_id: TabId);
    fn remove_all_menus(&mut self);
    fn create_menu_item(&mut self, action: MenuAction);
}

/// One call made on a [`RecordingHost`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    SetBadgeText { tab_id: TabId, text: String },
    SetTitle { tab_id: TabId, title: String },
    SetIcon { tab_id: TabId, icon: IconSet },
    CreateTab { url: String, active: bool },
    ReloadTab { tab_id: TabId },
    RemoveAllMenus,
    CreateMenuItem { action: MenuAction },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    pub calls: Vec<HostCall>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs of every tab opened so far
    pub fn opened_tabs(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::CreateTab { url, .. } => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    /// Most recent badge text set on a tab
    pub fn badge(&self, tab_id: TabId) -> Option<&str> {
        self.calls.iter().rev().find_map(|call| match call {
            HostCall::SetBadgeText { tab_id: id, text } if *id == tab_id => Some(text.as_str()),
            _ => None,
        })
    }

    /// Most recent title set on a tab
    pub fn title(&self, tab_id: TabId) -> Option<&str> {
        self.calls.iter().rev().find_map(|call| match call {
            HostCall::SetTitle { tab_id: id, title } if *id == tab_id => Some(title.as_str()),
            _ => None,
        })
    }

    pub fn reloads(&self, tab_id: TabId) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, HostCall::ReloadTab { tab_id: id } if *id == tab_id))
            .count()
    }
}

impl BrowserHost for RecordingHost {
    fn set_badge_text(&mut self, tab_id: TabId, text: &str) {
        self.calls.push(HostCall::SetBadgeText { tab_id, text: text.to_string() });
    }

    fn set_title(&mut self, tab_id: TabId, title: &str) {
        self.calls.push(HostCall::SetTitle { tab_id, title: title.to_string() });
    }

    fn set_icon(&mut self, tab_id: TabId, icon: &IconSet) {
        self.calls.push(HostCall::SetIcon { tab_id, icon: icon.clone() });
    }

    fn create_tab(&mut self, url: &str, active: bool) {
        self.calls.push(HostCall::CreateTab { url: url.to_string(), active });
    }

    fn reload_tab(&mut self, tab_id: TabId) {
        self.calls.push(HostCall::ReloadTab { tab_id });
    }

    fn remove_all_menus(&mut self) {
        self.calls.push(HostCall::RemoveAllMenus);
    }

    fn create_menu_item(&mut self, action: MenuAction) {
        self.calls.push(HostCall::CreateMenuItem { action });
    }
}
