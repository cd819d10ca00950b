//! Manifest data structures for the extension's own manifest.json
//!
//! Only the fields used to present the extension's status are modelled;
//! everything else is kept in `extra` so a manifest can be round-tripped.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{ExtensionError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub manifest_version: u8,
    pub name: String,
    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_action: Option<Action>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icons: Option<HashMap<String, String>>,

    #[serde(default)]
    pub permissions: Vec<String>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_icon: Option<IconSet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IconSet {
    Single(String),
    Multiple(HashMap<String, String>),
}

impl Manifest {
    /// The browser action section, which the status display cannot do without
    pub fn browser_action(&self) -> Result<&Action> {
        self.browser_action
            .as_ref()
            .ok_or_else(|| ExtensionError::InvalidManifest(format!("{} has no browser_action", self.name)))
    }

    /// Title shown while the extension sleeps on a tab
    pub fn default_title(&self) -> Result<String> {
        Ok(self.browser_action()?.default_title.clone().unwrap_or_default())
    }

    /// Icon shown while the extension sleeps on a tab
    pub fn sleeping_icon(&self) -> Result<Option<IconSet>> {
        Ok(self.browser_action()?.default_icon.clone())
    }

    /// Icon shown while the extension listens on a tab
    pub fn active_icon(&self) -> Option<IconSet> {
        self.icons.clone().map(IconSet::Multiple)
    }
}
