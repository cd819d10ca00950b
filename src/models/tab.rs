//! Browser tabs as the host hands them to us

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ExtensionError, Result};

pub type TabId = i64;

/// A tab as delivered by the host; any field may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    #[serde(default)]
    pub id: Option<TabId>,

    #[serde(default)]
    pub url: Option<String>,
}

/// A tab known to carry both an id and a parseable URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedTab {
    pub id: TabId,
    pub url: Url,
}

impl Tab {
    pub fn new(id: TabId, url: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            url: Some(url.into()),
        }
    }

    /// Fail if the tab lacks an id or a URL. Ids below 1 (`TAB_ID_NONE` is -1)
    /// never name a real tab.
    pub fn check(&self) -> Result<CheckedTab> {
        match (self.id, self.url.as_deref()) {
            (Some(id), Some(url)) if id > 0 && !url.is_empty() => {
                let url = Url::parse(url)?;
                Ok(CheckedTab { id, url })
            }
            _ => Err(ExtensionError::BadTab(format!("{:?}", self))),
        }
    }
}

impl CheckedTab {
    /// Host and non-default port used in the status title, falling back to
    /// the full URL
    pub fn host(&self) -> String {
        match (self.url.host_str(), self.url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => self.url.to_string(),
        }
    }
}
