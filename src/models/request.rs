//! Network requests observed on a tab

use serde::{Deserialize, Serialize};

use super::TabId;

/// A request event as reported by the host's request interception
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservedRequest {
    pub url: String,
    pub tab_id: TabId,
    /// Milliseconds since the epoch
    pub time_stamp: f64,

    /// URL of the document that issued the request, when the host knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,
}

/// A zoomable image request kept in the per-tab cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedRequest {
    pub url: String,
    pub tab_id: TabId,
    pub time_stamp: f64,
}

/// Resource types worth intercepting. Stylesheets, fonts and media never
/// point at a tile server descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    MainFrame,
    Image,
    Object,
    ObjectSubrequest,
    SubFrame,
    Xmlhttprequest,
    Script,
    Other,
}

impl ResourceType {
    pub const ALL: [ResourceType; 8] = [
        ResourceType::MainFrame,
        ResourceType::Image,
        ResourceType::Object,
        ResourceType::ObjectSubrequest,
        ResourceType::SubFrame,
        ResourceType::Xmlhttprequest,
        ResourceType::Script,
        ResourceType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::MainFrame => "main_frame",
            ResourceType::Image => "image",
            ResourceType::Object => "object",
            ResourceType::ObjectSubrequest => "object_subrequest",
            ResourceType::SubFrame => "sub_frame",
            ResourceType::Xmlhttprequest => "xmlhttprequest",
            ResourceType::Script => "script",
            ResourceType::Other => "other",
        }
    }

    /// Parse a host resource type name; types outside the filter give `None`
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == name)
    }
}

impl ObservedRequest {
    pub fn new(tab_id: TabId, url: impl Into<String>, time_stamp: f64) -> Self {
        Self {
            url: url.into(),
            tab_id,
            time_stamp,
            document_url: None,
            resource_type: None,
        }
    }

    pub fn with_document_url(mut self, document_url: impl Into<String>) -> Self {
        self.document_url = Some(document_url.into());
        self
    }

    pub fn with_resource_type(mut self, resource_type: ResourceType) -> Self {
        self.resource_type = Some(resource_type);
        self
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_type_names() {
        assert_eq!(ResourceType::from_name("xmlhttprequest"), Some(ResourceType::Xmlhttprequest));
        assert_eq!(ResourceType::from_name("main_frame"), Some(ResourceType::MainFrame));
        assert_eq!(ResourceType::from_name("stylesheet"), None);
    }

    #[test]
    fn test_resource_type_serde() {
        let json = serde_json::to_string(&ResourceType::ObjectSubrequest).unwrap();
        assert_eq!(json, "\"object_subrequest\"");
    }
}
