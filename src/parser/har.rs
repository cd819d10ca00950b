//! HAR capture parsing, to replay a recorded page load offline
//!
//! Entries are replayed in file order, one millisecond apart. Entries whose
//! resource type falls outside the request filter are dropped.

use crate::models::{ObservedRequest, ResourceType, TabId};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct Har {
    log: HarLog,
}

#[derive(Debug, Deserialize)]
struct HarLog {
    #[serde(default)]
    pages: Vec<HarPage>,
    entries: Vec<HarEntry>,
}

#[derive(Debug, Deserialize)]
struct HarPage {
    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
struct HarEntry {
    request: HarRequest,
    #[serde(rename = "_resourceType", default)]
    resource_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HarRequest {
    url: String,
}

/// Requests of one recorded page load
#[derive(Debug, Clone)]
pub struct HarCapture {
    /// Page the capture was taken on, when the HAR names it
    pub page_url: Option<String>,
    pub requests: Vec<ObservedRequest>,
}

/// Map a devtools resource type onto the request filter.
/// `Err(())` marks a type the filter excludes.
fn devtools_resource_type(name: &str) -> std::result::Result<ResourceType, ()> {
    match name {
        "document" => Ok(ResourceType::MainFrame),
        "image" => Ok(ResourceType::Image),
        "script" => Ok(ResourceType::Script),
        "xhr" | "fetch" => Ok(ResourceType::Xmlhttprequest),
        "other" => Ok(ResourceType::Other),
        other => ResourceType::from_name(other).ok_or(()),
    }
}

pub fn parse_har(content: &str, tab_id: TabId) -> Result<HarCapture> {
    let har: Har = serde_json::from_str(content).context("Failed to parse HAR capture")?;

    let mut requests = Vec::new();
    for entry in har.log.entries {
        let resource_type = match entry.resource_type.as_deref().map(devtools_resource_type) {
            Some(Ok(resource_type)) => Some(resource_type),
            Some(Err(())) => continue,
            None => None,
        };
        let time_stamp = requests.len() as f64;
        let mut request = ObservedRequest::new(tab_id, entry.request.url, time_stamp);
        request.resource_type = resource_type;
        requests.push(request);
    }

    let page_url = har
        .log
        .pages
        .first()
        .map(|page| page.title.clone())
        .filter(|title| title.contains("://"))
        .or_else(|| {
            requests
                .iter()
                .find(|r| r.resource_type == Some(ResourceType::MainFrame))
                .map(|r| r.url.clone())
        });

    Ok(HarCapture { page_url, requests })
}

pub fn parse_har_from_file(path: impl AsRef<Path>, tab_id: TabId) -> Result<HarCapture> {
    let content = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read HAR file {}", path.as_ref().display()))?;
    parse_har(&content, tab_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CAPTURE: &str = r#"{
        "log": {
            "version": "1.2",
            "pages": [{ "id": "page_1", "title": "https://museum.example/object/42" }],
            "entries": [
                { "request": { "method": "GET", "url": "https://museum.example/object/42" }, "_resourceType": "document" },
                { "request": { "method": "GET", "url": "https://museum.example/style.css" }, "_resourceType": "stylesheet" },
                { "request": { "method": "GET", "url": "https://museum.example/iiif/42/full/256,/0/default.jpg" }, "_resourceType": "image" },
                { "request": { "method": "GET", "url": "https://museum.example/api.json" } }
            ]
        }
    }"#;

    #[test]
    fn test_parse_capture() {
        let capture = parse_har(CAPTURE, 9).unwrap();
        assert_eq!(capture.page_url.as_deref(), Some("https://museum.example/object/42"));
        // The stylesheet is outside the request filter
        assert_eq!(capture.requests.len(), 3);
        assert_eq!(capture.requests[1].resource_type, Some(ResourceType::Image));
        assert_eq!(capture.requests[2].resource_type, None);
        assert_eq!(capture.requests[2].time_stamp, 2.0);
        assert!(capture.requests.iter().all(|r| r.tab_id == 9));
    }

    #[test]
    fn test_page_url_falls_back_to_document() {
        let har = r#"{ "log": { "entries": [
            { "request": { "url": "https://a.example/" }, "_resourceType": "document" }
        ] } }"#;
        let capture = parse_har(har, 1).unwrap();
        assert_eq!(capture.page_url.as_deref(), Some("https://a.example/"));
    }

    #[test]
    fn test_parse_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CAPTURE.as_bytes()).unwrap();
        let capture = parse_har_from_file(file.path(), 1).unwrap();
        assert_eq!(capture.requests.len(), 3);
    }

    #[test]
    fn test_not_a_har() {
        assert!(parse_har(r#"{ "entries": [] }"#, 1).is_err());
    }
}
