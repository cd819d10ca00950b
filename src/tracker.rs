//! Per-tab cache of found zoomable images
//!
//! Entries are keyed by normalized URL, so repeated tile requests for the same
//! image count once. Keys are parsed and re-serialized for twin lookups; the
//! stored entry keeps the URL exactly as it was requested. Eviction is age-based: an entry survives a navigation only
//! while it is younger than the retention window.

use std::collections::HashMap;

use tracing::debug;
use url::Url;

use crate::models::{TabId, TrackedRequest};
use crate::utils::{scheme_of, scheme_twin, Scheme};

/// Whether an entry stamped `entry_ts` is past `threshold` at time `now`
pub fn is_expired(now: f64, entry_ts: f64, threshold: f64) -> bool {
    now - entry_ts > threshold
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Inserted,
    Updated,
    /// The https twin of this URL is already known
    Skipped,
}

#[derive(Debug, Clone)]
pub struct FoundImages {
    tabs: HashMap<TabId, HashMap<String, TrackedRequest>>,
    retention_ms: f64,
}

impl FoundImages {
    pub fn new(retention_ms: f64) -> Self {
        Self {
            tabs: HashMap::new(),
            retention_ms,
        }
    }

    /// Insert or overwrite the entry for `request.url`, preferring https over http
    pub fn record(&mut self, request: TrackedRequest) -> RecordOutcome {
        let key = canonical_key(&request.url);
        let found = self.tabs.entry(request.tab_id).or_default();

        if let Ok(parsed) = Url::parse(&key) {
            if let Some(twin) = scheme_twin(&parsed) {
                match scheme_of(&parsed) {
                    Scheme::Http if found.contains_key(twin.as_str()) => {
                        return RecordOutcome::Skipped;
                    }
                    Scheme::Https => {
                        found.remove(twin.as_str());
                    }
                    _ => {}
                }
            }
        }

        debug!(tab_id = request.tab_id, url = %request.url, "recording zoomable image");
        match found.insert(key, request) {
            Some(_) => RecordOutcome::Updated,
            None => RecordOutcome::Inserted,
        }
    }

    /// Drop the entries of `tab_id` older than the retention window.
    /// Returns how many were removed.
    pub fn evict(&mut self, tab_id: TabId, now: f64) -> usize {
        let Some(found) = self.tabs.get_mut(&tab_id) else {
            return 0;
        };
        let before = found.len();
        let retention = self.retention_ms;
        found.retain(|_, entry| !is_expired(now, entry.time_stamp, retention));
        let removed = before - found.len();
        if found.is_empty() {
            self.tabs.remove(&tab_id);
        }
        if removed > 0 {
            debug!(tab_id, removed, "evicted stale zoomable images");
        }
        removed
    }

    /// Evict on every tab
    pub fn evict_all(&mut self, now: f64) -> usize {
        let tab_ids: Vec<TabId> = self.tabs.keys().copied().collect();
        tab_ids.into_iter().map(|tab_id| self.evict(tab_id, now)).sum()
    }

    pub fn clear(&mut self, tab_id: TabId) {
        self.tabs.remove(&tab_id);
    }

    pub fn clear_all(&mut self) {
        self.tabs.clear();
    }

    pub fn count(&self, tab_id: TabId) -> usize {
        self.tabs.get(&tab_id).map_or(0, HashMap::len)
    }

    pub fn contains_tab(&self, tab_id: TabId) -> bool {
        self.tabs.contains_key(&tab_id)
    }

    /// Found entries of a tab, oldest first; ties broken by URL
    pub fn entries(&self, tab_id: TabId) -> Vec<&TrackedRequest> {
        let mut entries: Vec<&TrackedRequest> = self
            .tabs
            .get(&tab_id)
            .map(|found| found.values().collect())
            .unwrap_or_default();
        entries.sort_by(|a, b| {
            a.time_stamp
                .total_cmp(&b.time_stamp)
                .then_with(|| a.url.cmp(&b.url))
        });
        entries
    }

    pub fn urls(&self, tab_id: TabId) -> Vec<String> {
        self.entries(tab_id).into_iter().map(|e| e.url.clone()).collect()
    }
}

/// Parsed and re-serialized form of `url`, so http/https twins compare equal
/// once their scheme is swapped. Unparseable URLs are kept verbatim.
fn canonical_key(url: &str) -> String {
    Url::parse(url).map(String::from).unwrap_or_else(|_| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(tab_id: TabId, url: &str, time_stamp: f64) -> TrackedRequest {
        TrackedRequest {
            url: url.to_string(),
            tab_id,
            time_stamp,
        }
    }

    #[test]
    fn test_is_expired_boundary() {
        assert!(!is_expired(2000.0, 1000.0, 1000.0));
        assert!(is_expired(2000.1, 1000.0, 1000.0));
        assert!(!is_expired(1500.0, 1000.0, 1000.0));
    }

    #[test]
    fn test_record_deduplicates() {
        let mut found = FoundImages::new(1000.0);
        assert_eq!(found.record(request(1, "https://a.org/info.json", 10.0)), RecordOutcome::Inserted);
        assert_eq!(found.record(request(1, "https://a.org/info.json", 20.0)), RecordOutcome::Updated);
        assert_eq!(found.count(1), 1);
        // Last write wins
        assert_eq!(found.entries(1)[0].time_stamp, 20.0);
    }

    #[test]
    fn test_tabs_are_separate() {
        let mut found = FoundImages::new(1000.0);
        found.record(request(1, "https://a.org/info.json", 10.0));
        found.record(request(2, "https://a.org/info.json", 10.0));
        found.clear(1);
        assert_eq!(found.count(1), 0);
        assert_eq!(found.count(2), 1);
    }

    #[test]
    fn test_http_skipped_when_https_known() {
        let mut found = FoundImages::new(1000.0);
        found.record(request(1, "https://a.org/info.json", 10.0));
        assert_eq!(found.record(request(1, "http://a.org/info.json", 20.0)), RecordOutcome::Skipped);
        assert_eq!(found.urls(1), vec!["https://a.org/info.json".to_string()]);
    }

    #[test]
    fn test_https_replaces_http() {
        let mut found = FoundImages::new(1000.0);
        found.record(request(1, "http://a.org/info.json", 10.0));
        found.record(request(1, "https://a.org/info.json", 20.0));
        assert_eq!(found.urls(1), vec!["https://a.org/info.json".to_string()]);
    }

    #[test]
    fn test_evict_keeps_young_entries() {
        let mut found = FoundImages::new(1000.0);
        found.record(request(1, "https://a.org/old/info.json", 0.0));
        found.record(request(1, "https://a.org/young/info.json", 1500.0));
        assert_eq!(found.evict(1, 2000.0), 1);
        assert_eq!(found.urls(1), vec!["https://a.org/young/info.json".to_string()]);
    }

    #[test]
    fn test_evict_drops_empty_tab() {
        let mut found = FoundImages::new(1000.0);
        found.record(request(3, "https://a.org/info.json", 0.0));
        assert_eq!(found.evict(3, 5000.0), 1);
        assert!(!found.contains_tab(3));
        assert_eq!(found.evict(3, 5000.0), 0);
    }

    #[test]
    fn test_evict_all_sweeps_every_tab() {
        let mut found = FoundImages::new(1000.0);
        found.record(request(1, "https://a.org/info.json", 0.0));
        found.record(request(2, "https://b.org/info.json", 4500.0));
        assert_eq!(found.evict_all(5000.0), 1);
        assert!(!found.contains_tab(1));
        assert!(found.contains_tab(2));
        assert_eq!(found.count(2), 1);
    }

    #[test]
    fn test_stored_url_kept_verbatim() {
        let mut found = FoundImages::new(1000.0);
        let raw = "https://a.org/iipsrv.fcgi?FIF=/data/a b|c.tif";
        found.record(request(1, raw, 0.0));
        assert_eq!(found.urls(1), vec![raw.to_string()]);
        // The https entry still shadows its http twin
        let http = raw.replace("https:", "http:");
        assert_eq!(found.record(request(1, &http, 1.0)), RecordOutcome::Skipped);
        assert_eq!(found.count(1), 1);
    }

    #[test]
    fn test_entries_ordered_by_time() {
        let mut found = FoundImages::new(1000.0);
        found.record(request(1, "https://b.org/info.json", 5.0));
        found.record(request(1, "https://a.org/info.json", 7.0));
        found.record(request(1, "https://c.org/info.json", 5.0));
        assert_eq!(
            found.urls(1),
            vec![
                "https://b.org/info.json".to_string(),
                "https://c.org/info.json".to_string(),
                "https://a.org/info.json".to_string(),
            ]
        );
    }
}
