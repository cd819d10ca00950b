//! Rewrite rules turning tile requests into their metadata descriptor URL

use lazy_static::lazy_static;
use regex::Regex;

use super::patterns::IIIF_IMAGE_PATH;

/// Ordered (pattern, replacement) pairs. Every rule runs, in order, on the
/// output of the previous one, and rewrites its first match only.
pub static REWRITE_TABLE: &[(&str, &str)] = &[
    // Deep Zoom descriptor -> first tile, which the viewer knows how to resolve
    (r"\.dzi(?:\?.*)?$", "_files/0/0_0.jpg"),
    (r"_files/\d+/\d+_\d+\.jpg(?:\?.*)?$", "_files/0/0_0.jpg"),
    // Zoomify
    (r"/TileGroup\d+/\d+-\d+-\d+.jpg(?:\?.*)?$", "/ImageProperties.xml"),
    (r"/ImageProperties\.xml\?t\w+$", "/ImageProperties.xml"),
    // IIPImage
    (r"(\?FIF=[^&]*)&.*", "${1}"),
    // Google Arts & Culture
    (r"(http.*artsandculture\.google\.com/asset/.+/.+)\?.*", "${1}"),
    // IIIF
    (IIIF_IMAGE_PATH, "/info.json"),
    (r"getTilesInfo\?object_id=(.*)&callback.*", "getTilesInfo?object_id=${1}"),
];

#[derive(Debug)]
pub struct RewriteRule {
    pub pattern: Regex,
    pub replacement: &'static str,
}

lazy_static! {
    static ref REWRITE_RULES: Vec<RewriteRule> = REWRITE_TABLE
        .iter()
        .map(|&(pattern, replacement)| RewriteRule {
            pattern: Regex::new(pattern).unwrap(),
            replacement,
        })
        .collect();
}

/// Compiled rewrite rules, in application order
pub fn rewrite_rules() -> &'static [RewriteRule] {
    &REWRITE_RULES
}

/// Normalize a request URL into the descriptor URL of the image it belongs to
pub fn normalize(url: &str) -> String {
    rewrite_rules().iter().fold(url.to_string(), |url, rule| {
        rule.pattern.replace(&url, rule.replacement).into_owned()
    })
}
