//! Options parsing; missing fields take their default value

use crate::config::Options;
use anyhow::{Context, Result};
use std::path::Path;

pub fn parse_options(content: &str) -> Result<Options> {
    let options: Options = json5::from_str(content)
        .context("Failed to parse options")?;
    if options.viewer_url.is_empty() {
        anyhow::bail!("viewer_url must not be empty");
    }
    Ok(options)
}

pub fn parse_options_from_file(path: impl AsRef<Path>) -> Result<Options> {
    let content = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read options file {}", path.as_ref().display()))?;
    parse_options(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        assert_eq!(parse_options("{}").unwrap(), Options::default());
    }

    #[test]
    fn test_partial_override() {
        let options = parse_options(
            r#"{
                // keep found images a little longer
                retention_ms: 2500,
                reload_on_activate: false,
            }"#,
        )
        .unwrap();
        assert_eq!(options.retention_ms, 2500);
        assert!(!options.reload_on_activate);
        assert!(options.same_site_only);
    }

    #[test]
    fn test_empty_viewer_rejected() {
        assert!(parse_options(r#"{ "viewer_url": "" }"#).is_err());
    }
}
