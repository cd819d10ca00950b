//! Parsing modules for the manifest, options and HAR captures

pub mod manifest;
pub mod options;
pub mod har;

pub use manifest::parse_manifest;
pub use options::parse_options;
pub use har::{parse_har, HarCapture};
