//! Helper utilities

pub mod url;

pub use self::url::{same_site, scheme_of, scheme_twin, Scheme};
