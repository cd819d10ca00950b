//! URL helpers: origins and http/https twins

use url::Url;

use crate::error::Result;

/// Whether two URLs share the same origin (scheme, host and port)
pub fn same_site(url1: &str, url2: &str) -> Result<bool> {
    let origin1 = Url::parse(url1)?.origin();
    let origin2 = Url::parse(url2)?.origin();
    Ok(origin1 == origin2)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
    Other,
}

pub fn scheme_of(url: &Url) -> Scheme {
    match url.scheme() {
        "http" => Scheme::Http,
        "https" => Scheme::Https,
        _ => Scheme::Other,
    }
}

/// The same URL with http and https swapped; `None` for any other scheme
pub fn scheme_twin(url: &Url) -> Option<Url> {
    let twin_scheme = match scheme_of(url) {
        Scheme::Http => "https",
        Scheme::Https => "http",
        Scheme::Other => return None,
    };
    let mut twin = url.clone();
    twin.set_scheme(twin_scheme).ok()?;
    Some(twin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_site() {
        assert!(same_site("https://example.com/a", "https://example.com/b?c").unwrap());
        assert!(!same_site("https://example.com/a", "http://example.com/a").unwrap());
        assert!(!same_site("https://example.com", "https://cdn.example.com").unwrap());
        assert!(!same_site("https://example.com", "https://example.com:8443").unwrap());
    }

    #[test]
    fn test_same_site_bad_url() {
        assert!(same_site("nonsense", "https://example.com").is_err());
    }

    #[test]
    fn test_scheme_twin() {
        let http = Url::parse("http://example.com/info.json").unwrap();
        let twin = scheme_twin(&http).unwrap();
        assert_eq!(twin.as_str(), "https://example.com/info.json");
        assert_eq!(scheme_twin(&twin).unwrap(), http);

        let data = Url::parse("data:text/plain,hello").unwrap();
        assert_eq!(scheme_twin(&data), None);
    }
}
