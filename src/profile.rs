//! Profile URL handling
//!
//! Profile URLs are the primary uniqueness key for imported people, so the
//! same profile must canonicalize to the same string no matter which export
//! it came from (tracking query params, trailing slashes and host casing all
//! vary between LinkedIn exports).

use url::Url;

/// Canonicalize a profile URL for use as a uniqueness key
///
/// Returns `None` for anything that is not a plain http(s) URL with a host;
/// callers fall back to the name+company key in that case. Query string and
/// fragment are dropped, the trailing slash is trimmed, and the host is
/// lowercased by the parser.
pub fn canonical_profile_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let mut url = Url::parse(raw).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    url.host_str()?;

    url.set_query(None);
    url.set_fragment(None);

    Some(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_basic() {
        assert_eq!(
            canonical_profile_url("https://www.linkedin.com/in/mickey-mouse").unwrap(),
            "https://www.linkedin.com/in/mickey-mouse"
        );
    }

    #[test]
    fn test_canonical_trailing_slash() {
        assert_eq!(
            canonical_profile_url("https://www.linkedin.com/in/mickey-mouse/").unwrap(),
            "https://www.linkedin.com/in/mickey-mouse"
        );
    }

    #[test]
    fn test_canonical_drops_query_and_fragment() {
        assert_eq!(
            canonical_profile_url(
                "https://www.linkedin.com/in/mickey-mouse?miniProfileUrn=abc#section"
            )
            .unwrap(),
            "https://www.linkedin.com/in/mickey-mouse"
        );
    }

    #[test]
    fn test_canonical_host_case() {
        assert_eq!(
            canonical_profile_url("https://WWW.LinkedIn.com/in/mickey-mouse").unwrap(),
            "https://www.linkedin.com/in/mickey-mouse"
        );
    }

    #[test]
    fn test_canonical_rejects_non_http() {
        assert!(canonical_profile_url("ftp://example.com/profile").is_none());
        assert!(canonical_profile_url("mailto:someone@example.com").is_none());
    }

    #[test]
    fn test_canonical_rejects_garbage() {
        assert!(canonical_profile_url("").is_none());
        assert!(canonical_profile_url("not a url").is_none());
    }
}
