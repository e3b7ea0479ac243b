use url::Url;

/// Returns the host component of a URL, used as the fallback display name
/// for feeds whose title the validator could not improve on.
pub fn host_component(raw: &str) -> Option<String> {
    Url::parse(raw)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
}

/// Validates a URL before handing it to the system browser opener.
///
/// Only http/https links are allowed; article links come straight from
/// remote feed XML and must not be able to smuggle other schemes into
/// `open::that`.
pub fn validate_url_for_open(raw: &str) -> Result<(), String> {
    match Url::parse(raw) {
        Ok(u) if matches!(u.scheme(), "http" | "https") => Ok(()),
        Ok(u) => Err(format!("Refusing to open {} link", u.scheme())),
        Err(_) => Err("Article has no valid link".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_of_https_url() {
        assert_eq!(
            host_component("https://news.ycombinator.com/rss"),
            Some("news.ycombinator.com".to_string())
        );
    }

    #[test]
    fn host_of_garbage_is_none() {
        assert_eq!(host_component("not a url"), None);
    }

    #[test]
    fn open_allows_http_and_https() {
        assert!(validate_url_for_open("https://example.com/post/1").is_ok());
        assert!(validate_url_for_open("http://example.com").is_ok());
    }

    #[test]
    fn open_rejects_other_schemes() {
        assert!(validate_url_for_open("file:///etc/passwd").is_err());
        assert!(validate_url_for_open("javascript:alert(1)").is_err());
        assert!(validate_url_for_open("No Link").is_err());
    }
}
