//! Next-page cursor extraction
//!
//! List responses point at the next page with a full URL. The only part the
//! pager needs is one query parameter of that URL.

use url::Url;

// Only used to resolve server-relative locators such as `/objects?offset=10`.
const RELATIVE_BASE: &str = "http://localhost/";

/// Extract the value of `param_name` from the query string of `next_url`.
///
/// Accepts absolute URLs and server-relative URLs. Returns `None` when the URL
/// cannot be parsed, the parameter is absent, or its value is empty. All other
/// query parameters are ignored.
pub fn extract_cursor_param(next_url: &str, param_name: &str) -> Option<String> {
    let next_url = next_url.trim();
    if next_url.is_empty() {
        return None;
    }

    let url = match Url::parse(next_url) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(RELATIVE_BASE).ok()?.join(next_url).ok()?
        }
        Err(_) => return None,
    };

    url.query_pairs()
        .find(|(key, _)| key == param_name)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("https://cm.example.com/api/v1-beta/objects?offset=20&limit=10", "offset", Some("20"); "absolute offset")]
    #[test_case("/api/v1-beta/catalogs/abc/audits?limit=50&start=tok123", "start", Some("tok123"); "relative start")]
    #[test_case("objects?offset=5", "offset", Some("5"); "relative without slash")]
    #[test_case("https://cm.example.com/objects?start=a%2Fb%3D%3D", "start", Some("a/b=="); "percent decoded")]
    #[test_case("https://cm.example.com/objects?limit=10", "offset", None; "parameter missing")]
    #[test_case("https://cm.example.com/objects?offset=", "offset", None; "empty value")]
    #[test_case("https://cm.example.com/objects?offsets=3&xoffset=4", "offset", None; "similar names ignored")]
    #[test_case("", "start", None; "empty locator")]
    #[test_case("http://[::1", "start", None; "unparseable url")]
    fn test_extract_cursor_param(url: &str, param: &str, expected: Option<&str>) {
        assert_eq!(
            extract_cursor_param(url, param),
            expected.map(str::to_string)
        );
    }

    #[test]
    fn test_extract_cursor_param_first_occurrence_wins() {
        let url = "https://cm.example.com/objects?start=first&start=second";
        assert_eq!(extract_cursor_param(url, "start"), Some("first".to_string()));
    }
}
