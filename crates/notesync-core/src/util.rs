//! Text helpers shared by config, transport and error normalization.

/// Longest excerpt of a response body that ends up in a log line.
pub const LOG_EXCERPT_CHARS: usize = 180;

/// Trimmed text, or `None` when it is missing or blank.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// First candidate that is present and not blank, trimmed.
pub fn first_non_blank<I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    candidates.into_iter().find_map(non_blank)
}

/// `true` for `http://host...` and `https://host...`, scheme case-insensitive.
pub fn has_http_scheme(url: &str) -> bool {
    url.split_once("://").is_some_and(|(scheme, rest)| {
        (scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https"))
            && !rest.is_empty()
    })
}

/// Single-line prefix of a response body for debug logs.
pub fn log_excerpt(body: &str) -> String {
    body.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(LOG_EXCERPT_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_blank_trims_and_drops_whitespace() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some(" \n ".to_string())), None);
        assert_eq!(
            non_blank(Some(" Note not found ".to_string())),
            Some("Note not found".to_string())
        );
    }

    #[test]
    fn first_non_blank_skips_empty_candidates() {
        let picked = first_non_blank([None, Some("  ".to_string()), Some("b".to_string())]);
        assert_eq!(picked, Some("b".to_string()));
        assert_eq!(first_non_blank([None, Some(String::new())]), None);
    }

    #[test]
    fn http_scheme_requires_host() {
        assert!(has_http_scheme("http://localhost:8080/api"));
        assert!(has_http_scheme("HTTPS://notes.example.com"));
        assert!(!has_http_scheme("http://"));
        assert!(!has_http_scheme("ftp://notes.example.com"));
        assert!(!has_http_scheme("notes.example.com"));
    }

    #[test]
    fn log_excerpt_is_single_line_and_bounded() {
        assert_eq!(log_excerpt("{\n  \"message\": \"x\"\n}"), "{ \"message\": \"x\" }");
        assert_eq!(log_excerpt(&"x".repeat(500)).len(), LOG_EXCERPT_CHARS);
    }
}
