//! Header attribute group with sensitive-value filtering.

use std::collections::HashSet;

use axum::http::{HeaderMap, HeaderValue};

use crate::domain::attr::Attr;

/// Key of the header attribute group.
pub const HEADERS_KEY: &str = "headers";

/// Builds the `headers` group from name/values pairs.
///
/// Names are lower-cased. A header is skipped when it has no values, or
/// when it is in `sensitive` and `leak` is false. A single value is logged
/// as-is; several values are bracketed and joined, so `[a, b]` renders as
/// `"[a], [b]"`.
pub fn header_attrs<I, N>(headers: I, leak: bool, sensitive: &HashSet<String>) -> Attr
where
    I: IntoIterator<Item = (N, Vec<String>)>,
    N: AsRef<str>,
{
    let attrs = headers
        .into_iter()
        .filter_map(|(name, values)| {
            let name = name.as_ref().to_ascii_lowercase();

            if !leak && sensitive.contains(&name) {
                return None;
            }

            match values.as_slice() {
                [] => None,
                [single] => Some(Attr::string(name, single.as_str())),
                many => Some(Attr::string(name, format!("[{}]", many.join("], [")))),
            }
        })
        .collect();

    Attr::group(HEADERS_KEY, attrs)
}

/// Builds the `headers` group from an HTTP header map.
///
/// Repeated headers are collected in arrival order.
pub fn redact(headers: &HeaderMap, leak: bool, sensitive: &HashSet<String>) -> Attr {
    let grouped = headers.keys().map(|name| {
        let values = headers.get_all(name).iter().map(value_to_string).collect();
        (name.as_str(), values)
    });

    header_attrs(grouped, leak, sensitive)
}

// Non-visible ASCII is still logged, lossily.
fn value_to_string(value: &HeaderValue) -> String {
    match value.to_str() {
        Ok(s) => s.to_string(),
        Err(_) => String::from_utf8_lossy(value.as_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::options::ALWAYS_SENSITIVE;
    use axum::http::header;

    fn sensitive() -> HashSet<String> {
        ALWAYS_SENSITIVE.iter().map(|s| s.to_string()).collect()
    }

    fn group(attr: &Attr) -> &[Attr] {
        assert_eq!(attr.key, HEADERS_KEY);
        attr.value.as_group().unwrap()
    }

    fn get<'a>(attrs: &'a [Attr], key: &str) -> Option<&'a str> {
        attrs.iter().find(|a| a.key == key).and_then(|a| a.value.as_str())
    }

    #[test]
    fn test_sensitive_headers_omitted() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("secret"));
        headers.insert(header::COOKIE, HeaderValue::from_static("session=1"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));

        let attr = redact(&headers, false, &sensitive());
        let attrs = group(&attr);

        assert_eq!(attrs.len(), 1);
        assert_eq!(get(attrs, "accept"), Some("*/*"));
        assert!(get(attrs, "authorization").is_none());
        assert!(get(attrs, "cookie").is_none());
    }

    #[test]
    fn test_leak_keeps_sensitive_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("secret"));

        let attr = redact(&headers, true, &sensitive());

        assert_eq!(get(group(&attr), "authorization"), Some("secret"));
    }

    #[test]
    fn test_multi_value_rendering() {
        let mut headers = HeaderMap::new();
        headers.append("x", HeaderValue::from_static("a"));
        headers.append("x", HeaderValue::from_static("b"));
        headers.append("x", HeaderValue::from_static("c"));

        let attr = redact(&headers, true, &sensitive());

        assert_eq!(get(group(&attr), "x"), Some("[a], [b], [c]"));
    }

    #[test]
    fn test_names_are_lowercased_and_empty_skipped() {
        let input = vec![
            ("X-Trace".to_string(), vec!["1".to_string()]),
            ("X-Empty".to_string(), vec![]),
            ("Authorization".to_string(), vec!["secret".to_string()]),
        ];

        let attr = header_attrs(input, false, &sensitive());
        let attrs = group(&attr);

        assert_eq!(attrs.len(), 1);
        assert_eq!(get(attrs, "x-trace"), Some("1"));
    }

    #[test]
    fn test_custom_sensitive_set() {
        let mut set = sensitive();
        set.insert("token".to_string());

        let input = vec![
            ("Token", vec!["abc".to_string()]),
            ("Accept", vec!["text/html".to_string()]),
        ];

        let attr = header_attrs(input, false, &set);
        let attrs = group(&attr);

        assert!(get(attrs, "token").is_none());
        assert_eq!(get(attrs, "accept"), Some("text/html"));
    }

    #[test]
    fn test_empty_map_yields_empty_group() {
        let attr = redact(&HeaderMap::new(), false, &sensitive());

        assert!(group(&attr).is_empty());
    }

    #[test]
    fn test_opaque_value_logged_lossily() {
        let mut headers = HeaderMap::new();
        headers.insert("x-bin", HeaderValue::from_bytes(&[0x66, 0xFF]).unwrap());

        let attr = redact(&headers, false, &sensitive());

        assert_eq!(get(group(&attr), "x-bin"), Some("f\u{FFFD}"));
    }
}
