use url::form_urlencoded::byte_serialize;

/// Percent-encodes `s` as a single query component (space becomes `+`).
pub fn encode_component(s: &str) -> String {
    byte_serialize(s.as_bytes()).collect()
}

/// `base + "/" + href`, verbatim. An `href` that already starts with `/`
/// yields a doubled slash; the tracker never emits one.
pub fn join_url(base: &str, href: &str) -> String {
    let mut url = String::with_capacity(base.len() + href.len() + 1);
    url.push_str(base);
    url.push('/');
    url.push_str(href);
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_reserved_characters() {
        assert_eq!(
            encode_component("https://a.b/snatchlist.php?u=1&type=hnr"),
            "https%3A%2F%2Fa.b%2Fsnatchlist.php%3Fu%3D1%26type%3Dhnr"
        );
        assert_eq!(encode_component("a b"), "a+b");
        assert_eq!(encode_component("מחק"), "%D7%9E%D7%97%D7%A7");
    }

    #[test]
    fn join_keeps_href_verbatim() {
        assert_eq!(join_url("https://t.test", "details.php?id=3"), "https://t.test/details.php?id=3");
        assert_eq!(join_url("https://t.test", "/details.php"), "https://t.test//details.php");
    }
}
