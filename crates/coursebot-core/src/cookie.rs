//! Cookie header parsing for the anti-forgery token.

/// Reads the value of cookie `name` from a `name=value; other=value` header.
///
/// The first exact name match wins. Values are percent-decoded; a value that
/// does not decode to UTF-8 is returned raw.
pub fn read_cookie(cookie_header: &str, name: &str) -> Option<String> {
    if cookie_header.is_empty() || name.is_empty() {
        return None;
    }

    cookie_header
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
        .map(|raw| match urlencoding::decode(raw) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => raw.to_string(),
        })
}
