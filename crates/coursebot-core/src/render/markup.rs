//! HTML-safe string wrapper.

use std::fmt;

use serde::{Deserialize, Serialize};

/// HTML that may be inserted into the page as-is.
///
/// There are exactly two ways in: [`Markup::escape`] for untrusted text and
/// [`Markup::trusted`] for widget copy and formatter output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Markup(String);

impl Markup {
    /// Escapes `&`, `<`, `>`, `"` and `'`.
    pub fn escape(text: &str) -> Self {
        Self(escape_html(text))
    }

    pub fn trusted(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for Markup {
    fn from(html: &'static str) -> Self {
        Self::trusted(html)
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
