//! Turns widget markup into terminal text.

use std::sync::LazyLock;

use colored::Colorize;
use regex::{Captures, Regex};

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid line break pattern"));
static STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<strong>(.*?)</strong>").expect("valid strong pattern"));
static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));

/// Renders message markup for a terminal.
///
/// `<br>` becomes a newline, `<strong>` becomes bold, other tags are dropped
/// and named or numeric entities are decoded.
pub fn markup_to_terminal(markup: &str) -> String {
    let text = LINE_BREAK.replace_all(markup, "\n");
    let text = STRONG.replace_all(&text, |caps: &Captures| caps[1].bold().to_string());
    let text = ANY_TAG.replace_all(&text, "");
    html_escape::decode_html_entities(&text).into_owned()
}
