//! Bullet-text to HTML formatter used for summaries and general replies.

use super::Markup;
use crate::widget::texts::SUMMARY_HEADER;

/// Turns a bulleted plain-text summary into trusted HTML.
///
/// Line rules, applied to each trimmed, non-empty line:
/// - `•` main points are bolded whole
/// - `-` sub-points pass through
/// - `key: value` lines bold the key (up to the first colon)
/// - anything else passes through
///
/// Every emitted line ends with `<br>`; the fixed header comes first.
pub fn format_summary(text: &str) -> Markup {
    let mut html = String::from(SUMMARY_HEADER);

    for line in text.split('\n').map(str::trim).filter(|l| !l.is_empty()) {
        if line.starts_with('•') {
            html.push_str(&format!("<strong>{}</strong><br>", line));
        } else if line.starts_with('-') {
            html.push_str(&format!("{}<br>", line));
        } else if let Some((key, value)) = line.split_once(':') {
            html.push_str(&format!(
                "<strong>{}:</strong> {}<br>",
                key.trim(),
                value.trim()
            ));
        } else {
            html.push_str(&format!("{}<br>", line));
        }
    }

    Markup::trusted(html)
}
