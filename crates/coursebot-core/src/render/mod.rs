//! HTML rendering: escaping, the summary formatter and the widget templates.

mod markup;
mod summary;
mod templates;

pub use markup::{Markup, escape_html};
pub use summary::format_summary;
pub use templates::{WidgetRenderer, element_ids};
