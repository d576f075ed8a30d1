//! Named UI events the widget reacts to.

use super::mode::MenuOption;

/// Every user interaction the widget's DOM would raise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// Floating toggle button clicked.
    ToggleClicked,
    /// Close button in the window header clicked.
    CloseClicked,
    /// One of the menu buttons clicked.
    OptionClicked(MenuOption),
    /// Text input edited.
    InputChanged(String),
    /// Send button clicked.
    SendClicked,
    /// Key pressed inside the text input.
    InputKeyPress(String),
}

impl WidgetEvent {
    /// Whether this event submits the current input.
    pub fn is_submit(&self) -> bool {
        match self {
            WidgetEvent::SendClicked => true,
            WidgetEvent::InputKeyPress(key) => key == "Enter",
            _ => false,
        }
    }
}
