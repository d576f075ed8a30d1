//! Session and view state for a single widget instance.

use serde::{Deserialize, Serialize};

use super::mode::ChatMode;

/// Conversational state of one open widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetState {
    /// Whether the chat window is showing.
    pub is_open: bool,
    /// True until the user picks a menu option.
    pub is_first_interaction: bool,
    /// Current mode; only changed by option selection.
    pub current_mode: ChatMode,
    /// Whether the welcome messages were already appended.
    pub welcomed: bool,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            is_open: false,
            is_first_interaction: true,
            current_mode: ChatMode::General,
            welcomed: false,
        }
    }
}

/// Visibility of the widget's panels plus the input field contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub options_visible: bool,
    pub input_visible: bool,
    /// Current value of the text input.
    pub input_value: String,
    /// Number of transcript entries scrolled past; equals the transcript
    /// length whenever the view is pinned to the end.
    pub scrolled_to: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            options_visible: true,
            input_visible: false,
            input_value: String::new(),
            scrolled_to: 0,
        }
    }
}

impl ViewState {
    /// Options hidden, input shown.
    pub fn show_input(&mut self) {
        self.options_visible = false;
        self.input_visible = true;
    }

    /// Options shown, input hidden.
    pub fn show_options(&mut self) {
        self.options_visible = true;
        self.input_visible = false;
    }
}
