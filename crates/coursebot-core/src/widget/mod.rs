//! Chat widget domain module.
//!
//! This module contains the widget's modes, messages, state and the
//! controller that ties them together.
//!
//! # Module Structure
//!
//! - `mode`: Conversation modes and menu options (`ChatMode`, `MenuOption`)
//! - `message`: Transcript entries (`Sender`, `ChatMessage`, `Transcript`)
//! - `state`: Session and view state (`WidgetState`, `ViewState`)
//! - `event`: UI events (`WidgetEvent`)
//! - `controller`: The controller (`ChatWidget`, `PendingRequest`)
//! - `texts`: Fixed bot copy
//!
//! # Usage
//!
//! ```ignore
//! use coursebot_core::widget::{ChatWidget, MenuOption, WidgetEvent};
//! use coursebot_core::transport::SharedSelection;
//!
//! let mut widget = ChatWidget::new();
//! let selection = SharedSelection::default();
//! widget.handle_event(WidgetEvent::ToggleClicked, &selection);
//! let pending = widget.handle_event(WidgetEvent::OptionClicked(MenuOption::SummarizeLesson), &selection);
//! ```

mod controller;
mod event;
mod message;
mod mode;
mod state;
pub mod texts;

// Re-export public API
pub use controller::{ChatWidget, PendingRequest, ReplyHandling};
pub use event::WidgetEvent;
pub use message::{ChatMessage, Sender, Transcript};
pub use mode::{ChatMode, MenuOption};
pub use state::{ViewState, WidgetState};
