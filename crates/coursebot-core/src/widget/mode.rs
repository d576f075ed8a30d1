//! Conversation modes and the menu options that select them.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::texts;
use crate::transport::EndpointKind;

/// The widget's current conversational context.
///
/// The mode decides which endpoint a submitted message goes to, the payload
/// shape, and how the reply is rendered. Wire names match the ones the
/// server-side templates use (`q_a`, `submit_feedback`, ...).
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChatMode {
    /// No option chosen yet.
    #[default]
    General,
    /// Free-form questions about the lesson.
    #[serde(rename = "q_a")]
    #[strum(to_string = "q_a")]
    QuestionAnswer,
    /// One-shot lesson summary.
    SummarizeLesson,
    /// Course feedback, routed to the assistance endpoint.
    SubmitFeedback,
    /// Help request, routed like a normal chat message.
    RequestAssistance,
}

impl ChatMode {
    /// Endpoint that a message submitted in this mode is posted to.
    pub fn submit_endpoint(&self) -> EndpointKind {
        match self {
            ChatMode::SubmitFeedback => EndpointKind::Assistance,
            _ => EndpointKind::Chat,
        }
    }
}

/// One of the four buttons in the option menu.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum MenuOption {
    #[strum(to_string = "Q&A")]
    QuestionAnswer,
    #[strum(to_string = "Summarize Lesson")]
    SummarizeLesson,
    #[strum(to_string = "Submit Feedback")]
    SubmitFeedback,
    #[strum(to_string = "Request Assistance")]
    RequestAssistance,
}

impl MenuOption {
    /// Mode entered when this option is selected.
    pub fn mode(&self) -> ChatMode {
        match self {
            MenuOption::QuestionAnswer => ChatMode::QuestionAnswer,
            MenuOption::SummarizeLesson => ChatMode::SummarizeLesson,
            MenuOption::SubmitFeedback => ChatMode::SubmitFeedback,
            MenuOption::RequestAssistance => ChatMode::RequestAssistance,
        }
    }

    /// Bot prompt appended right after the option is chosen.
    pub fn prompt(&self) -> &'static str {
        match self {
            MenuOption::QuestionAnswer => texts::QA_PROMPT,
            MenuOption::SummarizeLesson => texts::SUMMARIZE_PENDING,
            MenuOption::SubmitFeedback => texts::FEEDBACK_PROMPT,
            MenuOption::RequestAssistance => texts::ASSISTANCE_PROMPT,
        }
    }

    /// Fixed DOM id of the option button.
    pub fn element_id(&self) -> &'static str {
        match self {
            MenuOption::QuestionAnswer => "qa-option",
            MenuOption::SummarizeLesson => "summarize-option",
            MenuOption::SubmitFeedback => "feedback-option",
            MenuOption::RequestAssistance => "assistance-option",
        }
    }

    /// Background class of the option button.
    pub fn button_class(&self) -> &'static str {
        match self {
            MenuOption::QuestionAnswer => "bg-blue-500",
            MenuOption::SummarizeLesson => "bg-green-500",
            MenuOption::SubmitFeedback => "bg-yellow-500",
            MenuOption::RequestAssistance => "bg-red-500",
        }
    }
}
