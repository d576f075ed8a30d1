//! The chat widget controller.
//!
//! All state transitions happen here, synchronously. Anything that needs the
//! network comes back to the caller as a [`PendingRequest`]; the caller sends
//! it and hands the outcome to [`ChatWidget::complete`].

use serde::{Deserialize, Serialize};

use super::event::WidgetEvent;
use super::message::{ChatMessage, Transcript};
use super::mode::{ChatMode, MenuOption};
use super::state::{ViewState, WidgetState};
use super::texts;
use crate::error::{ChatbotError, Result};
use crate::render::{Markup, format_summary};
use crate::transport::{ChatRequest, EndpointKind, ServerReply, TranscriptSource};

/// How a reply is turned into a bot message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplyHandling {
    /// `summary` field through the bullet formatter.
    Summary,
    /// `response` field through the bullet formatter.
    Formatted,
    /// `response` field inserted unchanged.
    Verbatim,
    /// Fixed thank-you once the server accepts the feedback.
    FeedbackConfirmation,
}

impl ReplyHandling {
    fn render(self, reply: ServerReply) -> Result<Markup> {
        match self {
            ReplyHandling::Summary => reply
                .summary
                .map(|summary| format_summary(&summary))
                .ok_or_else(|| missing_field("summary")),
            ReplyHandling::Formatted => reply
                .response
                .map(|response| format_summary(&response))
                .ok_or_else(|| missing_field("response")),
            ReplyHandling::Verbatim => reply
                .response
                .map(Markup::trusted)
                .ok_or_else(|| missing_field("response")),
            ReplyHandling::FeedbackConfirmation => Ok(Markup::from(texts::FEEDBACK_THANKS)),
        }
    }

    fn apology(self) -> &'static str {
        match self {
            ReplyHandling::Summary => texts::SUMMARIZE_APOLOGY,
            _ => texts::GENERIC_APOLOGY,
        }
    }
}

fn missing_field(field: &str) -> ChatbotError {
    ChatbotError::Serialization {
        format: "JSON".to_string(),
        message: format!("reply has no `{}` field", field),
    }
}

/// A request the controller wants sent, plus what to do with its reply.
///
/// The mode is captured at dispatch so a reply is rendered the way its
/// request intended even if the user switched modes in the meantime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRequest {
    pub request: ChatRequest,
    pub mode: ChatMode,
    pub handling: ReplyHandling,
}

impl PendingRequest {
    fn new(request: ChatRequest, mode: ChatMode) -> Self {
        let handling = match request.endpoint() {
            EndpointKind::Summarize => ReplyHandling::Summary,
            EndpointKind::Assistance => ReplyHandling::FeedbackConfirmation,
            EndpointKind::Chat if mode == ChatMode::QuestionAnswer => ReplyHandling::Verbatim,
            EndpointKind::Chat => ReplyHandling::Formatted,
        };
        Self {
            request,
            mode,
            handling,
        }
    }

    pub fn endpoint(&self) -> EndpointKind {
        self.request.endpoint()
    }
}

/// Headless controller for one widget instance.
#[derive(Debug, Clone, Default)]
pub struct ChatWidget {
    state: WidgetState,
    view: ViewState,
    transcript: Transcript,
}

impl ChatWidget {
    /// Creates a closed widget with an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn current_mode(&self) -> ChatMode {
        self.state.current_mode
    }

    /// Dispatches a UI event to the matching operation.
    pub fn handle_event(
        &mut self,
        event: WidgetEvent,
        source: &dyn TranscriptSource,
    ) -> Option<PendingRequest> {
        match event {
            WidgetEvent::ToggleClicked => {
                self.toggle_open();
                None
            }
            WidgetEvent::CloseClicked => {
                self.close();
                None
            }
            WidgetEvent::OptionClicked(option) => self.select_option(option, source),
            WidgetEvent::InputChanged(value) => {
                self.view.input_value = value;
                None
            }
            event if event.is_submit() => self.submit_input(source),
            WidgetEvent::SendClicked | WidgetEvent::InputKeyPress(_) => None,
        }
    }

    /// Flips window visibility.
    ///
    /// Until an option has been chosen the menu is shown instead of the input
    /// row, and the first opening appends the two welcome messages.
    pub fn toggle_open(&mut self) {
        self.state.is_open = !self.state.is_open;

        if self.state.is_first_interaction {
            self.view.show_options();
            if self.state.is_open && !self.state.welcomed {
                self.state.welcomed = true;
                self.append_message(ChatMessage::bot(texts::WELCOME));
                self.append_message(ChatMessage::bot(texts::MENU_OVERVIEW));
            }
        } else {
            self.view.show_input();
        }

        tracing::debug!(is_open = self.state.is_open, "Widget toggled");
    }

    /// Hides the window. Mode, transcript and panels are kept.
    pub fn close(&mut self) {
        self.state.is_open = false;
        tracing::debug!("Widget closed");
    }

    /// Enters the option's mode and appends its prompt.
    ///
    /// Summarize Lesson starts the summary flow at once and returns its request.
    pub fn select_option(
        &mut self,
        option: MenuOption,
        source: &dyn TranscriptSource,
    ) -> Option<PendingRequest> {
        tracing::debug!(option = %option, "Handling option");
        self.state.is_first_interaction = false;
        self.state.current_mode = option.mode();
        self.view.show_input();

        match option {
            MenuOption::SummarizeLesson => Some(self.summarize(source)),
            _ => {
                self.append_message(ChatMessage::bot(option.prompt()));
                None
            }
        }
    }

    /// Replaces the input field contents.
    pub fn set_input(&mut self, value: impl Into<String>) {
        self.view.input_value = value.into();
    }

    /// Submits whatever is currently in the input field.
    pub fn submit_input(&mut self, source: &dyn TranscriptSource) -> Option<PendingRequest> {
        let text = std::mem::take(&mut self.view.input_value);
        let pending = self.submit(&text, source);
        if pending.is_none() {
            // Whitespace-only input is left where it was.
            self.view.input_value = text;
        }
        pending
    }

    /// Appends the user's message and builds the request for the current mode.
    ///
    /// Returns `None` without touching anything when `text` is blank.
    pub fn submit(&mut self, text: &str, source: &dyn TranscriptSource) -> Option<PendingRequest> {
        let message = text.trim();
        if message.is_empty() {
            return None;
        }

        self.append_message(ChatMessage::user(message));
        self.view.input_value.clear();

        let mode = self.state.current_mode;
        let request = match mode.submit_endpoint() {
            EndpointKind::Assistance => ChatRequest::Assistance {
                message: message.to_string(),
            },
            _ => ChatRequest::Chat {
                message: message.to_string(),
                transcript_name: source.selected_transcript().unwrap_or_default(),
            },
        };

        tracing::debug!(mode = %mode, endpoint = ?request.endpoint(), "Message submitted");
        Some(PendingRequest::new(request, mode))
    }

    /// Appends the waiting message and builds the summary request.
    pub fn summarize(&mut self, source: &dyn TranscriptSource) -> PendingRequest {
        self.append_message(ChatMessage::bot(MenuOption::SummarizeLesson.prompt()));
        let request = ChatRequest::Summarize {
            transcript_name: source.selected_transcript().unwrap_or_default(),
        };
        PendingRequest::new(request, self.state.current_mode)
    }

    /// Applies the outcome of a sent request.
    ///
    /// Exactly one bot message is appended: the rendered reply, or the fixed
    /// apology when the transport failed or the server returned `error`.
    /// The widget is left idle with the input row showing. The failure, if
    /// any, is handed back for callers that report it beyond the transcript.
    pub fn complete(&mut self, pending: &PendingRequest, outcome: Result<ServerReply>) -> Result<()> {
        let rendered = outcome
            .and_then(ServerReply::into_result)
            .and_then(|reply| pending.handling.render(reply));

        let (content, result) = match rendered {
            Ok(markup) => (markup, Ok(())),
            Err(err) => {
                tracing::warn!(
                    endpoint = ?pending.endpoint(),
                    mode = %pending.mode,
                    error = %err,
                    "Request failed"
                );
                (Markup::trusted(pending.handling.apology()), Err(err))
            }
        };

        self.append_message(ChatMessage::bot(content));
        self.view.show_input();
        result
    }

    pub fn append_message(&mut self, message: ChatMessage) {
        self.view.scrolled_to = self.transcript.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::SharedSelection;
    use crate::widget::message::Sender;
    use serde_json::json;

    fn selection(name: &str) -> SharedSelection {
        SharedSelection::new(Some(name.to_string()))
    }

    fn bot_texts(widget: &ChatWidget) -> Vec<String> {
        widget
            .transcript()
            .iter()
            .filter(|m| m.sender == Sender::Bot)
            .map(|m| m.content.to_string())
            .collect()
    }

    #[test]
    fn test_first_open_shows_menu_and_two_welcomes() {
        let mut widget = ChatWidget::new();
        widget.toggle_open();

        assert!(widget.state().is_open);
        assert!(widget.view().options_visible);
        assert!(!widget.view().input_visible);
        assert_eq!(widget.transcript().len(), 2);
        assert_eq!(
            bot_texts(&widget),
            vec![texts::WELCOME.to_string(), texts::MENU_OVERVIEW.to_string()]
        );
    }

    #[test]
    fn test_reopen_before_choice_does_not_repeat_welcome() {
        let mut widget = ChatWidget::new();
        widget.toggle_open();
        widget.toggle_open();
        widget.toggle_open();

        assert!(widget.state().is_open);
        assert!(widget.view().options_visible);
        assert_eq!(widget.transcript().len(), 2);
    }

    #[test]
    fn test_open_after_choice_shows_input() {
        let mut widget = ChatWidget::new();
        let source = SharedSelection::default();
        widget.toggle_open();
        widget.select_option(MenuOption::QuestionAnswer, &source);
        widget.close();
        widget.toggle_open();

        assert!(widget.state().is_open);
        assert!(!widget.view().options_visible);
        assert!(widget.view().input_visible);
    }

    #[test]
    fn test_close_keeps_mode_and_transcript() {
        let mut widget = ChatWidget::new();
        let source = SharedSelection::default();
        widget.toggle_open();
        widget.select_option(MenuOption::SubmitFeedback, &source);
        let before = widget.transcript().len();

        widget.handle_event(WidgetEvent::CloseClicked, &source);

        assert!(!widget.state().is_open);
        assert_eq!(widget.current_mode(), ChatMode::SubmitFeedback);
        assert_eq!(widget.transcript().len(), before);
    }

    #[test]
    fn test_select_option_appends_prompt() {
        let mut widget = ChatWidget::new();
        let source = SharedSelection::default();
        let pending = widget.select_option(MenuOption::RequestAssistance, &source);

        assert!(pending.is_none());
        assert!(!widget.state().is_first_interaction);
        assert_eq!(widget.current_mode(), ChatMode::RequestAssistance);
        assert_eq!(
            widget.transcript().last().unwrap().content.as_str(),
            texts::ASSISTANCE_PROMPT
        );
        assert!(widget.view().input_visible);
        assert!(!widget.view().options_visible);
    }

    #[test]
    fn test_summarize_option_dispatches_immediately() {
        let mut widget = ChatWidget::new();
        let pending = widget
            .select_option(MenuOption::SummarizeLesson, &selection("lesson-3"))
            .expect("summary request");

        assert_eq!(
            pending.request,
            ChatRequest::Summarize {
                transcript_name: "lesson-3".into()
            }
        );
        assert_eq!(pending.handling, ReplyHandling::Summary);
        assert_eq!(
            widget.transcript().last().unwrap().content.as_str(),
            texts::SUMMARIZE_PENDING
        );
    }

    #[test]
    fn test_blank_submit_is_noop() {
        let mut widget = ChatWidget::new();
        let source = SharedSelection::default();
        assert!(widget.submit("   \t\n", &source).is_none());
        assert!(widget.transcript().is_empty());

        widget.set_input("   ");
        assert!(widget.handle_event(WidgetEvent::SendClicked, &source).is_none());
        assert!(widget.transcript().is_empty());
    }

    #[test]
    fn test_feedback_submit_targets_assistance_without_transcript() {
        let mut widget = ChatWidget::new();
        let source = selection("lesson-1");
        widget.select_option(MenuOption::SubmitFeedback, &source);

        let pending = widget.submit("abc", &source).unwrap();

        assert_eq!(pending.endpoint(), EndpointKind::Assistance);
        assert_eq!(pending.request.body(), json!({ "message": "abc" }));
        assert_eq!(pending.handling, ReplyHandling::FeedbackConfirmation);
    }

    #[test]
    fn test_qa_submit_reads_selection_live() {
        let mut widget = ChatWidget::new();
        let source = selection("lesson-1");
        widget.select_option(MenuOption::QuestionAnswer, &source);
        source.select("lesson-2");

        let pending = widget.submit("what is X?", &source).unwrap();

        assert_eq!(pending.endpoint(), EndpointKind::Chat);
        assert_eq!(
            pending.request.body(),
            json!({ "message": "what is X?", "transcript_name": "lesson-2" })
        );
        assert_eq!(pending.handling, ReplyHandling::Verbatim);
    }

    #[test]
    fn test_missing_selection_sends_empty_transcript() {
        let mut widget = ChatWidget::new();
        let pending = widget.submit("hello", &SharedSelection::default()).unwrap();
        assert_eq!(
            pending.request.body(),
            json!({ "message": "hello", "transcript_name": "" })
        );
        assert_eq!(pending.handling, ReplyHandling::Formatted);
    }

    #[test]
    fn test_enter_key_submits_and_clears_input() {
        let mut widget = ChatWidget::new();
        let source = SharedSelection::default();
        widget.handle_event(WidgetEvent::InputChanged("  hi there ".into()), &source);
        assert!(
            widget
                .handle_event(WidgetEvent::InputKeyPress("a".into()), &source)
                .is_none()
        );

        let pending = widget.handle_event(WidgetEvent::InputKeyPress("Enter".into()), &source);

        assert!(pending.is_some());
        assert_eq!(widget.view().input_value, "");
        assert_eq!(widget.transcript().last().unwrap().content.as_str(), "hi there");
    }

    #[test]
    fn test_user_script_is_escaped_in_transcript() {
        let mut widget = ChatWidget::new();
        widget.submit("<script>alert(1)</script>", &SharedSelection::default());
        let last = widget.transcript().last().unwrap();
        assert!(last.is_user());
        assert_eq!(last.content.as_str(), "&lt;script&gt;alert(1)&lt;/script&gt;");
    }

    #[test]
    fn test_complete_qa_reply_is_verbatim() {
        let mut widget = ChatWidget::new();
        let source = SharedSelection::default();
        widget.select_option(MenuOption::QuestionAnswer, &source);
        let pending = widget.submit("q", &source).unwrap();

        widget
            .complete(&pending, Ok(ServerReply::response("X is <em>42</em>\n- ok")))
            .unwrap();

        assert_eq!(
            widget.transcript().last().unwrap().content.as_str(),
            "X is <em>42</em>\n- ok"
        );
    }

    #[test]
    fn test_complete_general_reply_is_formatted() {
        let mut widget = ChatWidget::new();
        let pending = widget.submit("q", &SharedSelection::default()).unwrap();

        widget
            .complete(&pending, Ok(ServerReply::response("• Point")))
            .unwrap();

        assert_eq!(
            widget.transcript().last().unwrap().content.as_str(),
            format!("{}<strong>• Point</strong><br>", texts::SUMMARY_HEADER)
        );
    }

    #[test]
    fn test_complete_feedback_appends_confirmation() {
        let mut widget = ChatWidget::new();
        let source = SharedSelection::default();
        widget.select_option(MenuOption::SubmitFeedback, &source);
        let pending = widget.submit("great course", &source).unwrap();

        widget.complete(&pending, Ok(ServerReply::default())).unwrap();

        assert_eq!(
            widget.transcript().last().unwrap().content.as_str(),
            texts::FEEDBACK_THANKS
        );
    }

    #[test]
    fn test_complete_uses_mode_captured_at_dispatch() {
        let mut widget = ChatWidget::new();
        let source = SharedSelection::default();
        widget.select_option(MenuOption::QuestionAnswer, &source);
        let pending = widget.submit("q", &source).unwrap();
        widget.select_option(MenuOption::RequestAssistance, &source);

        widget
            .complete(&pending, Ok(ServerReply::response("plain")))
            .unwrap();

        assert_eq!(widget.transcript().last().unwrap().content.as_str(), "plain");
    }

    #[test]
    fn test_application_error_yields_generic_apology() {
        let mut widget = ChatWidget::new();
        let pending = widget.submit("q", &SharedSelection::default()).unwrap();

        let err = widget
            .complete(&pending, Ok(ServerReply::error("Transcript not found")))
            .unwrap_err();
        assert!(err.is_application());

        assert_eq!(
            widget.transcript().last().unwrap().content.as_str(),
            texts::GENERIC_APOLOGY
        );
        assert!(widget.view().input_visible);
        assert!(!widget.view().options_visible);
    }

    #[test]
    fn test_summarize_network_failure_appends_one_apology() {
        let mut widget = ChatWidget::new();
        let source = SharedSelection::default();
        let pending = widget
            .select_option(MenuOption::SummarizeLesson, &source)
            .unwrap();
        let before = widget.transcript().len();

        let err = widget
            .complete(&pending, Err(ChatbotError::transport("connection refused")))
            .unwrap_err();
        assert!(err.is_transport());

        assert_eq!(widget.transcript().len(), before + 1);
        assert_eq!(
            widget.transcript().last().unwrap().content.as_str(),
            texts::SUMMARIZE_APOLOGY
        );
        assert_eq!(widget.current_mode(), ChatMode::SummarizeLesson);
    }

    #[test]
    fn test_summary_without_field_is_a_failure() {
        let mut widget = ChatWidget::new();
        let pending = widget.summarize(&SharedSelection::default());

        assert!(
            widget
                .complete(&pending, Ok(ServerReply::response("wrong field")))
                .is_err()
        );

        assert_eq!(
            widget.transcript().last().unwrap().content.as_str(),
            texts::SUMMARIZE_APOLOGY
        );
    }

    #[test]
    fn test_view_stays_scrolled_to_end() {
        let mut widget = ChatWidget::new();
        widget.toggle_open();
        assert_eq!(widget.view().scrolled_to, 2);
        widget.submit("hi", &SharedSelection::default());
        assert_eq!(widget.view().scrolled_to, widget.transcript().len());
    }
}
