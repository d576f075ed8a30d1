//! Async driver around the headless widget controller.

use std::sync::Arc;

use coursebot_core::error::Result;
use coursebot_core::render::WidgetRenderer;
use coursebot_core::transport::{ChatTransport, TranscriptSource};
use coursebot_core::widget::{
    ChatMessage, ChatWidget, MenuOption, PendingRequest, WidgetEvent,
};
use tokio::sync::{Mutex, mpsc};

/// Owns one widget instance and carries its requests over a transport.
///
/// State transitions run under the lock; network calls never do, so several
/// requests can be in flight at once. Replies are appended in completion
/// order.
pub struct WidgetSession {
    /// Session ID used in log fields
    id: String,
    widget: Arc<Mutex<ChatWidget>>,
    transport: Arc<dyn ChatTransport>,
    source: Arc<dyn TranscriptSource>,
    /// Receives every appended message when a front end subscribed
    events: Option<mpsc::UnboundedSender<ChatMessage>>,
}

impl WidgetSession {
    pub fn new(transport: Arc<dyn ChatTransport>, source: Arc<dyn TranscriptSource>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            widget: Arc::new(Mutex::new(ChatWidget::new())),
            transport,
            source,
            events: None,
        }
    }

    /// Returns a stream of every message appended from now on.
    ///
    /// Only one subscriber is kept; subscribing again replaces it.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<ChatMessage> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.events = Some(tx);
        rx
    }

    /// Applies a UI event and, if it produced a request, sends it.
    pub async fn handle_event(&self, event: WidgetEvent) {
        self.apply(|widget, source| widget.handle_event(event, source))
            .await;
    }

    pub async fn toggle_open(&self) {
        self.handle_event(WidgetEvent::ToggleClicked).await;
    }

    /// Opens the window unless it is already showing.
    pub async fn open(&self) {
        self.apply(|widget, _| {
            if !widget.state().is_open {
                widget.toggle_open();
            }
            None
        })
        .await;
    }

    pub async fn close(&self) {
        self.handle_event(WidgetEvent::CloseClicked).await;
    }

    pub async fn select_option(&self, option: MenuOption) {
        self.handle_event(WidgetEvent::OptionClicked(option)).await;
    }

    pub async fn submit(&self, text: &str) {
        self.apply(|widget, source| widget.submit(text, source)).await;
    }

    pub async fn summarize(&self) {
        self.apply(|widget, source| Some(widget.summarize(source)))
            .await;
    }

    /// Copy of the current controller state.
    pub async fn snapshot(&self) -> ChatWidget {
        self.widget.lock().await.clone()
    }

    pub async fn render_html(&self, renderer: &WidgetRenderer, container_id: &str) -> Result<String> {
        let widget = self.widget.lock().await;
        renderer.render_widget(&widget, container_id)
    }

    async fn apply<F>(&self, transition: F)
    where
        F: FnOnce(&mut ChatWidget, &dyn TranscriptSource) -> Option<PendingRequest>,
    {
        let pending = {
            let mut widget = self.widget.lock().await;
            let before = widget.transcript().len();
            let pending = transition(&mut *widget, self.source.as_ref());
            self.publish(&widget, before);
            pending
        };

        if let Some(pending) = pending {
            self.dispatch(pending).await;
        }
    }

    async fn dispatch(&self, pending: PendingRequest) {
        tracing::info!(
            session_id = %self.id,
            endpoint = ?pending.endpoint(),
            mode = %pending.mode,
            "Dispatching request"
        );

        let outcome = self.transport.send(&pending.request).await;

        let mut widget = self.widget.lock().await;
        let before = widget.transcript().len();
        // Failures are logged by the controller and shown as an apology
        let _ = widget.complete(&pending, outcome);
        self.publish(&widget, before);
    }

    fn publish(&self, widget: &ChatWidget, before: usize) {
        if let Some(events) = &self.events {
            for message in widget.transcript().since(before) {
                // A dropped receiver just means nobody is listening anymore
                let _ = events.send(message.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use coursebot_core::ChatbotError;
    use coursebot_core::transport::{ChatRequest, ServerReply, SharedSelection};
    use coursebot_core::widget::texts;
    use std::collections::HashMap;
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;
    use tokio::sync::Notify;

    // Mock transport that records requests and replays canned outcomes
    struct MockTransport {
        requests: StdMutex<Vec<ChatRequest>>,
        outcome: Result<ServerReply>,
    }

    impl MockTransport {
        fn replying(outcome: Result<ServerReply>) -> Arc<Self> {
            Arc::new(Self {
                requests: StdMutex::new(Vec::new()),
                outcome,
            })
        }

        fn requests(&self) -> Vec<ChatRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatTransport for MockTransport {
        async fn send(&self, request: &ChatRequest) -> Result<ServerReply> {
            self.requests.lock().unwrap().push(request.clone());
            self.outcome.clone()
        }
    }

    fn session_with(transport: Arc<MockTransport>, transcript: Option<&str>) -> WidgetSession {
        let selection = SharedSelection::new(transcript.map(str::to_string));
        WidgetSession::new(transport, Arc::new(selection))
    }

    #[tokio::test]
    async fn test_blank_submit_sends_nothing() {
        let transport = MockTransport::replying(Ok(ServerReply::response("x")));
        let session = session_with(transport.clone(), None);

        session.submit("   ").await;

        assert!(transport.requests().is_empty());
        assert!(session.snapshot().await.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_qa_round_trip() {
        let transport = MockTransport::replying(Ok(ServerReply::response("X is a thing")));
        let session = session_with(transport.clone(), Some("lesson-1"));

        session.toggle_open().await;
        session.select_option(MenuOption::QuestionAnswer).await;
        session.submit("what is X?").await;

        assert_eq!(
            transport.requests(),
            vec![ChatRequest::Chat {
                message: "what is X?".into(),
                transcript_name: "lesson-1".into(),
            }]
        );
        let widget = session.snapshot().await;
        assert_eq!(
            widget.transcript().last().unwrap().content.as_str(),
            "X is a thing"
        );
    }

    #[tokio::test]
    async fn test_summarize_failure_keeps_mode() {
        let transport =
            MockTransport::replying(Err(ChatbotError::transport("connection refused")));
        let session = session_with(transport.clone(), Some("lesson-1"));

        session.select_option(MenuOption::SummarizeLesson).await;

        let widget = session.snapshot().await;
        let texts_seen: Vec<_> = widget
            .transcript()
            .iter()
            .map(|m| m.content.to_string())
            .collect();
        assert_eq!(
            texts_seen,
            vec![
                texts::SUMMARIZE_PENDING.to_string(),
                texts::SUMMARIZE_APOLOGY.to_string()
            ]
        );
        assert_eq!(
            widget.current_mode(),
            coursebot_core::widget::ChatMode::SummarizeLesson
        );
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_subscriber_sees_every_append() {
        let transport = MockTransport::replying(Ok(ServerReply::default()));
        let mut session = session_with(transport, None);
        let mut rx = session.subscribe();

        session.toggle_open().await;
        session.select_option(MenuOption::SubmitFeedback).await;
        session.submit("abc").await;

        let mut received = Vec::new();
        while let Ok(message) = rx.try_recv() {
            received.push(message.content.to_string());
        }
        assert_eq!(
            received,
            vec![
                texts::WELCOME.to_string(),
                texts::MENU_OVERVIEW.to_string(),
                texts::FEEDBACK_PROMPT.to_string(),
                "abc".to_string(),
                texts::FEEDBACK_THANKS.to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_open_is_idempotent() {
        let transport = MockTransport::replying(Ok(ServerReply::default()));
        let session = session_with(transport, None);

        session.open().await;
        session.open().await;

        let widget = session.snapshot().await;
        assert!(widget.state().is_open);
        assert_eq!(widget.transcript().len(), 2);
    }

    // Holds each reply until the test releases the gate for its message
    struct GatedTransport {
        gates: HashMap<String, Arc<Notify>>,
        started: StdMutex<Vec<String>>,
    }

    impl GatedTransport {
        fn new(messages: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                gates: messages
                    .iter()
                    .map(|m| (m.to_string(), Arc::new(Notify::new())))
                    .collect(),
                started: StdMutex::new(Vec::new()),
            })
        }

        fn release(&self, message: &str) {
            self.gates[message].notify_one();
        }

        fn started(&self) -> usize {
            self.started.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ChatTransport for GatedTransport {
        async fn send(&self, request: &ChatRequest) -> Result<ServerReply> {
            let ChatRequest::Chat { message, .. } = request else {
                return Err(ChatbotError::transport("unexpected request"));
            };
            self.started.lock().unwrap().push(message.clone());
            self.gates[message.as_str()].notified().await;
            Ok(ServerReply::response(format!("re: {}", message)))
        }
    }

    #[tokio::test]
    async fn test_concurrent_replies_land_in_completion_order() {
        let transport = GatedTransport::new(&["first", "second"]);
        let session = Arc::new(WidgetSession::new(
            transport.clone(),
            Arc::new(SharedSelection::default()),
        ));
        session.select_option(MenuOption::QuestionAnswer).await;

        let first = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.submit("first").await }
        });
        let second = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.submit("second").await }
        });

        tokio::time::timeout(Duration::from_secs(5), async {
            while transport.started() < 2 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("both requests in flight");

        // The lock is free while both requests wait on the transport
        let widget = tokio::time::timeout(Duration::from_secs(1), session.snapshot())
            .await
            .expect("snapshot while requests are in flight");
        assert_eq!(widget.transcript().len(), 3);

        transport.release("second");
        second.await.unwrap();
        transport.release("first");
        first.await.unwrap();

        let widget = session.snapshot().await;
        let replies: Vec<_> = widget
            .transcript()
            .iter()
            .skip(3)
            .map(|m| m.content.to_string())
            .collect();
        assert_eq!(replies, vec!["re: second", "re: first"]);
    }
}
