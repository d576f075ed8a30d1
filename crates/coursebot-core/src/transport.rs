//! Outbound request types and the transport seam.
//!
//! The controller never performs I/O itself. It produces a [`ChatRequest`]
//! and a [`ChatTransport`] implementation (reqwest in production, a recorder
//! in tests) carries it to the server.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{ChatbotError, Result};

/// Server endpoint a request is posted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointKind {
    /// General and Q&A chat (`/feedback/chatbot/`).
    Chat,
    /// Lesson summary (`/feedback/summarize_lesson/`).
    Summarize,
    /// Feedback submission (`/feedback/submit_assistance/`).
    Assistance,
}

/// A single JSON POST the widget wants to make.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatRequest {
    Chat {
        message: String,
        transcript_name: String,
    },
    Assistance {
        message: String,
    },
    Summarize {
        transcript_name: String,
    },
}

impl ChatRequest {
    pub fn endpoint(&self) -> EndpointKind {
        match self {
            ChatRequest::Chat { .. } => EndpointKind::Chat,
            ChatRequest::Assistance { .. } => EndpointKind::Assistance,
            ChatRequest::Summarize { .. } => EndpointKind::Summarize,
        }
    }

    /// JSON body exactly as the server expects it.
    pub fn body(&self) -> Value {
        match self {
            ChatRequest::Chat {
                message,
                transcript_name,
            } => json!({ "message": message, "transcript_name": transcript_name }),
            ChatRequest::Assistance { message } => json!({ "message": message }),
            ChatRequest::Summarize { transcript_name } => {
                json!({ "transcript_name": transcript_name })
            }
        }
    }
}

/// Decoded JSON reply. Which field is populated depends on the endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServerReply {
    pub fn response(text: impl Into<String>) -> Self {
        Self {
            response: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            error: Some(text.into()),
            ..Self::default()
        }
    }

    /// Surfaces a present `error` field as an application failure.
    pub fn into_result(self) -> Result<Self> {
        match self.error {
            Some(message) => Err(ChatbotError::application(message)),
            None => Ok(self),
        }
    }
}

/// Carries a [`ChatRequest`] to the server.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Posts the request and decodes the JSON reply.
    ///
    /// Implementations return the reply as decoded even when it carries an
    /// `error` field; the controller decides what that means.
    async fn send(&self, request: &ChatRequest) -> Result<ServerReply>;
}

/// Supplies the transcript the user currently has selected on the page.
///
/// Read at dispatch time, never cached by the controller.
pub trait TranscriptSource: Send + Sync {
    fn selected_transcript(&self) -> Option<String>;
}

/// A transcript selection shared between a front end and the widget.
#[derive(Debug, Clone, Default)]
pub struct SharedSelection {
    inner: Arc<RwLock<Option<String>>>,
}

impl SharedSelection {
    pub fn new(initial: Option<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    /// Replaces the selection; an empty name clears it.
    pub fn select(&self, name: impl Into<String>) {
        let name = name.into();
        if let Ok(mut guard) = self.inner.write() {
            *guard = if name.trim().is_empty() {
                None
            } else {
                Some(name)
            };
        }
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = None;
        }
    }
}

impl TranscriptSource for SharedSelection {
    fn selected_transcript(&self) -> Option<String> {
        self.inner.read().ok().and_then(|guard| guard.clone())
    }
}
