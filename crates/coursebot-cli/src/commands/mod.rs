pub mod ask;
pub mod config;
pub mod feedback;
pub mod format_summary;
pub mod render;
pub mod summarize;

use std::path::Path;

use anyhow::Result;
use coursebot_core::transport::{ChatTransport, SharedSelection};
use coursebot_core::widget::{ChatWidget, PendingRequest};
use coursebot_interaction::HttpChatTransport;
use coursebot_interaction::config::load_config;

/// A configured transport plus the transcript selection for one command.
pub struct Client {
    transport: HttpChatTransport,
    pub selection: SharedSelection,
}

impl Client {
    /// Loads the configuration and primes the anti-forgery cookie when none
    /// was configured.
    ///
    /// `transcript` wins over the configured default transcript.
    pub async fn connect(config_path: Option<&Path>, transcript: Option<String>) -> Result<Self> {
        let config = load_config(config_path)?;
        let selection = SharedSelection::new(transcript.or_else(|| config.default_transcript.clone()));
        let transport = HttpChatTransport::new(config)?;

        if transport.csrf_token().is_none()
            && let Err(e) = transport.prime_csrf().await
        {
            tracing::warn!(error = %e, "Could not prime anti-forgery cookie");
        }

        Ok(Self {
            transport,
            selection,
        })
    }

    /// Sends `pending`, prints the bot message it produced and fails if the
    /// request did.
    pub async fn exchange(&self, widget: &mut ChatWidget, pending: PendingRequest) -> Result<()> {
        let outcome = self.transport.send(&pending.request).await;
        let result = widget.complete(&pending, outcome);

        if let Some(reply) = widget.transcript().last() {
            println!("{}", reply.content);
        }

        result?;
        Ok(())
    }
}
