//! HttpChatTransport - reqwest implementation of the widget's transport.
//!
//! Requests are JSON POSTs. The anti-forgery token is read from the client's
//! cookie jar on every request, the same way the page reads it from
//! `document.cookie`, and echoed in the configured header.

use std::sync::Arc;

use async_trait::async_trait;
use coursebot_core::ChatbotError;
use coursebot_core::config::WidgetConfig;
use coursebot_core::cookie::read_cookie;
use coursebot_core::error::Result;
use coursebot_core::transport::{ChatRequest, ChatTransport, ServerReply};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Url};

/// Transport that talks to the lesson server over HTTP.
#[derive(Clone, Debug)]
pub struct HttpChatTransport {
    client: Client,
    jar: Arc<Jar>,
    base_url: Url,
    config: WidgetConfig,
}

impl HttpChatTransport {
    /// Creates a transport from a validated configuration.
    ///
    /// A configured cookie string is split on `;` and seeded into the jar for
    /// the base URL.
    pub fn new(config: WidgetConfig) -> Result<Self> {
        config.validate()?;

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ChatbotError::config(format!("Invalid base_url '{}': {}", config.base_url, e))
        })?;

        let jar = Arc::new(Jar::default());
        if let Some(cookie) = &config.cookie {
            for pair in cookie.split(';').map(str::trim).filter(|p| !p.is_empty()) {
                jar.add_cookie_str(pair, &base_url);
            }
        }

        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ChatbotError::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            jar,
            base_url,
            config,
        })
    }

    /// Current anti-forgery token, if the jar holds the cookie.
    pub fn csrf_token(&self) -> Option<String> {
        let header = self.jar.cookies(&self.base_url)?;
        let header = header.to_str().ok()?;
        read_cookie(header, &self.config.csrf.cookie_name)
    }

    /// GETs the base URL so the server can set the anti-forgery cookie.
    ///
    /// Returns whether a token is available afterwards.
    pub async fn prime_csrf(&self) -> Result<bool> {
        let response = self
            .client
            .get(self.base_url.clone())
            .send()
            .await
            .map_err(|e| {
                ChatbotError::transport(format!("Failed to reach {}: {}", self.base_url, e))
            })?;

        let has_token = self.csrf_token().is_some();
        tracing::debug!(
            status = %response.status(),
            has_token,
            "Primed anti-forgery cookie"
        );
        Ok(has_token)
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ServerReply> {
        let url = self.config.endpoint_url(request.endpoint());

        let mut builder = self.client.post(&url).json(&request.body());
        match self.csrf_token() {
            Some(token) => {
                builder = builder.header(self.config.csrf.header_name.as_str(), token);
            }
            None => {
                tracing::debug!(
                    cookie = %self.config.csrf.cookie_name,
                    "No anti-forgery cookie; sending without token"
                );
            }
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ChatbotError::transport(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ChatbotError::transport(format!("Failed to read reply from {}: {}", url, e))
        })?;

        tracing::debug!(%url, %status, bytes = body.len(), "Reply received");

        // Error replies still carry JSON ({"error": ...}), so the status alone
        // does not decide success.
        serde_json::from_str::<ServerReply>(&body).map_err(|e| {
            ChatbotError::transport(format!("Undecodable reply from {} ({}): {}", url, status, e))
        })
    }
}
