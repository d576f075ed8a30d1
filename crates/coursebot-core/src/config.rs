//! Widget configuration model.
//!
//! Loading from disk and environment overrides live in
//! `coursebot-interaction`; this module only defines the shape and defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ChatbotError, Result};
use crate::render::element_ids;
use crate::transport::EndpointKind;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Root configuration structure for `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Origin the endpoint paths are resolved against.
    pub base_url: String,
    pub endpoints: EndpointPaths,
    pub csrf: CsrfConfig,
    /// Cookie string (`name=value; ...`) seeded into the client's jar.
    pub cookie: Option<String>,
    pub request_timeout_secs: u64,
    /// Element id the rendered widget mounts into.
    pub container_id: String,
    /// Transcript selected when the front end starts.
    pub default_transcript: Option<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoints: EndpointPaths::default(),
            csrf: CsrfConfig::default(),
            cookie: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            container_id: element_ids::CONTAINER.to_string(),
            default_transcript: None,
        }
    }
}

/// Server paths of the three endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointPaths {
    pub chat: String,
    pub summarize: String,
    pub assistance: String,
}

impl Default for EndpointPaths {
    fn default() -> Self {
        Self {
            chat: "/feedback/chatbot/".to_string(),
            summarize: "/feedback/summarize_lesson/".to_string(),
            assistance: "/feedback/submit_assistance/".to_string(),
        }
    }
}

impl EndpointPaths {
    pub fn path(&self, kind: EndpointKind) -> &str {
        match kind {
            EndpointKind::Chat => &self.chat,
            EndpointKind::Summarize => &self.summarize,
            EndpointKind::Assistance => &self.assistance,
        }
    }
}

/// Anti-forgery token settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsrfConfig {
    /// Cookie the token is read from.
    pub cookie_name: String,
    /// Request header the token is echoed in.
    pub header_name: String,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            cookie_name: "csrftoken".to_string(),
            header_name: "X-CSRFToken".to_string(),
        }
    }
}

impl WidgetConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Absolute URL of an endpoint.
    pub fn endpoint_url(&self, kind: EndpointKind) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.endpoints.path(kind);
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Rejects settings no request could succeed with.
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ChatbotError::config(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ChatbotError::config("request_timeout_secs must be positive"));
        }
        if self.csrf.header_name.trim().is_empty() {
            return Err(ChatbotError::config("csrf.header_name must not be empty"));
        }
        Ok(())
    }
}
