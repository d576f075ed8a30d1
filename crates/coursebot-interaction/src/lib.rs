//! Infrastructure for the coursebot widget: HTTP transport, configuration
//! loading, the async session driver and tracing setup.

pub mod config;
pub mod http_transport;
pub mod session;
pub mod telemetry;

pub use http_transport::HttpChatTransport;
pub use session::WidgetSession;
