pub mod config;
pub mod cookie;
pub mod error;
pub mod render;
pub mod transport;
pub mod widget;

// Re-export common error type
pub use error::ChatbotError;
