pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

/// Name used for logs, spans and the health payload.
pub const SERVICE_NAME: &str = "coffee-ai-assistant";
