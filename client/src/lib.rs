//! Typed HTTP client for the Timeful events API.

pub mod services;

pub use services::api::{ApiClient, ClientError};
pub use services::config::ConfigService;
pub use services::events::EventService;
