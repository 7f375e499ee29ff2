pub mod api;
pub mod config;
pub mod models;
pub mod recurrence;

pub use config::{BlogLink, FeatureFlags, PublicConfig};
pub use models::{Event, RecurrenceUnit};
