pub mod auth;
pub mod card;
pub mod config;
pub mod deck;
pub mod error;
pub mod generation;
pub mod metrics;
pub mod middleware;
pub mod preferences;
pub mod progress;
pub mod router;
pub mod session;
pub mod sharing;
pub mod state;
pub mod tracing;
pub mod validation;

pub use config::ApiConfig;
pub use state::{ApiState, AuthConfig};
