use std::time::Duration;

use serde::Deserialize;

/// Deployment environment, drives logging format and security headers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// API configuration, read once at startup and injected through `ApiState`
#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    /// Optional because Shuttle hands us a ready pool instead
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub groq_api_key: String,
    #[serde(default = "default_groq_base_url")]
    pub groq_base_url: String,
    #[serde(default = "default_groq_model")]
    pub groq_model: String,
    #[serde(default = "default_generation_timeout_secs")]
    pub generation_timeout_secs: u64,
    #[serde(default)]
    pub env: Environment,
    /// Comma separated list of origins
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,
}

fn default_groq_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_groq_model() -> String {
    "llama3-8b-8192".to_string()
}

const fn default_generation_timeout_secs() -> u64 {
    30
}

fn default_allowed_origins() -> String {
    "http://localhost:8080".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_db_max_connections() -> u32 {
    10
}

impl ApiConfig {
    /// Load the configuration from environment variables (`JWT_SECRET`, `GROQ_API_KEY`, ...)
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Load the configuration from Shuttle secrets (same keys as the environment)
    #[cfg(feature = "shuttle")]
    pub fn from_shuttle_secrets(
        secrets: &shuttle_runtime::SecretStore,
    ) -> Result<Self, envy::Error> {
        const KEYS: &[&str] = &[
            "DATABASE_URL",
            "JWT_SECRET",
            "GROQ_API_KEY",
            "GROQ_BASE_URL",
            "GROQ_MODEL",
            "GENERATION_TIMEOUT_SECS",
            "ENV",
            "ALLOWED_ORIGINS",
            "PORT",
            "DB_MAX_CONNECTIONS",
        ];

        envy::from_iter(
            KEYS.iter()
                .filter_map(|key| secrets.get(key).map(|value| (key.to_string(), value))),
        )
    }

    pub fn parsed_allowed_origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    pub const fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }
}
