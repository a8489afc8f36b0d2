use std::{sync::Arc, time::Duration};

use anyhow::Context;
use axum::extract::FromRef;
use sqlx::PgPool;

use crate::{
    ApiConfig,
    config::Environment,
    generation::{GroqClient, TextGenerator},
};

#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

#[derive(Clone)]
pub struct ApiState {
    pub pool: PgPool,
    pub auth: AuthConfig,
    pub environment: Environment,
    pub text_generator: Arc<dyn TextGenerator>,
    pub generation_timeout: Duration,
}

impl ApiState {
    pub fn new(config: &ApiConfig, pool: PgPool) -> anyhow::Result<Self> {
        let groq = GroqClient::from_config(config).context("Failed to build text service client")?;

        Ok(Self {
            pool,
            auth: AuthConfig {
                jwt_secret: config.jwt_secret.clone(),
            },
            environment: config.env,
            text_generator: Arc::new(groq),
            generation_timeout: config.generation_timeout(),
        })
    }
}

impl FromRef<ApiState> for AuthConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.auth.clone()
    }
}
