use std::net::SocketAddr;

use anyhow::Context;
use axum::{Router, middleware, routing::get};
use isrs_api::{config::ApiConfig, state::ApiState};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env().context("Failed to load configuration")?;

    isrs_api::tracing::init_tracing(config.env);

    let metrics_handle = isrs_api::metrics::init_metrics()?;

    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set")?;
    let pool = isrs_db::create_pool(database_url, config.db_max_connections).await?;
    isrs_db::ensure_db_and_migrate(database_url, &pool).await?;

    let state = ApiState::new(&config, pool)?;

    let cors = isrs_api::middleware::cors::create_cors_layer(config.parsed_allowed_origins());

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let metrics_app = Router::new()
        .route("/metrics", get(isrs_api::metrics::metrics_handler))
        .with_state(metrics_handle);

    let app = isrs_api::router::router()
        .with_state(state)
        .merge(metrics_app)
        .layer(cors)
        .layer(trace_layer)
        .layer(middleware::from_fn(isrs_api::metrics::track_metrics))
        .layer(middleware::from_fn(
            isrs_api::middleware::request_id::request_id_middleware,
        ));

    let app = isrs_api::middleware::security_headers::apply_security_headers(app, config.env);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, env = ?config.env, "Server listening");

    // Peer addresses feed the generation rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
