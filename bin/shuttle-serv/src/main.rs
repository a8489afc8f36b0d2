use axum::{Router, middleware, routing::get};
use isrs_api::{config::ApiConfig, state::ApiState};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: sqlx::PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    let config = ApiConfig::from_shuttle_secrets(&secrets)
        .map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    // Shuttle installs its own tracing subscriber

    let metrics_handle = isrs_api::metrics::init_metrics()?;
    tracing::info!("Prometheus metrics exporter initialized");

    sqlx::migrate!("../../crates/isrs-db/migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration error: {}", e))?;

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

    tracing::info!(env = ?config.env, "Serving on Shuttle");

    Ok(app.into())
}
