use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use crate::{card, deck, preferences, progress, session, sharing, state::ApiState};

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(ready))
        .merge(deck::routes())
        .merge(card::routes())
        .merge(progress::routes())
        .merge(preferences::routes())
        .merge(session::routes())
        .merge(sharing::routes())
        .fallback(handler_404)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

/// Ready once the database answers
async fn ready(State(state): State<ApiState>) -> StatusCode {
    match isrs_db::ping(&state.pool).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}
