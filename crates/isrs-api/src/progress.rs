use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::post,
};
use isrs_db::{
    models::{DeckProgress, ProgressResult},
    repositories,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ApiState, auth::AuthUser, deck::load_owned_deck, error::ApiError};

/// Create the deck progress routes
pub fn routes() -> Router<ApiState> {
    Router::new().route(
        "/decks/{deck_id}/progress",
        post(save_progress).get(get_progress),
    )
}

#[derive(Debug, Deserialize)]
pub struct SaveProgressRequest {
    pub card_id: Uuid,
    pub correct: bool,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub exists: bool,
    pub progress: Option<DeckProgress>,
}

/// Append one answer to the caller's progress on a deck
async fn save_progress(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(deck_id): Path<Uuid>,
    Json(payload): Json<SaveProgressRequest>,
) -> Result<(StatusCode, Json<ProgressResult>), ApiError> {
    load_owned_deck(&state.pool, deck_id, &auth_user.user_id).await?;

    let result = repositories::progress::insert_progress_result(
        &state.pool,
        &auth_user.user_id,
        deck_id,
        payload.card_id,
        payload.correct,
    )
    .await?;

    tracing::debug!(
        deck_id = %deck_id,
        card_id = %payload.card_id,
        correct = payload.correct,
        "Progress saved"
    );

    Ok((StatusCode::CREATED, Json(result)))
}

async fn get_progress(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(deck_id): Path<Uuid>,
) -> Result<Json<ProgressResponse>, ApiError> {
    load_owned_deck(&state.pool, deck_id, &auth_user.user_id).await?;

    let progress =
        repositories::progress::get_deck_progress(&state.pool, &auth_user.user_id, deck_id)
            .await?;

    Ok(Json(ProgressResponse {
        exists: progress.is_some(),
        progress,
    }))
}
