use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::post,
};
use isrs_db::{models::SharedDeck, repositories};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    ApiState, auth::AuthUser, deck::load_owned_deck, error::ApiError,
    validation::validate_access_level,
};

/// Create the deck sharing routes
pub fn routes() -> Router<ApiState> {
    Router::new().route("/decks/{deck_id}/shares", post(share_deck))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ShareDeckRequest {
    #[validate(length(min = 1, max = 100))]
    pub shared_to_user_ids: Vec<String>,
    #[validate(custom(function = "validate_access_level"))]
    pub access_level: String,
}

/// Record that the owner shared a deck with other users
async fn share_deck(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(deck_id): Path<Uuid>,
    Json(payload): Json<ShareDeckRequest>,
) -> Result<(StatusCode, Json<SharedDeck>), ApiError> {
    payload.validate()?;

    if payload.shared_to_user_ids.iter().any(|id| id.trim().is_empty()) {
        return Err(ApiError::Validation(
            "Shared user ids cannot be empty".to_string(),
        ));
    }

    load_owned_deck(&state.pool, deck_id, &auth_user.user_id).await?;

    let shared = repositories::sharing::insert_shared_deck(
        &state.pool,
        deck_id,
        &auth_user.user_id,
        &payload.shared_to_user_ids,
        &payload.access_level,
    )
    .await?;

    tracing::info!(
        deck_id = %deck_id,
        access_level = %shared.access_level,
        recipients = shared.shared_to_user_ids.len(),
        "Deck shared"
    );

    Ok((StatusCode::CREATED, Json(shared)))
}
