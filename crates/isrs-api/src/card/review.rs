//! The review flow: load a card, advance its schedule and store it.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use isrs_db::{models::CardRecord, repositories};
use isrs_srs::{SrsError, apply_review};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    ApiState,
    auth::AuthUser,
    error::ApiError,
    generation::with_timeout,
    metrics::{ReviewOutcome, record_generation_event, record_review_event},
};

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub card: CardRecord,
    /// Days between this review and the next one
    pub interval_days: i64,
}

/// Review a card.
///
/// The card gets a fresh sentence and moves one level up. Nothing is written
/// when sentence generation fails or times out, and a review racing another
/// review of the same card is rejected with a conflict.
pub async fn review_card(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(card_id): Path<Uuid>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let record = repositories::card::find_card_for_user(&state.pool, card_id, &auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Card {card_id} not found")))?;
    let card = record.to_card();

    let generator = Arc::clone(&state.text_generator);
    let limit = state.generation_timeout;

    let reviewed = apply_review(&card, |language, word| async move {
        with_timeout(limit, generator.generate_sentence(&language, &word)).await
    })
    .await;

    let reviewed = match reviewed {
        Ok(reviewed) => {
            record_generation_event("sentence", true);
            reviewed
        }
        Err(e @ SrsError::UpstreamUnavailable(_)) => {
            record_generation_event("sentence", false);
            record_review_event(ReviewOutcome::UpstreamError);
            tracing::warn!(card_id = %card_id, error = %e, "Review aborted, card left unchanged");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    let updated =
        repositories::card::update_reviewed_card(&state.pool, card_id, card.level, &reviewed)
            .await?;

    let Some(updated) = updated else {
        record_review_event(ReviewOutcome::Conflict);
        tracing::info!(card_id = %card_id, "Card was reviewed concurrently");
        return Err(ApiError::Conflict(
            "Card was reviewed concurrently, retry".to_string(),
        ));
    };

    // Differs from the level's interval once the schedule is capped
    let interval_days = (updated.next_review_at - updated.last_reviewed_at).num_days();
    record_review_event(ReviewOutcome::Success);

    tracing::info!(
        card_id = %card_id,
        user_id = %auth_user.user_id,
        level = updated.level,
        next_review_at = %updated.next_review_at,
        "Card reviewed"
    );

    Ok(Json(ReviewResponse {
        card: updated,
        interval_days,
    }))
}
