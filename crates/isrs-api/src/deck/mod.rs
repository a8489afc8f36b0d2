mod routes;

use isrs_db::{models::DeckRecord, repositories};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;

pub use routes::routes;

/// Load a deck and check that `user_id` owns it.
///
/// A missing deck is `NotFound`, someone else's deck is `Forbidden`.
pub(crate) async fn load_owned_deck(
    pool: &PgPool,
    deck_id: Uuid,
    user_id: &str,
) -> Result<DeckRecord, ApiError> {
    let deck = repositories::deck::find_deck(pool, deck_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Deck {deck_id} not found")))?;

    if deck.user_id != user_id {
        return Err(ApiError::Forbidden(
            "No permission to access this deck".to_string(),
        ));
    }

    Ok(deck)
}
