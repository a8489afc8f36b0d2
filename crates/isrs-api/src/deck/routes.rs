use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use isrs_db::{
    models::{CardRecord, DeckRecord, NewDeck},
    repositories,
};
use isrs_srs::Card;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::load_owned_deck;
use crate::{
    ApiState,
    auth::AuthUser,
    error::ApiError,
    validation::{validate_language, validate_not_blank},
};

/// Create the deck routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/decks", get(list_decks).post(create_deck))
        .route("/decks/init", post(init_deck))
        .route("/decks/{deck_id}", get(get_deck).delete(delete_deck))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDeckRequest {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub deck_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_shared: bool,
    #[serde(default)]
    pub shared_with: Vec<String>,
    #[serde(default)]
    pub is_ai_generated: bool,
    #[serde(default)]
    #[validate(nested)]
    pub cards: Vec<InitialCard>,
}

/// A card supplied together with a new deck, stored as given
#[derive(Debug, Deserialize, Validate)]
pub struct InitialCard {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub word: String,
    #[validate(custom(function = "validate_language"))]
    pub language: String,
    #[validate(length(max = 1000))]
    pub sentence: String,
}

#[derive(Debug, Serialize)]
pub struct DeckWithCards {
    #[serde(flatten)]
    pub deck: DeckRecord,
    pub cards: Vec<CardRecord>,
}

async fn list_decks(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<Vec<DeckRecord>>, ApiError> {
    let decks = repositories::deck::list_decks_for_user(&state.pool, &auth_user.user_id).await?;

    Ok(Json(decks))
}

async fn get_deck(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(deck_id): Path<Uuid>,
) -> Result<Json<DeckWithCards>, ApiError> {
    let deck = load_owned_deck(&state.pool, deck_id, &auth_user.user_id).await?;
    let cards = repositories::card::list_cards_for_deck(&state.pool, deck.id).await?;

    Ok(Json(DeckWithCards { deck, cards }))
}

async fn create_deck(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<CreateDeckRequest>,
) -> Result<(StatusCode, Json<DeckWithCards>), ApiError> {
    payload.validate()?;

    let new_deck = NewDeck {
        user_id: auth_user.user_id.clone(),
        deck_name: payload.deck_name.trim().to_string(),
        description: payload.description,
        tags: payload.tags,
        is_shared: payload.is_shared,
        shared_with: payload.shared_with,
        is_ai_generated: payload.is_ai_generated,
    };

    // Deck and initial cards land together or not at all
    let mut tx = state.pool.begin().await?;

    let deck = repositories::deck::insert_deck(&mut *tx, &new_deck).await?;

    let mut cards = Vec::with_capacity(payload.cards.len());
    for initial in payload.cards {
        let card = Card::new(
            deck.id,
            initial.word.trim(),
            initial.language.trim(),
            initial.sentence,
        );
        cards.push(repositories::card::insert_card(&mut *tx, &card).await?);
    }

    tx.commit().await?;

    tracing::info!(
        deck_id = %deck.id,
        user_id = %auth_user.user_id,
        cards = cards.len(),
        "Deck created"
    );

    Ok((StatusCode::CREATED, Json(DeckWithCards { deck, cards })))
}

/// Create the empty default deck a new user starts with
async fn init_deck(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<(StatusCode, Json<DeckRecord>), ApiError> {
    let new_deck = NewDeck {
        user_id: auth_user.user_id.clone(),
        deck_name: String::new(),
        description: "Default Description".to_string(),
        tags: vec!["default".to_string()],
        is_shared: false,
        shared_with: Vec::new(),
        is_ai_generated: false,
    };

    let deck = repositories::deck::insert_deck(&state.pool, &new_deck).await?;

    tracing::info!(deck_id = %deck.id, user_id = %auth_user.user_id, "Default deck initialized");

    Ok((StatusCode::CREATED, Json(deck)))
}

async fn delete_deck(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(deck_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    load_owned_deck(&state.pool, deck_id, &auth_user.user_id).await?;

    if !repositories::deck::delete_deck(&state.pool, deck_id).await? {
        return Err(ApiError::NotFound(format!("Deck {deck_id} not found")));
    }

    tracing::info!(deck_id = %deck_id, user_id = %auth_user.user_id, "Deck deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_create_deck_request_defaults() {
        let payload: CreateDeckRequest =
            serde_json::from_value(json!({ "deck_name": "Animals" })).unwrap();

        assert!(payload.validate().is_ok());
        assert_eq!(payload.description, "");
        assert!(payload.tags.is_empty());
        assert!(!payload.is_shared);
        assert!(payload.cards.is_empty());
    }

    #[test]
    fn test_create_deck_request_rejects_blank_name() {
        let payload: CreateDeckRequest =
            serde_json::from_value(json!({ "deck_name": "   " })).unwrap();
        assert!(payload.validate().is_err());

        let payload: CreateDeckRequest =
            serde_json::from_value(json!({ "deck_name": "a".repeat(256) })).unwrap();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_create_deck_request_validates_cards() {
        let payload: CreateDeckRequest = serde_json::from_value(json!({
            "deck_name": "Animals",
            "cards": [
                { "word": "perro", "language": "Spanish", "sentence": "El perro corre." },
                { "word": "", "language": "Spanish", "sentence": "" }
            ]
        }))
        .unwrap();

        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_initial_card_language_rules() {
        let card = InitialCard {
            word: "chat".to_string(),
            language: "fr_FR".to_string(),
            sentence: "Le chat dort.".to_string(),
        };
        assert!(card.validate().is_err());

        let card = InitialCard {
            language: "French".to_string(),
            ..card
        };
        assert!(card.validate().is_ok());
    }
}
