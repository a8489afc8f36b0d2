use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::Utc;
use isrs_db::{models::CardRecord, repositories};
use isrs_srs::Card;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::review::review_card;
use crate::{
    ApiState,
    auth::AuthUser,
    deck::load_owned_deck,
    error::ApiError,
    generation::{
        with_timeout,
        practice::{Proficiency, Scenario, generate_practice_sentences},
    },
    metrics::record_generation_event,
    middleware::rate_limit::apply_generation_rate_limit,
    validation::{validate_language, validate_not_blank, validate_proficiency},
};

const DEFAULT_DUE_LIMIT: i64 = 50;
const MAX_DUE_LIMIT: i64 = 200;

/// Create the card routes
pub fn routes() -> Router<ApiState> {
    let generation = apply_generation_rate_limit(
        Router::new().route("/decks/{deck_id}/cards/generate", post(generate_cards)),
    );

    Router::new()
        .route("/decks/{deck_id}/cards", get(list_cards).post(add_card))
        .route("/decks/{deck_id}/cards/due", get(list_due_cards))
        .route("/cards/{card_id}/review", post(review_card))
        .merge(generation)
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddCardRequest {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub word: String,
    #[validate(custom(function = "validate_language"))]
    pub language: String,
    /// Generated from `word` when absent
    #[validate(length(max = 1000))]
    pub sentence: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateCardsRequest {
    /// English word to practice, translated into `language` first
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub answer_word: String,
    #[validate(custom(function = "validate_language"))]
    pub language: String,
    #[validate(custom(function = "validate_proficiency"))]
    pub proficiency_level: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DueQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct PracticeCard {
    pub scenario: Scenario,
    pub situation: &'static str,
    /// English translation of the card's sentence
    pub answer_sentence: String,
    pub card: CardRecord,
}

#[derive(Debug, Serialize)]
pub struct GeneratedCards {
    pub answer_word: String,
    pub target_word: String,
    pub proficiency_level: Proficiency,
    pub cards: Vec<PracticeCard>,
}

async fn list_cards(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(deck_id): Path<Uuid>,
) -> Result<Json<Vec<CardRecord>>, ApiError> {
    load_owned_deck(&state.pool, deck_id, &auth_user.user_id).await?;

    let cards = repositories::card::list_cards_for_deck(&state.pool, deck_id).await?;

    Ok(Json(cards))
}

async fn list_due_cards(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(deck_id): Path<Uuid>,
    Query(query): Query<DueQuery>,
) -> Result<Json<Vec<CardRecord>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_DUE_LIMIT);
    if !(1..=MAX_DUE_LIMIT).contains(&limit) {
        return Err(ApiError::Validation(format!(
            "limit must be between 1 and {MAX_DUE_LIMIT}"
        )));
    }

    load_owned_deck(&state.pool, deck_id, &auth_user.user_id).await?;

    let cards =
        repositories::card::list_due_cards(&state.pool, deck_id, Utc::now(), limit).await?;

    Ok(Json(cards))
}

async fn add_card(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(deck_id): Path<Uuid>,
    Json(payload): Json<AddCardRequest>,
) -> Result<(StatusCode, Json<CardRecord>), ApiError> {
    payload.validate()?;
    load_owned_deck(&state.pool, deck_id, &auth_user.user_id).await?;

    let word = payload.word.trim();
    let language = payload.language.trim();

    let sentence = match payload.sentence {
        Some(sentence) => sentence,
        None => {
            let generated = with_timeout(
                state.generation_timeout,
                state.text_generator.generate_sentence(language, word),
            )
            .await;
            record_generation_event("sentence", generated.is_ok());
            generated?
        }
    };

    let card = Card::new(deck_id, word, language, sentence);

    let mut tx = state.pool.begin().await?;
    let record = repositories::card::insert_card(&mut *tx, &card).await?;
    repositories::deck::touch_deck(&mut *tx, deck_id).await?;
    tx.commit().await?;

    tracing::info!(card_id = %record.id, deck_id = %deck_id, "Card added");

    Ok((StatusCode::CREATED, Json(record)))
}

/// Translate an English word and store one practice card per usable scenario sentence
async fn generate_cards(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(deck_id): Path<Uuid>,
    Json(payload): Json<GenerateCardsRequest>,
) -> Result<(StatusCode, Json<GeneratedCards>), ApiError> {
    payload.validate()?;
    load_owned_deck(&state.pool, deck_id, &auth_user.user_id).await?;

    let proficiency = match payload.proficiency_level.as_deref() {
        Some(level) => level.parse().map_err(ApiError::Validation)?,
        None => stored_proficiency(&state, &auth_user.user_id).await?,
    };

    let answer_word = payload.answer_word.trim().to_string();
    let language = payload.language.trim();

    let translated = with_timeout(
        state.generation_timeout,
        state
            .text_generator
            .translate(&answer_word, "English", language),
    )
    .await;
    record_generation_event("translation", translated.is_ok());
    let target_word = translated?;

    if target_word.is_empty() {
        return Err(ApiError::UpstreamUnavailable(
            "Translation came back empty".to_string(),
        ));
    }

    let sentences = with_timeout(state.generation_timeout, async {
        Ok(generate_practice_sentences(
            state.text_generator.as_ref(),
            &target_word,
            language,
            proficiency,
        )
        .await)
    })
    .await;
    record_generation_event("practice", sentences.is_ok());
    let sentences = sentences?;

    let mut tx = state.pool.begin().await?;
    let mut cards = Vec::with_capacity(sentences.len());
    for practice in sentences {
        let card = Card::new(deck_id, target_word.as_str(), language, practice.sentence);
        let record = repositories::card::insert_card(&mut *tx, &card).await?;
        cards.push(PracticeCard {
            scenario: practice.scenario,
            situation: practice.situation,
            answer_sentence: practice.answer_sentence,
            card: record,
        });
    }
    if !cards.is_empty() {
        repositories::deck::touch_deck(&mut *tx, deck_id).await?;
    }
    tx.commit().await?;

    tracing::info!(
        deck_id = %deck_id,
        user_id = %auth_user.user_id,
        target_word = %target_word,
        cards = cards.len(),
        "Practice cards generated"
    );

    Ok((
        StatusCode::CREATED,
        Json(GeneratedCards {
            answer_word,
            target_word,
            proficiency_level: proficiency,
            cards,
        }),
    ))
}

/// Proficiency from saved preferences, beginner when unset or unrecognized
async fn stored_proficiency(state: &ApiState, user_id: &str) -> Result<Proficiency, ApiError> {
    let preferences = repositories::preferences::find_preferences(&state.pool, user_id).await?;

    Ok(preferences
        .and_then(|p| p.proficiency_level)
        .and_then(|level| level.parse().ok())
        .unwrap_or_default())
}
