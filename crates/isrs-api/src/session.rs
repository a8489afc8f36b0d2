use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::post,
};
use chrono::{DateTime, Utc};
use isrs_db::{
    models::{NewStudySession, ReviewedCardEntry, StudySession},
    repositories,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, auth::AuthUser, deck::load_owned_deck, error::ApiError};

/// Create the study session routes
pub fn routes() -> Router<ApiState> {
    Router::new().route(
        "/study-sessions",
        post(add_study_session).get(list_study_sessions),
    )
}

#[derive(Debug, Deserialize)]
pub struct ReviewedCard {
    pub card_id: Uuid,
    pub correct: bool,
}

#[derive(Debug, Deserialize)]
pub struct StudySessionRequest {
    pub deck_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub cards_reviewed: Vec<ReviewedCard>,
    /// Counted from `cards_reviewed` when absent
    pub total_correct: Option<i32>,
    pub total_incorrect: Option<i32>,
}

impl StudySessionRequest {
    /// Check the session window and totals, then stamp every entry with `now`
    fn into_new_session(
        self,
        user_id: String,
        now: DateTime<Utc>,
    ) -> Result<NewStudySession, ApiError> {
        if self.end_time < self.start_time {
            return Err(ApiError::Validation(
                "end_time must not be before start_time".to_string(),
            ));
        }

        let counted_correct = self.cards_reviewed.iter().filter(|c| c.correct).count();
        let counted_incorrect = self.cards_reviewed.len() - counted_correct;

        let total_correct = match self.total_correct {
            Some(total) => total,
            None => i32::try_from(counted_correct)
                .map_err(|_| ApiError::Validation("Too many reviewed cards".to_string()))?,
        };
        let total_incorrect = match self.total_incorrect {
            Some(total) => total,
            None => i32::try_from(counted_incorrect)
                .map_err(|_| ApiError::Validation("Too many reviewed cards".to_string()))?,
        };

        if total_correct < 0 || total_incorrect < 0 {
            return Err(ApiError::Validation(
                "Totals cannot be negative".to_string(),
            ));
        }

        let cards_reviewed = self
            .cards_reviewed
            .into_iter()
            .map(|c| ReviewedCardEntry {
                card_id: c.card_id,
                correct: c.correct,
                timestamp: now,
            })
            .collect();

        Ok(NewStudySession {
            user_id,
            deck_id: self.deck_id,
            start_time: self.start_time,
            end_time: self.end_time,
            cards_reviewed,
            total_correct,
            total_incorrect,
        })
    }
}

async fn add_study_session(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<StudySessionRequest>,
) -> Result<(StatusCode, Json<StudySession>), ApiError> {
    let new_session = payload.into_new_session(auth_user.user_id.clone(), Utc::now())?;
    load_owned_deck(&state.pool, new_session.deck_id, &auth_user.user_id).await?;

    let session = repositories::session::insert_study_session(&state.pool, &new_session).await?;

    tracing::info!(
        session_id = %session.id,
        deck_id = %session.deck_id,
        cards = session.cards_reviewed.len(),
        "Study session logged"
    );

    Ok((StatusCode::CREATED, Json(session)))
}

async fn list_study_sessions(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<Vec<StudySession>>, ApiError> {
    let sessions =
        repositories::session::list_study_sessions_for_user(&state.pool, &auth_user.user_id)
            .await?;

    Ok(Json(sessions))
}
