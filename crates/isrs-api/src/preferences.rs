//! User preferences and the selected study language.

use axum::{Json, Router, extract::State, routing::put};
use isrs_db::{models::UserPreferences, repositories};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    ApiState,
    auth::AuthUser,
    error::ApiError,
    validation::{validate_language, validate_proficiency},
};

/// Create the preference routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/preferences", put(save_preferences).get(get_preferences))
        .route(
            "/settings/language",
            put(save_selected_language).get(get_selected_language),
        )
}

/// Absent fields keep their stored value
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PreferencesRequest {
    #[validate(length(max = 500))]
    pub motivation: Option<String>,
    #[validate(custom(function = "validate_proficiency"))]
    pub proficiency_level: Option<String>,
    #[validate(length(max = 100))]
    pub learning_style: Option<String>,
    #[validate(length(max = 100))]
    pub study_pattern: Option<String>,
    pub notifications: Option<bool>,
}

impl From<PreferencesRequest> for UserPreferences {
    fn from(request: PreferencesRequest) -> Self {
        Self {
            motivation: request.motivation,
            proficiency_level: request.proficiency_level,
            learning_style: request.learning_style,
            study_pattern: request.study_pattern,
            notifications: request.notifications,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub exists: bool,
    pub preferences: Option<UserPreferences>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SelectedLanguageRequest {
    #[validate(custom(function = "validate_language"))]
    pub language: String,
}

#[derive(Debug, Serialize)]
pub struct SelectedLanguageResponse {
    pub selected_language: Option<String>,
}

async fn save_preferences(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<PreferencesRequest>,
) -> Result<Json<PreferencesResponse>, ApiError> {
    payload.validate()?;

    let preferences = repositories::preferences::upsert_preferences(
        &state.pool,
        &auth_user.user_id,
        &payload.into(),
    )
    .await?;

    tracing::debug!(user_id = %auth_user.user_id, "Preferences saved");

    Ok(Json(PreferencesResponse {
        exists: true,
        preferences: Some(preferences),
    }))
}

async fn get_preferences(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<PreferencesResponse>, ApiError> {
    let preferences =
        repositories::preferences::find_preferences(&state.pool, &auth_user.user_id).await?;

    Ok(Json(PreferencesResponse {
        exists: preferences.is_some(),
        preferences,
    }))
}

async fn save_selected_language(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<SelectedLanguageRequest>,
) -> Result<Json<SelectedLanguageResponse>, ApiError> {
    payload.validate()?;

    let language = payload.language.trim();
    repositories::preferences::upsert_selected_language(
        &state.pool,
        &auth_user.user_id,
        language,
    )
    .await?;

    Ok(Json(SelectedLanguageResponse {
        selected_language: Some(language.to_string()),
    }))
}

async fn get_selected_language(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<SelectedLanguageResponse>, ApiError> {
    let selected_language =
        repositories::preferences::find_selected_language(&state.pool, &auth_user.user_id)
            .await?;

    Ok(Json(SelectedLanguageResponse { selected_language }))
}
