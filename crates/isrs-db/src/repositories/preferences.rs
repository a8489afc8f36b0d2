use sqlx::{Executor, Postgres};

use crate::models::UserPreferences;

/// Create or merge a user's preferences. Fields left `None` keep their stored value.
pub async fn upsert_preferences<'e, E>(
    executor: E,
    user_id: &str,
    preferences: &UserPreferences,
) -> Result<UserPreferences, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO user_preferences (user_id, motivation, proficiency_level, learning_style, study_pattern, notifications)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id)
            DO UPDATE SET
                motivation = COALESCE(EXCLUDED.motivation, user_preferences.motivation),
                proficiency_level = COALESCE(EXCLUDED.proficiency_level, user_preferences.proficiency_level),
                learning_style = COALESCE(EXCLUDED.learning_style, user_preferences.learning_style),
                study_pattern = COALESCE(EXCLUDED.study_pattern, user_preferences.study_pattern),
                notifications = COALESCE(EXCLUDED.notifications, user_preferences.notifications),
                updated_at = NOW()
            RETURNING motivation, proficiency_level, learning_style, study_pattern, notifications
        "#,
    )
    .bind(user_id)
    .bind(&preferences.motivation)
    .bind(&preferences.proficiency_level)
    .bind(&preferences.learning_style)
    .bind(&preferences.study_pattern)
    .bind(preferences.notifications)
    .fetch_one(executor)
    .await
}

pub async fn find_preferences<'e, E>(
    executor: E,
    user_id: &str,
) -> Result<Option<UserPreferences>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT motivation, proficiency_level, learning_style, study_pattern, notifications
            FROM user_preferences
            WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

pub async fn upsert_selected_language<'e, E>(
    executor: E,
    user_id: &str,
    language: &str,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO user_settings (user_id, selected_language)
            VALUES ($1, $2)
            ON CONFLICT (user_id)
            DO UPDATE SET
                selected_language = EXCLUDED.selected_language,
                updated_at = NOW()
        "#,
    )
    .bind(user_id)
    .bind(language)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn find_selected_language<'e, E>(
    executor: E,
    user_id: &str,
) -> Result<Option<String>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let language: Option<Option<String>> = sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT selected_language
            FROM user_settings
            WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await?;
    Ok(language.flatten())
}
