use sqlx::{Executor, Postgres, types::Json};
use uuid::Uuid;

use crate::models::{NewStudySession, StudySession};

pub async fn insert_study_session<'e, E>(
    executor: E,
    session: &NewStudySession,
) -> Result<StudySession, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO study_sessions (id, user_id, deck_id, start_time, end_time, cards_reviewed, total_correct, total_incorrect)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, deck_id, start_time, end_time, cards_reviewed, total_correct, total_incorrect, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&session.user_id)
    .bind(session.deck_id)
    .bind(session.start_time)
    .bind(session.end_time)
    .bind(Json(&session.cards_reviewed))
    .bind(session.total_correct)
    .bind(session.total_incorrect)
    .fetch_one(executor)
    .await
}

pub async fn list_study_sessions_for_user<'e, E>(
    executor: E,
    user_id: &str,
) -> Result<Vec<StudySession>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, user_id, deck_id, start_time, end_time, cards_reviewed, total_correct, total_incorrect, created_at
            FROM study_sessions
            WHERE user_id = $1
            ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}
