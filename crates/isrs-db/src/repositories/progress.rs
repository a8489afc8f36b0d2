use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{DeckProgress, ProgressResult};

pub async fn insert_progress_result<'e, E>(
    executor: E,
    user_id: &str,
    deck_id: Uuid,
    card_id: Uuid,
    correct: bool,
) -> Result<ProgressResult, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO progress_results (user_id, deck_id, card_id, correct)
            VALUES ($1, $2, $3, $4)
            RETURNING card_id, correct, recorded_at
        "#,
    )
    .bind(user_id)
    .bind(deck_id)
    .bind(card_id)
    .bind(correct)
    .fetch_one(executor)
    .await
}

/// Get every result a user recorded on a deck, oldest first.
///
/// Returns `None` when nothing was recorded yet.
pub async fn get_deck_progress<'e, E>(
    executor: E,
    user_id: &str,
    deck_id: Uuid,
) -> Result<Option<DeckProgress>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let results: Vec<ProgressResult> = sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT card_id, correct, recorded_at
            FROM progress_results
            WHERE user_id = $1 AND deck_id = $2
            ORDER BY recorded_at, id
        "#,
    )
    .bind(user_id)
    .bind(deck_id)
    .fetch_all(executor)
    .await?;

    let (Some(first), Some(last)) = (results.first(), results.last()) else {
        return Ok(None);
    };
    let created_at = first.recorded_at;
    let last_updated = last.recorded_at;

    let total_correct = results.iter().filter(|r| r.correct).count() as i64;
    let total_incorrect = results.len() as i64 - total_correct;

    Ok(Some(DeckProgress {
        user_id: user_id.to_string(),
        deck_id,
        results,
        total_correct,
        total_incorrect,
        created_at,
        last_updated,
    }))
}
