use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::SharedDeck;

pub async fn insert_shared_deck<'e, E>(
    executor: E,
    deck_id: Uuid,
    shared_by_user_id: &str,
    shared_to_user_ids: &[String],
    access_level: &str,
) -> Result<SharedDeck, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO shared_decks (id, deck_id, shared_by_user_id, shared_to_user_ids, access_level)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, deck_id, shared_by_user_id, shared_to_user_ids, access_level, shared_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(deck_id)
    .bind(shared_by_user_id)
    .bind(shared_to_user_ids)
    .bind(access_level)
    .fetch_one(executor)
    .await
}
