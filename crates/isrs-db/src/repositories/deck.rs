use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{DeckRecord, NewDeck};

pub async fn insert_deck<'e, E>(executor: E, deck: &NewDeck) -> Result<DeckRecord, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO decks (id, user_id, deck_name, description, tags, is_shared, shared_with, is_ai_generated)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, deck_name, description, tags, is_shared, shared_with, is_ai_generated, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&deck.user_id)
    .bind(&deck.deck_name)
    .bind(&deck.description)
    .bind(&deck.tags)
    .bind(deck.is_shared)
    .bind(&deck.shared_with)
    .bind(deck.is_ai_generated)
    .fetch_one(executor)
    .await
}

pub async fn find_deck<'e, E>(executor: E, deck_id: Uuid) -> Result<Option<DeckRecord>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, user_id, deck_name, description, tags, is_shared, shared_with, is_ai_generated, created_at, updated_at
            FROM decks
            WHERE id = $1
        "#,
    )
    .bind(deck_id)
    .fetch_optional(executor)
    .await
}

pub async fn list_decks_for_user<'e, E>(
    executor: E,
    user_id: &str,
) -> Result<Vec<DeckRecord>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, user_id, deck_name, description, tags, is_shared, shared_with, is_ai_generated, created_at, updated_at
            FROM decks
            WHERE user_id = $1
            ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}

/// Delete a deck. Its cards, progress, sessions and shares go with it (ON DELETE CASCADE).
pub async fn delete_deck<'e, E>(executor: E, deck_id: Uuid) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM decks
            WHERE id = $1
        "#,
    )
    .bind(deck_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn touch_deck<'e, E>(executor: E, deck_id: Uuid) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE decks
            SET updated_at = NOW()
            WHERE id = $1
        "#,
    )
    .bind(deck_id)
    .execute(executor)
    .await?;
    Ok(())
}
