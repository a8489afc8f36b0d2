use chrono::{DateTime, Utc};
use isrs_srs::Card;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::CardRecord;

pub async fn insert_card<'e, E>(executor: E, card: &Card) -> Result<CardRecord, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO cards (id, deck_id, word, sentence, language, level, created_at, last_reviewed_at, next_review_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, deck_id, word, sentence, language, level, created_at, last_reviewed_at, next_review_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(card.deck_id)
    .bind(&card.word)
    .bind(&card.sentence)
    .bind(&card.language)
    .bind(card.level)
    .bind(card.created_at)
    .bind(card.last_reviewed_at)
    .bind(card.next_review_at)
    .fetch_one(executor)
    .await
}

pub async fn list_cards_for_deck<'e, E>(
    executor: E,
    deck_id: Uuid,
) -> Result<Vec<CardRecord>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, deck_id, word, sentence, language, level, created_at, last_reviewed_at, next_review_at, updated_at
            FROM cards
            WHERE deck_id = $1
            ORDER BY created_at, id
        "#,
    )
    .bind(deck_id)
    .fetch_all(executor)
    .await
}

/// Cards of a deck that are due at `now`, most overdue first.
pub async fn list_due_cards<'e, E>(
    executor: E,
    deck_id: Uuid,
    now: DateTime<Utc>,
    limit: i64,
) -> Result<Vec<CardRecord>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, deck_id, word, sentence, language, level, created_at, last_reviewed_at, next_review_at, updated_at
            FROM cards
            WHERE deck_id = $1 AND next_review_at <= $2
            ORDER BY next_review_at
            LIMIT $3
        "#,
    )
    .bind(deck_id)
    .bind(now)
    .bind(limit)
    .fetch_all(executor)
    .await
}

/// Find a card through its deck's owner, so cards of other users look absent.
pub async fn find_card_for_user<'e, E>(
    executor: E,
    card_id: Uuid,
    user_id: &str,
) -> Result<Option<CardRecord>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT c.id, c.deck_id, c.word, c.sentence, c.language, c.level,
                   c.created_at, c.last_reviewed_at, c.next_review_at, c.updated_at
            FROM cards c
            JOIN decks d ON d.id = c.deck_id
            WHERE c.id = $1 AND d.user_id = $2
        "#,
    )
    .bind(card_id)
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

/// Persist a reviewed card.
///
/// The write only applies if the stored level still equals `expected_level`,
/// which serializes concurrent reviews of the same card: the loser gets `None`
/// and nothing is written.
pub async fn update_reviewed_card<'e, E>(
    executor: E,
    card_id: Uuid,
    expected_level: i32,
    reviewed: &Card,
) -> Result<Option<CardRecord>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE cards
            SET sentence = $3,
                level = $4,
                last_reviewed_at = $5,
                next_review_at = $6,
                updated_at = NOW()
            WHERE id = $1 AND level = $2
            RETURNING id, deck_id, word, sentence, language, level, created_at, last_reviewed_at, next_review_at, updated_at
        "#,
    )
    .bind(card_id)
    .bind(expected_level)
    .bind(&reviewed.sentence)
    .bind(reviewed.level)
    .bind(reviewed.last_reviewed_at)
    .bind(reviewed.next_review_at)
    .fetch_optional(executor)
    .await
}
