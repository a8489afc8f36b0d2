use chrono::{DateTime, Utc};
use isrs_srs::Card;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use uuid::Uuid;

/// Deck model - a named collection of cards owned by one user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DeckRecord {
    /// Unique deck identifier
    pub id: Uuid,
    /// Owner of the deck
    pub user_id: String,
    /// Deck name (max 255 chars)
    pub deck_name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub is_shared: bool,
    /// User IDs the deck is shared with
    pub shared_with: Vec<String>,
    /// Whether the cards were produced by the practice generator
    pub is_ai_generated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert struct for [`DeckRecord`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDeck {
    pub user_id: String,
    pub deck_name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub is_shared: bool,
    pub shared_with: Vec<String>,
    pub is_ai_generated: bool,
}

/// Stored form of an [`isrs_srs::Card`]
///
/// Every column is `NOT NULL` and the level/schedule invariants are enforced
/// by table constraints, so a row always converts to a valid card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CardRecord {
    /// Unique card identifier
    pub id: Uuid,
    /// Deck ID this card belongs to (indexed with next_review_at for the due queue)
    pub deck_id: Uuid,
    pub word: String,
    pub sentence: String,
    pub language: String,
    pub level: i32,
    pub created_at: DateTime<Utc>,
    pub last_reviewed_at: DateTime<Utc>,
    pub next_review_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CardRecord {
    /// Get the domain card held by this record.
    pub fn to_card(&self) -> Card {
        Card {
            deck_id: self.deck_id,
            word: self.word.clone(),
            sentence: self.sentence.clone(),
            language: self.language.clone(),
            level: self.level,
            created_at: self.created_at,
            last_reviewed_at: self.last_reviewed_at,
            next_review_at: self.next_review_at,
        }
    }
}

/// One answer recorded while practicing a deck
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProgressResult {
    pub card_id: Uuid,
    pub correct: bool,
    pub recorded_at: DateTime<Utc>,
}

/// All recorded answers of a user on a deck
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckProgress {
    pub user_id: String,
    pub deck_id: Uuid,
    pub results: Vec<ProgressResult>,
    pub total_correct: i64,
    pub total_incorrect: i64,
    /// When the first result was recorded
    pub created_at: DateTime<Utc>,
    /// When the last result was recorded
    pub last_updated: DateTime<Utc>,
}

/// Learning preferences, every field optional
///
/// Saving merges: `None` fields keep whatever is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserPreferences {
    pub motivation: Option<String>,
    /// "beginner", "intermediate" or "advanced"
    pub proficiency_level: Option<String>,
    pub learning_style: Option<String>,
    pub study_pattern: Option<String>,
    pub notifications: Option<bool>,
}

/// A card answered during a study session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewedCardEntry {
    pub card_id: Uuid,
    pub correct: bool,
    pub timestamp: DateTime<Utc>,
}

/// Study session log
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudySession {
    pub id: Uuid,
    pub user_id: String,
    pub deck_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Stored as JSONB
    pub cards_reviewed: Json<Vec<ReviewedCardEntry>>,
    pub total_correct: i32,
    pub total_incorrect: i32,
    pub created_at: DateTime<Utc>,
}

/// Insert struct for [`StudySession`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudySession {
    pub user_id: String,
    pub deck_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub cards_reviewed: Vec<ReviewedCardEntry>,
    pub total_correct: i32,
    pub total_incorrect: i32,
}

/// Record of a deck being shared with other users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SharedDeck {
    pub id: Uuid,
    pub deck_id: Uuid,
    pub shared_by_user_id: String,
    pub shared_to_user_ids: Vec<String>,
    /// "view" or "edit"
    pub access_level: String,
    pub shared_at: DateTime<Utc>,
}
