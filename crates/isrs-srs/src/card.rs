use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Level every new card starts at.
pub const INITIAL_LEVEL: i32 = 1;

/// One learnable word/sentence pair and its review state.
///
/// A card only changes through [`Card::reviewed`] (or [`crate::apply_review`]),
/// which returns a new value. `created_at` is never touched after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Deck this card belongs to
    pub deck_id: Uuid,
    /// Target-language word being learned
    pub word: String,
    /// Example sentence containing `word`, written in `language`
    pub sentence: String,
    /// Language the sentence is written in
    pub language: String,
    /// Mastery level, starts at [`INITIAL_LEVEL`] and only ever increases
    pub level: i32,
    /// When the card was created
    pub created_at: DateTime<Utc>,
    /// When the card was last reviewed
    pub last_reviewed_at: DateTime<Utc>,
    /// The card should not be presented again before this time
    pub next_review_at: DateTime<Utc>,
}

impl Card {
    /// Create a new card, due one day from now.
    ///
    /// No validation happens here; the boundary layer is responsible for
    /// rejecting empty words or languages.
    pub fn new(
        deck_id: Uuid,
        word: impl Into<String>,
        language: impl Into<String>,
        sentence: impl Into<String>,
    ) -> Self {
        Self::new_at(deck_id, word, language, sentence, Utc::now())
    }

    /// Create a new card as if it was created at `now`.
    pub fn new_at(
        deck_id: Uuid,
        word: impl Into<String>,
        language: impl Into<String>,
        sentence: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            deck_id,
            word: word.into(),
            sentence: sentence.into(),
            language: language.into(),
            level: INITIAL_LEVEL,
            created_at: now,
            last_reviewed_at: now,
            next_review_at: now + Duration::days(1),
        }
    }
}
