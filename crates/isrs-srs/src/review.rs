use std::{fmt::Display, future::Future};

use chrono::{DateTime, Utc};

use crate::{Card, SrsError, next_review_at};

impl Card {
    /// Get the state of this card after a successful review at `now`.
    ///
    /// The interval is computed from the level *before* the increment, so a
    /// level 1 card reviewed now is due again in 1 day and moves to level 2.
    /// `deck_id`, `word`, `language` and `created_at` are carried over as is.
    ///
    /// `now` is never allowed to move `last_reviewed_at` backwards.
    pub fn reviewed(&self, now: DateTime<Utc>, sentence: String) -> Result<Self, SrsError> {
        let reviewed_at = now.max(self.last_reviewed_at);
        let next_review_at = next_review_at(self.level, reviewed_at)?;
        let level = self
            .level
            .checked_add(1)
            .ok_or(SrsError::ScheduleOverflow { level: self.level })?;

        Ok(Self {
            deck_id: self.deck_id,
            word: self.word.clone(),
            sentence,
            language: self.language.clone(),
            level,
            created_at: self.created_at,
            last_reviewed_at: reviewed_at,
            next_review_at,
        })
    }
}

/// Apply a review to `card`.
///
/// `regenerate_sentence` is called once with `(language, word)` to produce the
/// card's next example sentence. An empty sentence is accepted as is.
///
/// The input card is never modified: on success the caller gets the new state
/// to persist, on failure nothing has changed and the review can be retried
/// without double-incrementing the level.
///
/// # Errors
///
/// The schedule is worked out before the generator runs, so a review that
/// cannot be scheduled never spends an upstream call.
///
/// * [`SrsError::InvalidLevel`] if the card's level is below 1.
/// * [`SrsError::ScheduleOverflow`] if the level is already `i32::MAX`.
/// * [`SrsError::UpstreamUnavailable`] if `regenerate_sentence` fails.
pub async fn apply_review<F, Fut, E>(card: &Card, regenerate_sentence: F) -> Result<Card, SrsError>
where
    F: FnOnce(String, String) -> Fut,
    Fut: Future<Output = Result<String, E>>,
    E: Display,
{
    let mut next = card.reviewed(Utc::now(), String::new())?;

    next.sentence = regenerate_sentence(card.language.clone(), card.word.clone())
        .await
        .map_err(|e| SrsError::UpstreamUnavailable(e.to_string()))?;

    Ok(next)
}
