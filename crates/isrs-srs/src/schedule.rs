use chrono::{DateTime, Duration, Utc};

use crate::SrsError;

/// Highest level with a fixed interval; every level above it doubles.
const LAST_FIXED_LEVEL: i32 = 4;

/// Interval of [`LAST_FIXED_LEVEL`], the base of the doubling chain.
const LAST_FIXED_INTERVAL_DAYS: i64 = 35;

/// Get the number of days until the next review for a card at `level`.
///
/// # Schedule
///
/// * Level 1: 1 day
/// * Level 2: 7 days
/// * Level 3: 16 days
/// * Level 4: 35 days
/// * Level n ≥ 5: the level 4 interval doubled once per level above 4,
///   i.e. `35 × 2^(n-4)` (70, 140, 280, ...)
///
/// # Errors
///
/// * [`SrsError::InvalidLevel`] if `level < 1`. Out-of-range levels are a
///   contract violation and are never clamped.
/// * [`SrsError::ScheduleOverflow`] if the interval does not fit in an `i64`.
pub fn interval_days(level: i32) -> Result<i64, SrsError> {
    match level {
        l if l < 1 => Err(SrsError::InvalidLevel(l)),
        1 => Ok(1),
        2 => Ok(7),
        3 => Ok(16),
        4 => Ok(LAST_FIXED_INTERVAL_DAYS),
        n => {
            let doublings = (n - LAST_FIXED_LEVEL).unsigned_abs();
            2_i64
                .checked_pow(doublings)
                .and_then(|factor| factor.checked_mul(LAST_FIXED_INTERVAL_DAYS))
                .ok_or(SrsError::ScheduleOverflow { level: n })
        }
    }
}

/// Latest date a review is ever scheduled for, 9999-12-31T23:59:59Z.
///
/// Far-out schedules are capped here so a card stays reviewable at any level.
pub fn max_review_at() -> DateTime<Utc> {
    DateTime::from_timestamp(253_402_300_799, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Compute when a card at `level`, reviewed at `from`, becomes due again.
///
/// Dates past [`max_review_at`], including intervals too large for an `i64`,
/// are capped at it.
///
/// # Errors
///
/// [`SrsError::InvalidLevel`] if `level < 1`.
pub fn next_review_at(level: i32, from: DateTime<Utc>) -> Result<DateTime<Utc>, SrsError> {
    let cap = max_review_at();

    let next = match interval_days(level) {
        Ok(days) => Duration::try_days(days)
            .and_then(|interval| from.checked_add_signed(interval))
            .unwrap_or(cap),
        Err(SrsError::ScheduleOverflow { .. }) => cap,
        Err(e) => return Err(e),
    };

    Ok(next.min(cap))
}
