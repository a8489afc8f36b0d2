use thiserror::Error;

/// Errors raised by the scheduler.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SrsError {
    /// A level below 1 reached the scheduler. Levels start at 1.
    #[error("Invalid level: {0}")]
    InvalidLevel(i32),
    /// The sentence regeneration capability failed or timed out.
    #[error("Sentence generation unavailable: {0}")]
    UpstreamUnavailable(String),
    /// The interval for this level no longer fits in the day or timestamp range.
    #[error("Review schedule overflows at level {level}")]
    ScheduleOverflow { level: i32 },
}
