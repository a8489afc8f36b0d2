//! SRS (Spaced Repetition System) library for isrs
//!
//! This crate holds the card entity and the level-based review scheduler.
//! It is pure: no storage, no network. Callers supply the sentence
//! regeneration capability and persist the cards it returns.

mod card;
mod error;
mod review;
mod schedule;

pub use card::{Card, INITIAL_LEVEL};
pub use error::SrsError;
pub use review::apply_review;
pub use schedule::{interval_days, max_review_at, next_review_at};
