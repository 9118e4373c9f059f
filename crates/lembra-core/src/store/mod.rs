//! Store Module
//!
//! SQLite-based persistence for the user -> deck -> card tree, the
//! append-only grade log, and the per-day review aggregates. The scheduler
//! itself stays pure; this layer owns the read-modify-write cycle around it.

mod migrations;
mod sqlite;

pub use migrations::{apply_migrations, MIGRATIONS};
pub use sqlite::{Result, ReviewOutcome, Store, StoreError};

use crate::card::Card;
use crate::sm2::Grade;

/// The persistence seam the review endpoint depends on.
///
/// `review_card` is the composite operation: load the card, run the
/// scheduler, and persist the new state together with the grade-log entry,
/// the deck counter, and the daily aggregates, atomically. Keeping it behind
/// a trait keeps the scheduler testable without a database.
pub trait CardRepository {
    /// Load a card (with its full grade history) from a deck
    fn get_card(&self, deck_id: &str, card_id: &str) -> Result<Option<Card>>;

    /// Write a card's content and scheduling state back.
    ///
    /// The grade history is owned by the append-only log and is not
    /// rewritten here; it only grows through `review_card`.
    fn put_card(&self, card: &Card) -> Result<()>;

    /// Atomically apply one review: schedule, persist, and update the
    /// deck counter and daily aggregates in a single transaction
    fn review_card(&self, deck_id: &str, card_id: &str, grade: Grade) -> Result<ReviewOutcome>;
}
