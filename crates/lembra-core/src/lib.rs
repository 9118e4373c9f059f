//! # Lembra Core
//!
//! Flashcard learning engine built around an SM-2 derived spaced repetition
//! scheduler:
//!
//! - **SM-2 hybrid scheduling**: failed cards re-queue in minutes within the
//!   session, passes graduate to day-scale intervals grown by a per-card
//!   ease factor
//! - **Pure scheduler**: (state, grade) -> new state, no I/O, no clock
//!   hidden inside (injectable for tests)
//! - **SQLite card store**: user -> deck -> card tree with an append-only
//!   grade audit log and per-day review aggregates, updated atomically with
//!   every review
//! - **Policy knobs**: the ease-update rule for "Good" grades and the easy
//!   bonus are named parameters, not hardcoded behavior
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lembra_core::{CardInput, Grade, Store};
//!
//! // Create store (uses default platform-specific location)
//! let store = Store::new(None)?;
//!
//! let deck = store.create_deck("alice", "Geografia")?;
//! let card = store.create_card(&deck.id, CardInput {
//!     question: "Capital do Brasil?".to_string(),
//!     answer: "Brasília".to_string(),
//!     ..Default::default()
//! })?;
//!
//! // Submit a review
//! let outcome = store.submit_review(&deck.id, &card.id, Grade::GOOD)?;
//! println!("next review at {}", outcome.card.scheduling.next_review_at);
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod card;
pub mod sm2;
pub mod stats;
pub mod store;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Card types
pub use card::{Card, CardInput, CardPatch, Deck, DeckExport, ExportedCard};

// SM-2 scheduler
pub use sm2::{
    EaseUpdate, Grade, GradeEntry, ScheduleError, SchedulingState, Sm2Parameters, Sm2Scheduler,
};

// Statistics
pub use stats::{GradeBucket, GradeTally, ReviewStats};

// Store layer
pub use store::{CardRepository, Result, ReviewOutcome, Store, StoreError};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        Card, CardInput, CardRepository, Deck, Grade, GradeBucket, Result, ReviewOutcome,
        ReviewStats, SchedulingState, Sm2Scheduler, Store, StoreError,
    };
}
