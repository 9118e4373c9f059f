//! Card module - Core types and data structures
//!
//! A card is an opaque question/answer payload plus the scheduling state the
//! SM-2 engine manages. How the content was produced (typed by hand, AI
//! generated, extracted from a PDF) is invisible here: every ingestion path
//! creates the same record with the same fresh scheduling state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::sm2::SchedulingState;

// ============================================================================
// CARD
// ============================================================================

/// A flashcard: content payload plus SM-2 scheduling state.
///
/// The scheduling fields are flattened into the card so the JSON shape stays
/// flat (`repetitions`, `intervalDays`, `easeFactor`, ... at the top level),
/// matching the wire format of the host application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// Owning deck
    pub deck_id: String,
    /// Question text (opaque to the scheduler)
    pub question: String,
    /// Answer text (opaque to the scheduler)
    pub answer: String,
    /// Tags for filtering
    #[serde(default)]
    pub tags: Vec<String>,
    /// Optional topic/category within the deck
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// When the card was created
    pub created_at: DateTime<Utc>,
    /// When the card content was last modified
    pub updated_at: DateTime<Utc>,
    /// SM-2 scheduling state, mutated only through the scheduler
    #[serde(flatten)]
    pub scheduling: SchedulingState,
}

impl Card {
    /// Create a new card in `deck_id` with default scheduling state
    /// (due immediately, ease 2.5)
    pub fn new(deck_id: impl Into<String>, input: CardInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            deck_id: deck_id.into(),
            question: input.question,
            answer: input.answer,
            tags: input.tags,
            category: input.category,
            created_at: now,
            updated_at: now,
            scheduling: SchedulingState::new_at(now),
        }
    }

    /// Whether the card is currently eligible for review
    pub fn is_due(&self) -> bool {
        self.scheduling.is_due_at(Utc::now())
    }
}

// ============================================================================
// INPUT TYPES
// ============================================================================

/// Input for creating a new card.
///
/// Uses `deny_unknown_fields` so callers cannot smuggle scheduling fields in
/// through the content payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CardInput {
    /// Question text
    pub question: String,
    /// Answer text
    pub answer: String,
    /// Tags for filtering
    #[serde(default)]
    pub tags: Vec<String>,
    /// Optional topic/category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Partial content update for an existing card.
///
/// `None` fields are left unchanged. Scheduling state is deliberately not
/// reachable from here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CardPatch {
    /// New question text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    /// New answer text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    /// Replacement tag list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// New category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

// ============================================================================
// DECK
// ============================================================================

/// A deck of cards belonging to one user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// Owning user (opaque key; authentication lives elsewhere)
    pub user_id: String,
    /// Display name
    pub name: String,
    /// Total reviews submitted against this deck
    pub reviewed_count: i64,
    /// When the deck was created
    pub created_at: DateTime<Utc>,
}

impl Deck {
    /// Create a new empty deck for `user_id`
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            name: name.into(),
            reviewed_count: 0,
            created_at: Utc::now(),
        }
    }
}

// ============================================================================
// EXPORT / IMPORT
// ============================================================================

/// Content-only snapshot of a card for export.
///
/// Scheduling state is intentionally dropped: an imported card starts
/// learning from scratch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedCard {
    /// Question text
    pub question: String,
    /// Answer text
    pub answer: String,
    /// Tags for filtering
    #[serde(default)]
    pub tags: Vec<String>,
    /// Optional topic/category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl From<&Card> for ExportedCard {
    fn from(card: &Card) -> Self {
        Self {
            question: card.question.clone(),
            answer: card.answer.clone(),
            tags: card.tags.clone(),
            category: card.category.clone(),
        }
    }
}

/// A portable deck snapshot: name plus content-only cards
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckExport {
    /// Deck display name
    pub name: String,
    /// Content-only cards
    pub cards: Vec<ExportedCard>,
}

// ============================================================================
// TESTS
// ============================================================================
