//! SQLite Store Implementation
//!
//! Persistence collaborator for the review scheduler: the user -> deck ->
//! card tree, the append-only grade log, and daily review aggregates.
//!
//! The review submission path serializes read-modify-write per card inside a
//! single writer transaction, replacing the last-write-wins behavior of a
//! shared mutable file store.

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::PathBuf;
use std::sync::Mutex;

use crate::card::{Card, CardInput, CardPatch, Deck, DeckExport, ExportedCard};
use crate::sm2::{Grade, GradeEntry, ScheduleError, SchedulingState, Sm2Scheduler};
use crate::stats::{day_key, GradeBucket, GradeTally, ReviewStats};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Store error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// Deck or card not found
    #[error("Not found: {0}")]
    NotFound(String),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Scheduler rejected the input
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),
    /// Initialization error
    #[error("Initialization error: {0}")]
    Init(String),
}

/// Store result type
pub type Result<T> = std::result::Result<T, StoreError>;

/// Result of a submitted review: the rescheduled card plus the deck's new
/// lifetime review counter
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOutcome {
    /// The card with its updated scheduling state
    pub card: Card,
    /// The owning deck's total reviews after this one
    pub reviewed_count: i64,
}

// ============================================================================
// STORE
// ============================================================================

/// SQLite-backed card store.
///
/// Uses separate reader/writer connections for interior mutability. All
/// methods take `&self` (not `&mut self`), making Store `Send + Sync` so the
/// endpoint layer can share it behind an `Arc`.
pub struct Store {
    writer: Mutex<Connection>,
    reader: Mutex<Connection>,
    scheduler: Sm2Scheduler,
}

impl Store {
    /// Apply PRAGMAs to a connection
    fn configure_connection(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;",
        )?;
        Ok(())
    }

    /// Create new store instance with the default scheduler parameters
    pub fn new(db_path: Option<PathBuf>) -> Result<Self> {
        Self::with_scheduler(db_path, Sm2Scheduler::default())
    }

    /// Create new store instance with a custom scheduler (e.g. the classic
    /// SM-2 ease policy)
    pub fn with_scheduler(db_path: Option<PathBuf>, scheduler: Sm2Scheduler) -> Result<Self> {
        let path = match db_path {
            Some(p) => p,
            None => {
                let proj_dirs = ProjectDirs::from("com", "lembra", "core").ok_or_else(|| {
                    StoreError::Init("Could not determine project directories".to_string())
                })?;

                let data_dir = proj_dirs.data_dir();
                std::fs::create_dir_all(data_dir)?;
                // Restrict directory permissions to owner-only on Unix
                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    let perms = std::fs::Permissions::from_mode(0o700);
                    let _ = std::fs::set_permissions(data_dir, perms);
                }
                data_dir.join("lembra.db")
            }
        };

        let writer_conn = Connection::open(&path)?;

        #[cfg(unix)]
        if path.exists() {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(&path, perms);
        }

        Self::configure_connection(&writer_conn)?;

        // Apply migrations on writer only
        super::migrations::apply_migrations(&writer_conn)?;

        // Open reader connection to same path
        let reader_conn = Connection::open(&path)?;
        Self::configure_connection(&reader_conn)?;

        Ok(Self {
            writer: Mutex::new(writer_conn),
            reader: Mutex::new(reader_conn),
            scheduler,
        })
    }

    /// The scheduler this store reviews with
    pub fn scheduler(&self) -> &Sm2Scheduler {
        &self.scheduler
    }

    // ========================================================================
    // DECKS
    // ========================================================================

    /// Create an empty deck for `user_id`
    pub fn create_deck(&self, user_id: &str, name: &str) -> Result<Deck> {
        let deck = Deck::new(user_id, name);

        let writer = self
            .writer
            .lock()
            .map_err(|_| StoreError::Init("Writer lock poisoned".into()))?;
        writer.execute(
            "INSERT INTO decks (id, user_id, name, reviewed_count, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                deck.id,
                deck.user_id,
                deck.name,
                deck.reviewed_count,
                deck.created_at.to_rfc3339(),
            ],
        )?;

        Ok(deck)
    }

    /// Get a deck by id
    pub fn get_deck(&self, deck_id: &str) -> Result<Option<Deck>> {
        let reader = self
            .reader
            .lock()
            .map_err(|_| StoreError::Init("Reader lock poisoned".into()))?;
        let deck = reader
            .query_row(
                "SELECT id, user_id, name, reviewed_count, created_at
                 FROM decks WHERE id = ?1",
                params![deck_id],
                Self::row_to_deck,
            )
            .optional()?;
        Ok(deck)
    }

    /// List all decks owned by `user_id`, oldest first
    pub fn list_decks(&self, user_id: &str) -> Result<Vec<Deck>> {
        let reader = self
            .reader
            .lock()
            .map_err(|_| StoreError::Init("Reader lock poisoned".into()))?;
        let mut stmt = reader.prepare(
            "SELECT id, user_id, name, reviewed_count, created_at
             FROM decks WHERE user_id = ?1 ORDER BY created_at ASC",
        )?;
        let decks = stmt.query_map(params![user_id], Self::row_to_deck)?;

        let mut result = Vec::new();
        for deck in decks {
            result.push(deck?);
        }
        Ok(result)
    }

    /// Delete a deck and (via cascade) all of its cards and their history.
    /// Returns whether a deck was removed.
    pub fn delete_deck(&self, deck_id: &str) -> Result<bool> {
        let writer = self
            .writer
            .lock()
            .map_err(|_| StoreError::Init("Writer lock poisoned".into()))?;
        let deleted = writer.execute("DELETE FROM decks WHERE id = ?1", params![deck_id])?;
        Ok(deleted > 0)
    }

    // ========================================================================
    // CARDS
    // ========================================================================

    /// Create a card in `deck_id` with fresh scheduling state.
    ///
    /// Every ingestion path (manual, AI-generated, PDF-extracted) funnels
    /// through here; the scheduler never learns where the content came from.
    pub fn create_card(&self, deck_id: &str, input: CardInput) -> Result<Card> {
        if self.get_deck(deck_id)?.is_none() {
            return Err(StoreError::NotFound(format!("deck {}", deck_id)));
        }

        let card = Card::new(deck_id, input);

        let writer = self
            .writer
            .lock()
            .map_err(|_| StoreError::Init("Writer lock poisoned".into()))?;
        Self::insert_card(&writer, &card)?;

        Ok(card)
    }

    /// Get a card (with its full grade history) by deck and id
    pub fn get_card(&self, deck_id: &str, card_id: &str) -> Result<Option<Card>> {
        let reader = self
            .reader
            .lock()
            .map_err(|_| StoreError::Init("Reader lock poisoned".into()))?;
        Self::read_card(&reader, deck_id, card_id)
    }

    /// Update a card's content fields. Scheduling state is untouched.
    pub fn update_card(&self, deck_id: &str, card_id: &str, patch: CardPatch) -> Result<Card> {
        let mut card = self
            .get_card(deck_id, card_id)?
            .ok_or_else(|| StoreError::NotFound(format!("card {}", card_id)))?;

        if let Some(question) = patch.question {
            card.question = question;
        }
        if let Some(answer) = patch.answer {
            card.answer = answer;
        }
        if let Some(tags) = patch.tags {
            card.tags = tags;
        }
        if let Some(category) = patch.category {
            card.category = Some(category);
        }
        card.updated_at = Utc::now();

        let tags_json = serde_json::to_string(&card.tags).unwrap_or_else(|_| "[]".to_string());
        let writer = self
            .writer
            .lock()
            .map_err(|_| StoreError::Init("Writer lock poisoned".into()))?;
        writer.execute(
            "UPDATE cards SET question = ?1, answer = ?2, tags = ?3, category = ?4,
                updated_at = ?5
             WHERE id = ?6 AND deck_id = ?7",
            params![
                card.question,
                card.answer,
                tags_json,
                card.category,
                card.updated_at.to_rfc3339(),
                card_id,
                deck_id,
            ],
        )?;

        Ok(card)
    }

    /// Delete a card. Returns whether a card was removed.
    pub fn delete_card(&self, deck_id: &str, card_id: &str) -> Result<bool> {
        let writer = self
            .writer
            .lock()
            .map_err(|_| StoreError::Init("Writer lock poisoned".into()))?;
        let deleted = writer.execute(
            "DELETE FROM cards WHERE id = ?1 AND deck_id = ?2",
            params![card_id, deck_id],
        )?;
        Ok(deleted > 0)
    }

    /// Delete every card in `deck_id` tagged with `category`.
    /// Returns the number of cards removed.
    pub fn delete_category(&self, deck_id: &str, category: &str) -> Result<usize> {
        let writer = self
            .writer
            .lock()
            .map_err(|_| StoreError::Init("Writer lock poisoned".into()))?;
        let deleted = writer.execute(
            "DELETE FROM cards WHERE deck_id = ?1 AND category = ?2",
            params![deck_id, category],
        )?;
        Ok(deleted)
    }

    /// Cards in `deck_id` due for review, soonest first
    pub fn due_cards(&self, deck_id: &str, limit: i64) -> Result<Vec<Card>> {
        let now = Utc::now().to_rfc3339();
        let reader = self
            .reader
            .lock()
            .map_err(|_| StoreError::Init("Reader lock poisoned".into()))?;

        let mut stmt = reader.prepare(
            "SELECT * FROM cards
             WHERE deck_id = ?1 AND next_review_at <= ?2
             ORDER BY next_review_at ASC
             LIMIT ?3",
        )?;
        let ids: Vec<String> = stmt
            .query_map(params![deck_id, now, limit], |row| row.get("id"))?
            .collect::<rusqlite::Result<_>>()?;
        drop(stmt);

        let mut result = Vec::new();
        for id in ids {
            if let Some(card) = Self::read_card(&reader, deck_id, &id)? {
                result.push(card);
            }
        }
        Ok(result)
    }

    // ========================================================================
    // REVIEW SUBMISSION
    // ========================================================================

    /// Submit a review grade for a card.
    ///
    /// Loads the card, runs the scheduler, and persists everything in one
    /// transaction: the card's new scheduling state, one grade-log entry,
    /// the deck's `reviewed_count`, and the per-day aggregates. Nothing is
    /// written if the card is missing; an invalid grade never reaches this
    /// method because [`Grade`] construction already rejected it.
    pub fn submit_review(&self, deck_id: &str, card_id: &str, grade: Grade) -> Result<ReviewOutcome> {
        let now = Utc::now();
        let bucket = GradeBucket::from_grade(grade);

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| StoreError::Init("Writer lock poisoned".into()))?;
        let tx = writer.transaction()?;

        // Read-modify-write happens entirely inside the writer transaction
        // so two concurrent submissions for the same card cannot race.
        let mut card = Self::read_card(&tx, deck_id, card_id)?
            .ok_or_else(|| StoreError::NotFound(format!("card {}", card_id)))?;
        let user_id: String = tx.query_row(
            "SELECT user_id FROM decks WHERE id = ?1",
            params![deck_id],
            |row| row.get(0),
        )?;

        let scheduling = self.scheduler.schedule_at(&card.scheduling, grade, now);

        tx.execute(
            "UPDATE cards SET
                repetitions = ?1,
                interval_days = ?2,
                ease_factor = ?3,
                next_review_at = ?4,
                review_count = ?5,
                last_reviewed_at = ?6,
                updated_at = ?7
             WHERE id = ?8",
            params![
                scheduling.repetitions,
                scheduling.interval_days,
                scheduling.ease_factor,
                scheduling.next_review_at.to_rfc3339(),
                scheduling.review_count,
                now.to_rfc3339(),
                now.to_rfc3339(),
                card_id,
            ],
        )?;

        tx.execute(
            "INSERT INTO grade_log (card_id, reviewed_at, grade) VALUES (?1, ?2, ?3)",
            params![card_id, now.to_rfc3339(), grade.value()],
        )?;

        tx.execute(
            "UPDATE decks SET reviewed_count = reviewed_count + 1 WHERE id = ?1",
            params![deck_id],
        )?;
        let reviewed_count: i64 = tx.query_row(
            "SELECT reviewed_count FROM decks WHERE id = ?1",
            params![deck_id],
            |row| row.get(0),
        )?;

        let (bad, good, excellent) = match bucket {
            GradeBucket::Bad => (1, 0, 0),
            GradeBucket::Good => (0, 1, 0),
            GradeBucket::Excellent => (0, 0, 1),
        };
        tx.execute(
            "INSERT INTO review_stats (user_id, day, reviews, bad, good, excellent)
             VALUES (?1, ?2, 1, ?3, ?4, ?5)
             ON CONFLICT(user_id, day) DO UPDATE SET
                reviews = reviews + 1,
                bad = bad + excluded.bad,
                good = good + excluded.good,
                excellent = excellent + excluded.excellent",
            params![user_id, day_key(now), bad, good, excellent],
        )?;

        tx.commit()?;

        // Return exactly what this transaction wrote; a re-read on the
        // reader connection could observe a later concurrent review.
        card.scheduling = scheduling;
        card.updated_at = now;
        Ok(ReviewOutcome {
            card,
            reviewed_count,
        })
    }

    // ========================================================================
    // STATISTICS
    // ========================================================================

    /// Aggregate review statistics for `user_id`
    pub fn get_stats(&self, user_id: &str) -> Result<ReviewStats> {
        let reader = self
            .reader
            .lock()
            .map_err(|_| StoreError::Init("Reader lock poisoned".into()))?;

        let mut stmt = reader.prepare(
            "SELECT day, reviews, bad, good, excellent
             FROM review_stats WHERE user_id = ?1 ORDER BY day ASC",
        )?;
        let rows = stmt.query_map(params![user_id], |row| {
            Ok((
                row.get::<_, String>("day")?,
                row.get::<_, i64>("reviews")?,
                row.get::<_, i64>("bad")?,
                row.get::<_, i64>("good")?,
                row.get::<_, i64>("excellent")?,
            ))
        })?;

        let mut stats = ReviewStats::default();
        for row in rows {
            let (day, reviews, bad, good, excellent) = row?;
            stats.total_reviews += reviews;
            stats.by_day.insert(day.clone(), reviews);
            stats.grade_totals.bad += bad;
            stats.grade_totals.good += good;
            stats.grade_totals.excellent += excellent;
            stats.grade_by_day.insert(
                day,
                GradeTally {
                    bad,
                    good,
                    excellent,
                },
            );
        }
        Ok(stats)
    }

    /// Reset `user_id`'s aggregates and zero all deck counters.
    /// Card scheduling state and the grade log are left untouched.
    pub fn reset_stats(&self, user_id: &str) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| StoreError::Init("Writer lock poisoned".into()))?;
        let tx = writer.transaction()?;
        tx.execute(
            "DELETE FROM review_stats WHERE user_id = ?1",
            params![user_id],
        )?;
        tx.execute(
            "UPDATE decks SET reviewed_count = 0 WHERE user_id = ?1",
            params![user_id],
        )?;
        tx.commit()?;
        Ok(())
    }

    // ========================================================================
    // EXPORT / IMPORT
    // ========================================================================

    /// Content-only snapshot of a deck
    pub fn export_deck(&self, deck_id: &str) -> Result<DeckExport> {
        let deck = self
            .get_deck(deck_id)?
            .ok_or_else(|| StoreError::NotFound(format!("deck {}", deck_id)))?;

        let reader = self
            .reader
            .lock()
            .map_err(|_| StoreError::Init("Reader lock poisoned".into()))?;
        let mut stmt = reader.prepare(
            "SELECT question, answer, tags, category FROM cards
             WHERE deck_id = ?1 ORDER BY created_at ASC",
        )?;
        let cards = stmt.query_map(params![deck_id], |row| {
            let tags_json: String = row.get("tags")?;
            Ok(ExportedCard {
                question: row.get("question")?,
                answer: row.get("answer")?,
                tags: serde_json::from_str(&tags_json).unwrap_or_default(),
                category: row.get("category")?,
            })
        })?;

        let mut result = Vec::new();
        for card in cards {
            result.push(card?);
        }
        Ok(DeckExport {
            name: deck.name,
            cards: result,
        })
    }

    /// Import a deck snapshot as a new deck for `user_id`.
    ///
    /// Imported cards start learning from scratch: fresh scheduling state,
    /// empty history.
    pub fn import_deck(&self, user_id: &str, export: DeckExport) -> Result<Deck> {
        let deck = Deck::new(user_id, &export.name);

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| StoreError::Init("Writer lock poisoned".into()))?;
        let tx = writer.transaction()?;
        tx.execute(
            "INSERT INTO decks (id, user_id, name, reviewed_count, created_at)
             VALUES (?1, ?2, ?3, 0, ?4)",
            params![deck.id, deck.user_id, deck.name, deck.created_at.to_rfc3339()],
        )?;
        for exported in export.cards {
            let card = Card::new(
                &deck.id,
                CardInput {
                    question: exported.question,
                    answer: exported.answer,
                    tags: exported.tags,
                    category: exported.category,
                },
            );
            Self::insert_card(&tx, &card)?;
        }
        tx.commit()?;

        Ok(deck)
    }

    // ========================================================================
    // ROW MAPPING
    // ========================================================================

    fn insert_card(conn: &Connection, card: &Card) -> Result<()> {
        let tags_json = serde_json::to_string(&card.tags).unwrap_or_else(|_| "[]".to_string());
        conn.execute(
            "INSERT INTO cards (
                id, deck_id, question, answer, tags, category,
                repetitions, interval_days, ease_factor, next_review_at,
                review_count, last_reviewed_at, created_at, updated_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                card.id,
                card.deck_id,
                card.question,
                card.answer,
                tags_json,
                card.category,
                card.scheduling.repetitions,
                card.scheduling.interval_days,
                card.scheduling.ease_factor,
                card.scheduling.next_review_at.to_rfc3339(),
                card.scheduling.review_count,
                card.scheduling
                    .last_reviewed_at
                    .map(|t| t.to_rfc3339()),
                card.created_at.to_rfc3339(),
                card.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Read a card row plus its grade history on one connection
    fn read_card(conn: &Connection, deck_id: &str, card_id: &str) -> Result<Option<Card>> {
        let card = conn
            .query_row(
                "SELECT * FROM cards WHERE id = ?1 AND deck_id = ?2",
                params![card_id, deck_id],
                Self::row_to_card,
            )
            .optional()?;

        let Some(mut card) = card else {
            return Ok(None);
        };
        card.scheduling.grade_history = Self::load_history(conn, card_id)?;
        Ok(Some(card))
    }

    /// Load a card's append-only grade history, oldest first
    fn load_history(conn: &Connection, card_id: &str) -> Result<Vec<GradeEntry>> {
        let mut stmt = conn.prepare(
            "SELECT reviewed_at, grade FROM grade_log WHERE card_id = ?1 ORDER BY id ASC",
        )?;
        let rows = stmt.query_map(params![card_id], |row| {
            Ok((row.get::<_, String>("reviewed_at")?, row.get::<_, f64>("grade")?))
        })?;

        let mut history = Vec::new();
        for row in rows {
            let (ts, grade) = row?;
            match DateTime::parse_from_rfc3339(&ts) {
                Ok(dt) => history.push(GradeEntry {
                    ts: dt.with_timezone(&Utc),
                    grade,
                }),
                Err(e) => {
                    tracing::warn!("Skipping grade log entry with bad timestamp '{}': {}", ts, e);
                }
            }
        }
        Ok(history)
    }

    fn parse_timestamp(value: &str, field_name: &str) -> rusqlite::Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    0,
                    rusqlite::types::Type::Text,
                    Box::new(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("Invalid {} timestamp '{}': {}", field_name, value, e),
                    )),
                )
            })
    }

    fn row_to_deck(row: &rusqlite::Row) -> rusqlite::Result<Deck> {
        let created_at: String = row.get("created_at")?;
        Ok(Deck {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            name: row.get("name")?,
            reviewed_count: row.get("reviewed_count")?,
            created_at: Self::parse_timestamp(&created_at, "created_at")?,
        })
    }

    fn row_to_card(row: &rusqlite::Row) -> rusqlite::Result<Card> {
        let tags_json: String = row.get("tags")?;
        let tags: Vec<String> = serde_json::from_str(&tags_json).unwrap_or_default();

        let created_at: String = row.get("created_at")?;
        let updated_at: String = row.get("updated_at")?;
        let next_review_at: String = row.get("next_review_at")?;
        let last_reviewed_at: Option<String> = row.get("last_reviewed_at")?;

        let last_reviewed_at = last_reviewed_at.and_then(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
        });

        // Rows written before the ease column existed load as the default
        let ease_factor: Option<f64> = row.get("ease_factor")?;

        Ok(Card {
            id: row.get("id")?,
            deck_id: row.get("deck_id")?,
            question: row.get("question")?,
            answer: row.get("answer")?,
            tags,
            category: row.get("category")?,
            created_at: Self::parse_timestamp(&created_at, "created_at")?,
            updated_at: Self::parse_timestamp(&updated_at, "updated_at")?,
            scheduling: SchedulingState {
                repetitions: row.get("repetitions")?,
                interval_days: row.get("interval_days")?,
                ease_factor: ease_factor.unwrap_or(crate::sm2::DEFAULT_EASE_FACTOR),
                next_review_at: Self::parse_timestamp(&next_review_at, "next_review_at")?,
                review_count: row.get("review_count")?,
                last_reviewed_at,
                grade_history: vec![],
            },
        })
    }
}

// ============================================================================
// REPOSITORY IMPL
// ============================================================================

impl super::CardRepository for Store {
    fn get_card(&self, deck_id: &str, card_id: &str) -> Result<Option<Card>> {
        Store::get_card(self, deck_id, card_id)
    }

    fn put_card(&self, card: &Card) -> Result<()> {
        let tags_json = serde_json::to_string(&card.tags).unwrap_or_else(|_| "[]".to_string());
        let writer = self
            .writer
            .lock()
            .map_err(|_| StoreError::Init("Writer lock poisoned".into()))?;
        writer.execute(
            "INSERT INTO cards (
                id, deck_id, question, answer, tags, category,
                repetitions, interval_days, ease_factor, next_review_at,
                review_count, last_reviewed_at, created_at, updated_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
             ON CONFLICT(id) DO UPDATE SET
                question = excluded.question,
                answer = excluded.answer,
                tags = excluded.tags,
                category = excluded.category,
                repetitions = excluded.repetitions,
                interval_days = excluded.interval_days,
                ease_factor = excluded.ease_factor,
                next_review_at = excluded.next_review_at,
                review_count = excluded.review_count,
                last_reviewed_at = excluded.last_reviewed_at,
                updated_at = excluded.updated_at",
            params![
                card.id,
                card.deck_id,
                card.question,
                card.answer,
                tags_json,
                card.category,
                card.scheduling.repetitions,
                card.scheduling.interval_days,
                card.scheduling.ease_factor,
                card.scheduling.next_review_at.to_rfc3339(),
                card.scheduling.review_count,
                card.scheduling.last_reviewed_at.map(|t| t.to_rfc3339()),
                card.created_at.to_rfc3339(),
                card.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn review_card(&self, deck_id: &str, card_id: &str, grade: Grade) -> Result<ReviewOutcome> {
        self.submit_review(deck_id, card_id, grade)
    }
}

// ============================================================================
// TESTS
// ============================================================================
