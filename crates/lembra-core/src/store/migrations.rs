//! Database Migrations
//!
//! Schema migration definitions for the card store.

/// Migration definitions
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "Initial schema: decks, cards, append-only grade log",
        up: MIGRATION_V1_UP,
    },
    Migration {
        version: 2,
        description: "Per-user daily review aggregates",
        up: MIGRATION_V2_UP,
    },
    Migration {
        version: 3,
        description: "Card categories",
        up: MIGRATION_V3_UP,
    },
];

/// A database migration
#[derive(Debug, Clone)]
pub struct Migration {
    /// Version number
    pub version: u32,
    /// Description
    pub description: &'static str,
    /// SQL to apply
    pub up: &'static str,
}

/// V1: Initial schema
const MIGRATION_V1_UP: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL DEFAULT 0,
    applied_at TEXT
);
INSERT INTO schema_version (version, applied_at)
    SELECT 0, datetime('now')
    WHERE NOT EXISTS (SELECT 1 FROM schema_version);

CREATE TABLE IF NOT EXISTS decks (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    name TEXT NOT NULL,
    reviewed_count INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_decks_user ON decks(user_id);

CREATE TABLE IF NOT EXISTS cards (
    id TEXT PRIMARY KEY,
    deck_id TEXT NOT NULL REFERENCES decks(id) ON DELETE CASCADE,
    question TEXT NOT NULL,
    answer TEXT NOT NULL,
    tags TEXT NOT NULL DEFAULT '[]',

    -- SM-2 scheduling state
    repetitions INTEGER NOT NULL DEFAULT 0,
    interval_days INTEGER NOT NULL DEFAULT 0,
    ease_factor REAL DEFAULT 2.5,
    next_review_at TEXT NOT NULL,
    review_count INTEGER NOT NULL DEFAULT 0,
    last_reviewed_at TEXT,

    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_cards_deck ON cards(deck_id);
CREATE INDEX IF NOT EXISTS idx_cards_due ON cards(deck_id, next_review_at);

-- Append-only audit log of every submitted grade
CREATE TABLE IF NOT EXISTS grade_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    card_id TEXT NOT NULL REFERENCES cards(id) ON DELETE CASCADE,
    reviewed_at TEXT NOT NULL,
    grade REAL NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_grade_log_card ON grade_log(card_id);

UPDATE schema_version SET version = 1, applied_at = datetime('now');
"#;

/// V2: Aggregate statistics, one row per user per day
const MIGRATION_V2_UP: &str = r#"
CREATE TABLE IF NOT EXISTS review_stats (
    user_id TEXT NOT NULL,
    day TEXT NOT NULL,
    reviews INTEGER NOT NULL DEFAULT 0,
    bad INTEGER NOT NULL DEFAULT 0,
    good INTEGER NOT NULL DEFAULT 0,
    excellent INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (user_id, day)
);

UPDATE schema_version SET version = 2, applied_at = datetime('now');
"#;

/// V3: Optional per-card category within a deck
const MIGRATION_V3_UP: &str = r#"
ALTER TABLE cards ADD COLUMN category TEXT;
CREATE INDEX IF NOT EXISTS idx_cards_category ON cards(deck_id, category);

UPDATE schema_version SET version = 3, applied_at = datetime('now');
"#;

/// Get current schema version from database
pub fn get_current_version(conn: &rusqlite::Connection) -> rusqlite::Result<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .or(Ok(0))
}

/// Apply pending migrations
pub fn apply_migrations(conn: &rusqlite::Connection) -> rusqlite::Result<u32> {
    let current_version = get_current_version(conn)?;
    let mut applied = 0;

    for migration in MIGRATIONS {
        if migration.version > current_version {
            tracing::info!(
                "Applying migration v{}: {}",
                migration.version,
                migration.description
            );

            conn.execute_batch(migration.up)?;
            applied += 1;
        }
    }

    Ok(applied)
}
