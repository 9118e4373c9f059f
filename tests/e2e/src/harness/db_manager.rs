//! Test Store Manager
//!
//! Provides isolated store instances for testing:
//! - Temporary databases that are automatically cleaned up
//! - Pre-seeded decks with test cards
//! - Concurrent test isolation

use lembra_core::{Card, CardInput, Deck, Store};
use tempfile::TempDir;

/// Manager for test stores
///
/// Creates an isolated SQLite database per test to prevent interference.
/// The database is deleted when the manager is dropped.
pub struct TestStoreManager {
    /// The store instance
    pub store: Store,
    /// Temporary directory (kept alive to prevent premature deletion)
    _temp_dir: TempDir,
}

impl TestStoreManager {
    /// Create a new test store in a temporary directory
    pub fn new_temp() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test_lembra.db");

        let store = Store::new(Some(db_path)).expect("Failed to create test store");

        Self {
            store,
            _temp_dir: temp_dir,
        }
    }

    /// Create a deck pre-seeded with `count` cards for `user_id`
    pub fn seed_deck(&self, user_id: &str, name: &str, count: usize) -> (Deck, Vec<Card>) {
        let deck = self
            .store
            .create_deck(user_id, name)
            .expect("Failed to create deck");

        let cards = (0..count)
            .map(|i| {
                self.store
                    .create_card(
                        &deck.id,
                        CardInput {
                            question: format!("Pergunta {}", i + 1),
                            answer: format!("Resposta {}", i + 1),
                            tags: vec!["seed".to_string()],
                            category: None,
                        },
                    )
                    .expect("Failed to create card")
            })
            .collect();

        (deck, cards)
    }
}

impl Default for TestStoreManager {
    fn default() -> Self {
        Self::new_temp()
    }
}
