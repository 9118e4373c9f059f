//! Journey: deck management around an active review schedule

use lembra_e2e_tests::harness::TestStoreManager;
use lembra_core::{CardInput, CardPatch, Grade};

#[test]
fn deck_create_review_export_import() {
    let manager = TestStoreManager::new_temp();
    let (deck, cards) = manager.seed_deck("alice", "História", 3);

    for card in &cards {
        manager.store.submit_review(&deck.id, &card.id, Grade::GOOD).unwrap();
    }

    // Export carries content, not progress
    let export = manager.store.export_deck(&deck.id).unwrap();
    assert_eq!(export.cards.len(), 3);
    let json = serde_json::to_value(&export).unwrap();
    assert!(json["cards"][0].get("easeFactor").is_none());

    // Import into another user's account starts over
    let imported = manager.store.import_deck("bob", export).unwrap();
    let bob_decks = manager.store.list_decks("bob").unwrap();
    assert_eq!(bob_decks.len(), 1);
    assert_eq!(bob_decks[0].name, "História");
    assert_eq!(bob_decks[0].reviewed_count, 0);

    let due = manager.store.due_cards(&imported.id, 10).unwrap();
    assert_eq!(due.len(), 3);
    assert!(due.iter().all(|c| c.scheduling.review_count == 0));
}

#[test]
fn card_edits_never_touch_the_schedule() {
    let manager = TestStoreManager::new_temp();
    let (deck, cards) = manager.seed_deck("alice", "História", 1);
    let card = &cards[0];

    manager.store.submit_review(&deck.id, &card.id, Grade::EXCELLENT).unwrap();
    let before = manager.store.get_card(&deck.id, &card.id).unwrap().unwrap();

    let after = manager
        .store
        .update_card(
            &deck.id,
            &card.id,
            CardPatch {
                answer: Some("edited".to_string()),
                tags: Some(vec!["revised".to_string()]),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(after.answer, "edited");
    assert_eq!(after.scheduling, before.scheduling);
}

#[test]
fn category_purge_spares_other_cards() {
    let manager = TestStoreManager::new_temp();
    let deck = manager.store.create_deck("alice", "Misto").unwrap();

    for (q, category) in [("a", Some("verbos")), ("b", Some("verbos")), ("c", None)] {
        manager
            .store
            .create_card(
                &deck.id,
                CardInput {
                    question: q.to_string(),
                    answer: "x".to_string(),
                    tags: vec![],
                    category: category.map(String::from),
                },
            )
            .unwrap();
    }

    assert_eq!(manager.store.delete_category(&deck.id, "verbos").unwrap(), 2);
    assert_eq!(manager.store.due_cards(&deck.id, 10).unwrap().len(), 1);
}

#[test]
fn deleting_a_deck_removes_its_cards() {
    let manager = TestStoreManager::new_temp();
    let (deck, cards) = manager.seed_deck("alice", "Temp", 2);

    assert!(manager.store.delete_deck(&deck.id).unwrap());
    for card in &cards {
        assert!(manager.store.get_card(&deck.id, &card.id).unwrap().is_none());
    }
}
