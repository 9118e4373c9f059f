//! Journey: aggregate statistics across many reviews

use chrono::Utc;
use lembra_e2e_tests::harness::TestStoreManager;
use lembra_core::Grade;

#[test]
fn stats_accumulate_by_bucket_and_day() {
    let manager = TestStoreManager::new_temp();
    let (deck, cards) = manager.seed_deck("alice", "Matemática", 5);

    // 2 bad, 2 good, 1 excellent
    let grades = [Grade::BAD, Grade::BAD, Grade::GOOD, Grade::GOOD, Grade::EXCELLENT];
    for (card, grade) in cards.iter().zip(grades) {
        manager.store.submit_review(&deck.id, &card.id, grade).unwrap();
    }

    let stats = manager.store.get_stats("alice").unwrap();
    assert_eq!(stats.total_reviews, 5);
    assert_eq!(stats.grade_totals.bad, 2);
    assert_eq!(stats.grade_totals.good, 2);
    assert_eq!(stats.grade_totals.excellent, 1);
    assert_eq!(stats.grade_totals.total(), 5);

    // Everything landed on today's UTC bucket
    let today = Utc::now().format("%Y-%m-%d").to_string();
    assert_eq!(stats.by_day.get(&today), Some(&5));
    let tally = stats.grade_by_day.get(&today).unwrap();
    assert_eq!(tally.bad, 2);
    assert_eq!(tally.excellent, 1);
}

#[test]
fn deck_counter_tracks_every_submission() {
    let manager = TestStoreManager::new_temp();
    let (deck, cards) = manager.seed_deck("alice", "Matemática", 1);
    let card = &cards[0];

    for i in 1..=10 {
        let outcome = manager
            .store
            .submit_review(&deck.id, &card.id, Grade::GOOD)
            .unwrap();
        assert_eq!(outcome.reviewed_count, i);
    }

    let deck = manager.store.get_deck(&deck.id).unwrap().unwrap();
    assert_eq!(deck.reviewed_count, 10);
}

#[test]
fn reset_clears_aggregates_only() {
    let manager = TestStoreManager::new_temp();
    let (deck, cards) = manager.seed_deck("alice", "Matemática", 2);

    for card in &cards {
        manager.store.submit_review(&deck.id, &card.id, Grade::GOOD).unwrap();
    }
    manager.store.reset_stats("alice").unwrap();

    let stats = manager.store.get_stats("alice").unwrap();
    assert_eq!(stats.total_reviews, 0);
    assert!(stats.by_day.is_empty());

    // Per-card learning progress is not statistics; it survives
    let card = manager.store.get_card(&deck.id, &cards[0].id).unwrap().unwrap();
    assert_eq!(card.scheduling.repetitions, 1);
    assert_eq!(card.scheduling.grade_history.len(), 1);
}

#[test]
fn stats_isolated_between_users() {
    let manager = TestStoreManager::new_temp();
    let (alice_deck, alice_cards) = manager.seed_deck("alice", "A", 1);
    let (bob_deck, bob_cards) = manager.seed_deck("bob", "B", 1);

    manager
        .store
        .submit_review(&alice_deck.id, &alice_cards[0].id, Grade::EXCELLENT)
        .unwrap();
    manager
        .store
        .submit_review(&bob_deck.id, &bob_cards[0].id, Grade::BAD)
        .unwrap();

    assert_eq!(manager.store.get_stats("alice").unwrap().grade_totals.excellent, 1);
    assert_eq!(manager.store.get_stats("bob").unwrap().grade_totals.excellent, 0);
}
