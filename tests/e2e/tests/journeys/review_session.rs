//! Journey: a study session with relearning loops
//!
//! Walks a card through the full hybrid schedule: lapse and re-queue in
//! minutes, graduate through 1 and 6 days, then grow by the ease factor.

use chrono::{Duration, Utc};
use lembra_e2e_tests::harness::TestStoreManager;
use lembra_core::Grade;

#[test]
fn relearning_loop_keeps_card_in_session() {
    let manager = TestStoreManager::new_temp();
    let (deck, cards) = manager.seed_deck("alice", "Português", 1);
    let card = &cards[0];

    // Fail it twice in a row: the card must stay minutes away each time
    for _ in 0..2 {
        let outcome = manager
            .store
            .submit_review(&deck.id, &card.id, Grade::BAD)
            .unwrap();
        let state = &outcome.card.scheduling;
        assert_eq!(state.repetitions, 0);
        assert_eq!(state.interval_days, 0);
        assert!(state.next_review_at <= Utc::now() + Duration::minutes(10));
        assert!(state.ease_factor >= 1.3);
    }

    // Then recall it: graduates to 1 day
    let outcome = manager
        .store
        .submit_review(&deck.id, &card.id, Grade::GOOD)
        .unwrap();
    assert_eq!(outcome.card.scheduling.repetitions, 1);
    assert_eq!(outcome.card.scheduling.interval_days, 1);
}

#[test]
fn full_graduation_path() {
    let manager = TestStoreManager::new_temp();
    let (deck, cards) = manager.seed_deck("alice", "Português", 1);
    let card = &cards[0];

    let intervals: Vec<i32> = (0..4)
        .map(|_| {
            manager
                .store
                .submit_review(&deck.id, &card.id, Grade::GOOD)
                .unwrap()
                .card
                .scheduling
                .interval_days
        })
        .collect();

    // 1 day, 6 days, then x2.5 ease growth
    assert_eq!(intervals, vec![1, 6, 15, 38]);

    let fetched = manager.store.get_card(&deck.id, &card.id).unwrap().unwrap();
    assert_eq!(fetched.scheduling.review_count, 4);
    assert_eq!(fetched.scheduling.grade_history.len(), 4);
}

#[test]
fn lapse_resets_streak_but_not_lifetime_count() {
    let manager = TestStoreManager::new_temp();
    let (deck, cards) = manager.seed_deck("alice", "Português", 1);
    let card = &cards[0];

    for grade in [Grade::GOOD, Grade::GOOD, Grade::GOOD, Grade::BAD] {
        manager.store.submit_review(&deck.id, &card.id, grade).unwrap();
    }

    let fetched = manager.store.get_card(&deck.id, &card.id).unwrap().unwrap();
    assert_eq!(fetched.scheduling.repetitions, 0);
    assert_eq!(fetched.scheduling.review_count, 4);
    assert_eq!(fetched.scheduling.grade_history.len(), 4);
}

#[test]
fn easy_path_outpaces_good_path() {
    let manager = TestStoreManager::new_temp();
    let (deck, cards) = manager.seed_deck("alice", "Português", 2);

    let mut good_interval = 0;
    let mut easy_interval = 0;
    for _ in 0..3 {
        good_interval = manager
            .store
            .submit_review(&deck.id, &cards[0].id, Grade::GOOD)
            .unwrap()
            .card
            .scheduling
            .interval_days;
        easy_interval = manager
            .store
            .submit_review(&deck.id, &cards[1].id, Grade::EXCELLENT)
            .unwrap()
            .card
            .scheduling
            .interval_days;
    }

    assert!(easy_interval > good_interval);
}
