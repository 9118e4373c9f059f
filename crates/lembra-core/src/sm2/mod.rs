//! SM-2 Review Scheduler Module
//!
//! A hybrid of the classic SuperMemo-2 algorithm with Anki-style short-term
//! relearning: failed or shaky cards are re-queued in minutes within the same
//! session, while successful recalls graduate to day-scale intervals that
//! grow with the card's ease factor.
//!
//! Reference: https://super-memory.com/english/ol/sm2.htm
//!
//! ## Grade bands
//! - `q <= 2` — lapse: streak resets, next review in minutes
//! - `2 < q < 4` — good: classic SM-2 day progression (1, 6, interval x ease)
//! - `q >= 4` — easy: rewarded progression with an easy bonus multiplier

mod algorithm;
mod scheduler;

pub use algorithm::{
    classic_sm2_ease,
    growth_interval,
    DEFAULT_EASE_FACTOR,
    EASY_BONUS,
    EASY_EASE_REWARD,
    EASY_FIRST_INTERVAL_DAYS,
    FIRST_INTERVAL_DAYS,
    LAPSE_DELAY_MINUTES,
    LAPSE_EASE_PENALTIES,
    MAX_INTERVAL_DAYS,
    MIN_EASE_FACTOR,
    SECOND_INTERVAL_DAYS,
};

pub use scheduler::{
    EaseUpdate, Grade, GradeEntry, ScheduleError, SchedulingState, Sm2Parameters, Sm2Scheduler,
};
