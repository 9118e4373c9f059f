//! SM-2 Scheduler
//!
//! The scheduler is a pure function from (scheduling state, grade) to a new
//! scheduling state. It performs no I/O, never mutates its input, and always
//! completes in O(1); persistence is the caller's job. See
//! [`Sm2Scheduler::schedule_at`] for the full contract.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::algorithm::{
    classic_sm2_ease, growth_interval, DEFAULT_EASE_FACTOR, EASY_BONUS, EASY_EASE_REWARD,
    EASY_FIRST_INTERVAL_DAYS, FIRST_INTERVAL_DAYS, LAPSE_DELAY_MINUTES, LAPSE_EASE_PENALTIES,
    MIN_EASE_FACTOR, SECOND_INTERVAL_DAYS,
};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Scheduler error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// Grade cannot be interpreted as a finite number
    #[error("Invalid grade: {0}")]
    InvalidGrade(String),
}

// ============================================================================
// GRADE
// ============================================================================

/// A validated review grade on the internal 0-5 quality scale.
///
/// Out-of-range values are clamped at construction; non-finite input is
/// rejected with [`ScheduleError::InvalidGrade`] before it can reach any
/// arithmetic. The three-button UI maps onto this scale as 2 (Bad),
/// 3 (Good) and 4 (Excellent).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Grade(f64);

impl Grade {
    /// "Bad" button: borderline lapse
    pub const BAD: Grade = Grade(2.0);
    /// "Good" button: standard pass
    pub const GOOD: Grade = Grade(3.0);
    /// "Excellent" button: easy pass
    pub const EXCELLENT: Grade = Grade(4.0);

    /// Validate a numeric grade, clamping to the inclusive range [0, 5]
    pub fn new(value: f64) -> Result<Self, ScheduleError> {
        if !value.is_finite() {
            return Err(ScheduleError::InvalidGrade(value.to_string()));
        }
        Ok(Grade(value.clamp(0.0, 5.0)))
    }

    /// Interpret a loosely-typed JSON value as a grade.
    ///
    /// Numbers are taken as-is; numeric strings are coerced, mirroring the
    /// dynamic typing of the host transport. Anything else is rejected.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, ScheduleError> {
        match value {
            serde_json::Value::Number(n) => {
                let v = n
                    .as_f64()
                    .ok_or_else(|| ScheduleError::InvalidGrade(n.to_string()))?;
                Self::new(v)
            }
            serde_json::Value::String(s) => {
                let v = s
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| ScheduleError::InvalidGrade(s.clone()))?;
                Self::new(v)
            }
            other => Err(ScheduleError::InvalidGrade(other.to_string())),
        }
    }

    /// The clamped numeric quality
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether this grade counts as a lapse (resets the learning streak)
    pub fn is_lapse(self) -> bool {
        self.0 <= 2.0
    }

    /// Whether this grade earns the easy bonus
    pub fn is_easy(self) -> bool {
        self.0 >= 4.0
    }
}

// ============================================================================
// SCHEDULING STATE
// ============================================================================

/// One entry in a card's append-only grade audit log
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeEntry {
    /// When the grade was submitted
    pub ts: DateTime<Utc>,
    /// The clamped grade value
    pub grade: f64,
}

/// The scheduling fields of a card record.
///
/// Everything else on a card (question, answer, tags, category) is opaque
/// payload the scheduler never reads. Mutated exclusively through
/// [`Sm2Scheduler`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingState {
    /// Consecutive successful recalls since the last lapse
    #[serde(default)]
    pub repetitions: i32,
    /// Last computed inter-review gap in whole days (0 when the next review
    /// is minutes away)
    #[serde(default)]
    pub interval_days: i32,
    /// Multiplier governing interval growth, floored at 1.3
    #[serde(default = "default_ease")]
    pub ease_factor: f64,
    /// Absolute instant the card becomes eligible for review again
    pub next_review_at: DateTime<Utc>,
    /// Lifetime count of completed reviews, independent of lapses
    #[serde(default)]
    pub review_count: i64,
    /// Instant of the most recent review
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<DateTime<Utc>>,
    /// Append-only audit log of every grade ever submitted, in
    /// chronological order
    #[serde(default)]
    pub grade_history: Vec<GradeEntry>,
}

fn default_ease() -> f64 {
    DEFAULT_EASE_FACTOR
}

impl Default for SchedulingState {
    fn default() -> Self {
        Self {
            repetitions: 0,
            interval_days: 0,
            ease_factor: DEFAULT_EASE_FACTOR,
            next_review_at: Utc::now(),
            review_count: 0,
            last_reviewed_at: None,
            grade_history: vec![],
        }
    }
}

impl SchedulingState {
    /// Fresh state for a card created at `now`: due immediately
    pub fn new_at(now: DateTime<Utc>) -> Self {
        Self {
            next_review_at: now,
            ..Default::default()
        }
    }

    /// Whether the card is currently eligible for review
    pub fn is_due_at(&self, now: DateTime<Utc>) -> bool {
        self.next_review_at <= now
    }
}

// ============================================================================
// PARAMETERS
// ============================================================================

/// Ease factor update rule for the "Good" band.
///
/// The source material disagrees between iterations on whether a Good grade
/// adjusts ease, so the rule is an explicit policy instead of a silent pick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EaseUpdate {
    /// Good is ease-neutral; only lapses and Easy grades move the ease
    /// factor (canonical behavior)
    #[default]
    Neutral,
    /// Apply the classic SM-2 formula `EF += 0.1 - (5-q)(0.08 + (5-q)0.02)`
    ClassicSm2,
}

/// Tunable scheduler parameters.
///
/// Defaults reproduce the hybrid minutes/days model; see the constants in
/// the [`sm2`](crate::sm2) module for the individual values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sm2Parameters {
    /// Ease factor floor
    pub min_ease: f64,
    /// Ease assigned when a card's stored ease is absent or non-positive
    pub default_ease: f64,
    /// Multiplier on top of the day progression for Easy grades
    pub easy_bonus: f64,
    /// Ease reward for an Easy grade
    pub easy_ease_reward: f64,
    /// Re-queue delays in minutes for lapse sub-grades 0, 1, 2
    pub lapse_delays_min: [i64; 3],
    /// Ease penalties for lapse sub-grades 0, 1, 2
    pub lapse_ease_penalties: [f64; 3],
    /// Ease update rule for the Good band
    pub ease_update: EaseUpdate,
}

impl Default for Sm2Parameters {
    fn default() -> Self {
        Self {
            min_ease: MIN_EASE_FACTOR,
            default_ease: DEFAULT_EASE_FACTOR,
            easy_bonus: EASY_BONUS,
            easy_ease_reward: EASY_EASE_REWARD,
            lapse_delays_min: LAPSE_DELAY_MINUTES,
            lapse_ease_penalties: LAPSE_EASE_PENALTIES,
            ease_update: EaseUpdate::Neutral,
        }
    }
}

impl Sm2Parameters {
    fn lapse_index(q: f64) -> usize {
        (q.max(0.0).floor() as usize).min(2)
    }

    /// Re-queue delay for a lapse sub-grade
    pub fn lapse_delay_minutes(&self, q: f64) -> i64 {
        self.lapse_delays_min[Self::lapse_index(q)]
    }

    /// Ease penalty for a lapse sub-grade
    pub fn lapse_ease_penalty(&self, q: f64) -> f64 {
        self.lapse_ease_penalties[Self::lapse_index(q)]
    }
}

// ============================================================================
// SCHEDULER
// ============================================================================

/// The SM-2 review scheduler.
///
/// Stateless apart from its parameters; safe to share across threads and to
/// invoke concurrently for different cards.
#[derive(Debug, Clone, Default)]
pub struct Sm2Scheduler {
    params: Sm2Parameters,
}

impl Sm2Scheduler {
    /// Scheduler with custom parameters
    pub fn new(params: Sm2Parameters) -> Self {
        Self { params }
    }

    /// The active parameters
    pub fn params(&self) -> &Sm2Parameters {
        &self.params
    }

    /// Schedule the next review as of the current wall clock
    pub fn schedule(&self, state: &SchedulingState, grade: Grade) -> SchedulingState {
        self.schedule_at(state, grade, Utc::now())
    }

    /// Compute the scheduling state after a review graded `grade` at `now`.
    ///
    /// Returns a new state; the input is untouched. On top of the band
    /// transition this performs the per-review bookkeeping: the review count
    /// goes up by one, `last_reviewed_at` is set to `now`, and exactly one
    /// entry is appended to the grade history.
    pub fn schedule_at(
        &self,
        state: &SchedulingState,
        grade: Grade,
        now: DateTime<Utc>,
    ) -> SchedulingState {
        let q = grade.value();
        // Tolerate rows written before the ease column existed
        let ease = if state.ease_factor > 0.0 {
            state.ease_factor
        } else {
            self.params.default_ease
        };

        let mut next = state.clone();

        if grade.is_lapse() {
            // Forgetting resets the streak; re-queue in minutes within the
            // session and nudge the ease down so the card matures slower.
            next.repetitions = 0;
            next.interval_days = 0;
            next.ease_factor = (ease - self.params.lapse_ease_penalty(q)).max(self.params.min_ease);
            next.next_review_at = now + Duration::minutes(self.params.lapse_delay_minutes(q));
        } else if !grade.is_easy() {
            // Classic SM-2 graduation: 1 day, 6 days, then interval x ease.
            // The interval uses the ease as it stood before this review.
            next.interval_days = match state.repetitions {
                0 => FIRST_INTERVAL_DAYS,
                1 => SECOND_INTERVAL_DAYS,
                _ => growth_interval(state.interval_days, ease),
            };
            next.repetitions = state.repetitions + 1;
            next.ease_factor = match self.params.ease_update {
                EaseUpdate::Neutral => ease,
                EaseUpdate::ClassicSm2 => classic_sm2_ease(ease, q),
            }
            .max(self.params.min_ease);
            next.next_review_at = now + Duration::days(next.interval_days as i64);
        } else {
            // Easy pass: reward the ease first, then grow with the bonus.
            next.ease_factor = (ease + self.params.easy_ease_reward).max(self.params.min_ease);
            next.interval_days = match state.repetitions {
                0 => EASY_FIRST_INTERVAL_DAYS,
                1 => growth_interval(SECOND_INTERVAL_DAYS, self.params.easy_bonus),
                _ => growth_interval(
                    state.interval_days,
                    next.ease_factor * self.params.easy_bonus,
                ),
            };
            next.repetitions = state.repetitions + 1;
            next.next_review_at = now + Duration::days(next.interval_days as i64);
        }

        next.review_count = state.review_count + 1;
        next.last_reviewed_at = Some(now);
        next.grade_history.push(GradeEntry { ts: now, grade: q });
        next
    }
}

// ============================================================================
// TESTS
// ============================================================================
