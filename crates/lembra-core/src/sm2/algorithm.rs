//! SM-2 Core Formulas and Constants
//!
//! Pure numeric pieces of the scheduler, kept as named constants so the two
//! formula variants observed in the wild (ease-neutral "Good" vs. the classic
//! SM-2 ease update) stay selectable policy rather than hardcoded behavior.

/// Ease factor floor. Intervals never grow slower than this multiplier.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Ease factor assigned to brand-new cards (and used when a stored card is
/// missing one).
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Interval after the first successful "Good" recall, in days.
pub const FIRST_INTERVAL_DAYS: i32 = 1;

/// Interval after the second consecutive successful recall, in days.
pub const SECOND_INTERVAL_DAYS: i32 = 6;

/// First interval for an "Easy" recall on a fresh card: skips the 1-day step.
pub const EASY_FIRST_INTERVAL_DAYS: i32 = 4;

/// Multiplier applied on top of the normal day progression for "Easy" grades.
pub const EASY_BONUS: f64 = 1.3;

/// Ease factor reward for a confident "Easy" recall.
pub const EASY_EASE_REWARD: f64 = 0.15;

/// Re-queue delay in minutes for lapse sub-grades 0, 1 and 2.
///
/// Total blackouts come back almost immediately; a borderline "Hard" answer
/// gets a slightly longer breather. All three keep the card inside the
/// current study session.
pub const LAPSE_DELAY_MINUTES: [i64; 3] = [5, 5, 10];

/// Ease factor penalty for lapse sub-grades 0, 1 and 2.
///
/// The penalty scales inversely with grade quality: a near-miss (q = 2)
/// loses 0.15, a blackout loses twice that.
pub const LAPSE_EASE_PENALTIES: [f64; 3] = [0.30, 0.20, 0.15];

/// Upper bound on any day-scale interval (~100 years).
///
/// Repeated ease growth is geometric, so without a ceiling the interval
/// eventually leaves the representable date range. Any review landing at the
/// cap stays there.
pub const MAX_INTERVAL_DAYS: i32 = 36_500;

/// Classic SM-2 ease factor update for a passing grade.
///
/// `EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))`, floored at
/// [`MIN_EASE_FACTOR`]. A perfect 5 gains 0.1, a 4 is neutral, a 3 loses
/// 0.14.
pub fn classic_sm2_ease(ease: f64, q: f64) -> f64 {
    let next = ease + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02));
    next.max(MIN_EASE_FACTOR)
}

/// Next day-scale interval: previous interval scaled by a growth factor,
/// rounded to the nearest whole day and capped at [`MAX_INTERVAL_DAYS`].
/// Fractional days are never persisted.
pub fn growth_interval(previous_days: i32, factor: f64) -> i32 {
    let next = (previous_days as f64 * factor).round();
    if next >= MAX_INTERVAL_DAYS as f64 {
        MAX_INTERVAL_DAYS
    } else {
        next as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_ease_update_values() {
        // Perfect recall gains 0.1
        assert!((classic_sm2_ease(2.5, 5.0) - 2.6).abs() < 1e-9);
        // Grade 4 is ease-neutral in the classic formula
        assert!((classic_sm2_ease(2.5, 4.0) - 2.5).abs() < 1e-9);
        // Grade 3 loses 0.14
        assert!((classic_sm2_ease(2.5, 3.0) - 2.36).abs() < 1e-9);
    }

    #[test]
    fn test_classic_ease_floor() {
        assert_eq!(classic_sm2_ease(1.3, 3.0), MIN_EASE_FACTOR);
        assert_eq!(classic_sm2_ease(0.5, 3.0), MIN_EASE_FACTOR);
    }

    #[test]
    fn test_growth_interval_rounds_to_days() {
        assert_eq!(growth_interval(6, 2.5), 15);
        assert_eq!(growth_interval(15, 2.5), 38); // 37.5 rounds up
        assert_eq!(growth_interval(1, 1.3), 1); // 1.3 rounds down
    }

    #[test]
    fn test_growth_interval_caps_at_maximum() {
        assert_eq!(growth_interval(MAX_INTERVAL_DAYS, 2.5), MAX_INTERVAL_DAYS);
        assert_eq!(growth_interval(30_000, 2.5), MAX_INTERVAL_DAYS);
        // The product can exceed i32 long before the cast would wrap
        assert_eq!(growth_interval(i32::MAX, 2.5), MAX_INTERVAL_DAYS);
    }

    #[test]
    fn test_lapse_tables_scale_with_quality() {
        // Lower quality: shorter delay, steeper penalty
        assert!(LAPSE_DELAY_MINUTES[0] <= LAPSE_DELAY_MINUTES[2]);
        assert!(LAPSE_EASE_PENALTIES[0] > LAPSE_EASE_PENALTIES[2]);
        assert!((LAPSE_EASE_PENALTIES[2] - 0.15).abs() < 1e-9);
    }
}
