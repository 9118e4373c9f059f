//! Review statistics
//!
//! Aggregate counters maintained alongside every review: lifetime totals,
//! reviews per day, and grade tallies bucketed the way the three-button UI
//! collapses the 0-5 scale (Bad / Good / Excellent).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sm2::Grade;

// ============================================================================
// GRADE BUCKETS
// ============================================================================

/// The three-button collapse of the 0-5 grade scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeBucket {
    /// Lapse grades (q <= 2)
    Bad,
    /// Standard pass (2 < q < 4)
    Good,
    /// Easy pass (q >= 4)
    Excellent,
}

impl GradeBucket {
    /// Bucket a validated grade
    pub fn from_grade(grade: Grade) -> Self {
        if grade.is_lapse() {
            GradeBucket::Bad
        } else if grade.is_easy() {
            GradeBucket::Excellent
        } else {
            GradeBucket::Good
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            GradeBucket::Bad => "bad",
            GradeBucket::Good => "good",
            GradeBucket::Excellent => "excellent",
        }
    }
}

impl std::fmt::Display for GradeBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-bucket review counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeTally {
    /// Lapse reviews
    pub bad: i64,
    /// Standard passes
    pub good: i64,
    /// Easy passes
    pub excellent: i64,
}

impl GradeTally {
    /// Increment the counter for one bucket
    pub fn bump(&mut self, bucket: GradeBucket) {
        match bucket {
            GradeBucket::Bad => self.bad += 1,
            GradeBucket::Good => self.good += 1,
            GradeBucket::Excellent => self.excellent += 1,
        }
    }

    /// Total reviews across buckets
    pub fn total(&self) -> i64 {
        self.bad + self.good + self.excellent
    }
}

// ============================================================================
// REVIEW STATS
// ============================================================================

/// Aggregate review statistics for one user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    /// Lifetime review count
    pub total_reviews: i64,
    /// Reviews per day, keyed YYYY-MM-DD (UTC)
    pub by_day: BTreeMap<String, i64>,
    /// Lifetime grade tallies
    pub grade_totals: GradeTally,
    /// Grade tallies per day, keyed YYYY-MM-DD (UTC)
    pub grade_by_day: BTreeMap<String, GradeTally>,
}

/// Day bucket key for a timestamp: YYYY-MM-DD in UTC
pub fn day_key(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_bucket_boundaries() {
        let bucket = |q: f64| GradeBucket::from_grade(Grade::new(q).unwrap());
        assert_eq!(bucket(0.0), GradeBucket::Bad);
        assert_eq!(bucket(2.0), GradeBucket::Bad);
        assert_eq!(bucket(3.0), GradeBucket::Good);
        assert_eq!(bucket(4.0), GradeBucket::Excellent);
        assert_eq!(bucket(5.0), GradeBucket::Excellent);
    }

    #[test]
    fn test_tally_bump_and_total() {
        let mut tally = GradeTally::default();
        tally.bump(GradeBucket::Bad);
        tally.bump(GradeBucket::Good);
        tally.bump(GradeBucket::Good);
        tally.bump(GradeBucket::Excellent);

        assert_eq!(tally.bad, 1);
        assert_eq!(tally.good, 2);
        assert_eq!(tally.excellent, 1);
        assert_eq!(tally.total(), 4);
    }

    #[test]
    fn test_day_key_format() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 7, 23, 59, 59).unwrap();
        assert_eq!(day_key(ts), "2026-03-07");
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let stats = ReviewStats::default();
        let json = serde_json::to_value(&stats).unwrap();
        assert!(json.get("totalReviews").is_some());
        assert!(json.get("gradeByDay").is_some());
    }
}
