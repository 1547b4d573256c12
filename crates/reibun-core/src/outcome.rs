//! Per-level bookkeeping of segmentation attempts.
//!
//! Workers each keep their own tracker and the batch driver merges them, so
//! nothing here is shared or locked. Levels are reported in sorted order.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Attempt counts for one level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelCounts {
    pub attempted: usize,
    pub succeeded: usize,
}

impl LevelCounts {
    pub fn percent(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            self.succeeded as f64 * 100.0 / self.attempted as f64
        }
    }
}

/// Mergeable tally of segmentation outcomes, keyed by level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeTracker {
    levels: BTreeMap<String, LevelCounts>,
}

impl OutcomeTracker {
    pub fn new() -> Self {
        OutcomeTracker::default()
    }

    /// Count one attempt under `level`.
    pub fn record(&mut self, level: &str, matched: bool) {
        let counts = self.levels.entry(level.to_string()).or_default();
        counts.attempted += 1;
        if matched {
            counts.succeeded += 1;
        }
    }

    /// Fold another tracker into this one.
    pub fn merge(&mut self, other: OutcomeTracker) {
        for (level, counts) in other.levels {
            let own = self.levels.entry(level).or_default();
            own.attempted += counts.attempted;
            own.succeeded += counts.succeeded;
        }
    }

    /// Counts for one level; zero counts when the level never appeared.
    pub fn level(&self, level: &str) -> LevelCounts {
        self.levels.get(level).copied().unwrap_or_default()
    }

    pub fn levels(&self) -> impl Iterator<Item = (&str, LevelCounts)> {
        self.levels.iter().map(|(level, counts)| (level.as_str(), *counts))
    }

    /// Counts summed over all levels.
    pub fn total(&self) -> LevelCounts {
        let mut total = LevelCounts::default();
        for counts in self.levels.values() {
            total.attempted += counts.attempted;
            total.succeeded += counts.succeeded;
        }
        total
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl fmt::Display for OutcomeTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (level, counts) in &self.levels {
            writeln!(
                f,
                "{level}: auto-generated examples: {}/{} ({:.1}% success)",
                counts.succeeded,
                counts.attempted,
                counts.percent(),
            )?;
        }
        if self.levels.len() > 1 {
            let total = self.total();
            writeln!(
                f,
                "total: {}/{} ({:.1}% success)",
                total.succeeded,
                total.attempted,
                total.percent(),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_counts_attempts_and_successes() {
        let mut tracker = OutcomeTracker::new();
        tracker.record("N3", true);
        tracker.record("N3", false);
        tracker.record("N3", true);
        tracker.record("N1", false);

        assert_eq!(
            tracker.level("N3"),
            LevelCounts {
                attempted: 3,
                succeeded: 2
            }
        );
        assert_eq!(
            tracker.level("N1"),
            LevelCounts {
                attempted: 1,
                succeeded: 0
            }
        );
        assert_eq!(tracker.level("N2"), LevelCounts::default());
    }

    #[test]
    fn merge_adds_counts_per_level() {
        let mut a = OutcomeTracker::new();
        a.record("N2", true);
        a.record("N3", false);

        let mut b = OutcomeTracker::new();
        b.record("N2", false);
        b.record("N1", true);

        a.merge(b);
        assert_eq!(a.level("N2").attempted, 2);
        assert_eq!(a.level("N2").succeeded, 1);
        assert_eq!(a.level("N1").succeeded, 1);
        assert_eq!(a.total().attempted, 4);
        assert_eq!(a.total().succeeded, 2);
    }

    #[test]
    fn merge_order_does_not_matter() {
        let mut left = OutcomeTracker::new();
        left.record("N2", true);
        let mut right = OutcomeTracker::new();
        right.record("N2", false);
        right.record("N3", true);

        let mut ab = left.clone();
        ab.merge(right.clone());
        let mut ba = right;
        ba.merge(left);
        assert_eq!(ab, ba);
    }

    #[test]
    fn percent_of_empty_level_is_zero() {
        assert_eq!(LevelCounts::default().percent(), 0.0);
    }

    #[test]
    fn report_lists_levels_in_order() {
        let mut tracker = OutcomeTracker::new();
        for _ in 0..7 {
            tracker.record("N3", true);
        }
        tracker.record("N3", false);
        tracker.record("N1", true);

        let report = tracker.to_string();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "N1: auto-generated examples: 1/1 (100.0% success)");
        assert_eq!(lines[1], "N3: auto-generated examples: 7/8 (87.5% success)");
        assert_eq!(lines[2], "total: 8/9 (88.9% success)");
    }

    #[test]
    fn single_level_report_has_no_total_line() {
        let mut tracker = OutcomeTracker::new();
        tracker.record("N2", true);
        assert_eq!(tracker.to_string().lines().count(), 1);
    }
}
