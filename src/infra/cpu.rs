// ============================================================
// Infra — CPU Count
// ============================================================
// Reports how many logical processors a driver script should
// hand to data loaders or worker pools, leaving some headroom
// for the rest of the machine.
//
// The host count is read once at construction and never
// refreshed.
//
// Example on an 8-core host:
//   adjusted_count(1)              → 7
//   adjusted_count_by_percent(0.5) → 4

use std::num::NonZeroUsize;
use std::thread;

/// Processors excluded by `adjusted_count` when the caller has no preference
pub const DEFAULT_EXCLUDED: usize = 1;

/// Fraction excluded by `adjusted_count_by_percent` when the caller has no preference
pub const DEFAULT_EXCLUDED_PERCENT: f64 = 0.25;

// we must have at least one processor
const SINGLE_PROCESSOR: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuCount {
    total: usize,
}

impl CpuCount {
    /// Read the logical processor count of this host.
    /// Falls back to 1 if the platform cannot report it.
    pub fn new() -> Self {
        let total = thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or_else(|e| {
                tracing::warn!("Cannot read CPU count ({e}), assuming 1");
                SINGLE_PROCESSOR
            });
        Self { total }
    }

    /// Use a fixed processor count instead of the host's
    pub fn with_total(total: usize) -> Self {
        Self { total }
    }

    /// Exact number of logical CPUs
    pub fn total_count(&self) -> usize {
        self.total
    }

    /// Logical CPUs minus `excluded`, never less than one
    pub fn adjusted_count(&self, excluded: usize) -> usize {
        if self.total <= excluded {
            return SINGLE_PROCESSOR;
        }
        self.total - excluded
    }

    /// Logical CPUs minus `floor(total * percent)`, never less than one
    pub fn adjusted_count_by_percent(&self, percent: f64) -> usize {
        let excluded = (self.total as f64 * percent).floor().max(0.0) as usize;
        self.adjusted_count(excluded)
    }

    /// The four report lines printed by `print_stats`
    pub fn stats_lines(&self) -> Vec<String> {
        vec![
            format!("{:<20}{:>4}", "Total CPU Count:", self.total),
            format!("{:<20}{:>4}", "Adjusted Count:", self.adjusted_count(DEFAULT_EXCLUDED)),
            format!("{:<20}{:>4}", "  By Percent:", self.adjusted_count_by_percent(DEFAULT_EXCLUDED_PERCENT)),
            format!("{:<20}{:>4}", "  By 50 Percent:", self.adjusted_count_by_percent(0.5)),
        ]
    }

    pub fn print_stats(&self) {
        for line in self.stats_lines() {
            println!("{line}");
        }
    }
}

impl Default for CpuCount {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_with_eight_processors() {
        let cpu = CpuCount::with_total(8);
        assert_eq!(cpu.total_count(), 8);
        assert_eq!(cpu.adjusted_count(DEFAULT_EXCLUDED), 7);
        assert_eq!(cpu.adjusted_count(3), 5);
        assert_eq!(cpu.adjusted_count_by_percent(DEFAULT_EXCLUDED_PERCENT), 6);
        assert_eq!(cpu.adjusted_count_by_percent(0.75), 2);
    }

    #[test]
    fn test_excluding_everything_leaves_one() {
        let cpu   = CpuCount::new();
        let total = cpu.total_count();
        assert_eq!(cpu.adjusted_count(total), 1);
        assert_eq!(cpu.adjusted_count(total + 10), 1);
        assert_eq!(cpu.adjusted_count_by_percent(1.0), 1);
    }

    #[test]
    fn test_floor_of_one_for_any_total() {
        for n in 1..=64 {
            let cpu = CpuCount::with_total(n);
            assert_eq!(cpu.adjusted_count(n), 1, "total={n}");
            assert_eq!(cpu.adjusted_count_by_percent(1.0), 1, "total={n}");
        }
    }

    #[test]
    fn test_stats_lines_layout() {
        let lines = CpuCount::with_total(8).stats_lines();
        assert_eq!(lines[0], "Total CPU Count:       8");
        assert_eq!(lines[1], "Adjusted Count:        7");
        assert_eq!(lines[2], "  By Percent:          6");
        assert_eq!(lines[3], "  By 50 Percent:       4");
    }
}
