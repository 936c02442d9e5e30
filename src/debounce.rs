//! Dead-time debounce filter.
//!
//! Turns raw edge timestamps into genuine intervals:
//!
//! ```text
//! t0        t1   t1'        t2
//! │─────────│────│──────────│
//! seed      accept  bounce   accept (t2 - t1)
//! ```
//!
//! - The first edge only seeds the baseline, it never yields an interval
//! - An edge closer than `dead_time` to the last accepted edge is bounce:
//!   dropped, and the baseline is left untouched
//! - Otherwise the interval is emitted and the edge becomes the new baseline

use crate::timing::{Interval, Timestamp};

/// Result of feeding one edge to the filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DebounceOutcome {
    /// First edge after boot or reset: baseline recorded.
    Seeded,
    /// Genuine interval since the last accepted edge.
    Accepted(Interval),
    /// Too close to the last accepted edge.
    Rejected(Interval),
}

impl DebounceOutcome {
    /// The accepted interval, if any.
    pub fn interval(&self) -> Option<Interval> {
        match self {
            DebounceOutcome::Accepted(interval) => Some(*interval),
            _ => None,
        }
    }
}

/// Debounce state for one input.
#[derive(Clone, Debug)]
pub struct DebounceFilter {
    dead_time: Interval,
    last_accepted: Timestamp,
    first_edge_seen: bool,
    rejected: u32,
}

impl DebounceFilter {
    /// Create a filter with the given dead time.
    pub const fn new(dead_time: Interval) -> Self {
        Self {
            dead_time,
            last_accepted: Timestamp::ZERO,
            first_edge_seen: false,
            rejected: 0,
        }
    }

    /// Feed one edge timestamp.
    pub fn accept(&mut self, timestamp: Timestamp) -> DebounceOutcome {
        if !self.first_edge_seen {
            self.last_accepted = timestamp;
            self.first_edge_seen = true;
            return DebounceOutcome::Seeded;
        }

        let delta = timestamp.elapsed_since(self.last_accepted);

        if delta >= self.dead_time {
            self.last_accepted = timestamp;
            DebounceOutcome::Accepted(delta)
        } else {
            // Baseline stays put so bounce can't shorten the next interval
            self.rejected = self.rejected.saturating_add(1);
            DebounceOutcome::Rejected(delta)
        }
    }

    /// Forget the baseline; the next edge seeds again.
    pub fn reset(&mut self) {
        self.first_edge_seen = false;
        self.last_accepted = Timestamp::ZERO;
    }

    /// Timestamp of the last accepted (or seeding) edge.
    ///
    /// `None` until the first edge has been seen.
    pub fn last_accepted(&self) -> Option<Timestamp> {
        if self.first_edge_seen {
            Some(self.last_accepted)
        } else {
            None
        }
    }

    /// Configured dead time.
    pub fn dead_time(&self) -> Interval {
        self.dead_time
    }

    /// Edges rejected as bounce since boot.
    pub fn rejected(&self) -> u32 {
        self.rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(us: u32) -> Timestamp {
        Timestamp::from_micros(us)
    }

    #[test]
    fn test_first_edge_seeds_only() {
        let mut filter = DebounceFilter::new(Interval::from_micros(10));

        assert_eq!(filter.last_accepted(), None);
        assert_eq!(filter.accept(ts(5_000_000)), DebounceOutcome::Seeded);
        assert_eq!(filter.last_accepted(), Some(ts(5_000_000)));
    }

    #[test]
    fn test_exact_dead_time_is_accepted() {
        let mut filter = DebounceFilter::new(Interval::from_micros(10));
        filter.accept(ts(100));

        assert_eq!(
            filter.accept(ts(110)),
            DebounceOutcome::Accepted(Interval::from_micros(10))
        );
    }

    #[test]
    fn test_reset_reseeds() {
        let mut filter = DebounceFilter::new(Interval::from_micros(10));
        filter.accept(ts(100));
        filter.reset();

        assert_eq!(filter.accept(ts(900)), DebounceOutcome::Seeded);
    }
}
