use super::report::{FlushPolicy, Summary};
use super::Id;
use coarsetime::{Duration as CDuration, Instant as CInstant};
use std::time::Duration;

/// Report every `interval` increments of a counter, and at least every `max_wait`.
///
/// With the default counter `episodes` each report covers a fixed number of episodes,
/// while long episodes still produce output at a steady pace.
/// A counter-triggered report is written at the end of the group that reached the multiple,
/// so the counter should be logged in the same group as the values it counts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportSchedule {
    /// ID of the counter
    pub counter: Id,
    /// Report length in counter increments. Zero disables counter-based reports.
    pub interval: u64,
    // The clock is read at every group start, which happens on every environment step,
    // so it uses a coarse clock.
    max_wait: CDuration,
    last_report: CInstant,
    due: bool,
}

impl ReportSchedule {
    pub fn new(counter: Id, interval: u64, max_wait: Duration) -> Self {
        Self {
            counter,
            interval,
            max_wait: CDuration::new(max_wait.as_secs(), max_wait.subsec_nanos()),
            last_report: CInstant::now(),
            due: false,
        }
    }

    /// Report every `interval` episodes, or every 5 seconds if episodes take longer.
    pub fn every_episodes(interval: u64) -> Self {
        Self::new(Id::new("episodes"), interval, Duration::from_secs(5))
    }
}

impl Default for ReportSchedule {
    fn default() -> Self {
        Self::every_episodes(100)
    }
}

impl FlushPolicy for ReportSchedule {
    #[inline]
    fn flush_before_group(&mut self) -> bool {
        self.last_report.elapsed() > self.max_wait
    }

    #[inline]
    fn observe(&mut self, id: &Id, summary: &Summary) {
        if self.interval == 0 || id != &self.counter {
            return;
        }
        if let Summary::Counter { total, .. } = summary {
            self.due |= total % self.interval == 0;
        }
    }

    #[inline]
    fn flush_after_group(&mut self) -> bool {
        self.due
    }

    #[inline]
    fn flushed(&mut self) {
        self.due = false;
        self.last_report = CInstant::now();
    }
}
