//! Aggregating logged values into periodic reports.
use super::{Id, LogError, Loggable, StatsLogger};
use crate::utils::stats::OnlineMeanVariance;
use coarsetime::Instant;
use std::collections::BTreeMap;
use std::time::Duration;

/// Decides when a [`ReportLogger`] writes out its accumulated values.
pub trait FlushPolicy: Send {
    /// Whether to flush before starting the next group.
    fn flush_before_group(&mut self) -> bool {
        false
    }

    /// Observe a summary right after a value has been added to it.
    fn observe(&mut self, _id: &Id, _summary: &Summary) {}

    /// Whether to flush after the group that just ended.
    fn flush_after_group(&mut self) -> bool {
        false
    }

    /// Called whenever a report is written.
    fn flushed(&mut self);
}

/// Destination of reports.
pub trait ReportWriter: Send {
    /// Write the summaries updated since the previous report, sorted by ID.
    fn write_report(&mut self, elapsed: Duration, entries: &[(&Id, &Summary)]);
}

/// Summary of the values logged under one ID.
#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    /// Counter total over the whole run and the part of it added since the last report.
    Counter { total: u64, recent: u64 },
    /// Statistics of scalars logged since the last report.
    Scalar(OnlineMeanVariance<f64>),
    /// Occurrences of each index since the last report.
    Index(Vec<u64>),
}

impl Summary {
    fn start(value: Loggable) -> Self {
        match value {
            Loggable::CounterIncrement(i) => Self::Counter {
                total: i,
                recent: i,
            },
            Loggable::Scalar(x) => Self::Scalar(std::iter::once(x).collect()),
            Loggable::Index { value, size } => {
                let mut counts = vec![0; size];
                if let Some(c) = counts.get_mut(value) {
                    *c += 1;
                }
                Self::Index(counts)
            }
        }
    }

    /// Add a value, leaving the summary unchanged if the value has a different structure.
    fn add(&mut self, value: Loggable) -> Result<(), LogError> {
        match (self, value) {
            (Self::Counter { total, recent }, Loggable::CounterIncrement(i)) => {
                *total += i;
                *recent += i;
            }
            (Self::Scalar(stats), Loggable::Scalar(x)) => stats.push(x),
            (Self::Index(counts), Loggable::Index { value, size }) => {
                if counts.len() != size {
                    return Err(LogError::IncompatibleIndexSize {
                        prev: counts.len(),
                        now: size,
                    });
                }
                if let Some(c) = counts.get_mut(value) {
                    *c += 1;
                }
            }
            (summary, value) => {
                return Err(LogError::IncompatibleValue {
                    prev: summary.kind(),
                    now: value.kind(),
                })
            }
        }
        Ok(())
    }

    /// Forget the values of the previous report. Counter totals are kept.
    fn clear_recent(&mut self) {
        match self {
            Self::Counter { recent, .. } => *recent = 0,
            Self::Scalar(stats) => *stats = OnlineMeanVariance::new(),
            Self::Index(counts) => counts.iter_mut().for_each(|c| *c = 0),
        }
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::Counter { .. } => "counter",
            Self::Scalar(_) => "scalar",
            Self::Index(_) => "index",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    summary: Summary,
    /// Updated since the last report
    updated: bool,
}

/// Accumulates logged values per ID and periodically writes them as a report.
#[derive(Debug)]
pub struct ReportLogger<P: FlushPolicy, W: ReportWriter> {
    policy: P,
    writer: W,
    entries: BTreeMap<Id, Entry>,
    report_start: Instant,
}

impl<P: FlushPolicy, W: ReportWriter> ReportLogger<P, W> {
    pub fn new(policy: P, writer: W) -> Self {
        Self {
            policy,
            writer,
            entries: BTreeMap::new(),
            report_start: Instant::now(),
        }
    }

    pub const fn writer(&self) -> &W {
        &self.writer
    }

    fn has_updates(&self) -> bool {
        self.entries.values().any(|e| e.updated)
    }
}

impl<P: FlushPolicy, W: ReportWriter> StatsLogger for ReportLogger<P, W> {
    fn group_start(&mut self) {
        if self.policy.flush_before_group() {
            self.flush();
        }
    }

    fn group_log(&mut self, id: Id, value: Loggable) -> Result<(), LogError> {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.summary.add(value)?;
            entry.updated = true;
            self.policy.observe(&id, &entry.summary);
        } else {
            let summary = Summary::start(value);
            self.policy.observe(&id, &summary);
            self.entries.insert(
                id,
                Entry {
                    summary,
                    updated: true,
                },
            );
        }
        Ok(())
    }

    fn group_end(&mut self) {
        if self.policy.flush_after_group() {
            self.flush();
        }
    }

    /// Write a report if anything was logged since the last one.
    fn flush(&mut self) {
        if self.has_updates() {
            let elapsed = Duration::from_millis(self.report_start.elapsed().as_millis());
            let updated: Vec<_> = self
                .entries
                .iter()
                .filter(|(_, e)| e.updated)
                .map(|(id, e)| (id, &e.summary))
                .collect();
            self.writer.write_report(elapsed, &updated);
            for entry in self.entries.values_mut() {
                entry.updated = false;
                entry.summary.clear_recent();
            }
        }
        self.report_start = Instant::now();
        self.policy.flushed();
    }
}

impl<P: FlushPolicy, W: ReportWriter> Drop for ReportLogger<P, W> {
    fn drop(&mut self) {
        if self.has_updates() {
            self.flush();
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{EveryGroup, Recorder};
    use super::*;

    fn logger() -> ReportLogger<EveryGroup, Recorder> {
        ReportLogger::new(EveryGroup, Recorder::default())
    }

    #[test]
    fn scalar_stats_within_group() {
        let mut logger = logger();
        logger.group_start();
        logger.group_log("r".into(), Loggable::Scalar(1.0)).unwrap();
        logger.group_log("r".into(), Loggable::Scalar(3.0)).unwrap();
        logger.group_end();

        let reports = &logger.writer().reports;
        assert_eq!(reports.len(), 1);
        match &reports[0][0].1 {
            Summary::Scalar(stats) => {
                assert_eq!(stats.count(), 2);
                assert!((stats.mean().unwrap() - 2.0).abs() < 1e-12);
            }
            s => panic!("unexpected summary {:?}", s),
        }
    }

    #[test]
    fn counter_total_survives_reports() {
        let mut logger = logger();
        logger.log("steps".into(), Loggable::CounterIncrement(3)).unwrap();
        logger.log("steps".into(), Loggable::CounterIncrement(2)).unwrap();
        assert_eq!(
            logger.writer().reports[1][0].1,
            Summary::Counter {
                total: 5,
                recent: 2
            }
        );
    }

    #[test]
    fn index_counts_reset_each_report() {
        let mut logger = logger();
        logger
            .log("a".into(), Loggable::Index { value: 1, size: 3 })
            .unwrap();
        logger
            .log("a".into(), Loggable::Index { value: 2, size: 3 })
            .unwrap();
        assert_eq!(logger.writer().reports[1][0].1, Summary::Index(vec![0, 0, 1]));
    }

    #[test]
    fn incompatible_value_rejected() {
        let mut logger = logger();
        logger.log("x".into(), Loggable::Scalar(1.0)).unwrap();
        assert_eq!(
            logger.log("x".into(), Loggable::CounterIncrement(1)),
            Err(LogError::IncompatibleValue {
                prev: "scalar",
                now: "counter"
            })
        );
    }

    #[test]
    fn incompatible_index_size_rejected() {
        let mut logger = logger();
        logger
            .log("i".into(), Loggable::Index { value: 0, size: 3 })
            .unwrap();
        assert_eq!(
            logger.log("i".into(), Loggable::Index { value: 0, size: 4 }),
            Err(LogError::IncompatibleIndexSize { prev: 3, now: 4 })
        );
    }

    #[test]
    fn only_updated_entries_reported() {
        let mut logger = logger();
        logger.log("a".into(), Loggable::Scalar(1.0)).unwrap();
        logger.log("b".into(), Loggable::Scalar(1.0)).unwrap();
        let reports = &logger.writer().reports;
        assert_eq!(reports[1].len(), 1);
        assert_eq!(reports[1][0].0, Id::new("b"));
    }

    #[test]
    fn empty_flush_writes_nothing() {
        let mut logger = logger();
        logger.flush();
        logger.log("a".into(), Loggable::Scalar(1.0)).unwrap();
        logger.flush();
        assert_eq!(logger.writer().reports.len(), 1);
    }
}
