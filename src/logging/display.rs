//! Command-line logger
use super::report::{FlushPolicy, ReportLogger, ReportWriter, Summary};
use super::{Id, LogError, Loggable, ReportSchedule, StatsLogger};
use crate::utils::fmt::MeanStd;
use crate::world::AgentRole;
use enum_map::EnumMap;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use yansi::Paint;

const LABEL_WIDTH: usize = 18;
const CELL_WIDTH: usize = 22;

/// Logger that prints reports to standard output.
#[derive(Debug)]
pub struct DisplayLogger<P: FlushPolicy = ReportSchedule>(ReportLogger<P, DisplayBackend>);

impl<P: FlushPolicy> DisplayLogger<P> {
    pub fn new(policy: P) -> Self {
        Self(ReportLogger::new(policy, DisplayBackend))
    }
}

impl<P: FlushPolicy> StatsLogger for DisplayLogger<P> {
    #[inline]
    fn group_start(&mut self) {
        self.0.group_start()
    }
    #[inline]
    fn group_log(&mut self, id: Id, value: Loggable) -> Result<(), LogError> {
        self.0.group_log(id, value)
    }
    #[inline]
    fn group_end(&mut self) {
        self.0.group_end()
    }
    #[inline]
    fn flush(&mut self) {
        self.0.flush()
    }
}

/// Prints reports to standard output.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DisplayBackend;

impl ReportWriter for DisplayBackend {
    fn write_report(&mut self, elapsed: Duration, entries: &[(&Id, &Summary)]) {
        println!("{}", Report::new(elapsed, entries));
    }
}

/// Text layout of a report.
///
/// Statistics logged per agent role (IDs of the form `<stat>/<role>`) form a table
/// with one column per role. Everything else is listed above it, one line per ID.
struct Report<'a> {
    elapsed: Duration,
    plain: Vec<(&'a Id, &'a Summary)>,
    by_role: BTreeMap<String, EnumMap<AgentRole, Option<&'a Summary>>>,
}

impl<'a> Report<'a> {
    fn new(elapsed: Duration, entries: &[(&'a Id, &'a Summary)]) -> Self {
        let mut plain = Vec::new();
        let mut by_role: BTreeMap<_, EnumMap<_, _>> = BTreeMap::new();
        for &(id, summary) in entries {
            let role_stat = id.split_last().and_then(|(last, parent)| {
                let role = AgentRole::from_name(last)?;
                (!parent.is_empty()).then(|| (parent.join("/"), role))
            });
            match role_stat {
                Some((stat, role)) => by_role.entry(stat).or_default()[role] = Some(summary),
                None => plain.push((id, summary)),
            }
        }
        Self {
            elapsed,
            plain,
            by_role,
        }
    }

    fn roles(&self) -> impl Iterator<Item = AgentRole> + use<'_, 'a> {
        AgentRole::ALL
            .into_iter()
            .filter(|&role| self.by_role.values().any(|row| row[role].is_some()))
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", Paint::fixed(8, format!("[{:.1?}]", self.elapsed)))?;
        for &(id, summary) in &self.plain {
            let label = format!("{:<width$}", id.to_string(), width = LABEL_WIDTH);
            writeln!(f, "{} {}", Paint::fixed(35, label), Cell(summary))?;
        }
        if self.by_role.is_empty() {
            return Ok(());
        }

        write!(f, "{:<width$}", "", width = LABEL_WIDTH)?;
        for role in self.roles() {
            write!(f, " {:<width$}", role.name(), width = CELL_WIDTH)?;
        }
        writeln!(f)?;
        for (stat, row) in &self.by_role {
            let label = format!("{:<width$}", stat, width = LABEL_WIDTH);
            write!(f, "{}", Paint::fixed(35, label))?;
            for role in self.roles() {
                let cell = row[role].map_or_else(|| "-".to_string(), |s| Cell(s).to_string());
                write!(f, " {:<width$}", cell, width = CELL_WIDTH)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A summary formatted as a single table cell.
struct Cell<'a>(&'a Summary);

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Summary::Counter { total, recent } => write!(f, "{} (+{})", total, recent),
            Summary::Scalar(stats) => write!(f, "{}", MeanStd(stats)),
            Summary::Index(counts) => {
                let n: u64 = counts.iter().sum();
                f.write_str("[")?;
                for (i, c) in counts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", c * 100 / n.max(1))?;
                }
                f.write_str("]%")
            }
        }
    }
}
