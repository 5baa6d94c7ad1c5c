//! Logging statistics from environment runs
mod display;
mod report;
mod schedule;

pub use display::{DisplayBackend, DisplayLogger};
pub use report::{FlushPolicy, ReportLogger, ReportWriter, Summary};
pub use schedule::ReportSchedule;

use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Log statistics from an environment run.
///
/// Values are logged in groups, one group per environment step.
/// A report never splits a group.
pub trait StatsLogger: Send {
    /// Start a new group of logs.
    fn group_start(&mut self);

    /// Log a value within the current group.
    ///
    /// # Returns
    /// An error if the value is structurally incompatible with previous values
    /// logged under the same ID.
    fn group_log(&mut self, id: Id, value: Loggable) -> Result<(), LogError>;

    /// End the current group of logs.
    fn group_end(&mut self);

    /// Write out any accumulated values.
    fn flush(&mut self);

    /// Log a single value as its own group.
    fn log(&mut self, id: Id, value: Loggable) -> Result<(), LogError> {
        self.group_start();
        let result = self.group_log(id, value);
        self.group_end();
        result
    }
}

/// Logger that does nothing
impl StatsLogger for () {
    fn group_start(&mut self) {}
    fn group_log(&mut self, _: Id, _: Loggable) -> Result<(), LogError> {
        Ok(())
    }
    fn group_end(&mut self) {}
    fn flush(&mut self) {}
}

impl<L: StatsLogger + ?Sized> StatsLogger for &'_ mut L {
    fn group_start(&mut self) {
        L::group_start(self)
    }
    fn group_log(&mut self, id: Id, value: Loggable) -> Result<(), LogError> {
        L::group_log(self, id, value)
    }
    fn group_end(&mut self) {
        L::group_end(self)
    }
    fn flush(&mut self) {
        L::flush(self)
    }
}

/// A value that can be logged.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Loggable {
    /// Increment a counter.
    CounterIncrement(u64),
    /// A scalar value. Aggregated by mean and standard deviation.
    Scalar(f64),
    /// A sample from a distribution over `0 .. size`
    Index { value: usize, size: usize },
}

impl Loggable {
    /// The name of this variant
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::CounterIncrement(_) => "counter",
            Self::Scalar(_) => "scalar",
            Self::Index { .. } => "index",
        }
    }
}

/// Hierarchical identifier of a logged value, displayed as `a/b/c`.
///
/// Per-role statistics use the role name as the last component, e.g. `reward/rescue`.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id {
    path: Vec<Cow<'static, str>>,
}

impl Id {
    /// Create an ID from a top-level name.
    pub fn new<T: Into<Cow<'static, str>>>(name: T) -> Self {
        Self {
            path: vec![name.into()],
        }
    }

    /// Append a path component.
    #[must_use]
    pub fn with<T: Into<Cow<'static, str>>>(mut self, name: T) -> Self {
        self.path.push(name.into());
        self
    }

    /// Split into the leading path and the last component.
    pub fn split_last(&self) -> Option<(&str, &[Cow<'static, str>])> {
        self.path
            .split_last()
            .map(|(last, parent)| (last.as_ref(), parent))
    }
}

impl From<&'static str> for Id {
    fn from(name: &'static str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, part) in self.path.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            f.write_str(part)?;
        }
        Ok(())
    }
}

/// Error logging a value.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogError {
    #[error("incompatible value type; previously {prev} now {now}")]
    IncompatibleValue {
        prev: &'static str,
        now: &'static str,
    },
    #[error("incompatible index size; previously {prev} now {now}")]
    IncompatibleIndexSize { prev: usize, now: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_display_path() {
        let id = Id::new("reward").with("adversary");
        assert_eq!(id.to_string(), "reward/adversary");
    }

    #[test]
    fn id_split_last() {
        let id = Id::new("episode_return").with("trapped");
        let (last, parent) = id.split_last().unwrap();
        assert_eq!(last, "trapped");
        assert_eq!(parent, ["episode_return"]);
        assert!(Id::default().split_last().is_none());
    }

    #[test]
    fn unit_logger_accepts_anything() {
        let mut logger = ();
        assert!(logger.log("x".into(), Loggable::Scalar(1.0)).is_ok());
        assert!(logger.log("x".into(), Loggable::CounterIncrement(1)).is_ok());
    }
}
