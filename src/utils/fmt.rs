//! Number formatting for reports
use super::stats::OnlineMeanVariance;
use std::fmt;

/// A float with three decimals, in scientific notation when very large or very small.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Compact(pub f64);

impl fmt::Display for Compact {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let magnitude = self.0.abs();
        if magnitude >= 1e5 || (magnitude < 1e-3 && magnitude != 0.0) {
            write!(f, "{:.2e}", self.0)
        } else {
            write!(f, "{:.3}", self.0)
        }
    }
}

/// Mean and standard deviation of a sample: `mean ± stddev`, or `-` when empty.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MeanStd<'a>(pub &'a OnlineMeanVariance<f64>);

impl fmt::Display for MeanStd<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.0.mean(), self.0.stddev()) {
            (Some(mean), Some(stddev)) if self.0.count() > 1 => {
                write!(f, "{} ± {}", Compact(mean), Compact(stddev))
            }
            (Some(mean), _) => write!(f, "{}", Compact(mean)),
            (None, _) => f.write_str("-"),
        }
    }
}
