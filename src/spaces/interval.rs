//! `IntervalSpace` definition
use super::Space;
use num_traits::Float;
use rand::distributions::Distribution;
use rand::Rng;
use rand_distr::StandardNormal;
use std::fmt;

/// A closed interval of floating-point numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntervalSpace<T = f64> {
    pub low: T,
    pub high: T,
}

impl<T: PartialOrd> IntervalSpace<T> {
    pub fn new(low: T, high: T) -> Self {
        assert!(low <= high, "require low <= high");
        Self { low, high }
    }
}

/// The default interval is the full real number line.
impl<T: Float> Default for IntervalSpace<T> {
    fn default() -> Self {
        Self {
            low: T::neg_infinity(),
            high: T::infinity(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for IntervalSpace<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IntervalSpace({}, {})", self.low, self.high)
    }
}

impl<T: Float + fmt::Debug> Space for IntervalSpace<T> {
    type Element = T;

    fn contains(&self, value: &Self::Element) -> bool {
        &self.low <= value && value <= &self.high && value.is_finite()
    }
}

/// Sample uniformly from bounded intervals and from a standard normal
/// (clamped to the interval) when unbounded.
impl<T> Distribution<T> for IntervalSpace<T>
where
    T: Float + rand::distributions::uniform::SampleUniform,
    StandardNormal: Distribution<T>,
{
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        if self.low.is_finite() && self.high.is_finite() {
            if self.low == self.high {
                self.low
            } else {
                rng.gen_range(self.low..=self.high)
            }
        } else {
            let x: T = StandardNormal.sample(rng);
            x.max(self.low).min(self.high)
        }
    }
}
