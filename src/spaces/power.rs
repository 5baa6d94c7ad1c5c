//! Cartesian power space.
use super::Space;
use rand::distributions::Distribution;
use rand::Rng;

/// A Cartesian power of a space: a product of `len` copies of the same space.
///
/// The exponent is set at run time since observation lengths depend on the
/// number of entities in the world.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PowerSpace<S> {
    pub inner_space: S,
    pub len: usize,
}

impl<S> PowerSpace<S> {
    pub const fn new(inner_space: S, len: usize) -> Self {
        Self { inner_space, len }
    }
}

impl<S: Space> Space for PowerSpace<S> {
    type Element = Vec<S::Element>;

    fn contains(&self, value: &Self::Element) -> bool {
        value.len() == self.len && value.iter().all(|v| self.inner_space.contains(v))
    }
}

impl<S> Distribution<<Self as Space>::Element> for PowerSpace<S>
where
    S: Space + Distribution<S::Element>,
{
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> <Self as Space>::Element {
        (0..self.len).map(|_| self.inner_space.sample(rng)).collect()
    }
}
