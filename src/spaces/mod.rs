//! Spaces: sets of possible observations and actions.
mod indexed_type;
mod interval;
mod power;

pub use indexed_type::{Indexed, IndexedTypeSpace};
pub use interval::IntervalSpace;
pub use power::PowerSpace;

use crate::logging::Loggable;
use std::fmt::Debug;

/// A mathematical space
pub trait Space: Debug {
    type Element;

    /// Check if the space contains a particular value
    fn contains(&self, value: &Self::Element) -> bool;
}

/// A space containing finitely many elements.
pub trait FiniteSpace: Space {
    /// The number of elements in the space.
    fn size(&self) -> usize;

    /// Get the index of an element.
    fn to_index(&self, element: &Self::Element) -> usize;

    /// Try to convert an index to an element.
    ///
    /// Returns `None` if the index is out of range.
    fn from_index(&self, index: usize) -> Option<Self::Element>;

    /// Log an element as a sample from the index distribution of this space.
    fn as_loggable(&self, element: &Self::Element) -> Loggable {
        Loggable::Index {
            value: self.to_index(element),
            size: self.size(),
        }
    }
}
