use super::{FiniteSpace, Space};
use enum_map::Enum;
use rand::distributions::Distribution;
use rand::Rng;
use std::any;
use std::fmt;
use std::marker::PhantomData;

/// An indexed set of finitely many possiblities.
pub trait Indexed {
    /// The number of possible values this type can represent.
    const SIZE: usize;

    /// Convert into an index.
    fn as_index(&self) -> usize;

    /// Create from an index.
    fn from_index(index: usize) -> Option<Self>
    where
        Self: Sized;
}

/// Fieldless enums deriving [`Enum`] are indexed by variant order.
impl<T: Enum + Copy> Indexed for T {
    const SIZE: usize = T::LENGTH;

    fn as_index(&self) -> usize {
        self.into_usize()
    }

    fn from_index(index: usize) -> Option<Self> {
        if index < T::LENGTH {
            Some(T::from_usize(index))
        } else {
            None
        }
    }
}

/// A space defined over an indexed type.
pub struct IndexedTypeSpace<T: Indexed> {
    element_type: PhantomData<fn() -> T>,
}

impl<T: Indexed> IndexedTypeSpace<T> {
    pub const fn new() -> Self {
        Self {
            element_type: PhantomData,
        }
    }
}

impl<T: Indexed> Default for IndexedTypeSpace<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Indexed> Clone for IndexedTypeSpace<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T: Indexed> Copy for IndexedTypeSpace<T> {}

impl<T: Indexed> PartialEq for IndexedTypeSpace<T> {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

impl<T: Indexed> fmt::Debug for IndexedTypeSpace<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IndexedTypeSpace<{}>", any::type_name::<T>())
    }
}

impl<T: Indexed> Space for IndexedTypeSpace<T> {
    type Element = T;

    fn contains(&self, _element: &Self::Element) -> bool {
        true
    }
}

impl<T: Indexed> Distribution<T> for IndexedTypeSpace<T> {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        // gen_range stays below SIZE so the index is always valid
        T::from_index(rng.gen_range(0..T::SIZE)).expect("sampled index out of range")
    }
}

impl<T: Indexed> FiniteSpace for IndexedTypeSpace<T> {
    fn size(&self) -> usize {
        T::SIZE
    }

    fn to_index(&self, element: &Self::Element) -> usize {
        element.as_index()
    }

    fn from_index(&self, index: usize) -> Option<Self::Element> {
        T::from_index(index)
    }
}
