//! Mathematical finite-dimensional vector.
use num_traits::{Float, Zero};
use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

/// A mathematical vector in a finite dimensional vector space.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
// See <https://github.com/est31/serde-big-array/issues/12#issue-1115462786>
#[serde(
    transparent,
    bound(
        serialize = "for<'a> T: Serialize + Deserialize<'a>",
        deserialize = "T: Serialize + Deserialize<'de>"
    )
)]
pub struct Vector<T, const N: usize>(#[serde(with = "BigArray")] pub [T; N]);

/// Position / velocity vector of the particle world.
pub type Vec2 = Vector<f64, 2>;

impl<T, const N: usize> From<[T; N]> for Vector<T, N> {
    fn from(coordinates: [T; N]) -> Self {
        Self(coordinates)
    }
}

impl<T: Zero, const N: usize> Default for Vector<T, N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Zero, const N: usize> Zero for Vector<T, N> {
    fn zero() -> Self {
        Self(array_init::array_init(|_| T::zero()))
    }

    fn is_zero(&self) -> bool {
        self.0.iter().all(T::is_zero)
    }

    fn set_zero(&mut self) {
        self.0.iter_mut().for_each(T::set_zero)
    }
}

impl<T, const N: usize> Vector<T, N> {
    /// Vector coordinates as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// Apply a function to each coordinate.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Vector<U, N> {
        Vector(self.0.map(f))
    }
}

impl<T: Float, const N: usize> Vector<T, N> {
    /// Squared Euclidean norm.
    pub fn norm_squared(&self) -> T {
        self.0.iter().fold(T::zero(), |acc, &x| x.mul_add(x, acc))
    }

    /// Euclidean norm.
    pub fn norm(&self) -> T {
        self.norm_squared().sqrt()
    }

    /// Euclidean distance to another vector.
    pub fn distance(&self, other: &Self) -> T {
        (*self - *other).norm()
    }

    /// Whether every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|x| x.is_finite())
    }
}

impl<T, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.0[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for Vector<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.0[index]
    }
}

/// Vector addition
impl<T: Add<Output = T>, const N: usize> Add for Vector<T, N> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let mut other = other.0.into_iter();
        // Both iterators have length N
        Self(self.0.map(|a| a + other.next().unwrap()))
    }
}

/// In-place vector addition
impl<T: AddAssign, const N: usize> AddAssign for Vector<T, N> {
    fn add_assign(&mut self, other: Self) {
        for (a, b) in self.0.iter_mut().zip(other.0) {
            *a += b
        }
    }
}

/// Vector subtraction
impl<T: Sub<Output = T>, const N: usize> Sub for Vector<T, N> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        let mut other = other.0.into_iter();
        Self(self.0.map(|a| a - other.next().unwrap()))
    }
}

/// In-place vector subtraction
impl<T: SubAssign, const N: usize> SubAssign for Vector<T, N> {
    fn sub_assign(&mut self, other: Self) {
        for (a, b) in self.0.iter_mut().zip(other.0) {
            *a -= b
        }
    }
}

/// Negation
impl<T: Neg<Output = T>, const N: usize> Neg for Vector<T, N> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|a| -a)
    }
}

/// Scalar multiplication
impl<T: Mul<Output = T> + Copy, const N: usize> Mul<T> for Vector<T, N> {
    type Output = Self;

    fn mul(self, scalar: T) -> Self {
        self.map(|a| a * scalar)
    }
}

/// In-place scalar multiplication
impl<T: MulAssign + Copy, const N: usize> MulAssign<T> for Vector<T, N> {
    fn mul_assign(&mut self, scalar: T) {
        for a in self.0.iter_mut() {
            *a *= scalar;
        }
    }
}

/// Scalar division
impl<T: Div<Output = T> + Copy, const N: usize> Div<T> for Vector<T, N> {
    type Output = Self;

    fn div(self, scalar: T) -> Self {
        self.map(|a| a / scalar)
    }
}
