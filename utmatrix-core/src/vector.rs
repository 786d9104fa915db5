use crate::error::{Result, UtMatrixError};
use crate::ops;
use crate::traits::Element;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Index, IndexMut, Mul, Range, Sub};

/// Largest number of elements an `OffsetVector` may hold.
pub const MAX_VECTOR_SIZE: usize = 100_000_000;

/// An owned, bounds-checked vector whose public indices start at `start_index`.
///
/// Valid indices are `start_index..start_index + size`. Every element access
/// goes through [`OffsetVector::get`] / [`OffsetVector::get_mut`], which map a
/// public index to its storage offset and reject anything outside that range.
///
/// Copies are always deep: `clone` allocates fresh storage and `clone_from`
/// adopts the source's size and start index.
#[derive(Debug, Serialize, Deserialize)]
#[serde(try_from = "VectorRepr<T>")]
pub struct OffsetVector<T> {
    start_index: usize,
    data: Vec<T>,
}

/// Unvalidated wire shape, checked by `TryFrom` before it becomes a vector.
#[derive(Deserialize)]
struct VectorRepr<T> {
    start_index: usize,
    data: Vec<T>,
}

fn check_shape(size: usize, start_index: usize) -> Result<()> {
    if size > MAX_VECTOR_SIZE {
        log::debug!("Rejecting vector of size {} (max {})", size, MAX_VECTOR_SIZE);
        return Err(UtMatrixError::InvalidSize {
            size,
            max: MAX_VECTOR_SIZE,
        });
    }
    if start_index.checked_add(size).is_none() {
        log::debug!(
            "Rejecting vector of size {} at start index {}",
            size,
            start_index
        );
        return Err(UtMatrixError::InvalidIndex { start_index, size });
    }
    Ok(())
}

impl<T: Clone + Default> OffsetVector<T> {
    /// Creates a vector of `size` default-valued elements indexed from 0.
    pub fn new(size: usize) -> Result<Self> {
        Self::with_start_index(size, 0)
    }

    /// Creates a vector of `size` default-valued elements indexed from `start_index`.
    pub fn with_start_index(size: usize, start_index: usize) -> Result<Self> {
        check_shape(size, start_index)?;
        log::trace!(
            "Allocating vector of size {} at start index {}",
            size,
            start_index
        );
        Ok(Self {
            start_index,
            data: vec![T::default(); size],
        })
    }
}

impl<T> OffsetVector<T> {
    /// Takes ownership of `data`, addressing its first element as `start_index`.
    pub fn from_vec(data: Vec<T>, start_index: usize) -> Result<Self> {
        check_shape(data.len(), start_index)?;
        Ok(Self { start_index, data })
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The range of valid public indices.
    pub fn indices(&self) -> Range<usize> {
        self.start_index..self.start_index + self.data.len()
    }

    pub fn contains_index(&self, index: usize) -> bool {
        self.indices().contains(&index)
    }

    fn offset(&self, index: usize) -> Result<usize> {
        index
            .checked_sub(self.start_index)
            .filter(|&offset| offset < self.data.len())
            .ok_or_else(|| UtMatrixError::IndexOutOfRange {
                index,
                start: self.start_index,
                end: self.start_index + self.data.len(),
            })
    }

    /// Returns the element at public index `index`.
    ///
    /// # Errors
    /// `IndexOutOfRange` unless `start_index <= index < start_index + size`.
    pub fn get(&self, index: usize) -> Result<&T> {
        let offset = self.offset(index)?;
        Ok(&self.data[offset])
    }

    /// Mutable counterpart of [`OffsetVector::get`].
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let offset = self.offset(index)?;
        Ok(&mut self.data[offset])
    }

    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// Elements in storage order, starting with the one at `start_index`.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Element> OffsetVector<T> {
    /// Returns a new vector with `scalar` added to every element.
    pub fn add_scalar(&self, scalar: T) -> Self {
        Self {
            start_index: self.start_index,
            data: ops::internal_map(&self.data, |v| v + scalar),
        }
    }

    pub fn sub_scalar(&self, scalar: T) -> Self {
        Self {
            start_index: self.start_index,
            data: ops::internal_map(&self.data, |v| v - scalar),
        }
    }

    pub fn mul_scalar(&self, scalar: T) -> Self {
        Self {
            start_index: self.start_index,
            data: ops::internal_map(&self.data, |v| v * scalar),
        }
    }

    /// Elementwise sum. The result keeps `self`'s start index.
    ///
    /// # Errors
    /// `SizeMismatch` if the sizes differ; start indices are not compared.
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        Ok(Self {
            start_index: self.start_index,
            data: ops::internal_zip_with(&self.data, &other.data, |a, b| a + b)?,
        })
    }

    /// Elementwise difference. The result keeps `self`'s start index.
    ///
    /// # Errors
    /// `SizeMismatch` if the sizes differ.
    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        Ok(Self {
            start_index: self.start_index,
            data: ops::internal_zip_with(&self.data, &other.data, |a, b| a - b)?,
        })
    }

    /// Dot product over storage positions.
    ///
    /// # Errors
    /// `SizeMismatch` if the sizes differ.
    pub fn dot(&self, other: &Self) -> Result<T> {
        ops::internal_dot(&self.data, &other.data)
    }
}

impl<T: Clone> Clone for OffsetVector<T> {
    fn clone(&self) -> Self {
        Self {
            start_index: self.start_index,
            data: self.data.clone(),
        }
    }

    /// Assignment: adopts the source's size and start index, reusing this
    /// vector's allocation where it is large enough.
    fn clone_from(&mut self, source: &Self) {
        self.start_index = source.start_index;
        self.data.clone_from(&source.data);
    }
}

// Equality ignores start_index.
impl<T: PartialEq> PartialEq for OffsetVector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<T: Eq> Eq for OffsetVector<T> {}

impl<T> TryFrom<VectorRepr<T>> for OffsetVector<T> {
    type Error = UtMatrixError;

    fn try_from(repr: VectorRepr<T>) -> Result<Self> {
        Self::from_vec(repr.data, repr.start_index)
    }
}

/// Panics with the `IndexOutOfRange` message when `index` is not addressable.
/// Use [`OffsetVector::get`] for a fallible lookup.
impl<T> Index<usize> for OffsetVector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<usize> for OffsetVector<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<'a, T> IntoIterator for &'a OffsetVector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// --- Scalar operators ---

impl<T: Element> Add<T> for &OffsetVector<T> {
    type Output = OffsetVector<T>;

    fn add(self, rhs: T) -> OffsetVector<T> {
        self.add_scalar(rhs)
    }
}

impl<T: Element> Sub<T> for &OffsetVector<T> {
    type Output = OffsetVector<T>;

    fn sub(self, rhs: T) -> OffsetVector<T> {
        self.sub_scalar(rhs)
    }
}

impl<T: Element> Mul<T> for &OffsetVector<T> {
    type Output = OffsetVector<T>;

    fn mul(self, rhs: T) -> OffsetVector<T> {
        self.mul_scalar(rhs)
    }
}

impl<T: Element> Add<T> for OffsetVector<T> {
    type Output = OffsetVector<T>;

    fn add(mut self, rhs: T) -> OffsetVector<T> {
        self.data.iter_mut().for_each(|v| *v = *v + rhs);
        self
    }
}

impl<T: Element> Sub<T> for OffsetVector<T> {
    type Output = OffsetVector<T>;

    fn sub(mut self, rhs: T) -> OffsetVector<T> {
        self.data.iter_mut().for_each(|v| *v = *v - rhs);
        self
    }
}

impl<T: Element> Mul<T> for OffsetVector<T> {
    type Output = OffsetVector<T>;

    fn mul(mut self, rhs: T) -> OffsetVector<T> {
        self.data.iter_mut().for_each(|v| *v = *v * rhs);
        self
    }
}

// --- Vector operators (fallible on size mismatch) ---

impl<T: Element> Add<&OffsetVector<T>> for &OffsetVector<T> {
    type Output = Result<OffsetVector<T>>;

    fn add(self, rhs: &OffsetVector<T>) -> Self::Output {
        self.try_add(rhs)
    }
}

impl<T: Element> Sub<&OffsetVector<T>> for &OffsetVector<T> {
    type Output = Result<OffsetVector<T>>;

    fn sub(self, rhs: &OffsetVector<T>) -> Self::Output {
        self.try_sub(rhs)
    }
}

/// Dot product.
impl<T: Element> Mul<&OffsetVector<T>> for &OffsetVector<T> {
    type Output = Result<T>;

    fn mul(self, rhs: &OffsetVector<T>) -> Self::Output {
        self.dot(rhs)
    }
}
