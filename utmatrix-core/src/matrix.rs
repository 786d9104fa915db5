use crate::error::{Result, UtMatrixError};
use crate::ops;
use crate::traits::{Element, Matrix};
use crate::vector::OffsetVector;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Deref, Index, IndexMut, Mul, Sub};

/// Largest row (and column) count an `UpperTriangularMatrix` may have.
pub const MAX_MATRIX_SIZE: usize = 10_000;

/// An owned square upper-triangular matrix stored as one `OffsetVector` per row.
///
/// Row `i` has start index `i` and length `size - i`, so it holds columns
/// `i..size`. Cells below the diagonal are not stored; addressing one fails
/// with `IndexOutOfRange` through the row's own bounds check.
#[derive(Debug, Serialize, Deserialize)]
#[serde(try_from = "MatrixRepr<T>")]
pub struct UpperTriangularMatrix<T> {
    rows: Vec<OffsetVector<T>>,
}

#[derive(Deserialize)]
struct MatrixRepr<T> {
    rows: Vec<OffsetVector<T>>,
}

/// Writable view of one matrix row, handed out by
/// [`UpperTriangularMatrix::row_mut`].
///
/// Reads go through `Deref` to the row itself. Writes are limited to cell
/// values, so the row keeps start index `i` and length `size - i`.
#[derive(Debug)]
pub struct RowMut<'a, T> {
    row: &'a mut OffsetVector<T>,
}

impl<'a, T> RowMut<'a, T> {
    pub fn get_mut(&mut self, j: usize) -> Result<&mut T> {
        self.row.get_mut(j)
    }

    pub fn set(&mut self, j: usize, value: T) -> Result<()> {
        self.row.set(j, value)
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.row.iter_mut()
    }

    /// Consumes the view, returning cell `j` with the view's full lifetime.
    pub fn into_mut(self, j: usize) -> Result<&'a mut T> {
        let RowMut { row } = self;
        row.get_mut(j)
    }
}

impl<T> Deref for RowMut<'_, T> {
    type Target = OffsetVector<T>;

    fn deref(&self) -> &OffsetVector<T> {
        &*self.row
    }
}

impl<T> Index<usize> for RowMut<'_, T> {
    type Output = T;

    fn index(&self, j: usize) -> &T {
        &self.row[j]
    }
}

impl<T> IndexMut<usize> for RowMut<'_, T> {
    fn index_mut(&mut self, j: usize) -> &mut T {
        &mut self.row[j]
    }
}

fn check_size(size: usize) -> Result<()> {
    if size > MAX_MATRIX_SIZE {
        log::debug!("Rejecting matrix of size {} (max {})", size, MAX_MATRIX_SIZE);
        return Err(UtMatrixError::InvalidSize {
            size,
            max: MAX_MATRIX_SIZE,
        });
    }
    Ok(())
}

impl<T: Clone + Default> UpperTriangularMatrix<T> {
    /// Creates a `size` x `size` matrix with every stored cell set to `T::default()`.
    pub fn new(size: usize) -> Result<Self> {
        check_size(size)?;
        log::trace!("Allocating upper-triangular matrix of size {}", size);
        let rows = (0..size)
            .map(|i| OffsetVector::with_start_index(size - i, i))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rows })
    }

    /// Expands the triangle into a full row-major grid, with `T::default()`
    /// below the diagonal.
    pub fn to_dense(&self) -> Vec<Vec<T>> {
        let size = self.size();
        self.rows
            .iter()
            .map(|row| {
                let mut dense = vec![T::default(); size];
                for (cell, value) in dense.iter_mut().skip(row.start_index()).zip(row) {
                    *cell = value.clone();
                }
                dense
            })
            .collect()
    }
}

impl<T> UpperTriangularMatrix<T> {
    /// Builds a matrix from prepared rows.
    ///
    /// # Errors
    /// `InvalidSize` if there are too many rows, `InvalidRow` if row `i` does
    /// not start at column `i` or does not have length `rows.len() - i`.
    pub fn from_rows(rows: Vec<OffsetVector<T>>) -> Result<Self> {
        let size = rows.len();
        check_size(size)?;
        for (i, row) in rows.iter().enumerate() {
            if row.start_index() != i {
                return Err(UtMatrixError::InvalidRow {
                    row: i,
                    reason: format!("start index {} != {}", row.start_index(), i),
                });
            }
            if row.size() != size - i {
                return Err(UtMatrixError::InvalidRow {
                    row: i,
                    reason: format!("length {} != {}", row.size(), size - i),
                });
            }
        }
        Ok(Self { rows })
    }

    /// Number of rows, equal to the number of columns.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Number of stored cells: `size * (size + 1) / 2`.
    pub fn element_count(&self) -> usize {
        self.rows.iter().map(OffsetVector::size).sum()
    }

    /// Returns row `i`, which accepts column indices `i..size`.
    ///
    /// # Errors
    /// `IndexOutOfRange` if `i >= size`.
    pub fn row(&self, i: usize) -> Result<&OffsetVector<T>> {
        let end = self.size();
        self.rows
            .get(i)
            .ok_or(UtMatrixError::IndexOutOfRange { index: i, start: 0, end })
    }

    /// Returns a writable view of row `i`. The view can change cell values
    /// but not the row's start index or length.
    ///
    /// # Errors
    /// `IndexOutOfRange` if `i >= size`.
    pub fn row_mut(&mut self, i: usize) -> Result<RowMut<'_, T>> {
        Ok(RowMut {
            row: self.row_storage_mut(i)?,
        })
    }

    fn row_storage_mut(&mut self, i: usize) -> Result<&mut OffsetVector<T>> {
        let end = self.size();
        self.rows
            .get_mut(i)
            .ok_or(UtMatrixError::IndexOutOfRange { index: i, start: 0, end })
    }

    /// Returns cell `(i, j)`.
    ///
    /// # Errors
    /// `IndexOutOfRange` if `i >= size`, `j < i` or `j >= size`.
    pub fn get(&self, i: usize, j: usize) -> Result<&T> {
        self.row(i)?.get(j)
    }

    pub fn get_mut(&mut self, i: usize, j: usize) -> Result<&mut T> {
        self.row_storage_mut(i)?.get_mut(j)
    }

    pub fn set(&mut self, i: usize, j: usize, value: T) -> Result<()> {
        self.row_storage_mut(i)?.set(j, value)
    }

    pub fn rows_iter(&self) -> std::slice::Iter<'_, OffsetVector<T>> {
        self.rows.iter()
    }
}

impl<T: Element> UpperTriangularMatrix<T> {
    /// Matrix with ones on the diagonal and zeros above it.
    pub fn identity(size: usize) -> Result<Self> {
        let mut matrix = Self::new(size)?;
        for (i, row) in matrix.rows.iter_mut().enumerate() {
            row.set(i, T::one())?;
        }
        Ok(matrix)
    }

    fn map_rows(&self, f: impl Fn(&OffsetVector<T>) -> OffsetVector<T>) -> Self {
        Self {
            rows: self.rows.iter().map(f).collect(),
        }
    }

    fn zip_rows(
        &self,
        other: &Self,
        f: impl Fn(&OffsetVector<T>, &OffsetVector<T>) -> Result<OffsetVector<T>>,
    ) -> Result<Self> {
        ops::ensure_same_size(self.size(), other.size())?;
        let rows = self
            .rows
            .iter()
            .zip(&other.rows)
            .map(|(a, b)| f(a, b))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rows })
    }

    pub fn add_scalar(&self, scalar: T) -> Self {
        self.map_rows(|row| row.add_scalar(scalar))
    }

    pub fn sub_scalar(&self, scalar: T) -> Self {
        self.map_rows(|row| row.sub_scalar(scalar))
    }

    pub fn mul_scalar(&self, scalar: T) -> Self {
        self.map_rows(|row| row.mul_scalar(scalar))
    }

    /// Cellwise sum.
    ///
    /// # Errors
    /// `SizeMismatch` if the sizes differ.
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        self.zip_rows(other, OffsetVector::try_add)
    }

    /// Cellwise difference.
    ///
    /// # Errors
    /// `SizeMismatch` if the sizes differ.
    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        self.zip_rows(other, OffsetVector::try_sub)
    }

    /// Computes `y = self * x`, touching only the stored triangle.
    /// `x` is read by storage position; the result is indexed from 0.
    ///
    /// # Errors
    /// `SizeMismatch` if `x.size() != self.size()`.
    pub fn mul_vector(&self, x: &OffsetVector<T>) -> Result<OffsetVector<T>> {
        ops::ensure_same_size(self.size(), x.size())?;
        let x = x.as_slice();
        let y = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| ops::internal_dot(row.as_slice(), &x[i..]))
            .collect::<Result<Vec<_>>>()?;
        OffsetVector::from_vec(y, 0)
    }
}

impl<T: Clone> Clone for UpperTriangularMatrix<T> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows.clone(),
        }
    }

    /// Assignment: adopts the source's size, reusing row storage where possible.
    fn clone_from(&mut self, source: &Self) {
        self.rows.clone_from(&source.rows);
    }
}

impl<T: PartialEq> PartialEq for UpperTriangularMatrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
    }
}

impl<T: Eq> Eq for UpperTriangularMatrix<T> {}

impl<T> TryFrom<MatrixRepr<T>> for UpperTriangularMatrix<T> {
    type Error = UtMatrixError;

    fn try_from(repr: MatrixRepr<T>) -> Result<Self> {
        Self::from_rows(repr.rows)
    }
}

impl<T: Element> Matrix for UpperTriangularMatrix<T> {
    type Value = T;

    fn dims(&self) -> (usize, usize) {
        (self.size(), self.size())
    }
}

/// Panics when row `i` does not exist. Use [`UpperTriangularMatrix::row`]
/// for a fallible lookup.
impl<T> Index<usize> for UpperTriangularMatrix<T> {
    type Output = OffsetVector<T>;

    fn index(&self, i: usize) -> &OffsetVector<T> {
        match self.row(i) {
            Ok(row) => row,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> Index<(usize, usize)> for UpperTriangularMatrix<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        match self.get(i, j) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<(usize, usize)> for UpperTriangularMatrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        match self.get_mut(i, j) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T: Element> Add<T> for &UpperTriangularMatrix<T> {
    type Output = UpperTriangularMatrix<T>;

    fn add(self, rhs: T) -> UpperTriangularMatrix<T> {
        self.add_scalar(rhs)
    }
}

impl<T: Element> Sub<T> for &UpperTriangularMatrix<T> {
    type Output = UpperTriangularMatrix<T>;

    fn sub(self, rhs: T) -> UpperTriangularMatrix<T> {
        self.sub_scalar(rhs)
    }
}

impl<T: Element> Mul<T> for &UpperTriangularMatrix<T> {
    type Output = UpperTriangularMatrix<T>;

    fn mul(self, rhs: T) -> UpperTriangularMatrix<T> {
        self.mul_scalar(rhs)
    }
}

impl<T: Element> Add<&UpperTriangularMatrix<T>> for &UpperTriangularMatrix<T> {
    type Output = Result<UpperTriangularMatrix<T>>;

    fn add(self, rhs: &UpperTriangularMatrix<T>) -> Self::Output {
        self.try_add(rhs)
    }
}

impl<T: Element> Sub<&UpperTriangularMatrix<T>> for &UpperTriangularMatrix<T> {
    type Output = Result<UpperTriangularMatrix<T>>;

    fn sub(self, rhs: &UpperTriangularMatrix<T>) -> Self::Output {
        self.try_sub(rhs)
    }
}

/// Matrix-vector product, see [`UpperTriangularMatrix::mul_vector`].
impl<T: Element> Mul<&OffsetVector<T>> for &UpperTriangularMatrix<T> {
    type Output = Result<OffsetVector<T>>;

    fn mul(self, rhs: &OffsetVector<T>) -> Self::Output {
        self.mul_vector(rhs)
    }
}
