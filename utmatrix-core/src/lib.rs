//! # Upper-Triangular Matrix Core Library
//!
//! Bounds-checked numeric containers with value semantics: an offset-indexed
//! vector and an upper-triangular square matrix built from one such vector per row.

// Declare modules
pub mod error;
pub mod matrix;
mod ops; // Elementwise kernels behind the operator impls
pub mod traits;
pub mod vector;

// Re-export public types
pub use error::{Result, UtMatrixError};
pub use matrix::{RowMut, UpperTriangularMatrix, MAX_MATRIX_SIZE};
pub use vector::{OffsetVector, MAX_VECTOR_SIZE};

pub use traits::{Element, Matrix};
