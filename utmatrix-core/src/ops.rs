// Internal elementwise kernels. These are called by the operator overloads
// and named methods defined on OffsetVector and UpperTriangularMatrix.

use crate::error::{Result, UtMatrixError};
use crate::traits::Element;

/// Fails with `SizeMismatch` unless both operand sizes agree.
pub(crate) fn ensure_same_size(left: usize, right: usize) -> Result<()> {
    if left != right {
        log::debug!(
            "Rejecting binary operation on operands of size {} and {}",
            left,
            right
        );
        return Err(UtMatrixError::SizeMismatch { left, right });
    }
    Ok(())
}

/// y[i] = f(x[i])
pub(crate) fn internal_map<T: Element>(x: &[T], f: impl Fn(T) -> T) -> Vec<T> {
    x.iter().map(|&value| f(value)).collect()
}

/// z[i] = f(x[i], y[i]), validated before anything is allocated.
pub(crate) fn internal_zip_with<T: Element>(
    x: &[T],
    y: &[T],
    f: impl Fn(T, T) -> T,
) -> Result<Vec<T>> {
    ensure_same_size(x.len(), y.len())?;
    Ok(x.iter().zip(y).map(|(&a, &b)| f(a, b)).collect())
}

/// Sum of x[i] * y[i].
pub(crate) fn internal_dot<T: Element>(x: &[T], y: &[T]) -> Result<T> {
    ensure_same_size(x.len(), y.len())?;
    Ok(x.iter().zip(y).fold(T::zero(), |acc, (&a, &b)| acc + a * b))
}
