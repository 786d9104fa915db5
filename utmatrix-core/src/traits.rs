use num_traits::Num;
use std::fmt::Debug;

/// Capability set required of container elements: default-constructible,
/// copyable, comparable and closed under `+`, `-` and `*`.
///
/// Blanket-implemented, so every primitive numeric type qualifies.
pub trait Element: Copy + Debug + Default + PartialEq + Num {}

impl<T> Element for T where T: Copy + Debug + Default + PartialEq + Num {}

/// Generic trait representing a square-or-rectangular matrix shape.
pub trait Matrix: Debug {
    /// The underlying numeric type of the matrix elements (e.g., i32, f64).
    type Value: Element;

    /// Returns the dimensions of the matrix as (rows, columns).
    fn dims(&self) -> (usize, usize);

    /// Returns the number of rows.
    fn rows(&self) -> usize {
        self.dims().0
    }

    /// Returns the number of columns.
    fn cols(&self) -> usize {
        self.dims().1
    }

    /// Checks if the matrix is square.
    fn is_square(&self) -> bool {
        let (rows, cols) = self.dims();
        rows == cols
    }
}
