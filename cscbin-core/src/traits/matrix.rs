//! Core matrix abstraction traits
//!
//! Pure interfaces; the concrete CSC value lives in [`crate::matrix`].

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// Core sparse matrix trait for format-agnostic access
pub trait SparseMatrix {
    /// The element type stored in this matrix
    type Element: Copy;

    /// Get an element at the specified position
    ///
    /// Returns `None` if the element is not stored or if the position is
    /// out of bounds.
    fn get_element(&self, row: usize, col: usize) -> Option<Self::Element>;

    /// Get matrix dimensions as (rows, cols)
    fn dimensions(&self) -> (usize, usize);

    /// Get number of stored elements
    fn nnz(&self) -> usize;
}

/// Row and column extraction (requires the `alloc` feature)
#[cfg(feature = "alloc")]
pub trait MatrixOperations: SparseMatrix {
    /// All stored `(col, value)` pairs of a row, in column order
    fn get_row(&self, row_index: usize) -> Vec<(usize, Self::Element)>;

    /// All stored `(row, value)` pairs of a column, in storage order
    fn get_col(&self, col_index: usize) -> Vec<(usize, Self::Element)>;
}
