//! Abstract interfaces for sparse matrix access

pub mod matrix;

#[cfg(feature = "alloc")]
pub use matrix::MatrixOperations;
pub use matrix::SparseMatrix;
