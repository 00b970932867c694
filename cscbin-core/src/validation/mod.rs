//! Validation and decoding helpers for CSC arrays
//!
//! Pure functions with no I/O dependencies.

pub mod bounds;
pub mod parsing;

pub use bounds::{validate_col_ptr, validate_lengths, validate_row_indices};
#[cfg(feature = "alloc")]
pub use parsing::decode_u32_le;
