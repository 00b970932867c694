#![no_std]

//! cscbin-core - CSC Binary Matrix Format Definitions
//!
//! This crate provides the format definitions, validation and pure decoding
//! for labeled compressed-sparse-column matrix files. It performs no I/O.
//!
//! The on-disk layout is little-endian throughout:
//!
//! ```text
//! num_rows: u32 | len_col_ptr: u32 | col_ptr: [u32; len_col_ptr]
//!   | values: [u8; nnz] | row_index: [u32; nnz]
//! ```
//!
//! where `nnz = col_ptr[len_col_ptr - 1]`.

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod error;
pub mod format;
pub mod traits;
pub mod validation;

#[cfg(feature = "alloc")]
pub mod decode;
#[cfg(feature = "alloc")]
pub mod matrix;

pub use error::*;
pub use format::*;
pub use traits::*;

#[cfg(feature = "alloc")]
pub use decode::{decode_slice, SectionError, SliceDecoded};
#[cfg(feature = "alloc")]
pub use matrix::SparseMatrixCsc;
