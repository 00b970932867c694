//! cscbin - Labeled CSC Binary Matrix Loader
//!
//! Decodes sparse matrices stored in a compact compressed-sparse-column
//! binary layout and labels them with genomic bins and cell names.
//!
//! ## Architecture
//!
//! - **cscbin-core**: format definitions, validation and pure decoding (no I/O)
//! - **cscbin**: file readers, label resolution, assembly and batch loading
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cscbin::load_labeled_sparse_matrix;
//!
//! fn example() -> cscbin::Result<()> {
//!     let labeled = load_labeled_sparse_matrix("out/chr1/1.bin", "chr1", "out/chr1/cells.txt")?;
//!     for diagnostic in labeled.diagnostics() {
//!         eprintln!("warning: {diagnostic}");
//!     }
//!     if let Some(value) = labeled.get_by_label("chr1-200-400", "AAACGAAAGCGCAATA") {
//!         println!("value = {value}");
//!     }
//!     Ok(())
//! }
//! ```

// Re-export core abstractions and format definitions
pub use cscbin_core::{
    // Core traits
    MatrixOperations, SparseMatrix,
    // Format definitions
    CscHeader, CscLayout, Section, SparseMatrixCsc, BIN_WIDTH,
    // Error handling
    ErrorCategory, FormatError,
};

pub mod assemble;
pub mod batch;
pub mod config;
pub mod error;
pub mod labels;
#[cfg(feature = "mmap")]
pub mod mmap_backend;
pub mod reader;

#[cfg(test)]
mod test_util;

pub use assemble::{
    assemble, load_labeled_sparse_matrix, DgCMatrixParts, LabeledSparseMatrix, MatrixSummary,
};
pub use batch::{chromosome_names, ChromosomeLayout, ChromosomeLoad};
pub use config::{ReaderConfig, TrailingDataPolicy, Validation};
pub use error::{DecodeError, Result};
pub use labels::{bin_label, resolve_columns, resolve_rows, LabelIndex};
#[cfg(feature = "mmap")]
pub use mmap_backend::read_mmap;
pub use reader::{read, CscReader, Decoded, Diagnostic};
