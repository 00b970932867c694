//! Format constants for CSC binary matrices

/// Size of the fixed header (`num_rows`, `len_col_ptr`)
pub const HEADER_SIZE: usize = 8;

/// Width of one `col_ptr` or `row_index` entry
pub const INDEX_SIZE: usize = 4;

/// Width of one stored value
pub const VALUE_SIZE: usize = 1;

/// Genomic bin width encoded in synthetic row labels
pub const BIN_WIDTH: u64 = 200;
