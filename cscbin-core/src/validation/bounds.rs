//! Structural checks for decoded CSC arrays
//!
//! Pure functions over slices; callers decide whether to run them.

use crate::FormatError;

/// Check that `col_ptr` never decreases
pub fn validate_col_ptr(col_ptr: &[u32]) -> Result<(), FormatError> {
    if col_ptr.is_empty() {
        return Err(FormatError::CorruptHeader);
    }
    if col_ptr.windows(2).any(|pair| pair[0] > pair[1]) {
        return Err(FormatError::ColumnPointerNotMonotonic);
    }
    Ok(())
}

/// Check that every row index lies in `[0, num_rows)`
pub fn validate_row_indices(row_index: &[u32], num_rows: u32) -> Result<(), FormatError> {
    if row_index.iter().any(|&row| row >= num_rows) {
        return Err(FormatError::RowIndexOutOfBounds);
    }
    Ok(())
}

/// Check that `values` and `row_index` both hold `col_ptr[last]` entries
pub fn validate_lengths(col_ptr: &[u32], values_len: usize, row_index_len: usize) -> Result<(), FormatError> {
    let nnz = *col_ptr.last().ok_or(FormatError::CorruptHeader)? as usize;
    if values_len != nnz || row_index_len != nnz {
        return Err(FormatError::LengthMismatch);
    }
    Ok(())
}
