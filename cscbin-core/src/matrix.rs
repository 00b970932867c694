//! In-memory compressed sparse column matrix

use alloc::vec::Vec;

use crate::traits::{MatrixOperations, SparseMatrix};
use crate::validation::{validate_col_ptr, validate_lengths, validate_row_indices};
use crate::{FormatError, Result};

/// Immutable CSC matrix with byte-valued entries.
///
/// `row_index[col_ptr[c]..col_ptr[c + 1]]` holds the row positions of
/// column `c`, and `values` is index-aligned with `row_index`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SparseMatrixCsc {
    num_rows: u32,
    num_cols: u32,
    col_ptr: Vec<u32>,
    row_index: Vec<u32>,
    values: Vec<u8>,
}

impl SparseMatrixCsc {
    /// Build a matrix from its raw arrays.
    ///
    /// Only array lengths are checked here; call [`Self::validate`] for the
    /// ordering and row range checks.
    pub fn from_parts(
        num_rows: u32,
        col_ptr: Vec<u32>,
        values: Vec<u8>,
        row_index: Vec<u32>,
    ) -> Result<Self> {
        let num_cols = col_ptr
            .len()
            .checked_sub(1)
            .ok_or(FormatError::CorruptHeader)?;
        let num_cols = u32::try_from(num_cols).map_err(|_| FormatError::SizeOverflow)?;
        validate_lengths(&col_ptr, values.len(), row_index.len())?;

        Ok(Self {
            num_rows,
            num_cols,
            col_ptr,
            row_index,
            values,
        })
    }

    /// Check that `col_ptr` is non-decreasing and every row index is in range
    pub fn validate(&self) -> Result<()> {
        validate_col_ptr(&self.col_ptr)?;
        validate_row_indices(&self.row_index, self.num_rows)
    }

    pub fn num_rows(&self) -> u32 {
        self.num_rows
    }

    pub fn num_cols(&self) -> u32 {
        self.num_cols
    }

    pub fn col_ptr(&self) -> &[u32] {
        &self.col_ptr
    }

    pub fn row_index(&self) -> &[u32] {
        &self.row_index
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// Fraction of cells that hold a stored entry
    pub fn density(&self) -> f64 {
        let cells = self.num_rows as f64 * self.num_cols as f64;
        if cells == 0.0 {
            0.0
        } else {
            self.values.len() as f64 / cells
        }
    }

    /// Row positions and values of column `col`.
    ///
    /// Returns `None` when the column is out of range or its pointer range
    /// is unusable (possible only on unvalidated input).
    pub fn column(&self, col: usize) -> Option<(&[u32], &[u8])> {
        if col >= self.num_cols as usize {
            return None;
        }
        let start = self.col_ptr[col] as usize;
        let end = self.col_ptr[col + 1] as usize;
        Some((self.row_index.get(start..end)?, self.values.get(start..end)?))
    }

    /// Stored entries as `(row, col, value)` in column-major order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, u8)> + '_ {
        (0..self.num_cols as usize).flat_map(move |col| {
            let (rows, values) = self.column(col).unwrap_or((&[], &[]));
            rows.iter()
                .zip(values)
                .map(move |(&row, &value)| (row, col as u32, value))
        })
    }

    /// Hand out the raw arrays as `(col_ptr, row_index, values)`
    pub fn into_parts(self) -> (Vec<u32>, Vec<u32>, Vec<u8>) {
        (self.col_ptr, self.row_index, self.values)
    }
}

impl SparseMatrix for SparseMatrixCsc {
    type Element = u8;

    fn get_element(&self, row: usize, col: usize) -> Option<u8> {
        let (rows, values) = self.column(col)?;
        rows.iter()
            .position(|&r| r as usize == row)
            .map(|idx| values[idx])
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.num_rows as usize, self.num_cols as usize)
    }

    fn nnz(&self) -> usize {
        self.values.len()
    }
}

impl MatrixOperations for SparseMatrixCsc {
    fn get_row(&self, row_index: usize) -> Vec<(usize, u8)> {
        self.iter()
            .filter(|&(row, _, _)| row as usize == row_index)
            .map(|(_, col, value)| (col as usize, value))
            .collect()
    }

    fn get_col(&self, col_index: usize) -> Vec<(usize, u8)> {
        match self.column(col_index) {
            Some((rows, values)) => rows
                .iter()
                .zip(values)
                .map(|(&row, &value)| (row as usize, value))
                .collect(),
            None => Vec::new(),
        }
    }
}
