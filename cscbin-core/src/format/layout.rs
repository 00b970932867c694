//! Section layout arithmetic
//!
//! Every offset in a CSC binary file follows from the header and the last
//! column pointer. This module computes them with overflow checks and no I/O.

use super::constants::{INDEX_SIZE, VALUE_SIZE};
use super::header::CscHeader;
use crate::{FormatError, Result};

/// Sections of a CSC binary file, in on-disk order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Header,
    ColumnPointers,
    Values,
    RowIndices,
}

impl core::fmt::Display for Section {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Section::Header => write!(f, "header"),
            Section::ColumnPointers => write!(f, "column pointers"),
            Section::Values => write!(f, "values"),
            Section::RowIndices => write!(f, "row indices"),
        }
    }
}

/// Byte offsets and sizes of every section once `nnz` is known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CscLayout {
    pub col_ptr_offset: usize,
    pub col_ptr_size: usize,
    pub values_offset: usize,
    pub values_size: usize,
    pub row_index_offset: usize,
    pub row_index_size: usize,
}

impl CscLayout {
    /// Compute the layout for `header` with `nnz` stored entries
    pub fn calculate(header: &CscHeader, nnz: u32) -> Result<Self> {
        let col_ptr_offset = CscHeader::SIZE;
        let col_ptr_size = header.col_ptr_bytes()?;

        let values_offset = col_ptr_offset
            .checked_add(col_ptr_size)
            .ok_or(FormatError::SizeOverflow)?;
        let values_size = (nnz as usize)
            .checked_mul(VALUE_SIZE)
            .ok_or(FormatError::SizeOverflow)?;

        let row_index_offset = values_offset
            .checked_add(values_size)
            .ok_or(FormatError::SizeOverflow)?;
        let row_index_size = (nnz as usize)
            .checked_mul(INDEX_SIZE)
            .ok_or(FormatError::SizeOverflow)?;

        // Make sure the end offset is representable
        row_index_offset
            .checked_add(row_index_size)
            .ok_or(FormatError::SizeOverflow)?;

        Ok(Self {
            col_ptr_offset,
            col_ptr_size,
            values_offset,
            values_size,
            row_index_offset,
            row_index_size,
        })
    }

    /// Total number of bytes a well-formed file occupies
    pub const fn total_size(&self) -> usize {
        self.row_index_offset + self.row_index_size
    }

    /// Byte range of a section
    pub const fn range(&self, section: Section) -> core::ops::Range<usize> {
        match section {
            Section::Header => 0..CscHeader::SIZE,
            Section::ColumnPointers => {
                self.col_ptr_offset..self.col_ptr_offset + self.col_ptr_size
            }
            Section::Values => self.values_offset..self.values_offset + self.values_size,
            Section::RowIndices => {
                self.row_index_offset..self.row_index_offset + self.row_index_size
            }
        }
    }
}
