//! Fixed header of a CSC binary matrix file

use super::constants::{HEADER_SIZE, INDEX_SIZE};
use crate::{FormatError, Result};

/// The two little-endian u32 fields at the start of every file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CscHeader {
    /// Number of matrix rows
    pub num_rows: u32,
    /// Length of the column pointer array (`num_cols + 1`)
    pub col_ptr_len: u32,
}

impl CscHeader {
    /// Size of the header in bytes
    pub const SIZE: usize = HEADER_SIZE;

    /// Create a header for a matrix with the given extents.
    ///
    /// `num_cols + 1` must fit in the u32 pointer length field.
    pub const fn new(num_rows: u32, num_cols: u32) -> Result<Self> {
        match num_cols.checked_add(1) {
            Some(col_ptr_len) => Ok(Self {
                num_rows,
                col_ptr_len,
            }),
            None => Err(FormatError::SizeOverflow),
        }
    }

    /// Parse the header from the first eight bytes of `bytes`.
    ///
    /// A zero `col_ptr_len` is rejected here so every later step can
    /// rely on `num_cols = col_ptr_len - 1`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(FormatError::UnexpectedEof);
        }

        let num_rows = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let col_ptr_len = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);

        let header = Self {
            num_rows,
            col_ptr_len,
        };
        header.num_cols()?;
        Ok(header)
    }

    /// Serialize to the on-disk representation
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.num_rows.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.col_ptr_len.to_le_bytes());
        bytes
    }

    /// Number of matrix columns
    pub const fn num_cols(&self) -> Result<u32> {
        match self.col_ptr_len.checked_sub(1) {
            Some(num_cols) => Ok(num_cols),
            None => Err(FormatError::CorruptHeader),
        }
    }

    /// Byte length of the column pointer section
    pub const fn col_ptr_bytes(&self) -> Result<usize> {
        match (self.col_ptr_len as usize).checked_mul(INDEX_SIZE) {
            Some(len) => Ok(len),
            None => Err(FormatError::SizeOverflow),
        }
    }
}
