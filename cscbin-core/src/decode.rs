//! Decoding a complete CSC binary image held in memory
//!
//! Sections are consumed in on-disk order: header, column pointers,
//! values, row indices. Whatever follows the row indices is reported as
//! trailing bytes rather than rejected.

use alloc::vec::Vec;

use crate::format::{CscHeader, CscLayout, Section};
use crate::matrix::SparseMatrixCsc;
use crate::validation::decode_u32_le;
use crate::FormatError;

/// A format error tied to the section where it was detected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionError {
    pub section: Section,
    pub error: FormatError,
}

impl SectionError {
    const fn new(section: Section, error: FormatError) -> Self {
        Self { section, error }
    }
}

impl core::fmt::Display for SectionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} in {}", self.error, self.section)
    }
}

/// Result of [`decode_slice`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceDecoded {
    pub header: CscHeader,
    pub matrix: SparseMatrixCsc,
    /// Bytes found after the row index section
    pub trailing_bytes: usize,
}

fn section<'a>(bytes: &'a [u8], layout: &CscLayout, which: Section) -> Result<&'a [u8], SectionError> {
    bytes
        .get(layout.range(which))
        .ok_or(SectionError::new(which, FormatError::UnexpectedEof))
}

/// Decode a CSC matrix from `bytes`.
///
/// No structural validation is applied; see [`SparseMatrixCsc::validate`].
pub fn decode_slice(bytes: &[u8]) -> Result<SliceDecoded, SectionError> {
    let header = CscHeader::from_bytes(bytes).map_err(|e| SectionError::new(Section::Header, e))?;

    // The column pointer section has to be read before nnz is known
    let col_ptr_end = header
        .col_ptr_bytes()
        .ok()
        .and_then(|len| len.checked_add(CscHeader::SIZE))
        .ok_or(SectionError::new(Section::ColumnPointers, FormatError::SizeOverflow))?;
    let col_ptr_bytes = bytes
        .get(CscHeader::SIZE..col_ptr_end)
        .ok_or(SectionError::new(Section::ColumnPointers, FormatError::UnexpectedEof))?;
    let col_ptr = decode_u32_le(col_ptr_bytes)
        .map_err(|e| SectionError::new(Section::ColumnPointers, e))?;

    let nnz = *col_ptr
        .last()
        .ok_or(SectionError::new(Section::Header, FormatError::CorruptHeader))?;
    let layout = CscLayout::calculate(&header, nnz)
        .map_err(|e| SectionError::new(Section::Values, e))?;

    let values: Vec<u8> = section(bytes, &layout, Section::Values)?.to_vec();
    let row_index = decode_u32_le(section(bytes, &layout, Section::RowIndices)?)
        .map_err(|e| SectionError::new(Section::RowIndices, e))?;

    let matrix = SparseMatrixCsc::from_parts(header.num_rows, col_ptr, values, row_index)
        .map_err(|e| SectionError::new(Section::RowIndices, e))?;

    Ok(SliceDecoded {
        header,
        matrix,
        trailing_bytes: bytes.len() - layout.total_size(),
    })
}
