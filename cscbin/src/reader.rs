//! Streaming reader for CSC binary matrix files
//!
//! Sections are read with exact-length reads in on-disk order. The header
//! fixes the column pointer length, the last column pointer fixes `nnz`,
//! and `nnz` fixes the sizes of the value and row index sections.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use cscbin_core::validation::decode_u32_le;
use cscbin_core::{CscHeader, CscLayout, Section, SparseMatrixCsc};

use crate::config::{ReaderConfig, TrailingDataPolicy, Validation};
use crate::error::{DecodeError, Result};

/// Upper bound on the up-front allocation for a single section
const READ_CHUNK: usize = 1 << 20;

/// Non-fatal finding attached to a successful decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Diagnostic {
    /// Bytes remain after the row index section
    TrailingData { extra: usize },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::TrailingData { extra } => {
                write!(f, "end of file not reached: {extra} trailing byte(s)")
            }
        }
    }
}

/// A decoded matrix together with any diagnostics raised while reading it
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub matrix: SparseMatrixCsc,
    pub diagnostics: Vec<Diagnostic>,
}

/// Decoder for CSC binary matrix files
#[derive(Debug, Clone, Copy, Default)]
pub struct CscReader {
    config: ReaderConfig,
}

impl CscReader {
    /// Create a reader with the given configuration
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Decode the matrix stored at `path`
    #[tracing::instrument(level = "debug", skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn decode_file<P: AsRef<Path>>(&self, path: P) -> Result<Decoded> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| DecodeError::io(path, e))?;
        // The handle is dropped on every return path below
        self.decode_stream(BufReader::new(file), path)
    }

    /// Decode a matrix from any byte stream
    pub fn decode_reader<R: Read>(&self, reader: R) -> Result<Decoded> {
        self.decode_stream(reader, Path::new("<reader>"))
    }

    fn decode_stream<R: Read>(&self, mut reader: R, origin: &Path) -> Result<Decoded> {
        let header_bytes = read_section(&mut reader, CscHeader::SIZE, Section::Header, origin)?;
        let header = CscHeader::from_bytes(&header_bytes)?;
        let num_cols = header.num_cols()?;

        let col_ptr_bytes = read_section(
            &mut reader,
            header.col_ptr_bytes()?,
            Section::ColumnPointers,
            origin,
        )?;
        let col_ptr = decode_u32_le(&col_ptr_bytes)?;
        let nnz = col_ptr[num_cols as usize];
        let layout = CscLayout::calculate(&header, nnz)?;
        tracing::debug!(
            num_rows = header.num_rows,
            num_cols,
            nnz,
            expected_size = layout.total_size(),
            "parsed column pointers"
        );

        let values = read_section(&mut reader, layout.values_size, Section::Values, origin)?;
        let row_index_bytes =
            read_section(&mut reader, layout.row_index_size, Section::RowIndices, origin)?;
        let row_index = decode_u32_le(&row_index_bytes)?;

        let trailing = count_trailing(&mut reader, origin)?;
        let matrix = SparseMatrixCsc::from_parts(header.num_rows, col_ptr, values, row_index)?;
        self.finish(matrix, trailing, origin)
    }

    /// Apply validation and the trailing data policy to a decoded matrix
    pub(crate) fn finish(
        &self,
        matrix: SparseMatrixCsc,
        trailing: usize,
        origin: &Path,
    ) -> Result<Decoded> {
        if self.config.validation == Validation::Strict {
            matrix.validate().map_err(DecodeError::Structure)?;
        }

        let mut diagnostics = Vec::new();
        if trailing > 0 {
            match self.config.trailing_data {
                TrailingDataPolicy::Error => {
                    return Err(DecodeError::TrailingData { extra: trailing })
                }
                TrailingDataPolicy::Warn => {
                    tracing::warn!(
                        path = %origin.display(),
                        extra = trailing,
                        "end of file not reached"
                    );
                    diagnostics.push(Diagnostic::TrailingData { extra: trailing });
                }
            }
        }

        Ok(Decoded {
            matrix,
            diagnostics,
        })
    }
}

/// Read exactly `len` bytes.
///
/// The buffer grows with the data actually read, so a header that
/// declares more than the file holds fails with `UnexpectedEof` instead of
/// allocating the declared size.
fn read_section<R: Read>(
    reader: &mut R,
    len: usize,
    section: Section,
    origin: &Path,
) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(len.min(READ_CHUNK));
    reader
        .by_ref()
        .take(len as u64)
        .read_to_end(&mut buf)
        .map_err(|e| DecodeError::from_read(origin, section, e))?;
    if buf.len() != len {
        return Err(DecodeError::UnexpectedEof { section });
    }
    Ok(buf)
}

/// Probe for one more byte; when present, count everything that remains
fn count_trailing<R: Read>(reader: &mut R, origin: &Path) -> Result<usize> {
    let mut probe = [0u8; 1];
    loop {
        match reader.read(&mut probe) {
            Ok(0) => return Ok(0),
            Ok(_) => break,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(DecodeError::io(origin, e)),
        }
    }
    let rest = std::io::copy(reader, &mut std::io::sink()).map_err(|e| DecodeError::io(origin, e))?;
    Ok(1 + rest as usize)
}

/// Decode the matrix at `path` with the default configuration.
///
/// Trailing data is logged and otherwise ignored; use [`CscReader`] to
/// inspect diagnostics or to change the policy.
pub fn read<P: AsRef<Path>>(path: P) -> Result<SparseMatrixCsc> {
    CscReader::default()
        .decode_file(path)
        .map(|decoded| decoded.matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{encode, write_temp};
    use cscbin_core::{FormatError, SparseMatrix};

    #[test]
    fn test_read_file() {
        let bytes = encode(4, &[0, 2, 2, 3], &[1, 2, 255], &[0, 3, 1]);
        let (_dir, path) = write_temp("m.bin", &bytes);

        let m = read(&path).unwrap();
        assert_eq!(m.dimensions(), (4, 3));
        assert_eq!(m.col_ptr(), &[0, 2, 2, 3]);
        assert_eq!(m.values(), &[1, 2, 255]);
        assert_eq!(m.row_index(), &[0, 3, 1]);
    }

    #[test]
    fn test_consumes_exact_size() {
        // 8 + 4n + nnz + 4*nnz with n + 1 = 4 pointers and nnz = 3
        let bytes = encode(4, &[0, 2, 2, 3], &[1, 2, 3], &[0, 3, 1]);
        assert_eq!(bytes.len(), 8 + 4 * 4 + 3 + 4 * 3);

        let mut cursor = std::io::Cursor::new(bytes.clone());
        let decoded = CscReader::default().decode_reader(&mut cursor).unwrap();
        assert!(decoded.diagnostics.is_empty());
        assert_eq!(cursor.position() as usize, bytes.len());
    }

    #[test]
    fn test_empty_matrix() {
        let bytes = encode(3, &[0, 0, 0], &[], &[]);
        let decoded = CscReader::default().decode_reader(&bytes[..]).unwrap();
        assert_eq!(decoded.matrix.nnz(), 0);
        assert!(decoded.matrix.values().is_empty());
        assert!(decoded.matrix.row_index().is_empty());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        match read(dir.path().join("absent.bin")) {
            Err(DecodeError::Io { source, .. }) => {
                assert_eq!(source.kind(), ErrorKind::NotFound)
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_every_truncation_is_eof() {
        let bytes = encode(3, &[0, 1, 3], &[1, 2, 3], &[0, 1, 2]);
        for len in 0..bytes.len() {
            let result = CscReader::default().decode_reader(&bytes[..len]);
            assert!(
                matches!(result, Err(DecodeError::UnexpectedEof { .. })),
                "len {len}: {result:?}"
            );
        }
    }

    #[test]
    fn test_zero_col_ptr_len() {
        let bytes = encode(3, &[], &[], &[]);
        assert!(matches!(
            CscReader::default().decode_reader(&bytes[..]),
            Err(DecodeError::CorruptHeader { .. })
        ));
    }

    #[test]
    fn test_oversized_header_does_not_allocate() {
        let mut bytes = encode(1, &[0], &[], &[]);
        bytes[4..8].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(
            CscReader::default().decode_reader(&bytes[..]),
            Err(DecodeError::UnexpectedEof {
                section: Section::ColumnPointers
            })
        ));
    }

    #[test]
    fn test_trailing_data_warns_by_default() {
        let mut bytes = encode(2, &[0, 1], &[4], &[1]);
        bytes.extend_from_slice(&[0, 0, 0]);
        let decoded = CscReader::default().decode_reader(&bytes[..]).unwrap();
        assert_eq!(decoded.diagnostics, vec![Diagnostic::TrailingData { extra: 3 }]);
        assert_eq!(decoded.matrix.values(), &[4]);
    }

    #[test]
    fn test_trailing_data_policy_error() {
        let mut bytes = encode(2, &[0, 1], &[4], &[1]);
        bytes.push(1);
        let reader = CscReader::new(ReaderConfig::strict());
        assert!(matches!(
            reader.decode_reader(&bytes[..]),
            Err(DecodeError::TrailingData { extra: 1 })
        ));
    }

    #[test]
    fn test_row_index_out_of_range() {
        let bytes = encode(2, &[0, 1, 1], &[7], &[9]);

        assert!(matches!(
            CscReader::default().decode_reader(&bytes[..]),
            Err(DecodeError::Structure(FormatError::RowIndexOutOfBounds))
        ));

        let unchecked =
            CscReader::new(ReaderConfig::default().with_validation(Validation::Unchecked));
        let decoded = unchecked.decode_reader(&bytes[..]).unwrap();
        assert_eq!(decoded.matrix.row_index(), &[9]);
    }

    #[test]
    fn test_decreasing_col_ptr() {
        let bytes = encode(3, &[0, 2, 1, 2], &[1, 1], &[0, 1]);
        assert!(matches!(
            CscReader::default().decode_reader(&bytes[..]),
            Err(DecodeError::Structure(FormatError::ColumnPointerNotMonotonic))
        ));
    }
}
