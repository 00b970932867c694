//! Labeled matrix assembly and host export
//!
//! The assembler decodes the binary matrix first, then reads exactly as
//! many column labels as it has columns, and only then derives row labels
//! from its row count. A short label file fails before any row label is
//! built.

use std::path::Path;

use cscbin_core::{SparseMatrix, SparseMatrixCsc};

use crate::config::ReaderConfig;
use crate::error::{DecodeError, Result};
use crate::labels::{resolve_columns, resolve_rows, LabelIndex};
use crate::reader::{CscReader, Decoded, Diagnostic};

/// A decoded matrix with its row and column labels
#[derive(Debug, Clone)]
pub struct LabeledSparseMatrix {
    matrix: SparseMatrixCsc,
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    diagnostics: Vec<Diagnostic>,
    row_index: LabelIndex,
    col_index: LabelIndex,
}

impl LabeledSparseMatrix {
    /// Attach labels to a decoded matrix.
    ///
    /// Label counts must match the matrix extents.
    pub fn new(
        decoded: Decoded,
        row_labels: Vec<String>,
        col_labels: Vec<String>,
    ) -> Result<Self> {
        let (rows, cols) = decoded.matrix.dimensions();
        if row_labels.len() != rows {
            return Err(DecodeError::Structure(cscbin_core::FormatError::LengthMismatch));
        }
        if col_labels.len() != cols {
            return Err(DecodeError::Structure(cscbin_core::FormatError::LengthMismatch));
        }

        let row_index = LabelIndex::new(&row_labels);
        let col_index = LabelIndex::new(&col_labels);
        Ok(Self {
            matrix: decoded.matrix,
            row_labels,
            col_labels,
            diagnostics: decoded.diagnostics,
            row_index,
            col_index,
        })
    }

    pub fn matrix(&self) -> &SparseMatrixCsc {
        &self.matrix
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    /// Non-fatal findings from decoding
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn row_position(&self, label: &str) -> Option<usize> {
        self.row_index.position(label)
    }

    pub fn col_position(&self, label: &str) -> Option<usize> {
        self.col_index.position(label)
    }

    /// Stored value at the given row and column labels
    pub fn get_by_label(&self, row_label: &str, col_label: &str) -> Option<u8> {
        let row = self.row_position(row_label)?;
        let col = self.col_position(col_label)?;
        self.matrix.get_element(row, col)
    }

    /// Summary of extents and diagnostics
    pub fn summary(&self) -> MatrixSummary {
        MatrixSummary {
            num_rows: self.matrix.num_rows(),
            num_cols: self.matrix.num_cols(),
            nnz: self.matrix.nnz(),
            density: self.matrix.density(),
            first_row_label: self.row_labels.first().cloned(),
            first_col_label: self.col_labels.first().cloned(),
            diagnostics: self.diagnostics.clone(),
        }
    }

    /// Build the slots of a host `dgCMatrix`: `Dim`, `p`, `i`, `x`, `Dimnames`.
    ///
    /// Values are widened to `f64`; indices must fit in `i32`.
    pub fn to_dgc_parts(&self) -> Result<DgCMatrixParts> {
        let to_i32 = |value: u32, what: &str| {
            i32::try_from(value)
                .map_err(|_| DecodeError::export(format!("{what} {value} exceeds i32 range")))
        };

        let dim = [
            to_i32(self.matrix.num_rows(), "row count")?,
            to_i32(self.matrix.num_cols(), "column count")?,
        ];
        let p = self
            .matrix
            .col_ptr()
            .iter()
            .map(|&v| to_i32(v, "column pointer"))
            .collect::<Result<Vec<_>>>()?;
        let i = self
            .matrix
            .row_index()
            .iter()
            .map(|&v| to_i32(v, "row index"))
            .collect::<Result<Vec<_>>>()?;
        let x = self.matrix.values().iter().map(|&v| f64::from(v)).collect();

        Ok(DgCMatrixParts {
            dim,
            p,
            i,
            x,
            row_names: self.row_labels.clone(),
            col_names: self.col_labels.clone(),
        })
    }

    /// Hand out the owned matrix and labels
    pub fn into_parts(self) -> (SparseMatrixCsc, Vec<String>, Vec<String>) {
        (self.matrix, self.row_labels, self.col_labels)
    }
}

/// Slots of a host compressed-sparse-column matrix object
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DgCMatrixParts {
    pub dim: [i32; 2],
    pub p: Vec<i32>,
    pub i: Vec<i32>,
    pub x: Vec<f64>,
    pub row_names: Vec<String>,
    pub col_names: Vec<String>,
}

/// Extents and diagnostics of a loaded matrix
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MatrixSummary {
    pub num_rows: u32,
    pub num_cols: u32,
    pub nnz: usize,
    pub density: f64,
    pub first_row_label: Option<String>,
    pub first_col_label: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Decode `matrix_path` and label it with bins of `chr_name` and the
/// cell names in `cell_names_path`
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(matrix = %matrix_path.as_ref().display(), chr = chr_name)
)]
pub fn assemble<P: AsRef<Path>, Q: AsRef<Path>>(
    matrix_path: P,
    chr_name: &str,
    cell_names_path: Q,
    config: &ReaderConfig,
) -> Result<LabeledSparseMatrix> {
    let decoded = CscReader::new(*config).decode_file(matrix_path)?;
    let col_labels = resolve_columns(cell_names_path, decoded.matrix.num_cols() as usize)?;
    let row_labels = resolve_rows(chr_name, decoded.matrix.num_rows() as usize);

    let labeled = LabeledSparseMatrix::new(decoded, row_labels, col_labels)?;
    tracing::info!(
        rows = labeled.matrix.num_rows(),
        cols = labeled.matrix.num_cols(),
        nnz = labeled.matrix.nnz(),
        "loaded labeled matrix"
    );
    Ok(labeled)
}

/// Load a labeled sparse matrix with the default reader configuration
pub fn load_labeled_sparse_matrix<P: AsRef<Path>, Q: AsRef<Path>>(
    matrix_path: P,
    chromosome_name: &str,
    cell_labels_path: Q,
) -> Result<LabeledSparseMatrix> {
    assemble(
        matrix_path,
        chromosome_name,
        cell_labels_path,
        &ReaderConfig::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{encode, write_temp};

    fn fixture() -> (tempfile::TempDir, std::path::PathBuf, std::path::PathBuf) {
        // 3 bins x 2 cells
        let bytes = encode(3, &[0, 2, 3], &[4, 1, 9], &[0, 2, 1]);
        let (dir, matrix_path) = write_temp("1.bin", &bytes);
        let cells_path = dir.path().join("cells.txt");
        std::fs::write(&cells_path, "AAAC\nTTTG\n").unwrap();
        (dir, matrix_path, cells_path)
    }

    #[test]
    fn test_load_labeled() {
        let (_dir, matrix_path, cells_path) = fixture();
        let labeled = load_labeled_sparse_matrix(&matrix_path, "chr1", &cells_path).unwrap();

        assert_eq!(
            labeled.row_labels(),
            &["chr1-0-200", "chr1-200-400", "chr1-400-600"]
        );
        assert_eq!(labeled.col_labels(), &["AAAC", "TTTG"]);
        assert!(labeled.diagnostics().is_empty());
        assert_eq!(labeled.get_by_label("chr1-400-600", "AAAC"), Some(1));
        assert_eq!(labeled.get_by_label("chr1-200-400", "TTTG"), Some(9));
        assert_eq!(labeled.get_by_label("chr1-200-400", "AAAC"), None);
        assert_eq!(labeled.get_by_label("chr9-0-200", "AAAC"), None);
    }

    #[test]
    fn test_label_shortage() {
        let (_dir, matrix_path, cells_path) = fixture();
        std::fs::write(&cells_path, "AAAC\n").unwrap();
        assert!(matches!(
            load_labeled_sparse_matrix(&matrix_path, "chr1", &cells_path),
            Err(DecodeError::LabelCountMismatch {
                expected: 2,
                found: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_column_labels_checked_before_row_labels() {
        // one empty column over u32::MAX bins; building the row labels
        // would exhaust memory, so the short label file must fail first
        let bytes = encode(u32::MAX, &[0, 0], &[], &[]);
        let (dir, matrix_path) = write_temp("1.bin", &bytes);
        let cells_path = dir.path().join("cells.txt");
        std::fs::write(&cells_path, "").unwrap();

        assert!(matches!(
            load_labeled_sparse_matrix(&matrix_path, "chr1", &cells_path),
            Err(DecodeError::LabelCountMismatch {
                expected: 1,
                found: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_matrix_error_comes_first() {
        let dir = tempfile::tempdir().unwrap();
        // neither file exists; the matrix is opened first
        let result = load_labeled_sparse_matrix(
            dir.path().join("1.bin"),
            "chr1",
            dir.path().join("cells.txt"),
        );
        match result {
            Err(DecodeError::Io { path, .. }) => assert!(path.ends_with("1.bin")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_diagnostics_carried() {
        let (_dir, matrix_path, cells_path) = fixture();
        let mut bytes = std::fs::read(&matrix_path).unwrap();
        bytes.push(0);
        std::fs::write(&matrix_path, bytes).unwrap();

        let labeled = load_labeled_sparse_matrix(&matrix_path, "chr1", &cells_path).unwrap();
        assert_eq!(
            labeled.diagnostics(),
            &[Diagnostic::TrailingData { extra: 1 }]
        );
        assert_eq!(labeled.summary().diagnostics.len(), 1);
    }

    #[test]
    fn test_dgc_parts() {
        let (_dir, matrix_path, cells_path) = fixture();
        let labeled = load_labeled_sparse_matrix(&matrix_path, "chr3", &cells_path).unwrap();
        let parts = labeled.to_dgc_parts().unwrap();
        assert_eq!(parts.dim, [3, 2]);
        assert_eq!(parts.p, vec![0, 2, 3]);
        assert_eq!(parts.i, vec![0, 2, 1]);
        assert_eq!(parts.x, vec![4.0, 1.0, 9.0]);
        assert_eq!(parts.row_names[0], "chr3-0-200");
        assert_eq!(parts.col_names, vec!["AAAC", "TTTG"]);
    }

    #[test]
    fn test_dgc_parts_overflow() {
        let matrix = SparseMatrixCsc::from_parts(u32::MAX, vec![0], vec![], vec![]).unwrap();
        let decoded = Decoded {
            matrix,
            diagnostics: Vec::new(),
        };
        // row labels are not generated here; build the value directly
        let labeled = LabeledSparseMatrix {
            matrix: decoded.matrix,
            row_labels: Vec::new(),
            col_labels: Vec::new(),
            diagnostics: decoded.diagnostics,
            row_index: LabelIndex::default(),
            col_index: LabelIndex::default(),
        };
        assert!(matches!(
            labeled.to_dgc_parts(),
            Err(DecodeError::Export { .. })
        ));
    }

    #[test]
    fn test_new_rejects_wrong_label_counts() {
        let matrix = SparseMatrixCsc::from_parts(2, vec![0, 0], vec![], vec![]).unwrap();
        let decoded = Decoded {
            matrix,
            diagnostics: Vec::new(),
        };
        assert!(LabeledSparseMatrix::new(decoded, vec!["a".into()], vec!["c".into()]).is_err());
    }
}
