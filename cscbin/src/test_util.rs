//! Fixture helpers shared by unit tests

use std::path::PathBuf;

use tempfile::TempDir;

/// Lay out a matrix in the on-disk format
pub(crate) fn encode(num_rows: u32, col_ptr: &[u32], values: &[u8], row_index: &[u32]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&num_rows.to_le_bytes());
    out.extend_from_slice(&(col_ptr.len() as u32).to_le_bytes());
    for p in col_ptr {
        out.extend_from_slice(&p.to_le_bytes());
    }
    out.extend_from_slice(values);
    for r in row_index {
        out.extend_from_slice(&r.to_le_bytes());
    }
    out
}

/// Write `contents` to `name` inside a fresh temporary directory
pub(crate) fn write_temp(name: &str, contents: &[u8]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}
