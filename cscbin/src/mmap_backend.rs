//! Memory-mapped decoding of CSC binary matrix files
//!
//! Maps the whole file read-only and decodes it with the pure slice
//! decoder, which also reports the exact number of trailing bytes.

use std::fs::File;
use std::path::Path;

use cscbin_core::decode_slice;
use memmap2::MmapOptions;

use crate::config::ReaderConfig;
use crate::error::{DecodeError, Result};
use crate::reader::{CscReader, Decoded};

impl CscReader {
    /// Decode the matrix at `path` through a read-only memory map
    pub fn decode_mmap<P: AsRef<Path>>(&self, path: P) -> Result<Decoded> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| DecodeError::io(path, e))?;

        // SAFETY: Read-only mapping; the decoded arrays are copied out
        // before the map is dropped at the end of this function
        let mmap = unsafe {
            MmapOptions::new()
                .map(&file)
                .map_err(|e| DecodeError::io(path, e))?
        };

        let decoded = decode_slice(&mmap)?;
        tracing::debug!(
            path = %path.display(),
            mapped = mmap.len(),
            nnz = decoded.matrix.values().len(),
            "decoded memory-mapped matrix"
        );
        self.finish(decoded.matrix, decoded.trailing_bytes, path)
    }
}

/// Decode the matrix at `path` through a memory map
pub fn read_mmap<P: AsRef<Path>>(path: P, config: &ReaderConfig) -> Result<Decoded> {
    CscReader::new(*config).decode_mmap(path)
}
