//! Loading one state matrix across many chromosomes
//!
//! Matrices are laid out one directory per chromosome:
//!
//! ```text
//! <root>/chr1/1.bin
//! <root>/chr1/2.bin
//! <root>/chr1/cells.txt
//! <root>/chr2/...
//! ```
//!
//! Every chromosome is decoded independently, so loads run in parallel and
//! a failure in one does not affect the others.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::assemble::{assemble, LabeledSparseMatrix};
use crate::config::ReaderConfig;
use crate::error::Result;

/// Default name of the per-chromosome cell label file
pub const CELLS_FILE_NAME: &str = "cells.txt";

/// Directory layout of a multi-chromosome matrix set
#[derive(Debug, Clone)]
pub struct ChromosomeLayout {
    root: PathBuf,
    cells_file_name: String,
}

impl ChromosomeLayout {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            cells_file_name: CELLS_FILE_NAME.to_string(),
        }
    }

    /// Use a different cell label file name inside each chromosome directory
    pub fn with_cells_file_name(mut self, name: impl Into<String>) -> Self {
        self.cells_file_name = name.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<chr>/<state>.bin`
    pub fn matrix_path(&self, chr_name: &str, state: usize) -> PathBuf {
        self.root.join(chr_name).join(format!("{state}.bin"))
    }

    /// `<root>/<chr>/cells.txt`
    pub fn cells_path(&self, chr_name: &str) -> PathBuf {
        self.root.join(chr_name).join(&self.cells_file_name)
    }

    /// Load `state` for every chromosome in `chromosomes`.
    ///
    /// Results follow the input order.
    pub fn load_state(
        &self,
        chromosomes: &[String],
        state: usize,
        config: &ReaderConfig,
    ) -> Vec<ChromosomeLoad> {
        tracing::info!(
            root = %self.root.display(),
            state,
            chromosomes = chromosomes.len(),
            "loading state across chromosomes"
        );
        chromosomes
            .par_iter()
            .map(|chr_name| ChromosomeLoad {
                chr_name: chr_name.clone(),
                result: assemble(
                    self.matrix_path(chr_name, state),
                    chr_name,
                    self.cells_path(chr_name),
                    config,
                ),
            })
            .collect()
    }
}

/// Outcome of loading one chromosome
#[derive(Debug)]
pub struct ChromosomeLoad {
    pub chr_name: String,
    pub result: Result<LabeledSparseMatrix>,
}

/// Autosome names `chr1` through `chr{count}`
pub fn chromosome_names(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("chr{i}")).collect()
}
