//! Row and column label resolution
//!
//! Column labels come from a companion text file, one whitespace-delimited
//! token per column. Row labels are synthetic genomic bins of fixed width.

use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind};
use std::path::Path;

use cscbin_core::BIN_WIDTH;
use hashbrown::HashMap;

use crate::error::{DecodeError, Result};

/// Token separators of the label file: space, `\t`, `\n`, `\v`, `\f`, `\r`
fn is_separator(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == 0x0b
}

/// Read the first `expected_count` tokens of the label file at `path`.
///
/// Tokens are split on ASCII whitespace only and decoded as UTF-8 one at a
/// time. Reading stops at the separator after the last needed token, so
/// extra labels (or arbitrary bytes) after it are ignored.
pub fn resolve_columns<P: AsRef<Path>>(path: P, expected_count: usize) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| DecodeError::io(path, e))?;
    let mut reader = BufReader::new(file);

    let mut labels = Vec::with_capacity(expected_count.min(1 << 16));
    let mut token = Vec::new();
    while labels.len() < expected_count {
        let buf = match reader.fill_buf() {
            Ok([]) => break,
            Ok(buf) => buf,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(DecodeError::io(path, e)),
        };

        let mut used = 0;
        for &byte in buf {
            used += 1;
            if !is_separator(byte) {
                token.push(byte);
            } else if !token.is_empty() {
                labels.push(decode_token(&mut token, path)?);
                if labels.len() == expected_count {
                    break;
                }
            }
        }
        reader.consume(used);
    }
    if labels.len() < expected_count && !token.is_empty() {
        labels.push(decode_token(&mut token, path)?);
    }

    if labels.len() < expected_count {
        return Err(DecodeError::LabelCountMismatch {
            path: path.to_path_buf(),
            expected: expected_count,
            found: labels.len(),
        });
    }

    tracing::debug!(path = %path.display(), count = labels.len(), "resolved column labels");
    Ok(labels)
}

fn decode_token(token: &mut Vec<u8>, path: &Path) -> Result<String> {
    String::from_utf8(std::mem::take(token))
        .map_err(|e| DecodeError::io(path, io::Error::new(ErrorKind::InvalidData, e)))
}

/// Label of bin `index` on `chr_name`: `{chr_name}-{start}-{end}`
pub fn bin_label(chr_name: &str, index: u64) -> String {
    format!(
        "{chr_name}-{}-{}",
        index * BIN_WIDTH,
        (index + 1) * BIN_WIDTH
    )
}

/// Synthetic labels for the first `count` bins of `chr_name`
pub fn resolve_rows(chr_name: &str, count: usize) -> Vec<String> {
    (0..count as u64).map(|i| bin_label(chr_name, i)).collect()
}

/// Label to position lookup.
///
/// When a label repeats, its first position wins.
#[derive(Debug, Clone, Default)]
pub struct LabelIndex {
    positions: HashMap<String, usize>,
}

impl LabelIndex {
    pub fn new(labels: &[String]) -> Self {
        let mut positions = HashMap::with_capacity(labels.len());
        for (pos, label) in labels.iter().enumerate() {
            positions.entry(label.clone()).or_insert(pos);
        }
        Self { positions }
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.positions.get(label).copied()
    }

    /// Number of distinct labels
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
