//! Error types for loading labeled CSC matrices

use std::path::PathBuf;

use cscbin_core::{FormatError, Section, SectionError};
use thiserror::Error;

/// Errors raised while decoding a matrix file or resolving its labels
#[derive(Error, Debug)]
pub enum DecodeError {
    /// File missing, unreadable, or not valid text
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Binary content ended before a declared section was complete
    #[error("Unexpected end of file while reading {section}")]
    UnexpectedEof { section: Section },

    /// Header values describe an impossible matrix
    #[error("Corrupt header: {reason}")]
    CorruptHeader { reason: &'static str },

    /// Label file holds fewer tokens than the matrix has columns
    #[error("Label file {} has {found} labels, expected at least {expected}", path.display())]
    LabelCountMismatch {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    /// Bytes remain after the declared structure
    #[error("{extra} trailing byte(s) after row indices")]
    TrailingData { extra: usize },

    /// Decoded arrays violate the CSC structure
    #[error("Invalid matrix structure: {0}")]
    Structure(FormatError),

    /// Reader configuration could not be loaded
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Matrix does not fit the host representation
    #[error("Export error: {message}")]
    Export { message: String },
}

/// Result type for loader operations
pub type Result<T> = std::result::Result<T, DecodeError>;

impl DecodeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub(crate) fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }

    /// Map an I/O failure while reading `section`.
    ///
    /// Short reads become [`DecodeError::UnexpectedEof`]; anything else
    /// keeps the underlying error.
    pub(crate) fn from_read(path: &std::path::Path, section: Section, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::UnexpectedEof {
            Self::UnexpectedEof { section }
        } else {
            Self::io(path, source)
        }
    }

    /// Whether the error aborts a load.
    ///
    /// Only trailing data is non-fatal, and it surfaces as an error only
    /// when the reader is configured to reject it.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, DecodeError::TrailingData { .. })
    }
}

impl From<FormatError> for DecodeError {
    fn from(error: FormatError) -> Self {
        match error {
            FormatError::CorruptHeader => DecodeError::CorruptHeader {
                reason: "column pointer array length is zero",
            },
            FormatError::SizeOverflow => DecodeError::CorruptHeader {
                reason: "section sizes overflow",
            },
            FormatError::UnexpectedEof => DecodeError::UnexpectedEof {
                section: Section::Header,
            },
            FormatError::TrailingData => DecodeError::TrailingData { extra: 1 },
            other => DecodeError::Structure(other),
        }
    }
}

impl From<SectionError> for DecodeError {
    fn from(error: SectionError) -> Self {
        match error.error {
            FormatError::UnexpectedEof => DecodeError::UnexpectedEof {
                section: error.section,
            },
            other => other.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_read_maps_to_eof() {
        let err = DecodeError::from_read(
            std::path::Path::new("m.bin"),
            Section::Values,
            std::io::Error::from(std::io::ErrorKind::UnexpectedEof),
        );
        assert!(matches!(
            err,
            DecodeError::UnexpectedEof {
                section: Section::Values
            }
        ));
    }

    #[test]
    fn test_other_read_errors_keep_path() {
        let err = DecodeError::from_read(
            std::path::Path::new("m.bin"),
            Section::Values,
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        match err {
            DecodeError::Io { path, source } => {
                assert_eq!(path, PathBuf::from("m.bin"));
                assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_format_error_mapping() {
        assert!(matches!(
            DecodeError::from(FormatError::CorruptHeader),
            DecodeError::CorruptHeader { .. }
        ));
        assert!(matches!(
            DecodeError::from(FormatError::RowIndexOutOfBounds),
            DecodeError::Structure(FormatError::RowIndexOutOfBounds)
        ));
        assert!(!DecodeError::TrailingData { extra: 2 }.is_fatal());
    }

    #[test]
    fn test_display() {
        let err = DecodeError::LabelCountMismatch {
            path: PathBuf::from("cells.txt"),
            expected: 3,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "Label file cells.txt has 2 labels, expected at least 3"
        );
    }
}
