//! Error types for CSC binary format decoding

/// Broad classification of a [`FormatError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The byte stream ended before a declared section was complete
    Truncated,
    /// Header fields describe an impossible matrix
    Header,
    /// Decoded arrays violate the CSC structure
    Structure,
    /// Bytes remain after the declared structure
    Consistency,
}

/// Errors that can occur while interpreting CSC binary data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// Header is missing or declares a zero-length column pointer array
    CorruptHeader,
    /// A section is shorter than the header declares
    UnexpectedEof,
    /// Section size arithmetic overflowed
    SizeOverflow,
    /// Array lengths disagree with each other or with `col_ptr`
    LengthMismatch,
    /// `col_ptr` decreases somewhere
    ColumnPointerNotMonotonic,
    /// A `row_index` entry is not below `num_rows`
    RowIndexOutOfBounds,
    /// Bytes remain after `row_index`
    TrailingData,
}

impl FormatError {
    /// Classify this error
    pub const fn category(&self) -> ErrorCategory {
        match self {
            FormatError::UnexpectedEof => ErrorCategory::Truncated,
            FormatError::CorruptHeader | FormatError::SizeOverflow => ErrorCategory::Header,
            FormatError::LengthMismatch
            | FormatError::ColumnPointerNotMonotonic
            | FormatError::RowIndexOutOfBounds => ErrorCategory::Structure,
            FormatError::TrailingData => ErrorCategory::Consistency,
        }
    }

    /// Whether the error must abort a decode.
    ///
    /// Trailing data is reported but the decoded matrix is still usable.
    pub const fn is_fatal(&self) -> bool {
        !matches!(self.category(), ErrorCategory::Consistency)
    }
}

impl core::fmt::Display for FormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            FormatError::CorruptHeader => "Corrupt CSC header",
            FormatError::UnexpectedEof => "Unexpected end of data",
            FormatError::SizeOverflow => "Section size overflow",
            FormatError::LengthMismatch => "Array length mismatch",
            FormatError::ColumnPointerNotMonotonic => "Column pointers are not non-decreasing",
            FormatError::RowIndexOutOfBounds => "Row index out of bounds",
            FormatError::TrailingData => "Trailing data after matrix",
        };
        write!(f, "{msg}")
    }
}

/// Result type for format operations
pub type Result<T> = core::result::Result<T, FormatError>;
