//! Reader configuration
//!
//! Controls the two behaviors the binary format leaves open: whether
//! decoded arrays are structurally validated, and what happens when bytes
//! follow the row index section.

#[cfg(feature = "serde")]
use std::path::Path;

#[cfg(feature = "serde")]
use crate::error::{DecodeError, Result};

/// Structural validation applied after decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Validation {
    /// Require non-decreasing `col_ptr` and `row_index < num_rows`
    #[default]
    Strict,
    /// Accept the arrays as stored
    Unchecked,
}

/// Handling of bytes found after the declared structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TrailingDataPolicy {
    /// Log a warning and attach a diagnostic to the result
    #[default]
    Warn,
    /// Fail the decode
    Error,
}

/// Configuration for [`crate::CscReader`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReaderConfig {
    pub validation: Validation,
    pub trailing_data: TrailingDataPolicy,
}

impl ReaderConfig {
    /// Strictest setting: validate structure and reject trailing data
    pub fn strict() -> Self {
        Self {
            validation: Validation::Strict,
            trailing_data: TrailingDataPolicy::Error,
        }
    }

    /// Set structural validation
    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }

    /// Set trailing data handling
    pub fn with_trailing_data(mut self, policy: TrailingDataPolicy) -> Self {
        self.trailing_data = policy;
        self
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    #[cfg(feature = "serde")]
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| DecodeError::io(path, e))?;
        Self::from_json_str(&text)
    }

    /// Parse a configuration from JSON text
    #[cfg(feature = "serde")]
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| DecodeError::config(e.to_string()))
    }
}
