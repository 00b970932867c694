//! Binary format definitions for CSC matrix files
//!
//! Pure data structure definitions for the wire format. No I/O.

pub mod constants;
pub mod header;
pub mod layout;

pub use constants::BIN_WIDTH;
pub use header::CscHeader;
pub use layout::{CscLayout, Section};
