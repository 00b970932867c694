//! Little-endian array decoding

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::FormatError;

/// Number of u32 entries in `byte_len` bytes
pub const fn u32_count(byte_len: usize) -> Result<usize, FormatError> {
    if byte_len % 4 != 0 {
        return Err(FormatError::LengthMismatch);
    }
    Ok(byte_len / 4)
}

/// Decode a little-endian u32 array from an arbitrarily aligned byte slice
#[cfg(feature = "alloc")]
pub fn decode_u32_le(bytes: &[u8]) -> Result<Vec<u32>, FormatError> {
    u32_count(bytes.len())?;
    let mut out: Vec<u32> = bytemuck::pod_collect_to_vec(bytes);
    for value in out.iter_mut() {
        *value = u32::from_le(*value);
    }
    Ok(out)
}
