//! PKCS#7 padding
//!
//! Padding is always added, even to input that is already block aligned, so
//! that `unpad` can tell data from padding unambiguously.

use std::num::NonZeroU8;

use tracing::trace;

use crate::cipher::BLOCK_SIZE;
use crate::error::{CipherModeError, PaddingMismatch, Result};

const DEFAULT_BLOCK_SIZE: NonZeroU8 = match NonZeroU8::new(BLOCK_SIZE as u8) {
    Some(size) => size,
    None => panic!("block size must be non-zero"),
};

/// Pads `data` to a multiple of the AES block size.
pub fn pad(data: &[u8]) -> Vec<u8> {
    pad_to(data, DEFAULT_BLOCK_SIZE)
}

/// Pads `data` to a multiple of `block_size`, appending between 1 and
/// `block_size` bytes that each hold the padding length.
pub fn pad_to(data: &[u8], block_size: NonZeroU8) -> Vec<u8> {
    let block_size = block_size.get();
    let remainder = (data.len() % usize::from(block_size)) as u8;
    let padding_len = block_size - remainder;

    let mut padded = Vec::with_capacity(data.len() + usize::from(padding_len));
    padded.extend_from_slice(data);
    padded.resize(data.len() + usize::from(padding_len), padding_len);
    padded
}

/// Strips PKCS#7 padding added for the AES block size.
pub fn unpad(padded: &[u8]) -> Result<Vec<u8>> {
    unpad_from(padded, DEFAULT_BLOCK_SIZE)
}

/// Strips PKCS#7 padding, checking every padding byte.
///
/// A failure here is how a wrong key, IV or mode shows up after decryption.
pub fn unpad_from(padded: &[u8], block_size: NonZeroU8) -> Result<Vec<u8>> {
    let block_size = block_size.get();
    let Some(&padding_len) = padded.last() else {
        return Err(CipherModeError::EmptyInput);
    };

    if padding_len == 0 || padding_len > block_size || usize::from(padding_len) > padded.len() {
        trace!(padding_len, "rejecting padding length");
        return Err(CipherModeError::InvalidPaddingLength {
            value: padding_len,
            block_size,
        });
    }

    let data_len = padded.len() - usize::from(padding_len);
    let mismatches: Vec<PaddingMismatch> = padded[data_len..]
        .iter()
        .enumerate()
        .filter(|&(_, &byte)| byte != padding_len)
        .map(|(offset, &found)| PaddingMismatch {
            position: data_len + offset,
            found,
        })
        .collect();

    if !mismatches.is_empty() {
        trace!(padding_len, mismatched = mismatches.len(), "rejecting padding bytes");
        return Err(CipherModeError::InvalidPaddingBytes {
            expected: padding_len,
            count: usize::from(padding_len),
            mismatches,
        });
    }

    Ok(padded[..data_len].to_vec())
}
