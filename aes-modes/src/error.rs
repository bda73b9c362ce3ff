//! Error types for cipher mode operations

use thiserror::Error;

use crate::mode::Mode;

/// A byte inside the padding region that does not carry the padding value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddingMismatch {
    /// Offset of the byte within the padded buffer
    pub position: usize,
    /// Value actually found at that offset
    pub found: u8,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CipherModeError {
    #[error("Invalid key size: {actual} bytes (must be 16, 24 or 32)")]
    InvalidKeySize { actual: usize },

    #[error("Missing IV: {mode} mode requires a 16-byte IV")]
    MissingIv { mode: Mode },

    #[error("Unexpected IV: {mode} mode does not take an IV")]
    UnexpectedIv { mode: Mode },

    #[error("Key and IV do not match {mode} mode (IV present: {iv_present})")]
    ModeIvMismatch { mode: Mode, iv_present: bool },

    #[error("Invalid IV size: {actual} bytes (must be 16)")]
    InvalidIvSize { actual: usize },

    #[error("Cannot remove padding from empty input")]
    EmptyInput,

    #[error("Invalid padding length: {value} (must be between 1 and {block_size})")]
    InvalidPaddingLength { value: u8, block_size: u8 },

    #[error(
        "Invalid padding bytes: expected {count} trailing bytes of {expected:#04x}, {} differ",
        .mismatches.len()
    )]
    InvalidPaddingBytes {
        expected: u8,
        count: usize,
        mismatches: Vec<PaddingMismatch>,
    },

    #[error("Invalid ciphertext length: {len} bytes is not a multiple of {block_size}")]
    InvalidCiphertextLength { len: usize, block_size: usize },

    #[error("Key frame too small: {actual} bytes (need at least 2)")]
    FrameTooSmall { actual: usize },

    #[error("Key frame size mismatch: header announces {expected} bytes, got {actual}")]
    FrameSizeMismatch { expected: usize, actual: usize },

    #[error("Invalid hex input: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

impl CipherModeError {
    /// True for the failures that decrypting with the wrong key, IV or mode produces.
    pub fn is_padding_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput | Self::InvalidPaddingLength { .. } | Self::InvalidPaddingBytes { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CipherModeError>;
