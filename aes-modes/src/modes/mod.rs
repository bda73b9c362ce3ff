//! Cipher modes implementation
//!
//! Each mode is written against the [`BlockCipher`](crate::BlockCipher)
//! trait and takes already validated keys and IVs. Parameter checks live in
//! [`engine`](crate::engine).

pub mod cbc;
pub mod ctr;
pub mod ecb;

use crate::cipher::BLOCK_SIZE;
use crate::error::{CipherModeError, Result};

/// Main struct for cipher modes
pub struct CipherModes;

impl CipherModes {
    /// Block modes can only decrypt whole blocks.
    fn check_block_aligned(ciphertext: &[u8]) -> Result<()> {
        if ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(CipherModeError::InvalidCiphertextLength {
                len: ciphertext.len(),
                block_size: BLOCK_SIZE,
            });
        }
        Ok(())
    }
}
