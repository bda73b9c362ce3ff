//! Block cipher seam and the AES implementation behind it

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};

use crate::error::{CipherModeError, Result};
use crate::key::{Key, KeySize};

/// AES block size in bytes
pub const BLOCK_SIZE: usize = 16;

/// A single cipher block
pub type Block = [u8; BLOCK_SIZE];

/// Trait for a 128-bit block cipher with an already scheduled key
pub trait BlockCipher {
    /// Encrypts a single block in place
    fn encrypt_block(&self, block: &mut Block);

    /// Decrypts a single block in place
    fn decrypt_block(&self, block: &mut Block);
}

/// AES with the variant picked from the key length.
#[derive(Clone)]
pub enum Aes {
    Aes128(aes::Aes128),
    Aes192(aes::Aes192),
    Aes256(aes::Aes256),
}

impl Aes {
    /// Schedules `key` for the matching AES variant.
    pub fn new(key: &Key) -> Result<Self> {
        let bytes = key.as_bytes();
        let invalid = |_| CipherModeError::InvalidKeySize { actual: bytes.len() };

        let cipher = match key.size() {
            KeySize::Aes128 => Aes::Aes128(aes::Aes128::new_from_slice(bytes).map_err(invalid)?),
            KeySize::Aes192 => Aes::Aes192(aes::Aes192::new_from_slice(bytes).map_err(invalid)?),
            KeySize::Aes256 => Aes::Aes256(aes::Aes256::new_from_slice(bytes).map_err(invalid)?),
        };
        Ok(cipher)
    }

    /// Key size this instance was scheduled with
    pub fn key_size(&self) -> KeySize {
        match self {
            Aes::Aes128(_) => KeySize::Aes128,
            Aes::Aes192(_) => KeySize::Aes192,
            Aes::Aes256(_) => KeySize::Aes256,
        }
    }
}

impl BlockCipher for Aes {
    fn encrypt_block(&self, block: &mut Block) {
        let block = GenericArray::from_mut_slice(block);
        match self {
            Aes::Aes128(c) => c.encrypt_block(block),
            Aes::Aes192(c) => c.encrypt_block(block),
            Aes::Aes256(c) => c.encrypt_block(block),
        }
    }

    fn decrypt_block(&self, block: &mut Block) {
        let block = GenericArray::from_mut_slice(block);
        match self {
            Aes::Aes128(c) => c.decrypt_block(block),
            Aes::Aes192(c) => c.decrypt_block(block),
            Aes::Aes256(c) => c.decrypt_block(block),
        }
    }
}
