//! ECB (Electronic Code Book) mode implementation

use crate::cipher::{BlockCipher, BLOCK_SIZE};
use crate::error::Result;
use crate::{padding, utils};

use super::CipherModes;

impl CipherModes {
    /// ECB mode encryption
    ///
    /// Pads the plaintext and encrypts every block on its own, so equal
    /// plaintext blocks give equal ciphertext blocks.
    pub fn ecb_encrypt<C: BlockCipher>(cipher: &C, plaintext: &[u8]) -> Vec<u8> {
        let mut buffer = padding::pad(plaintext);

        for chunk in buffer.chunks_exact_mut(BLOCK_SIZE) {
            let mut block = utils::load_block(chunk);
            cipher.encrypt_block(&mut block);
            chunk.copy_from_slice(&block);
        }

        buffer
    }

    /// ECB mode decryption
    pub fn ecb_decrypt<C: BlockCipher>(cipher: &C, ciphertext: &[u8]) -> Result<Vec<u8>> {
        Self::check_block_aligned(ciphertext)?;

        let mut buffer = ciphertext.to_vec();
        for chunk in buffer.chunks_exact_mut(BLOCK_SIZE) {
            let mut block = utils::load_block(chunk);
            cipher.decrypt_block(&mut block);
            chunk.copy_from_slice(&block);
        }

        padding::unpad(&buffer)
    }
}
