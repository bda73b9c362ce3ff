//! CBC (Cipher Block Chaining) mode implementation

use crate::cipher::{Block, BlockCipher, BLOCK_SIZE};
use crate::error::Result;
use crate::key::Iv;
use crate::{padding, utils};

use super::CipherModes;

impl CipherModes {
    /// CBC mode encryption
    ///
    /// Algorithm:
    /// 1. C_0 = IV
    /// 2. C_i = E(K, P_i ⊕ C_{i-1})
    pub fn cbc_encrypt<C: BlockCipher>(cipher: &C, plaintext: &[u8], iv: &Iv) -> Vec<u8> {
        let mut buffer = padding::pad(plaintext);
        let mut previous: Block = *iv.as_bytes();

        for chunk in buffer.chunks_exact_mut(BLOCK_SIZE) {
            let mut block = utils::load_block(chunk);
            utils::xor_in_place(&mut block, &previous);
            cipher.encrypt_block(&mut block);
            chunk.copy_from_slice(&block);
            previous = block;
        }

        buffer
    }

    /// CBC mode decryption
    ///
    /// P_i = D(K, C_i) ⊕ C_{i-1}, then the padding is checked and removed.
    pub fn cbc_decrypt<C: BlockCipher>(cipher: &C, ciphertext: &[u8], iv: &Iv) -> Result<Vec<u8>> {
        Self::check_block_aligned(ciphertext)?;

        let mut buffer = ciphertext.to_vec();
        let mut previous: Block = *iv.as_bytes();

        for chunk in buffer.chunks_exact_mut(BLOCK_SIZE) {
            let encrypted = utils::load_block(chunk);
            let mut block = encrypted;
            cipher.decrypt_block(&mut block);
            utils::xor_in_place(&mut block, &previous);
            chunk.copy_from_slice(&block);
            previous = encrypted;
        }

        padding::unpad(&buffer)
    }
}
