//! CTR (Counter) mode implementation

use crate::cipher::{BlockCipher, BLOCK_SIZE};
use crate::key::Iv;
use crate::utils;

use super::CipherModes;

impl CipherModes {
    /// CTR mode keystream application
    ///
    /// The IV is read as a big-endian 128-bit counter. For each segment of
    /// up to 16 bytes the counter is encrypted, XORed into the data and then
    /// incremented, wrapping from `2^128 - 1` to zero. No padding is added,
    /// and encryption and decryption are the same operation.
    ///
    /// Algorithm:
    /// 1. T_i = IV + i mod 2^128
    /// 2. C_i = P_i ⊕ E(K, T_i)
    pub fn ctr_apply<C: BlockCipher>(cipher: &C, data: &[u8], iv: &Iv) -> Vec<u8> {
        let mut buffer = data.to_vec();
        let mut counter = u128::from_be_bytes(*iv.as_bytes());

        for chunk in buffer.chunks_mut(BLOCK_SIZE) {
            let mut keystream = counter.to_be_bytes();
            cipher.encrypt_block(&mut keystream);
            utils::xor_in_place(chunk, &keystream);
            counter = counter.wrapping_add(1);
        }

        buffer
    }

    /// CTR mode encryption
    pub fn ctr_encrypt<C: BlockCipher>(cipher: &C, plaintext: &[u8], iv: &Iv) -> Vec<u8> {
        Self::ctr_apply(cipher, plaintext, iv)
    }

    /// CTR mode decryption
    pub fn ctr_decrypt<C: BlockCipher>(cipher: &C, ciphertext: &[u8], iv: &Iv) -> Vec<u8> {
        Self::ctr_apply(cipher, ciphertext, iv)
    }
}
