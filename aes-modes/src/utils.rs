//! Utility functions for cipher modes

use crate::cipher::{Block, BLOCK_SIZE};

/// Copies a full-length chunk into an owned block.
pub(crate) fn load_block(chunk: &[u8]) -> Block {
    let mut block = [0u8; BLOCK_SIZE];
    block.copy_from_slice(chunk);
    block
}

/// XORs `src` into `dst`, stopping at the shorter of the two.
pub(crate) fn xor_in_place(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= s;
    }
}
