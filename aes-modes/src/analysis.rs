//! Block repetition analysis
//!
//! ECB encrypts equal plaintext blocks to equal ciphertext blocks, which is
//! why an ECB-encrypted image still shows its outlines. These helpers measure
//! that leak on any buffer. Trailing bytes that do not fill a block are
//! ignored.

use std::collections::HashMap;

use crate::cipher::{Block, BLOCK_SIZE};
use crate::utils;

/// Repetition statistics over the full blocks of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockStats {
    /// Number of full 16-byte blocks
    pub total_blocks: usize,
    /// Number of distinct blocks
    pub unique_blocks: usize,
    /// Blocks equal to some earlier block
    pub repeated_blocks: usize,
}

impl BlockStats {
    /// Share of blocks that repeat an earlier one, in `0.0..=1.0`.
    pub fn repetition_ratio(&self) -> f64 {
        if self.total_blocks == 0 {
            return 0.0;
        }
        self.repeated_blocks as f64 / self.total_blocks as f64
    }
}

/// Counts distinct and repeated blocks in `data`.
pub fn analyze_blocks(data: &[u8]) -> BlockStats {
    let classes = block_classes(data);
    let unique_blocks = classes.iter().copied().max().map_or(0, |max| max + 1);

    BlockStats {
        total_blocks: classes.len(),
        unique_blocks,
        repeated_blocks: classes.len() - unique_blocks,
    }
}

/// Assigns every full block the index of its equivalence class, numbered in
/// order of first appearance.
///
/// Coloring each class differently reproduces the ECB "penguin" picture.
pub fn block_classes(data: &[u8]) -> Vec<usize> {
    let mut seen: HashMap<Block, usize> = HashMap::new();

    data.chunks_exact(BLOCK_SIZE)
        .map(|chunk| {
            let next = seen.len();
            *seen.entry(utils::load_block(chunk)).or_insert(next)
        })
        .collect()
}
