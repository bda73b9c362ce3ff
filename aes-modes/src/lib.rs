//! # AES Modes Library
//!
//! AES encryption and decryption of whole byte buffers in three modes of
//! operation, PKCS#7 padding, and a compact binary key-file format.
//!
//! ## Supported Modes
//!
//! - **ECB** (Electronic Code Book) - padded, no IV, leaks repeated blocks
//! - **CBC** (Cipher Block Chaining) - padded, requires a 16-byte IV
//! - **CTR** (Counter Mode) - stream mode, requires a 16-byte initial counter
//!
//! ## Usage
//!
//! ```rust
//! use aes_modes::{decrypt, encrypt, parse_key_frame, serialize_key_frame, Mode};
//!
//! let key = [0x2bu8; 32];
//! let iv = [0x00u8; 16];
//! let image = vec![0xffu8; 1024];
//!
//! let encrypted = encrypt(&image, &key, Mode::Cbc, Some(&iv[..]))?;
//! assert_eq!(encrypted.len(), 1040);
//!
//! // The key file travels separately; the mode is chosen again on decryption
//! let key_file = serialize_key_frame(&key, Mode::Cbc, Some(&iv[..]))?;
//! let frame = parse_key_frame(&key_file)?;
//! frame.validate_for(Mode::Cbc)?;
//!
//! let iv = frame.iv().map(|iv| &iv.as_bytes()[..]);
//! let decrypted = decrypt(&encrypted, frame.key().as_bytes(), Mode::Cbc, iv)?;
//! assert_eq!(decrypted, image);
//! # Ok::<(), aes_modes::CipherModeError>(())
//! ```
//!
//! All operations are pure: one buffer in, one new buffer (or an error) out.
//! A padding error on ECB or CBC decryption is how a wrong key, IV or mode
//! is reported.

// Public modules
pub mod analysis;
pub mod cipher;
pub mod engine;
pub mod error;
pub mod frame;
pub mod key;
pub mod mode;
pub mod modes;
pub mod padding;

mod utils;

// Re-exports for easy access
pub use analysis::{analyze_blocks, block_classes, BlockStats};
pub use cipher::{Aes, Block, BlockCipher, BLOCK_SIZE};
pub use engine::{decrypt, decrypt_with, encrypt, encrypt_with, validate_iv, validate_key};
pub use error::{CipherModeError, PaddingMismatch, Result};
pub use frame::{
    parse_key_frame, serialize_key_frame, validate_against_mode, validate_key_frame, KeyFrame,
    FRAME_HEADER_SIZE,
};
pub use key::{Iv, Key, KeySize, IV_SIZE};
pub use mode::Mode;
pub use modes::CipherModes;
pub use padding::{pad, pad_to, unpad, unpad_from};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
