//! Key and IV value types

use std::fmt;

use rand::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CipherModeError, Result};

/// IV length in bytes
pub const IV_SIZE: usize = 16;

/// AES key length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySize {
    Aes128,
    Aes192,
    Aes256,
}

impl KeySize {
    /// Maps a key length in bytes onto a size, if AES supports it.
    pub fn from_len(len: usize) -> Result<Self> {
        match len {
            16 => Ok(KeySize::Aes128),
            24 => Ok(KeySize::Aes192),
            32 => Ok(KeySize::Aes256),
            actual => Err(CipherModeError::InvalidKeySize { actual }),
        }
    }

    pub fn bytes(self) -> usize {
        match self {
            KeySize::Aes128 => 16,
            KeySize::Aes192 => 24,
            KeySize::Aes256 => 32,
        }
    }

    pub fn bits(self) -> usize {
        self.bytes() * 8
    }
}

/// An AES key of 16, 24 or 32 bytes.
///
/// The bytes are wiped when the key is dropped and never show up in `Debug`
/// output. Equality runs in constant time.
#[derive(Clone, ZeroizeOnDrop)]
pub struct Key {
    bytes: Vec<u8>,
    #[zeroize(skip)]
    size: KeySize,
}

impl Key {
    /// Builds a key, rejecting any length other than 16, 24 or 32.
    pub fn new(bytes: &[u8]) -> Result<Self> {
        let size = KeySize::from_len(bytes.len())?;
        Ok(Self {
            bytes: bytes.to_vec(),
            size,
        })
    }

    /// Parses a hex string such as `"2b7e1516..."`.
    pub fn from_hex(hex_key: &str) -> Result<Self> {
        let mut bytes = hex::decode(hex_key.trim())?;
        let key = Self::new(&bytes);
        bytes.zeroize();
        key
    }

    /// Draws a fresh key of the requested size from `rng`.
    pub fn generate<R: RngCore + CryptoRng>(size: KeySize, rng: &mut R) -> Self {
        let mut bytes = vec![0u8; size.bytes()];
        rng.fill_bytes(&mut bytes);
        Self { bytes, size }
    }

    pub fn size(&self) -> KeySize {
        self.size
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && bool::from(self.bytes.ct_eq(&other.bytes))
    }
}

impl Eq for Key {}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("bits", &self.size().bits())
            .finish_non_exhaustive()
    }
}

/// A 16-byte initialization vector (the initial counter block in CTR mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Iv([u8; IV_SIZE]);

impl Iv {
    pub fn new(bytes: [u8; IV_SIZE]) -> Self {
        Self(bytes)
    }

    /// Builds an IV from a slice that must be exactly 16 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let array: [u8; IV_SIZE] = bytes
            .try_into()
            .map_err(|_| CipherModeError::InvalidIvSize { actual: bytes.len() })?;
        Ok(Self(array))
    }

    pub fn from_hex(hex_iv: &str) -> Result<Self> {
        Self::from_slice(&hex::decode(hex_iv.trim())?)
    }

    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; IV_SIZE];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; IV_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}
