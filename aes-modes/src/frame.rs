//! Binary key-file framing
//!
//! # Layout
//!
//! ```text
//! Offset        Size    Field
//! 0             1       key length (16, 24 or 32)
//! 1             1       IV length (0 or 16)
//! 2             keyLen  key bytes
//! 2 + keyLen    ivLen   IV bytes, absent when ivLen == 0
//! ```
//!
//! The mode is not stored. Whoever decrypts picks the mode and checks the
//! frame against it with [`KeyFrame::validate_for`].

use rand::{CryptoRng, RngCore};
use tracing::debug;

use crate::error::{CipherModeError, Result};
use crate::key::{Iv, Key, KeySize, IV_SIZE};
use crate::mode::Mode;

/// Size of the two length bytes in front of the key
pub const FRAME_HEADER_SIZE: usize = 2;

/// A key and optional IV as carried in a key file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFrame {
    key: Key,
    iv: Option<Iv>,
}

impl KeyFrame {
    /// Builds a frame for `mode`. An IV passed with ECB is dropped.
    pub fn new(key: Key, mode: Mode, iv: Option<Iv>) -> Result<Self> {
        let iv = if mode.requires_iv() { iv } else { None };
        mode.check_iv_presence(iv.is_some())?;
        Ok(Self { key, iv })
    }

    /// Draws a random key, plus an IV when `mode` needs one.
    pub fn generate<R: RngCore + CryptoRng>(size: KeySize, mode: Mode, rng: &mut R) -> Self {
        let key = Key::generate(size, rng);
        let iv = mode.requires_iv().then(|| Iv::generate(rng));
        Self { key, iv }
    }

    /// Parses a frame, checking both length bytes and the total size.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let [key_len, iv_len, body @ ..] = bytes else {
            return Err(CipherModeError::FrameTooSmall {
                actual: bytes.len(),
            });
        };
        let key_len = usize::from(*key_len);
        let iv_len = usize::from(*iv_len);

        KeySize::from_len(key_len)?;
        if iv_len != 0 && iv_len != IV_SIZE {
            return Err(CipherModeError::InvalidIvSize { actual: iv_len });
        }

        let expected = FRAME_HEADER_SIZE + key_len + iv_len;
        if bytes.len() != expected {
            return Err(CipherModeError::FrameSizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        let (key, iv) = body.split_at(key_len);
        let frame = Self {
            key: Key::new(key)?,
            iv: if iv.is_empty() {
                None
            } else {
                Some(Iv::from_slice(iv)?)
            },
        };

        debug!(
            key_bits = frame.key.size().bits(),
            has_iv = frame.iv.is_some(),
            "parsed key frame"
        );
        Ok(frame)
    }

    /// Serializes the frame to its on-disk layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let key = self.key.as_bytes();
        let iv: &[u8] = match &self.iv {
            Some(iv) => iv.as_bytes(),
            None => &[],
        };

        let mut out = Vec::with_capacity(self.encoded_len());
        out.push(key.len() as u8);
        out.push(iv.len() as u8);
        out.extend_from_slice(key);
        out.extend_from_slice(iv);
        out
    }

    /// Total serialized length: one of 18, 26, 34, 42 or 50 bytes.
    pub fn encoded_len(&self) -> usize {
        FRAME_HEADER_SIZE + self.key.size().bytes() + self.iv.map_or(0, |_| IV_SIZE)
    }

    /// Checks that this frame can be used with `mode`.
    pub fn validate_for(&self, mode: Mode) -> Result<()> {
        validate_against_mode(
            self.key.as_bytes(),
            self.iv.as_ref().map(|iv| &iv.as_bytes()[..]),
            mode,
        )
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn iv(&self) -> Option<&Iv> {
        self.iv.as_ref()
    }
}

/// Serializes a key and optional IV for `mode` into frame bytes.
///
/// ECB silently discards the IV; CBC and CTR require a 16-byte one.
pub fn serialize_key_frame(key: &[u8], mode: Mode, iv: Option<&[u8]>) -> Result<Vec<u8>> {
    let iv = mode.effective_iv(iv);
    let key = Key::new(key)?;
    mode.check_iv_presence(iv.is_some())?;
    let iv = iv.map(Iv::from_slice).transpose()?;

    let frame = KeyFrame::new(key, mode, iv)?;
    debug!(%mode, len = frame.encoded_len(), "serialized key frame");
    Ok(frame.to_bytes())
}

/// Parses frame bytes back into a key and optional IV.
pub fn parse_key_frame(bytes: &[u8]) -> Result<KeyFrame> {
    KeyFrame::parse(bytes)
}

/// Checks a parsed frame against the mode chosen for decryption.
pub fn validate_key_frame(frame: &KeyFrame, mode: Mode) -> Result<()> {
    frame.validate_for(mode)
}

/// Checks a key and optional IV against `mode`.
pub fn validate_against_mode(key: &[u8], iv: Option<&[u8]>, mode: Mode) -> Result<()> {
    KeySize::from_len(key.len())?;

    if iv.is_some() != mode.requires_iv() {
        return Err(CipherModeError::ModeIvMismatch {
            mode,
            iv_present: iv.is_some(),
        });
    }

    match iv {
        Some(iv) if iv.len() != IV_SIZE => Err(CipherModeError::InvalidIvSize { actual: iv.len() }),
        _ => Ok(()),
    }
}
