//! Mode engine: parameter validation and dispatch to the selected mode
//!
//! Every call validates the key and IV first, then runs exactly one mode
//! over the whole buffer and returns a new buffer. Nothing is cached between
//! calls.

use tracing::debug;

use crate::cipher::Aes;
use crate::error::{CipherModeError, Result};
use crate::key::{Iv, Key, KeySize};
use crate::mode::Mode;
use crate::modes::CipherModes;

/// Fails with `InvalidKeySize` unless the key is 16, 24 or 32 bytes long.
pub fn validate_key(key: &[u8]) -> Result<KeySize> {
    KeySize::from_len(key.len())
}

/// Checks the IV against `mode` and returns the one the mode will use.
///
/// CBC and CTR fail with `MissingIv` unless given exactly 16 bytes. ECB
/// ignores any IV it is given.
pub fn validate_iv(iv: Option<&[u8]>, mode: Mode) -> Result<Option<Iv>> {
    if !mode.requires_iv() {
        if iv.is_some() {
            debug!(%mode, "ignoring IV");
        }
        return Ok(None);
    }

    match iv.map(Iv::from_slice) {
        Some(Ok(iv)) => Ok(Some(iv)),
        Some(Err(_)) | None => Err(CipherModeError::MissingIv { mode }),
    }
}

/// Encrypts `data` with `key` in `mode`.
///
/// ECB and CBC output is padded to a positive multiple of 16 bytes; CTR
/// output has exactly the input length.
pub fn encrypt(data: &[u8], key: &[u8], mode: Mode, iv: Option<&[u8]>) -> Result<Vec<u8>> {
    validate_key(key)?;
    let iv = validate_iv(iv, mode)?;
    encrypt_with(&Key::new(key)?, mode, iv.as_ref(), data)
}

/// Decrypts `data` with `key` in `mode`.
///
/// For ECB and CBC a padding error is the expected outcome of a wrong key,
/// IV or mode.
pub fn decrypt(data: &[u8], key: &[u8], mode: Mode, iv: Option<&[u8]>) -> Result<Vec<u8>> {
    validate_key(key)?;
    let iv = validate_iv(iv, mode)?;
    decrypt_with(&Key::new(key)?, mode, iv.as_ref(), data)
}

/// Typed form of [`encrypt`].
pub fn encrypt_with(key: &Key, mode: Mode, iv: Option<&Iv>, data: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes::new(key)?;
    debug!(%mode, key_bits = key.size().bits(), input_len = data.len(), "encrypting");

    let output = match mode {
        Mode::Ecb => CipherModes::ecb_encrypt(&cipher, data),
        Mode::Cbc => CipherModes::cbc_encrypt(&cipher, data, required_iv(mode, iv)?),
        Mode::Ctr => CipherModes::ctr_encrypt(&cipher, data, required_iv(mode, iv)?),
    };

    debug!(%mode, output_len = output.len(), "encrypted");
    Ok(output)
}

/// Typed form of [`decrypt`].
pub fn decrypt_with(key: &Key, mode: Mode, iv: Option<&Iv>, data: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes::new(key)?;
    debug!(%mode, key_bits = key.size().bits(), input_len = data.len(), "decrypting");

    let output = match mode {
        Mode::Ecb => CipherModes::ecb_decrypt(&cipher, data),
        Mode::Cbc => CipherModes::cbc_decrypt(&cipher, data, required_iv(mode, iv)?),
        Mode::Ctr => Ok(CipherModes::ctr_decrypt(&cipher, data, required_iv(mode, iv)?)),
    };

    match &output {
        Ok(plaintext) => debug!(%mode, output_len = plaintext.len(), "decrypted"),
        Err(err) => debug!(%mode, %err, "decryption failed"),
    }
    output
}

fn required_iv(mode: Mode, iv: Option<&Iv>) -> Result<&Iv> {
    iv.ok_or(CipherModeError::MissingIv { mode })
}
