//! Mode selector and its IV / padding rules

use std::fmt;

use crate::cipher::BLOCK_SIZE;
use crate::error::{CipherModeError, Result};

/// Block cipher mode of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Electronic Code Book: every block encrypted independently
    Ecb,
    /// Cipher Block Chaining: each block chained into the next, seeded by the IV
    Cbc,
    /// Counter: the IV is a 128-bit counter whose encryption is XORed with the data
    Ctr,
}

impl Mode {
    /// All supported modes
    pub const ALL: [Mode; 3] = [Mode::Ecb, Mode::Cbc, Mode::Ctr];

    /// CBC and CTR need an IV, ECB never uses one.
    pub fn requires_iv(self) -> bool {
        match self {
            Mode::Ecb => false,
            Mode::Cbc | Mode::Ctr => true,
        }
    }

    /// Block modes are PKCS#7 padded, CTR keeps the input length.
    pub fn requires_padding(self) -> bool {
        match self {
            Mode::Ecb | Mode::Cbc => true,
            Mode::Ctr => false,
        }
    }

    /// The IV this mode actually consumes. ECB drops whatever it is given.
    pub fn effective_iv(self, iv: Option<&[u8]>) -> Option<&[u8]> {
        if self.requires_iv() {
            iv
        } else {
            None
        }
    }

    /// Checks that the presence of an IV agrees with this mode.
    pub fn check_iv_presence(self, iv_present: bool) -> Result<()> {
        match (self.requires_iv(), iv_present) {
            (true, false) => Err(CipherModeError::MissingIv { mode: self }),
            (false, true) => Err(CipherModeError::UnexpectedIv { mode: self }),
            _ => Ok(()),
        }
    }

    /// Length of the ciphertext produced for a plaintext of `plaintext_len` bytes.
    pub fn ciphertext_len(self, plaintext_len: usize) -> usize {
        if self.requires_padding() {
            (plaintext_len / BLOCK_SIZE + 1) * BLOCK_SIZE
        } else {
            plaintext_len
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Ecb => "ECB",
            Mode::Cbc => "CBC",
            Mode::Ctr => "CTR",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iv_requirements() {
        assert!(!Mode::Ecb.requires_iv());
        assert!(Mode::Cbc.requires_iv());
        assert!(Mode::Ctr.requires_iv());

        assert!(Mode::Ecb.requires_padding());
        assert!(Mode::Cbc.requires_padding());
        assert!(!Mode::Ctr.requires_padding());
    }

    #[test]
    fn test_ecb_drops_iv() {
        let iv = [7u8; 16];
        assert_eq!(Mode::Ecb.effective_iv(Some(&iv)), None);
        assert_eq!(Mode::Cbc.effective_iv(Some(&iv)), Some(&iv[..]));
        assert_eq!(Mode::Ctr.effective_iv(None), None);
    }

    #[test]
    fn test_iv_presence() {
        assert!(Mode::Ecb.check_iv_presence(false).is_ok());
        assert!(Mode::Cbc.check_iv_presence(true).is_ok());
        assert!(matches!(
            Mode::Ctr.check_iv_presence(false),
            Err(CipherModeError::MissingIv { mode: Mode::Ctr })
        ));
        assert!(matches!(
            Mode::Ecb.check_iv_presence(true),
            Err(CipherModeError::UnexpectedIv { mode: Mode::Ecb })
        ));
    }

    #[test]
    fn test_ciphertext_len() {
        assert_eq!(Mode::Ecb.ciphertext_len(0), 16);
        assert_eq!(Mode::Ecb.ciphertext_len(1023), 1024);
        assert_eq!(Mode::Cbc.ciphertext_len(1024), 1040);
        assert_eq!(Mode::Ctr.ciphertext_len(0), 0);
        assert_eq!(Mode::Ctr.ciphertext_len(17), 17);
    }

    #[test]
    fn test_display() {
        let names: Vec<String> = Mode::ALL.iter().map(Mode::to_string).collect();
        assert_eq!(names, vec!["ECB", "CBC", "CTR"]);
    }
}
