//! Command-line front end for encrypting image files with AES.
//!
//! Encryption writes two files: the ciphertext and a small binary key file
//! holding the key and IV. The mode is not stored anywhere and has to be
//! given again on decryption.

use std::fs;
use std::path::{Path, PathBuf};

use aes_modes::{analyze_blocks, decrypt_with, encrypt_with, Iv, Key, KeyFrame, KeySize, Mode};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for the image cipher program.
#[derive(Parser, Debug)]
#[command(
    name = "image-cipher",
    version,
    about = "Encrypt and decrypt image files with AES in ECB, CBC or CTR mode"
)]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encrypt a file and write its key file
    Encrypt {
        #[arg(short, long, help = "Path to the input file")]
        file: PathBuf,

        #[arg(short, long, help = "Path to the encrypted output file")]
        output: PathBuf,

        #[arg(short, long, value_enum, help = "Mode of operation")]
        mode: ModeArg,

        #[arg(short = 'k', long, help = "Where to write the key file")]
        key_file: PathBuf,

        /// Size of a generated key
        #[arg(
            short = 's',
            long,
            value_enum,
            default_value_t = KeySizeArg::Aes256,
            conflicts_with = "key"
        )]
        key_size: KeySizeArg,

        /// Key as hex instead of a random one
        #[arg(long, value_name = "HEX")]
        key: Option<String>,

        /// IV as hex instead of a random one (CBC and CTR only)
        #[arg(long, value_name = "HEX")]
        iv: Option<String>,
    },

    /// Decrypt a file with a key file
    Decrypt {
        #[arg(short, long, help = "Path to the encrypted input file")]
        file: PathBuf,

        #[arg(short, long, help = "Path to the decrypted output file")]
        output: PathBuf,

        #[arg(short, long, value_enum, help = "Mode the file was encrypted with")]
        mode: ModeArg,

        #[arg(short = 'k', long, help = "Key file written during encryption")]
        key_file: PathBuf,
    },

    /// Write a key file with a random key (and IV for CBC/CTR)
    Keygen {
        #[arg(short, long, value_enum)]
        mode: ModeArg,

        #[arg(short = 's', long, value_enum, default_value_t = KeySizeArg::Aes256)]
        key_size: KeySizeArg,

        #[arg(short = 'k', long)]
        key_file: PathBuf,
    },

    /// Show the contents of a key file
    Inspect {
        #[arg(short = 'k', long)]
        key_file: PathBuf,
    },

    /// Count repeated 16-byte blocks, the pattern ECB leaks
    Analyze {
        #[arg(short, long)]
        file: PathBuf,
    },
}

/// Mode of operation as accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// Electronic Code Book
    Ecb,
    /// Cipher Block Chaining
    Cbc,
    /// Counter mode
    Ctr,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Ecb => Mode::Ecb,
            ModeArg::Cbc => Mode::Cbc,
            ModeArg::Ctr => Mode::Ctr,
        }
    }
}

/// AES key size in bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum KeySizeArg {
    #[value(name = "128")]
    Aes128,
    #[value(name = "192")]
    Aes192,
    #[value(name = "256")]
    Aes256,
}

impl From<KeySizeArg> for KeySize {
    fn from(arg: KeySizeArg) -> Self {
        match arg {
            KeySizeArg::Aes128 => KeySize::Aes128,
            KeySizeArg::Aes192 => KeySize::Aes192,
            KeySizeArg::Aes256 => KeySize::Aes256,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    run(cli.command)
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Encrypt {
            file,
            output,
            mode,
            key_file,
            key_size,
            key,
            iv,
        } => {
            let mode = Mode::from(mode);
            let frame = build_frame(mode, key_size.into(), key.as_deref(), iv.as_deref())?;

            let data = read_file(&file)?;
            let encrypted = encrypt_with(frame.key(), mode, frame.iv(), &data)?;

            // An existing key file is only replaced once the ciphertext is on disk
            write_file(&output, &encrypted)?;
            write_file(&key_file, &frame.to_bytes())?;

            info!(%mode, input_len = data.len(), output_len = encrypted.len(), "encrypted file");
            println!(
                "Encrypted {} bytes with AES-{} {}. Output: {}, key file: {}",
                data.len(),
                frame.key().size().bits(),
                mode,
                output.display(),
                key_file.display()
            );
        }

        Command::Decrypt {
            file,
            output,
            mode,
            key_file,
        } => {
            let mode = Mode::from(mode);
            let frame = read_key_frame(&key_file)?;
            frame
                .validate_for(mode)
                .with_context(|| format!("key file {} does not fit {} mode", key_file.display(), mode))?;

            let data = read_file(&file)?;
            let decrypted = decrypt_with(frame.key(), mode, frame.iv(), &data)
                .context("decryption failed, check the key file and the mode")?;

            write_file(&output, &decrypted)?;

            info!(%mode, input_len = data.len(), output_len = decrypted.len(), "decrypted file");
            println!("Decrypted {} bytes. Output: {}", decrypted.len(), output.display());
        }

        Command::Keygen {
            mode,
            key_size,
            key_file,
        } => {
            let frame = KeyFrame::generate(key_size.into(), mode.into(), &mut rand::thread_rng());
            write_file(&key_file, &frame.to_bytes())?;
            println!("Wrote {}-byte key file to {}", frame.encoded_len(), key_file.display());
        }

        Command::Inspect { key_file } => {
            let frame = read_key_frame(&key_file)?;
            print!("{}", describe_frame(&frame));
        }

        Command::Analyze { file } => {
            let stats = analyze_blocks(&read_file(&file)?);
            println!("Blocks:   {}", stats.total_blocks);
            println!("Unique:   {}", stats.unique_blocks);
            println!("Repeated: {}", stats.repeated_blocks);
            println!("Ratio:    {:.2}%", stats.repetition_ratio() * 100.0);
        }
    }

    Ok(())
}

/// Builds the key frame for encryption from hex input or fresh randomness.
///
/// A supplied key keeps its own size; `key_size` only applies to generated keys.
fn build_frame(
    mode: Mode,
    key_size: KeySize,
    key_hex: Option<&str>,
    iv_hex: Option<&str>,
) -> Result<KeyFrame> {
    let mut rng = rand::thread_rng();

    let key = match key_hex {
        Some(hex_key) => Key::from_hex(hex_key).context("invalid --key")?,
        None => Key::generate(key_size, &mut rng),
    };

    let iv = match iv_hex {
        Some(_) if !mode.requires_iv() => {
            warn!(%mode, "mode does not use an IV, ignoring --iv");
            None
        }
        Some(hex_iv) => Some(Iv::from_hex(hex_iv).context("invalid --iv")?),
        None => mode.requires_iv().then(|| Iv::generate(&mut rng)),
    };

    Ok(KeyFrame::new(key, mode, iv)?)
}

fn describe_frame(frame: &KeyFrame) -> String {
    let usable = if frame.iv().is_some() { "CBC, CTR" } else { "ECB" };
    let iv = frame.iv().map_or_else(|| "none".to_string(), Iv::to_hex);

    format!(
        "Key size:   AES-{}\nFrame size: {} bytes\nKey:        {}\nIV:         {}\nModes:      {}\n",
        frame.key().size().bits(),
        frame.encoded_len(),
        frame.key().to_hex(),
        iv,
        usable
    )
}

fn read_key_frame(path: &Path) -> Result<KeyFrame> {
    let bytes = read_file(path)?;
    KeyFrame::parse(&bytes).with_context(|| format!("invalid key file {}", path.display()))
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(args).unwrap().command
    }

    #[test]
    fn test_cli_parsing() {
        let command = parse(&[
            "image-cipher", "encrypt", "-f", "in.png", "-o", "out.bin", "-m", "cbc", "-k", "key.bin",
        ]);

        match command {
            Command::Encrypt {
                mode, key_size, key, iv, ..
            } => {
                assert_eq!(mode, ModeArg::Cbc);
                assert_eq!(key_size, KeySizeArg::Aes256);
                assert!(key.is_none());
                assert!(iv.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_key_size_values() {
        let command = parse(&["image-cipher", "keygen", "-m", "ecb", "-s", "192", "-k", "k.bin"]);
        assert!(matches!(
            command,
            Command::Keygen { key_size: KeySizeArg::Aes192, mode: ModeArg::Ecb, .. }
        ));

        assert!(Cli::try_parse_from(["image-cipher", "keygen", "-m", "ecb", "-s", "64", "-k", "k"]).is_err());
        assert!(Cli::try_parse_from(["image-cipher", "analyze"]).is_err());
    }

    #[test]
    fn test_key_size_conflicts_with_key() {
        let result = Cli::try_parse_from([
            "image-cipher", "encrypt", "-f", "in", "-o", "out", "-m", "ecb", "-k", "key.bin",
            "-s", "128", "--key", "00112233445566778899aabbccddeeff",
        ]);
        assert!(result.is_err());

        let command = parse(&[
            "image-cipher", "encrypt", "-f", "in", "-o", "out", "-m", "ecb", "-k", "key.bin",
            "--key", "00112233445566778899aabbccddeeff",
        ]);
        assert!(matches!(command, Command::Encrypt { key: Some(_), .. }));
    }

    #[test]
    fn test_failed_output_keeps_old_key_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("image.raw");
        let key_file = dir.path().join("old.key");
        fs::write(&input, [1u8; 64]).unwrap();
        fs::write(&key_file, b"previous key file").unwrap();

        // a directory cannot be written as a file
        let result = run(Command::Encrypt {
            file: input,
            output: dir.path().to_path_buf(),
            mode: ModeArg::Cbc,
            key_file: key_file.clone(),
            key_size: KeySizeArg::Aes128,
            key: None,
            iv: None,
        });

        assert!(result.is_err());
        assert_eq!(fs::read(&key_file).unwrap(), b"previous key file");
    }

    #[test]
    fn test_build_frame_from_hex() {
        let frame = build_frame(
            Mode::Cbc,
            KeySize::Aes256,
            Some("2b7e151628aed2a6abf7158809cf4f3c"),
            Some("000102030405060708090a0b0c0d0e0f"),
        )
        .unwrap();

        // the supplied key decides the size
        assert_eq!(frame.key().size(), KeySize::Aes128);
        assert_eq!(frame.encoded_len(), 34);
    }

    #[test]
    fn test_build_frame_generates_missing_values() {
        let frame = build_frame(Mode::Ctr, KeySize::Aes192, None, None).unwrap();
        assert_eq!(frame.key().size(), KeySize::Aes192);
        assert!(frame.iv().is_some());

        let frame = build_frame(Mode::Ecb, KeySize::Aes128, None, Some("00")).unwrap();
        assert!(frame.iv().is_none());

        assert!(build_frame(Mode::Cbc, KeySize::Aes128, None, Some("0011")).is_err());
        assert!(build_frame(Mode::Cbc, KeySize::Aes128, Some("xyz"), None).is_err());
    }

    #[test]
    fn test_describe_frame() {
        let frame = build_frame(Mode::Ecb, KeySize::Aes128, Some("ab".repeat(16).as_str()), None).unwrap();
        let text = describe_frame(&frame);
        assert!(text.contains("AES-128"));
        assert!(text.contains("18 bytes"));
        assert!(text.contains("IV:         none"));
        assert!(text.contains("Modes:      ECB"));
    }

    #[test]
    fn test_encrypt_decrypt_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("image.raw");
        let encrypted = dir.path().join("image.enc");
        let decrypted = dir.path().join("image.dec");
        let key_file = dir.path().join("image.key");

        let image: Vec<u8> = (0..3000u32).map(|i| (i % 97) as u8).collect();
        fs::write(&input, &image).unwrap();

        for mode in [ModeArg::Ecb, ModeArg::Cbc, ModeArg::Ctr] {
            run(Command::Encrypt {
                file: input.clone(),
                output: encrypted.clone(),
                mode,
                key_file: key_file.clone(),
                key_size: KeySizeArg::Aes192,
                key: None,
                iv: None,
            })
            .unwrap();

            run(Command::Decrypt {
                file: encrypted.clone(),
                output: decrypted.clone(),
                mode,
                key_file: key_file.clone(),
            })
            .unwrap();

            assert_eq!(fs::read(&decrypted).unwrap(), image);
        }
    }

    #[test]
    fn test_decrypt_with_wrong_mode_key_file() {
        let dir = tempfile::tempdir().unwrap();
        let key_file = dir.path().join("ecb.key");
        let input = dir.path().join("data.enc");
        fs::write(&input, [0u8; 32]).unwrap();

        run(Command::Keygen {
            mode: ModeArg::Ecb,
            key_size: KeySizeArg::Aes128,
            key_file: key_file.clone(),
        })
        .unwrap();
        assert_eq!(fs::read(&key_file).unwrap().len(), 18);

        let result = run(Command::Decrypt {
            file: input,
            output: dir.path().join("data.dec"),
            mode: ModeArg::Cbc,
            key_file,
        });
        assert!(result.is_err());
    }
}
