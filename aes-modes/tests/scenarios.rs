//! End-to-end scenarios over the public API

use aes_modes::{
    decrypt, encrypt, parse_key_frame, serialize_key_frame, CipherModeError, KeySize, Mode,
};

fn image_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}

#[test]
fn aes256_cbc_1024_bytes() {
    let key: Vec<u8> = (0u8..32).collect();
    let iv = [0x24u8; 16];
    let data = image_bytes(1024);

    let encrypted = encrypt(&data, &key, Mode::Cbc, Some(&iv[..])).unwrap();
    // 1024 is block aligned, so a whole padding block is added
    assert_eq!(encrypted.len(), 1040);

    let decrypted = decrypt(&encrypted, &key, Mode::Cbc, Some(&iv[..])).unwrap();
    assert_eq!(decrypted, data);
}

#[test]
fn ecb_1023_bytes_gets_one_padding_byte() {
    let key = [0x10u8; 16];
    let data = image_bytes(1023);

    let encrypted = encrypt(&data, &key, Mode::Ecb, None).unwrap();
    assert_eq!(encrypted.len(), 1024);
    assert_eq!(decrypt(&encrypted, &key, Mode::Ecb, None).unwrap(), data);
}

#[test]
fn ctr_decrypts_by_encrypting_again() {
    let key = [0x77u8; 24];
    let iv = [0x01u8; 16];
    let data = image_bytes(777);

    let encrypted = encrypt(&data, &key, Mode::Ctr, Some(&iv[..])).unwrap();
    assert_eq!(encrypted.len(), 777);

    let restored = encrypt(&encrypted, &key, Mode::Ctr, Some(&iv[..])).unwrap();
    assert_eq!(restored, data);
}

#[test]
fn key_frame_size_table() {
    let iv = [0u8; 16];
    let frame = |size: KeySize, mode: Mode| {
        serialize_key_frame(&vec![0xAB; size.bytes()], mode, Some(&iv[..]))
            .unwrap()
            .len()
    };

    assert_eq!(frame(KeySize::Aes256, Mode::Cbc), 50);
    assert_eq!(frame(KeySize::Aes128, Mode::Ecb), 18);
    assert_eq!(frame(KeySize::Aes192, Mode::Ctr), 42);
}

#[test]
fn encrypt_with_key_file_then_decrypt() {
    let key = [0x3Cu8; 32];
    let iv = [0xC3u8; 16];
    let data = image_bytes(4096);

    let encrypted = encrypt(&data, &key, Mode::Ctr, Some(&iv[..])).unwrap();
    let key_file = serialize_key_frame(&key, Mode::Ctr, Some(&iv[..])).unwrap();

    let frame = parse_key_frame(&key_file).unwrap();
    frame.validate_for(Mode::Ctr).unwrap();
    let iv = frame.iv().map(|iv| &iv.as_bytes()[..]);
    let decrypted = decrypt(&encrypted, frame.key().as_bytes(), Mode::Ctr, iv).unwrap();

    assert_eq!(decrypted, data);
}

#[test]
fn ecb_key_file_rejected_for_cbc() {
    let key_file = serialize_key_frame(&[0u8; 16], Mode::Ecb, None).unwrap();
    let frame = parse_key_frame(&key_file).unwrap();

    assert_eq!(
        frame.validate_for(Mode::Cbc),
        Err(CipherModeError::ModeIvMismatch { mode: Mode::Cbc, iv_present: false })
    );
}
