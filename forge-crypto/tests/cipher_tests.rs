use forge_crypto::{decrypt, encrypt, CryptoError, EncryptedData, MasterKey, NONCE_SIZE, TAG_SIZE};

#[test]
fn encrypt_decrypt_roundtrip() {
    let key = MasterKey::generate();
    let plaintext = b"Hello, World!";
    let encrypted = encrypt(&key, plaintext).unwrap();
    let decrypted = decrypt(&key, &encrypted).unwrap();
    assert_eq!(decrypted, plaintext);
}

#[test]
fn encrypt_decrypt_empty() {
    let key = MasterKey::generate();
    let encrypted = encrypt(&key, b"").unwrap();
    assert_eq!(encrypted.ciphertext.len(), TAG_SIZE);
    let decrypted = decrypt(&key, &encrypted).unwrap();
    assert_eq!(decrypted, b"");
}

#[test]
fn encrypt_decrypt_large_data() {
    let key = MasterKey::generate();
    let plaintext: Vec<u8> = (0..100_000).map(|i| (i % 256) as u8).collect();
    let encrypted = encrypt(&key, &plaintext).unwrap();
    let decrypted = decrypt(&key, &encrypted).unwrap();
    assert_eq!(decrypted, plaintext);
}

#[test]
fn wrong_key_fails_authentication() {
    let key1 = MasterKey::generate();
    let key2 = MasterKey::generate();
    let encrypted = encrypt(&key1, b"Secret").unwrap();
    assert!(matches!(
        decrypt(&key2, &encrypted),
        Err(CryptoError::Authentication)
    ));
}

#[test]
fn tampered_ciphertext_fails_authentication() {
    let key = MasterKey::generate();
    let mut encrypted = encrypt(&key, b"Secret").unwrap();
    encrypted.ciphertext[0] ^= 0xFF;
    assert!(matches!(
        decrypt(&key, &encrypted),
        Err(CryptoError::Authentication)
    ));
}

#[test]
fn tampered_nonce_fails_authentication() {
    let key = MasterKey::generate();
    let mut encrypted = encrypt(&key, b"Secret").unwrap();
    encrypted.nonce[0] ^= 0x01;
    assert!(matches!(
        decrypt(&key, &encrypted),
        Err(CryptoError::Authentication)
    ));
}

#[test]
fn same_plaintext_produces_different_ciphertext() {
    let key = MasterKey::generate();
    let e1 = encrypt(&key, b"Same").unwrap();
    let e2 = encrypt(&key, b"Same").unwrap();
    assert_ne!(e1.nonce, e2.nonce);
    assert_ne!(e1.ciphertext, e2.ciphertext);
}

// ── EncryptedData ────────────────────────────────────────────────

#[test]
fn minimum_length_record_parses() {
    use base64::{engine::general_purpose::STANDARD, Engine};
    let minimal = STANDARD.encode([7u8; NONCE_SIZE + TAG_SIZE]);
    let parsed = EncryptedData::from_base64(&minimal).unwrap();
    assert_eq!(parsed.nonce, [7u8; NONCE_SIZE]);
    assert_eq!(parsed.ciphertext.len(), TAG_SIZE);
}

#[test]
fn base64_roundtrip() {
    let key = MasterKey::generate();
    let encrypted = encrypt(&key, b"Data").unwrap();
    let decoded = EncryptedData::from_base64(&encrypted.to_base64()).unwrap();
    assert_eq!(decoded, encrypted);
}

#[test]
fn base64_layout_is_nonce_then_ciphertext() {
    use base64::{engine::general_purpose::STANDARD, Engine};
    let key = MasterKey::generate();
    let encrypted = encrypt(&key, b"layout").unwrap();
    let raw = STANDARD.decode(encrypted.to_base64()).unwrap();
    assert_eq!(&raw[..NONCE_SIZE], &encrypted.nonce);
    assert_eq!(&raw[NONCE_SIZE..], encrypted.ciphertext.as_slice());
}

#[test]
fn base64_too_short_is_format_error() {
    use base64::{engine::general_purpose::STANDARD, Engine};
    let short = STANDARD.encode([0u8; NONCE_SIZE + TAG_SIZE - 1]);
    assert!(matches!(
        EncryptedData::from_base64(&short),
        Err(CryptoError::Format(_))
    ));
}

#[test]
fn base64_invalid_is_format_error() {
    assert!(matches!(
        EncryptedData::from_base64("!!!not-base64!!!"),
        Err(CryptoError::Format(_))
    ));
}
