use forge_crypto::{derive_key, CipherService, CryptoError, DataEncryptor, MasterKey, Salt};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Note {
    title: String,
    tags: Vec<String>,
    pinned: bool,
    meta: BTreeMap<String, i64>,
}

fn note() -> Note {
    Note {
        title: "Hello, 世界! 🌍".into(),
        tags: vec!["python".into(), "cli".into()],
        pinned: true,
        meta: BTreeMap::from([("views".into(), 3)]),
    }
}

// ── JSON round-trip ──────────────────────────────────────────────

#[test]
fn struct_roundtrip() {
    let svc = CipherService::new(MasterKey::generate());
    let sealed = svc.encrypt(&note()).unwrap();
    let opened: Note = svc.decrypt(&sealed).unwrap();
    assert_eq!(opened, note());
}

#[test]
fn json_value_roundtrip() {
    let svc = CipherService::new(MasterKey::generate());
    let value = serde_json::json!({"test": "ok", "n": [1, 2, 3], "nested": {"x": null}});
    let sealed = svc.encrypt(&value).unwrap();
    let opened: serde_json::Value = svc.decrypt(&sealed).unwrap();
    assert_eq!(opened, value);
}

#[test]
fn same_value_encrypts_differently() {
    let svc = CipherService::new(MasterKey::generate());
    let a = svc.encrypt(&note()).unwrap();
    let b = svc.encrypt(&note()).unwrap();
    assert_ne!(a, b);
}

#[test]
fn different_password_fails_authentication() {
    let salt = Salt::random();
    let alice = CipherService::new(derive_key("correct-horse-battery", &salt));
    let mallory = CipherService::new(derive_key("wrong-horse-battery", &salt));

    let sealed = alice.encrypt(&note()).unwrap();
    assert!(matches!(
        mallory.decrypt::<Note>(&sealed),
        Err(CryptoError::Authentication)
    ));
}

#[test]
fn rederived_key_opens_previous_ciphertext() {
    let salt = Salt::random();
    let first = CipherService::new(derive_key("pw-12345678", &salt));
    let sealed = first.encrypt(&note()).unwrap();
    drop(first);

    let second = CipherService::new(derive_key("pw-12345678", &salt));
    assert_eq!(second.decrypt::<Note>(&sealed).unwrap(), note());
}

#[test]
fn malformed_ciphertext_is_format_error() {
    let svc = CipherService::new(MasterKey::generate());
    assert!(matches!(
        svc.decrypt::<Note>("definitely not base64!"),
        Err(CryptoError::Format(_))
    ));
    assert!(matches!(svc.decrypt::<Note>("AAAA"), Err(CryptoError::Format(_))));
}

#[test]
fn schema_mismatch_is_serialization_error() {
    let svc = CipherService::new(MasterKey::generate());
    let sealed = svc.encrypt(&"just a string").unwrap();
    assert!(matches!(
        svc.decrypt::<Note>(&sealed),
        Err(CryptoError::Serialization(_))
    ));
}

// ── DataEncryptor ────────────────────────────────────────────────

#[test]
fn trait_object_roundtrip() {
    let enc: Arc<dyn DataEncryptor> = Arc::new(CipherService::new(MasterKey::generate()));
    let sealed = enc.encrypt_bytes(b"opaque").unwrap();
    assert_eq!(enc.decrypt_bytes(&sealed).unwrap(), b"opaque");
}

#[test]
fn clones_share_the_key() {
    let svc = CipherService::new(MasterKey::generate());
    let clone = svc.clone();
    let sealed = svc.encrypt(&note()).unwrap();
    assert_eq!(clone.decrypt::<Note>(&sealed).unwrap(), note());
}

#[test]
fn service_debug_is_redacted() {
    let svc = CipherService::new(MasterKey::from_bytes([0x11; 32]));
    let debug = format!("{svc:?}");
    assert!(debug.contains("REDACTED"));
    assert!(!debug.contains("17"));
}
