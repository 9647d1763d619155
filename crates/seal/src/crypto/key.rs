//! Key-material resolution: any operator-supplied string → a 256-bit key.
//!
//! The cascade is tried in order of specificity:
//!
//! 1. hex that decodes to exactly [`KEY_LEN`] bytes is used as-is;
//! 2. otherwise standard padded base64 that decodes to exactly [`KEY_LEN`]
//!    bytes is used as-is;
//! 3. otherwise the key is SHA-256 over the raw UTF-8 bytes of the string.
//!
//! A hex or base64 candidate of the wrong length falls through to step 3 and
//! never errors. The string is decoded exactly as given (no trimming), so the
//! same string always yields the same key.

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::CipherError;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Fixed-size key buffer that holds exactly [`KEY_LEN`] bytes.
///
/// Zeroed on drop. Never printed, not even in debug builds.
pub struct CryptoKey(Box<[u8; KEY_LEN]>);

impl CryptoKey {
    fn from_array(bytes: [u8; KEY_LEN]) -> Self {
        Self(Box::new(bytes))
    }

    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl Drop for CryptoKey {
    fn drop(&mut self) {
        (*self.0).zeroize();
    }
}

impl ZeroizeOnDrop for CryptoKey {}

impl std::fmt::Debug for CryptoKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CryptoKey([REDACTED])")
    }
}

/// Which branch of the resolution cascade produced a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// 64 hex characters decoded directly.
    Hex,
    /// Standard base64 decoding to 32 bytes.
    Base64,
    /// SHA-256 of the raw material.
    Derived,
}

impl std::fmt::Display for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            KeySource::Hex => "hex",
            KeySource::Base64 => "base64",
            KeySource::Derived => "derived",
        })
    }
}

/// A resolved key together with the branch that produced it.
#[derive(Debug)]
pub struct ResolvedKey {
    pub key: CryptoKey,
    pub source: KeySource,
}

/// Encoding used when generating fresh key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFormat {
    Hex,
    Base64,
}

/// Resolve optional configuration into a key.
///
/// # Errors
///
/// Returns [`CipherError::Configuration`] if `material` is `None` or empty.
/// Every other string resolves, whitespace included.
pub fn resolve(material: Option<&str>) -> Result<ResolvedKey, CipherError> {
    match material {
        Some(m) if !m.is_empty() => Ok(resolve_material(m)),
        _ => Err(CipherError::Configuration(
            "no key material supplied".into(),
        )),
    }
}

/// Resolve a key-material string. See [`resolve`].
pub fn resolve_str(material: &str) -> Result<ResolvedKey, CipherError> {
    resolve(Some(material))
}

fn resolve_material(material: &str) -> ResolvedKey {
    let mut buf = Zeroizing::new([0u8; KEY_LEN]);
    if hex::decode_to_slice(material, &mut *buf).is_ok() {
        return ResolvedKey {
            key: CryptoKey::from_array(*buf),
            source: KeySource::Hex,
        };
    }

    if let Ok(decoded) = STANDARD.decode(material) {
        let decoded = Zeroizing::new(decoded);
        if decoded.len() == KEY_LEN {
            buf.copy_from_slice(&decoded);
            return ResolvedKey {
                key: CryptoKey::from_array(*buf),
                source: KeySource::Base64,
            };
        }
    }

    let digest: Zeroizing<[u8; KEY_LEN]> =
        Zeroizing::new(Sha256::digest(material.as_bytes()).into());
    ResolvedKey {
        key: CryptoKey::from_array(*digest),
        source: KeySource::Derived,
    }
}

/// Generate fresh random key material from the OS CSPRNG.
///
/// The output resolves through the hex or base64 branch, never the derived one.
pub fn generate_key_material(format: KeyFormat) -> String {
    let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
    OsRng.fill_bytes(&mut *bytes);
    match format {
        KeyFormat::Hex => hex::encode(*bytes),
        KeyFormat::Base64 => STANDARD.encode(*bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEX_KEY: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

    fn expected_bytes() -> [u8; KEY_LEN] {
        let mut b = [0u8; KEY_LEN];
        for (i, v) in b.iter_mut().enumerate() {
            *v = i as u8;
        }
        b
    }

    #[test]
    fn missing_material_is_configuration_error() {
        assert!(resolve(None).unwrap_err().is_configuration());
        assert!(resolve(Some("")).unwrap_err().is_configuration());
    }

    #[test]
    fn whitespace_material_is_hashed() {
        let r = resolve_str("   ").unwrap();
        assert_eq!(r.source, KeySource::Derived);
        let digest: [u8; KEY_LEN] = Sha256::digest(b"   ").into();
        assert_eq!(r.key.as_bytes(), &digest);
        assert_eq!(resolve(Some("\n")).unwrap().source, KeySource::Derived);
    }

    #[test]
    fn hex_key_used_directly() {
        let r = resolve_str(HEX_KEY).unwrap();
        assert_eq!(r.source, KeySource::Hex);
        assert_eq!(r.key.as_bytes(), &expected_bytes());
    }

    #[test]
    fn uppercase_hex_accepted() {
        let r = resolve_str(&HEX_KEY.to_uppercase()).unwrap();
        assert_eq!(r.source, KeySource::Hex);
        assert_eq!(r.key.as_bytes(), &expected_bytes());
    }

    #[test]
    fn base64_key_used_directly() {
        let b64 = STANDARD.encode(expected_bytes());
        let r = resolve_str(&b64).unwrap();
        assert_eq!(r.source, KeySource::Base64);
        assert_eq!(r.key.as_bytes(), &expected_bytes());
    }

    #[test]
    fn wrong_length_hex_falls_through_to_derivation() {
        // 35 bytes of valid hex.
        let long_hex = "ab".repeat(35);
        let r = resolve_str(&long_hex).unwrap();
        assert_eq!(r.source, KeySource::Derived);
        let digest: [u8; KEY_LEN] = Sha256::digest(long_hex.as_bytes()).into();
        assert_eq!(r.key.as_bytes(), &digest);
    }

    #[test]
    fn wrong_length_base64_falls_through_to_derivation() {
        let short = STANDARD.encode([7u8; 16]);
        assert_eq!(resolve_str(&short).unwrap().source, KeySource::Derived);
    }

    #[test]
    fn raw_passphrase_is_hashed() {
        let r = resolve_str("correct horse battery staple").unwrap();
        assert_eq!(r.source, KeySource::Derived);
        let digest: [u8; KEY_LEN] = Sha256::digest(b"correct horse battery staple").into();
        assert_eq!(r.key.as_bytes(), &digest);
    }

    #[test]
    fn unicode_material_is_hashed() {
        let r = resolve_str("ключ-🔑-鍵").unwrap();
        assert_eq!(r.source, KeySource::Derived);
    }

    #[test]
    fn resolution_is_deterministic() {
        for m in [HEX_KEY, "passphrase", "QUJD"] {
            let a = resolve_str(m).unwrap();
            let b = resolve_str(m).unwrap();
            assert_eq!(a.key.as_bytes(), b.key.as_bytes());
            assert_eq!(a.source, b.source);
        }
    }

    #[test]
    fn surrounding_whitespace_is_not_trimmed() {
        let r = resolve_str(&format!("{HEX_KEY}\n")).unwrap();
        assert_eq!(r.source, KeySource::Derived);
    }

    #[test]
    fn generated_material_resolves_directly() {
        let hex_material = generate_key_material(KeyFormat::Hex);
        assert_eq!(hex_material.len(), 64);
        assert_eq!(resolve_str(&hex_material).unwrap().source, KeySource::Hex);

        let b64_material = generate_key_material(KeyFormat::Base64);
        assert_eq!(b64_material.len(), 44);
        assert_eq!(
            resolve_str(&b64_material).unwrap().source,
            KeySource::Base64
        );
    }

    #[test]
    fn generated_material_differs() {
        assert_ne!(
            generate_key_material(KeyFormat::Hex),
            generate_key_material(KeyFormat::Hex)
        );
    }

    #[test]
    fn crypto_key_wipes_on_drop() {
        fn assert_zeroize_on_drop<T: ZeroizeOnDrop>() {}
        assert_zeroize_on_drop::<CryptoKey>();

        let mut key = resolve_str(HEX_KEY).unwrap().key;
        (*key.0).zeroize();
        assert_eq!(key.as_bytes(), &[0u8; KEY_LEN]);
    }

    #[test]
    fn crypto_key_redacted_in_debug() {
        let r = resolve_str(HEX_KEY).unwrap();
        let dbg = format!("{r:?}");
        assert!(dbg.contains("REDACTED"));
        assert!(!dbg.contains("0a0b"));
    }
}
