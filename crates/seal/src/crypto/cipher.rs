//! AES-256-GCM encryption and decryption of sensitive strings.
//!
//! **Nonces:** every encrypt call draws a fresh 96-bit nonce from the OS
//! CSPRNG. Nothing is derived from a counter, so restarts cannot replay one.
//!
//! **Failure uniformity:** every decrypt failure (bad hex, wrong field length,
//! tag mismatch, wrong key, non-UTF-8 plaintext) surfaces as the same
//! [`CipherError::Decryption`]. Do not split it into distinct errors; that
//! hands an attacker a decryption oracle.

use std::sync::Arc;

use aes_gcm::{
    aead::{generic_array::GenericArray, rand_core::RngCore, AeadInPlace, KeyInit, OsRng},
    Aes256Gcm, Key,
};
use common::envelope::{EncryptedEnvelope, NONCE_LEN, TAG_LEN};
use common::CipherError;
use zeroize::Zeroizing;

use crate::crypto::key::{self, KeySource};
use crate::logger::{Logger, TracingLogger};

/// Message logged, and returned, on any decryption failure.
const DECRYPTION_FAILED: &str = "Decryption failed";

/// Authenticated encryption under one resolved key.
///
/// Stateless after construction: the key schedule is immutable and each call
/// is independent, so one engine can be shared across threads.
pub struct CipherEngine {
    cipher: Aes256Gcm,
    source: KeySource,
    logger: Arc<dyn Logger>,
}

impl CipherEngine {
    /// Resolve `material` once and build the engine.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::Configuration`] if no key material was supplied.
    pub fn new(material: Option<&str>, logger: Arc<dyn Logger>) -> Result<Self, CipherError> {
        let resolved = match key::resolve(material) {
            Ok(r) => r,
            Err(e) => {
                logger.error("cipher engine not constructed: no key material supplied");
                return Err(e);
            }
        };
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(resolved.key.as_bytes()));
        logger.debug(&format!("cipher key resolved from {} material", resolved.source));

        Ok(Self {
            cipher,
            source: resolved.source,
            logger,
        })
    }

    /// Build an engine that logs through `tracing`.
    pub fn from_key_material(material: &str) -> Result<Self, CipherError> {
        Self::new(Some(material), Arc::new(TracingLogger))
    }

    /// Read key material from the environment variable `var`, once.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::Configuration`] if the variable is unset, not
    /// valid unicode, or empty.
    pub fn from_env(var: &str) -> Result<Self, CipherError> {
        match std::env::var(var) {
            Ok(value) => Self::new(Some(&value), Arc::new(TracingLogger)),
            Err(_) => {
                TracingLogger.error(&format!("{var} is not set; refusing to start without a key"));
                Err(CipherError::Configuration(format!("{var} is not set")))
            }
        }
    }

    /// Which branch of the resolution cascade produced the key.
    pub fn key_source(&self) -> KeySource {
        self.source
    }

    /// Encrypt the UTF-8 bytes of `plaintext` under a fresh random nonce.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::Encryption`] only if the plaintext exceeds the
    /// AES-GCM message length limit.
    pub fn encrypt(&self, plaintext: &str) -> Result<EncryptedEnvelope, CipherError> {
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);
        self.seal(plaintext.as_bytes(), &nonce)
    }

    /// Encrypt and return the compact `v1.<nonce>.<tag>.<ciphertext>` form.
    pub fn encrypt_compact(&self, plaintext: &str) -> Result<String, CipherError> {
        self.encrypt(plaintext).map(|env| env.to_compact())
    }

    /// Verify and decrypt hex-encoded ciphertext, tag and nonce.
    ///
    /// The tag is verified before any plaintext is returned.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::Decryption`] on any failure, whatever the cause.
    pub fn decrypt(
        &self,
        ciphertext_hex: &str,
        tag_hex: &str,
        nonce_hex: &str,
    ) -> Result<String, CipherError> {
        self.open(ciphertext_hex, tag_hex, nonce_hex)
            .inspect_err(|_| self.logger.warn(DECRYPTION_FAILED))
    }

    /// Decrypt all three fields of an [`EncryptedEnvelope`].
    pub fn decrypt_envelope(&self, envelope: &EncryptedEnvelope) -> Result<String, CipherError> {
        self.decrypt(&envelope.ciphertext, &envelope.tag, &envelope.nonce)
    }

    /// Parse and decrypt an envelope serialised as a JSON object.
    pub fn decrypt_json(&self, json: &str) -> Result<String, CipherError> {
        let envelope = serde_json::from_str::<EncryptedEnvelope>(json)
            .map_err(|_| CipherError::Decryption)
            .inspect_err(|_| self.logger.warn(DECRYPTION_FAILED))?;
        self.decrypt_envelope(&envelope)
    }

    /// Parse and decrypt a compact envelope string.
    pub fn decrypt_compact(&self, compact: &str) -> Result<String, CipherError> {
        let envelope = EncryptedEnvelope::from_compact(compact)
            .inspect_err(|_| self.logger.warn(DECRYPTION_FAILED))?;
        self.decrypt_envelope(&envelope)
    }

    fn seal(
        &self,
        plaintext: &[u8],
        nonce: &[u8; NONCE_LEN],
    ) -> Result<EncryptedEnvelope, CipherError> {
        let mut buffer = Zeroizing::new(plaintext.to_vec());
        let tag = self
            .cipher
            .encrypt_in_place_detached(
                GenericArray::from_slice(nonce),
                b"",
                buffer.as_mut_slice(),
            )
            .map_err(|_| {
                self.logger.error("Encryption failed");
                CipherError::Encryption
            })?;

        let ciphertext = hex::encode(buffer.as_slice());
        Ok(EncryptedEnvelope {
            ciphertext,
            tag: hex::encode(tag),
            nonce: hex::encode(nonce),
        })
    }

    fn open(
        &self,
        ciphertext_hex: &str,
        tag_hex: &str,
        nonce_hex: &str,
    ) -> Result<String, CipherError> {
        let nonce = decode_fixed::<NONCE_LEN>(nonce_hex)?;
        let tag = decode_fixed::<TAG_LEN>(tag_hex)?;
        let mut buffer =
            Zeroizing::new(hex::decode(ciphertext_hex).map_err(|_| CipherError::Decryption)?);

        if self
            .cipher
            .decrypt_in_place_detached(
                GenericArray::from_slice(&nonce),
                b"",
                buffer.as_mut_slice(),
                GenericArray::from_slice(&tag),
            )
            .is_err()
        {
            return Err(CipherError::Decryption);
        }

        String::from_utf8(std::mem::take(&mut *buffer)).map_err(|e| {
            drop(Zeroizing::new(e.into_bytes()));
            CipherError::Decryption
        })
    }
}

impl std::fmt::Debug for CipherEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherEngine")
            .field("algorithm", &"AES-256-GCM")
            .field("key_source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Decode hex that must be exactly `N` bytes.
fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], CipherError> {
    let mut out = [0u8; N];
    hex::decode_to_slice(s, &mut out).map_err(|_| CipherError::Decryption)?;
    Ok(out)
}
