//! The value returned by an encrypt call and required, unmodified, by decrypt.
//!
//! All three fields are lowercase hex. The compact single-string form is
//!
//! ```text
//! v1.<nonce-hex>.<tag-hex>.<ciphertext-hex>
//! ```
//!
//! The `v1` prefix leaves room for a later algorithm migration without
//! breaking stored values.

use serde::{Deserialize, Serialize};

use crate::error::CipherError;

/// Byte length of an AES-GCM nonce (96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of an AES-GCM authentication tag (128 bits).
pub const TAG_LEN: usize = 16;

/// Hex length of an encoded nonce.
pub const NONCE_HEX_LEN: usize = NONCE_LEN * 2;

/// Hex length of an encoded tag.
pub const TAG_HEX_LEN: usize = TAG_LEN * 2;

/// Prefix of the compact representation.
pub const VERSION_PREFIX: &str = "v1";

/// Ciphertext, tag and nonce from one encrypt call.
///
/// Mixing fields from different calls is not detected here; it fails tag
/// verification at decrypt time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedEnvelope {
    /// Hex ciphertext, two characters per plaintext byte. Empty for an empty plaintext.
    pub ciphertext: String,
    /// Hex authentication tag, always [`TAG_HEX_LEN`] characters.
    pub tag: String,
    /// Hex nonce, always [`NONCE_HEX_LEN`] characters.
    pub nonce: String,
}

impl EncryptedEnvelope {
    /// Encode this envelope to its compact string representation.
    pub fn to_compact(&self) -> String {
        format!(
            "{}.{}.{}.{}",
            VERSION_PREFIX, self.nonce, self.tag, self.ciphertext
        )
    }

    /// Parse a compact string back into an [`EncryptedEnvelope`].
    ///
    /// Only the structure is checked here; hex and length validation happen
    /// when the envelope is decrypted.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::Decryption`] if the string does not match
    /// `v1.<nonce>.<tag>.<ciphertext>`.
    pub fn from_compact(s: &str) -> Result<Self, CipherError> {
        let parts: Vec<&str> = s.trim().splitn(4, '.').collect();
        if parts.len() != 4 || parts[0] != VERSION_PREFIX {
            return Err(CipherError::Decryption);
        }
        if parts[1].is_empty() || parts[2].is_empty() {
            return Err(CipherError::Decryption);
        }
        Ok(Self {
            nonce: parts[1].to_owned(),
            tag: parts[2].to_owned(),
            ciphertext: parts[3].to_owned(),
        })
    }
}
