//! Error taxonomy shared across crates.

use thiserror::Error;

/// Errors surfaced by key resolution and the cipher engine.
///
/// Callers only ever see these kinds; decoding and AEAD library errors are
/// mapped into them at the boundary. Exit codes returned to the shell:
/// - [`CipherError::Configuration`] → 78 (`EX_CONFIG`)
/// - [`CipherError::Decryption`] → 65 (`EX_DATAERR`)
/// - [`CipherError::Encryption`] → 70 (`EX_SOFTWARE`)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    /// No usable key material was supplied. Fatal at construction.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Any failure while decrypting: malformed hex, wrong nonce or tag length,
    /// tampered data, wrong key.
    ///
    /// Deliberately carries no cause so failures are indistinguishable.
    #[error("Decryption failed")]
    Decryption,

    /// The AEAD primitive refused to encrypt (plaintext over the GCM limit).
    #[error("Encryption failed")]
    Encryption,
}

impl CipherError {
    /// Returns the process exit code that should be used for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CipherError::Configuration(_) => 78,
            CipherError::Decryption => 65,
            CipherError::Encryption => 70,
        }
    }

    /// Returns `true` for [`CipherError::Configuration`].
    pub fn is_configuration(&self) -> bool {
        matches!(self, CipherError::Configuration(_))
    }

    /// Returns `true` for [`CipherError::Decryption`].
    pub fn is_decryption(&self) -> bool {
        matches!(self, CipherError::Decryption)
    }
}
