//! Authenticated encryption of sensitive strings at rest.
//!
//! Operator-supplied key material (hex, base64, or any passphrase) is resolved
//! once into a 256-bit key; [`CipherEngine`] then encrypts and decrypts with
//! AES-256-GCM under a fresh random nonce per call.
//!
//! ```no_run
//! use seal::CipherEngine;
//!
//! let engine = CipherEngine::from_env("SEAL_KEY_MATERIAL")?;
//! let envelope = engine.encrypt("s3cr3t")?;
//! assert_eq!(engine.decrypt_envelope(&envelope)?, "s3cr3t");
//! # Ok::<(), seal::CipherError>(())
//! ```

pub mod crypto;
pub mod logger;

pub use common::{CipherError, EncryptedEnvelope};
pub use crypto::{CipherEngine, KeyFormat, KeySource};
pub use logger::{Logger, NoopLogger, TracingLogger};
