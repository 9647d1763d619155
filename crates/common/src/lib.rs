//! Common types and errors shared across `secret-seal` crates.

pub mod envelope;
pub mod error;

pub use envelope::EncryptedEnvelope;
pub use error::CipherError;
