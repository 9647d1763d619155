//! Key resolution and AES-256-GCM primitives.
//!
//! This module is free of configuration and process concerns. The caller
//! supplies key material; everything here is a local, synchronous transform.
//!
//! # Envelope format
//!
//! ```text
//! { ciphertext: hex, tag: hex(16 bytes), nonce: hex(12 bytes) }
//! ```
//!
//! All three fields come from one encrypt call and are required, unmodified,
//! to decrypt.

pub mod cipher;
pub mod key;

pub use cipher::CipherEngine;
pub use key::{CryptoKey, KeyFormat, KeySource, KEY_LEN};
