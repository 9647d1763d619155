//! Subcommand implementations. Each returns the text to print on stdout.

use anyhow::{Context, Result};
use common::CipherError;
use seal::{crypto::key, CipherEngine};
use tracing::info;

use crate::cli::Format;

/// `seal keygen`: fresh key material in the requested encoding.
pub fn keygen(format: Format) -> String {
    key::generate_key_material(format.into())
}

/// `seal encrypt`: the envelope as pretty JSON or compact form.
pub fn encrypt(engine: &CipherEngine, plaintext: &str, compact: bool) -> Result<String> {
    let envelope = engine.encrypt(plaintext)?;
    info!(compact, "secret encrypted");
    if compact {
        return Ok(envelope.to_compact());
    }
    serde_json::to_string_pretty(&envelope).context("failed to serialise envelope")
}

/// `seal decrypt`: accepts either a JSON object or the compact form.
pub fn decrypt(engine: &CipherEngine, input: &str) -> Result<String> {
    let input = input.trim();
    let plaintext = if input.starts_with('{') {
        engine.decrypt_json(input)?
    } else {
        engine.decrypt_compact(input)?
    };
    Ok(plaintext)
}

/// Strip one trailing line terminator left by `echo` or a heredoc.
pub fn strip_line_ending(s: &str) -> &str {
    s.strip_suffix("\r\n")
        .or_else(|| s.strip_suffix('\n'))
        .unwrap_or(s)
}

/// Map a failure to the process exit code, preferring the cipher error kind.
pub fn exit_code_for(error: &anyhow::Error) -> u8 {
    error
        .downcast_ref::<CipherError>()
        .map(CipherError::exit_code)
        .unwrap_or(1)
}
