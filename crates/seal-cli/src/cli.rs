//! Command-line definition.

use clap::{Parser, Subcommand, ValueEnum};
use seal::KeyFormat;

/// Encrypt and decrypt secrets with AES-256-GCM.
///
/// Key material is read from `SEAL_KEY_MATERIAL` (64 hex characters, base64 of
/// 32 bytes, or any passphrase).
#[derive(Debug, Parser)]
#[command(name = "seal", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print fresh random key material.
    Keygen {
        /// Encoding of the printed key.
        #[arg(long, value_enum, default_value_t = Format::Hex)]
        format: Format,
    },

    /// Encrypt TEXT, or stdin without its trailing newline when omitted.
    Encrypt {
        text: Option<String>,

        /// Print `v1.<nonce>.<tag>.<ciphertext>` instead of JSON.
        #[arg(long)]
        compact: bool,
    },

    /// Decrypt a JSON or compact envelope given as ENVELOPE or on stdin.
    Decrypt { envelope: Option<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Hex,
    Base64,
}

impl From<Format> for KeyFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Hex => KeyFormat::Hex,
            Format::Base64 => KeyFormat::Base64,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn keygen_defaults_to_hex() {
        let cli = Cli::try_parse_from(["seal", "keygen"]).unwrap();
        assert!(matches!(cli.command, Command::Keygen { format: Format::Hex }));
    }

    #[test]
    fn keygen_base64() {
        let cli = Cli::try_parse_from(["seal", "keygen", "--format", "base64"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Keygen {
                format: Format::Base64
            }
        ));
    }

    #[test]
    fn encrypt_with_text_and_compact() {
        let cli = Cli::try_parse_from(["seal", "encrypt", "hunter2", "--compact"]).unwrap();
        match cli.command {
            Command::Encrypt { text, compact } => {
                assert_eq!(text.as_deref(), Some("hunter2"));
                assert!(compact);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn decrypt_without_argument_reads_stdin() {
        let cli = Cli::try_parse_from(["seal", "decrypt"]).unwrap();
        assert!(matches!(cli.command, Command::Decrypt { envelope: None }));
    }

    #[test]
    fn unknown_format_rejected() {
        assert!(Cli::try_parse_from(["seal", "keygen", "--format", "pem"]).is_err());
    }
}
