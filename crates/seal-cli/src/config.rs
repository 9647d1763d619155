//! Configuration loading and validation for the `seal` command line.
//!
//! Values are read from `SEAL_`-prefixed environment variables. Key material
//! is optional at load time: commands that need it turn its absence into a
//! [`common::CipherError::Configuration`].

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "SEAL";

/// Name of the variable carrying key material, for operator-facing messages.
pub const KEY_MATERIAL_VAR: &str = "SEAL_KEY_MATERIAL";

/// Validated command-line configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Key material in hex, base64, or any passphrase. Never logged.
    #[serde(default)]
    pub key_material: Option<String>,

    /// Tracing log level (e.g. `"warn"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".into()
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field(
                "key_material",
                &self.key_material.as_ref().map(|_| "[REDACTED]"),
            )
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Config {
    /// Load and validate configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::load(config::Environment::with_prefix(ENV_PREFIX))
    }

    fn load(source: config::Environment) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(source)
            .build()
            .context("failed to build seal configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise seal configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        if self.log_level.parse::<LevelFilter>().is_err() {
            anyhow::bail!(
                "SEAL_LOG_LEVEL must be one of off, error, warn, info, debug, trace (got {:?})",
                self.log_level
            );
        }
        Ok(())
    }
}
