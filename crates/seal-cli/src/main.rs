//! `seal` — operator command line entry point.
//!
//! Startup sequence:
//! 1. Parse the command line.
//! 2. Load and validate [`Config`] from `SEAL_*` environment variables.
//! 3. Initialise structured JSON logging on stderr.
//! 4. Resolve the key (only for `encrypt` / `decrypt`) and run the command.

mod cli;
mod commands;
mod config;
mod telemetry;

use std::io::Read;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use seal::{CipherEngine, TracingLogger};

use cli::{Cli, Command};
use config::{Config, KEY_MATERIAL_VAR};

fn main() -> ExitCode {
    match run() {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            ExitCode::from(commands::exit_code_for(&e))
        }
    }
}

fn run() -> Result<String> {
    let cli = Cli::parse();

    let cfg = Config::from_env()?;
    telemetry::init(&cfg.log_level)?;

    match cli.command {
        Command::Keygen { format } => Ok(commands::keygen(format)),
        Command::Encrypt { text, compact } => {
            let engine = engine(&cfg)?;
            let plaintext = match text {
                Some(t) => t,
                None => commands::strip_line_ending(&read_stdin()?).to_owned(),
            };
            commands::encrypt(&engine, &plaintext, compact)
        }
        Command::Decrypt { envelope } => {
            let engine = engine(&cfg)?;
            let input = match envelope {
                Some(e) => e,
                None => read_stdin()?,
            };
            commands::decrypt(&engine, &input)
        }
    }
}

fn engine(cfg: &Config) -> Result<CipherEngine> {
    CipherEngine::new(cfg.key_material.as_deref(), Arc::new(TracingLogger))
        .with_context(|| format!("{KEY_MATERIAL_VAR} must be set"))
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read stdin")?;
    Ok(buf)
}
