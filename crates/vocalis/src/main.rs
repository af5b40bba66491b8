// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vocalis - voice-biometric login service.
//!
//! This is the binary entry point for the Vocalis gateway.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod check;
mod directory;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use vocalis_config::{ConfigError, VocalisConfig};

/// Vocalis - voice-biometric login service.
#[derive(Parser, Debug)]
#[command(name = "vocalis", version, about, long_about = None)]
struct Cli {
    /// Configuration file to use instead of the standard lookup.
    #[arg(long, short, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the authentication gateway.
    Serve,
    /// Load and validate the configuration, then exit.
    Check,
}

fn load_config(path: Option<&PathBuf>) -> Result<VocalisConfig, Vec<ConfigError>> {
    match path {
        Some(path) => vocalis_config::load_and_validate_path(path),
        None => vocalis_config::load_and_validate(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("vocalis: use --help for available commands");
        return;
    };

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(errors) => {
            vocalis_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match command {
        Commands::Serve => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Commands::Check => {
            println!("{}", check::summary(&config));
        }
    }
}
