// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for Vocalis.
//!
//! `vocalis.toml` is read from `/etc/vocalis`, the user config directory and
//! the working directory, then overridden by `VOCALIS_*` variables. Unknown
//! keys are rejected with a suggestion, and validation collects every problem
//! before startup gives up.
//!
//! ```no_run
//! match vocalis_config::load_and_validate() {
//!     Ok(config) => println!("strategy: {}", config.gateway.strategy_name),
//!     Err(errors) => vocalis_config::render_errors(&errors),
//! }
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{render_errors, ConfigError, SourceFile};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{AccountConfig, GatewayConfig, StrategyConfig, VocalisConfig, VoiceItConfig};

use vocalis_core::VocalisError;

/// Load configuration from the standard locations and validate it.
///
/// Parse failures become diagnostics with spans into whichever file caused
/// them. Validation reports every problem at once.
pub fn load_and_validate() -> Result<VocalisConfig, Vec<ConfigError>> {
    validated(loader::load_config(), || {
        loader::config_paths()
            .iter()
            .filter_map(|path| SourceFile::read(path))
            .collect()
    })
}

/// Load configuration from an explicit file (plus env overrides) and validate it.
///
/// Unlike the standard lookup, a missing file is an error.
pub fn load_and_validate_path(path: &Path) -> Result<VocalisConfig, Vec<ConfigError>> {
    if !path.is_file() {
        return Err(vec![ConfigError::FileNotFound {
            path: path.display().to_string(),
        }]);
    }
    validated(loader::load_config_from_path(path), || {
        SourceFile::read(path).into_iter().collect()
    })
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<VocalisConfig, Vec<ConfigError>> {
    validated(loader::load_config_from_str(toml_content), || {
        vec![SourceFile::new("<inline>", toml_content)]
    })
}

fn validated(
    loaded: Result<VocalisConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<SourceFile>,
) -> Result<VocalisConfig, Vec<ConfigError>> {
    let config =
        loaded.map_err(|err| diagnostic::figment_to_config_errors(err, &sources()))?;
    validation::validate_config(&config)?;
    Ok(config)
}

/// Collapse diagnostics into a single [`VocalisError::Config`].
pub fn into_vocalis_error(errors: &[ConfigError]) -> VocalisError {
    let joined = errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    VocalisError::Config(joined)
}
