// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading.
//!
//! Files are merged from least to most specific, then `VOCALIS_*` variables
//! override whatever the files set.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::VocalisConfig;

const FILE_NAME: &str = "vocalis.toml";

/// Standard config files, least specific first: `/etc/vocalis`, the user
/// config dir, then the working directory. Missing files are skipped.
pub fn config_paths() -> Vec<PathBuf> {
    let system = Path::new("/etc/vocalis").join(FILE_NAME);
    let user = dirs::config_dir().map(|d| d.join("vocalis").join(FILE_NAME));
    let local = std::env::current_dir()
        .map(|d| d.join(FILE_NAME))
        .unwrap_or_else(|_| PathBuf::from(FILE_NAME));

    [Some(system), user, Some(local)].into_iter().flatten().collect()
}

fn defaults() -> Figment {
    Figment::from(Serialized::defaults(VocalisConfig::default()))
}

/// Load defaults, every file from [`config_paths`], then the environment.
pub fn load_config() -> Result<VocalisConfig, figment::Error> {
    config_paths()
        .into_iter()
        .fold(defaults(), |figment, path| figment.merge(Toml::file(path)))
        .merge(env_provider())
        .extract()
}

/// Load defaults plus `toml_content`. The environment is not consulted.
pub fn load_config_from_str(toml_content: &str) -> Result<VocalisConfig, figment::Error> {
    defaults().merge(Toml::string(toml_content)).extract()
}

/// Load defaults, the file at `path`, then the environment.
pub fn load_config_from_path(path: &Path) -> Result<VocalisConfig, figment::Error> {
    defaults()
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// `VOCALIS_*` variables. Keys contain underscores, so the section is split
/// off explicitly: `VOCALIS_STRATEGY_DEVELOPER_ID` is `strategy.developer_id`.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("VOCALIS_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a lowercased, prefix-stripped env var name to its dotted config path.
pub(crate) fn map_env_key(key: &str) -> String {
    for section in ["strategy", "voiceit", "gateway"] {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
