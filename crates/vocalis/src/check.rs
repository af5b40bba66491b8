// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vocalis check` command implementation.

use vocalis_config::VocalisConfig;

/// One-line summary of a configuration that loaded and validated.
pub fn summary(config: &VocalisConfig) -> String {
    format!(
        "ok: strategy `{}` on {}:{}, {} account(s), verifier {}",
        config.gateway.strategy_name,
        config.gateway.host,
        config.gateway.port,
        config.accounts.len(),
        config.voiceit.base_url,
    )
}
