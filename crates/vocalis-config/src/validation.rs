// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates constraints serde attributes cannot express. Biometric tuning
//! values (accuracy, passes, increment, confidence) are deliberately left
//! unchecked and forwarded as configured.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::VocalisConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &VocalisConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    match config.strategy.developer_id.as_deref() {
        None => errors.push(ConfigError::MissingKey {
            key: "strategy.developer_id".to_string(),
        }),
        Some(id) if id.trim().is_empty() => errors.push(ConfigError::Validation {
            message: "strategy.developer_id must not be empty".to_string(),
        }),
        Some(_) => {}
    }

    if config.strategy.verifier_timeout_secs == Some(0) {
        errors.push(ConfigError::Validation {
            message: "strategy.verifier_timeout_secs must be at least 1".to_string(),
        });
    }

    let fields = [
        ("strategy.email_field", &config.strategy.email_field),
        ("strategy.password_field", &config.strategy.password_field),
        ("strategy.wav_field", &config.strategy.wav_field),
    ];
    for (key, value) in fields {
        if value.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{key} must not be empty"),
            });
        }
    }

    let mut seen_fields = HashSet::new();
    for (key, value) in fields {
        if !value.trim().is_empty() && !seen_fields.insert(value.as_str()) {
            errors.push(ConfigError::Validation {
                message: format!("{key} `{value}` is already used by another credential field"),
            });
        }
    }

    if config.voiceit.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "voiceit.base_url must not be empty".to_string(),
        });
    }

    if config.gateway.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    }

    if config.gateway.strategy_name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.strategy_name must not be empty".to_string(),
        });
    }

    let mut seen_emails = HashSet::new();
    for (i, account) in config.accounts.iter().enumerate() {
        if account.email.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("accounts[{i}].email must not be empty"),
            });
        } else if !seen_emails.insert(account.email.to_lowercase()) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "duplicate account email `{}` in [[accounts]] array",
                    account.email
                ),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
