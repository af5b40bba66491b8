// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential lookup across a request's field sources.

use secrecy::SecretString;
use strum::Display;

use vocalis_config::StrategyConfig;
use vocalis_core::types::{Credentials, FieldMap, RequestFields};

/// The three credentials a voice login needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum CredentialKind {
    Email,
    Password,
    Wav,
}

/// Request field names for each credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
    pub email: String,
    pub password: String,
    pub wav: String,
}

impl From<&StrategyConfig> for FieldNames {
    fn from(config: &StrategyConfig) -> Self {
        Self {
            email: config.email_field.clone(),
            password: config.password_field.clone(),
            wav: config.wav_field.clone(),
        }
    }
}

impl Default for FieldNames {
    fn default() -> Self {
        Self::from(&StrategyConfig::default())
    }
}

/// First non-empty value for `field`, checking `primary` before `secondary`.
pub fn locate<'a>(primary: &'a FieldMap, secondary: &'a FieldMap, field: &str) -> Option<&'a str> {
    [primary, secondary]
        .into_iter()
        .filter_map(|source| source.get(field))
        .map(String::as_str)
        .find(|value| !value.is_empty())
}

/// Locate all three credentials, body before query.
///
/// Returns every missing credential when any is absent; there is no partial result.
pub fn extract(fields: &RequestFields, names: &FieldNames) -> Result<Credentials, Vec<CredentialKind>> {
    let email = locate(&fields.body, &fields.query, &names.email);
    let password = locate(&fields.body, &fields.query, &names.password);
    let wav = locate(&fields.body, &fields.query, &names.wav);

    match (email, password, wav) {
        (Some(email), Some(password), Some(wav)) => Ok(Credentials {
            email: email.to_string(),
            password: SecretString::from(password.to_string()),
            wav: wav.to_string(),
        }),
        _ => {
            let missing = [
                (CredentialKind::Email, email),
                (CredentialKind::Password, password),
                (CredentialKind::Wav, wav),
            ]
            .into_iter()
            .filter(|(_, value)| value.is_none())
            .map(|(kind, _)| kind)
            .collect();
            Err(missing)
        }
    }
}
