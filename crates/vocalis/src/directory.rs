// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Account directory backed by `[[accounts]]` in the configuration.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;

use vocalis_config::AccountConfig;
use vocalis_core::traits::IdentityResolver;
use vocalis_core::types::{AuthInfo, Credentials, DecodedAudio, Resolution};
use vocalis_core::VocalisError;

/// Message returned when a verified voice belongs to no configured account.
pub const UNKNOWN_ACCOUNT: &str = "Unknown account";

/// Identity handed back on a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Resolves verified credentials to a configured account by email.
///
/// Emails match case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct AccountDirectory {
    accounts: HashMap<String, Account>,
}

impl AccountDirectory {
    pub fn from_config(accounts: &[AccountConfig]) -> Self {
        let accounts = accounts
            .iter()
            .map(|a| {
                (
                    a.email.to_lowercase(),
                    Account {
                        id: a.id.clone(),
                        email: a.email.clone(),
                        label: a.label.clone(),
                    },
                )
            })
            .collect();
        Self { accounts }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait]
impl IdentityResolver for AccountDirectory {
    type Identity = Account;

    async fn resolve(
        &self,
        credentials: &Credentials,
        _audio: &DecodedAudio,
    ) -> Result<Resolution<Account>, VocalisError> {
        Ok(match self.accounts.get(&credentials.email.to_lowercase()) {
            Some(account) => Resolution::Found {
                identity: account.clone(),
                info: None,
            },
            None => Resolution::NotFound {
                info: Some(AuthInfo::message(UNKNOWN_ACCOUNT)),
            },
        })
    }
}
