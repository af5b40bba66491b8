// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! VoiceIt speaker-verification wire types.

use serde::{Deserialize, Serialize};

/// Prefix of `Result` on a successful voice authentication.
pub const SUCCESS_PREFIX: &str = "Authentication successful";

/// Body of a `POST /sivservice/api/authentications` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticationResponse {
    /// Human-readable verdict, e.g. "Authentication successful." or
    /// "Authentication failed.".
    #[serde(rename = "Result")]
    pub result: String,

    /// Match confidence as reported by the service.
    #[serde(rename = "Confidence", default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
}

impl AuthenticationResponse {
    pub fn is_success(&self) -> bool {
        self.result.starts_with(SUCCESS_PREFIX)
    }
}
