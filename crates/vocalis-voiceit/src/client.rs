// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the VoiceIt speaker-verification API.
//!
//! Provides [`VoiceItClient`] which builds the authentication request, signs it
//! with the developer id and a hashed password, and decodes the verdict. There
//! are no retries: one request per verification.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use secrecy::ExposeSecret;
use sha2::{Digest, Sha256};
use tracing::debug;

use vocalis_config::VoiceItConfig;
use vocalis_core::types::VerificationRequest;
use vocalis_core::VocalisError;

use crate::types::AuthenticationResponse;

/// Path of the voice authentication endpoint.
pub const AUTHENTICATIONS_PATH: &str = "/sivservice/api/authentications";

/// HTTP client for VoiceIt API communication.
///
/// Built once and shared; `reqwest::Client` pools connections internally.
#[derive(Debug, Clone)]
pub struct VoiceItClient {
    client: reqwest::Client,
    endpoint: String,
}

impl VoiceItClient {
    pub fn new(config: &VoiceItConfig) -> Result<Self, VocalisError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| VocalisError::Verifier {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}{AUTHENTICATIONS_PATH}",
                config.base_url.trim_end_matches('/')
            ),
        })
    }

    /// Full URL authentication requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit one voice sample for verification.
    ///
    /// Non-2xx responses, transport failures and unparseable bodies are all
    /// [`VocalisError::Verifier`].
    pub async fn authenticate(
        &self,
        request: &VerificationRequest<'_>,
    ) -> Result<AuthenticationResponse, VocalisError> {
        let response = self
            .client
            .post(&self.endpoint)
            .headers(signed_headers(request)?)
            .body(request.audio.to_vec())
            .send()
            .await
            .map_err(|e| VocalisError::Verifier {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, email = %request.email, "authentication response received");

        let body = response.text().await.map_err(|e| VocalisError::Verifier {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            return Err(VocalisError::verifier(format!(
                "API returned {status}: {body}"
            )));
        }

        serde_json::from_str(&body).map_err(|e| VocalisError::Verifier {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

/// Lowercase hex SHA-256 of the user's password, as VoiceIt expects it.
pub fn password_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

fn signed_headers(request: &VerificationRequest<'_>) -> Result<HeaderMap, VocalisError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("audio/wav"));

    let password = password_digest(request.password.expose_secret());
    let accuracy = request.accuracy.to_string();
    let passes = request.accuracy_passes.to_string();
    let increment = request.accuracy_pass_increment.to_string();
    let confidence = request.confidence.to_string();

    let values = [
        ("vsitemail", request.email),
        ("vsitpassword", password.as_str()),
        ("vsitdeveloperid", request.developer_id),
        ("vsitaccuracy", accuracy.as_str()),
        ("vsitaccuracypasses", passes.as_str()),
        ("vsitaccuracypassincrement", increment.as_str()),
        ("vsitconfidence", confidence.as_str()),
    ];
    for (name, value) in values {
        let value = HeaderValue::from_str(value).map_err(|e| VocalisError::Verifier {
            message: format!("invalid {name} header value"),
            source: Some(Box::new(e)),
        })?;
        headers.insert(HeaderName::from_static(name), value);
    }

    Ok(headers)
}
