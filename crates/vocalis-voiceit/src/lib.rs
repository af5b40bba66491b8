// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! VoiceIt biometric verifier for Vocalis.
//!
//! This crate implements [`BiometricVerifier`] on top of the VoiceIt
//! speaker-verification API: one HTTP round-trip per sample, no retries.

pub mod client;
pub mod types;

use async_trait::async_trait;
use tracing::{debug, info};

use vocalis_config::VoiceItConfig;
use vocalis_core::error::VocalisError;
use vocalis_core::traits::{BiometricVerifier, PluginAdapter};
use vocalis_core::types::{AdapterType, HealthStatus, VerificationOutcome, VerificationRequest};

pub use crate::client::VoiceItClient;
pub use crate::types::AuthenticationResponse;

/// VoiceIt verifier implementing [`BiometricVerifier`].
///
/// Construct once at startup and share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct VoiceItVerifier {
    client: VoiceItClient,
}

impl VoiceItVerifier {
    pub fn new(config: &VoiceItConfig) -> Result<Self, VocalisError> {
        let client = VoiceItClient::new(config)?;
        info!(endpoint = client.endpoint(), "VoiceIt verifier initialized");
        Ok(Self { client })
    }

    pub fn with_client(client: VoiceItClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PluginAdapter for VoiceItVerifier {
    fn name(&self) -> &str {
        "voiceit"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Verifier
    }

    async fn health_check(&self) -> Result<HealthStatus, VocalisError> {
        // Probing the service would need a real enrollment, so only the
        // client's existence is checked.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), VocalisError> {
        debug!("VoiceIt verifier shutting down");
        Ok(())
    }
}

#[async_trait]
impl BiometricVerifier for VoiceItVerifier {
    async fn verify(&self, request: &VerificationRequest<'_>) -> VerificationOutcome {
        match self.client.authenticate(request).await {
            Ok(response) if response.is_success() => {
                debug!(
                    email = %request.email,
                    confidence = response.confidence.as_deref().unwrap_or("-"),
                    "voice sample accepted"
                );
                VerificationOutcome::Accepted
            }
            Ok(response) => {
                debug!(email = %request.email, result = %response.result, "voice sample rejected");
                VerificationOutcome::Rejected {
                    reason: response.result,
                }
            }
            Err(e) => VerificationOutcome::Failed(e),
        }
    }
}
