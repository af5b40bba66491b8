// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Biometric verifier trait for the external voice-matching service.

use async_trait::async_trait;

use crate::traits::adapter::PluginAdapter;
use crate::types::{VerificationOutcome, VerificationRequest};

/// Adapter for an external voice-biometric verification service.
///
/// One instance is built at startup and shared by every request.
#[async_trait]
pub trait BiometricVerifier: PluginAdapter {
    /// Scores the submitted voice sample against the enrollment for `request.email`.
    async fn verify(&self, request: &VerificationRequest<'_>) -> VerificationOutcome;
}
