// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Application verify callback.

use async_trait::async_trait;

use crate::error::VocalisError;
use crate::types::{Credentials, DecodedAudio, Resolution};

/// Resolves biometrically verified credentials to an application identity.
///
/// Only called after the biometric verifier accepted the voice sample.
#[async_trait]
pub trait IdentityResolver: Send + Sync + 'static {
    /// Application identity type.
    type Identity: Send + 'static;

    /// Looks up the identity for `credentials`.
    ///
    /// Returns `Ok(Resolution::NotFound { .. })` when no identity matches and
    /// `Err(_)` when the lookup itself failed.
    async fn resolve(
        &self,
        credentials: &Credentials,
        audio: &DecodedAudio,
    ) -> Result<Resolution<Self::Identity>, VocalisError>;
}
