// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Voice-biometric login strategy.
//!
//! Locates an email, password and `data:` URI voice sample in a request
//! (body before query), verifies the sample against a [`BiometricVerifier`],
//! and hands verified credentials to the application's
//! [`IdentityResolver`].
//!
//! [`BiometricVerifier`]: vocalis_core::traits::BiometricVerifier
//! [`IdentityResolver`]: vocalis_core::traits::IdentityResolver

pub mod data_uri;
pub mod locator;
pub mod pipeline;

pub use locator::{extract, locate, CredentialKind, FieldNames};
pub use pipeline::{VoiceStrategy, VoiceStrategyBuilder, DEFAULT_STRATEGY_NAME};
