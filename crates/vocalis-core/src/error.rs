// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Vocalis verification pipeline.

use thiserror::Error;

/// The primary error type used across all Vocalis adapter traits and the pipeline.
///
/// Biometric denial and verifier transport failures are separate variants even
/// though the pipeline routes both to the same errored outcome.
#[derive(Debug, Error)]
pub enum VocalisError {
    /// Configuration errors (missing developer id, missing collaborators, invalid TOML).
    #[error("configuration error: {0}")]
    Config(String),

    /// The voice-sample payload could not be decoded into audio bytes.
    #[error("malformed audio payload: {message}")]
    MalformedAudio { message: String },

    /// The biometric service answered but refused the voice match.
    #[error("voice verification denied: {reason}")]
    VerificationDenied { reason: String },

    /// The biometric service could not be reached or answered with a failure.
    #[error("verifier error: {message}")]
    Verifier {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The application verify callback reported an error.
    #[error("application error: {message}")]
    Application {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl VocalisError {
    /// Builds a [`VocalisError::Verifier`] without an underlying source.
    pub fn verifier(message: impl Into<String>) -> Self {
        Self::Verifier {
            message: message.into(),
            source: None,
        }
    }

    /// Builds a [`VocalisError::Application`] without an underlying source.
    pub fn application(message: impl Into<String>) -> Self {
        Self::Application {
            message: message.into(),
            source: None,
        }
    }

    /// Short, stable label for the error category. Used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::MalformedAudio { .. } => "malformed_audio",
            Self::VerificationDenied { .. } => "verification_denied",
            Self::Verifier { .. } => "verifier",
            Self::Application { .. } => "application",
            Self::Timeout { .. } => "timeout",
            Self::Internal(_) => "internal",
        }
    }
}
