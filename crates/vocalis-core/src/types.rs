// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request-scoped value types shared by the pipeline, its collaborators, and hosts.

use std::collections::HashMap;
use std::fmt;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::VocalisError;
use crate::traits::sink::OutcomeSink;

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter behind a [`PluginAdapter`](crate::PluginAdapter).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Verifier,
    Strategy,
}

/// Named field values from one location of an inbound request.
pub type FieldMap = HashMap<String, String>;

/// The field sources a host exposes for one request.
///
/// The body is consulted before the query string.
#[derive(Debug, Clone, Default)]
pub struct RequestFields {
    /// Body parameters (form or JSON object).
    pub body: FieldMap,
    /// Query-string parameters.
    pub query: FieldMap,
}

impl RequestFields {
    pub fn new(body: FieldMap, query: FieldMap) -> Self {
        Self { body, query }
    }
}

/// Per-request overrides supplied by the host.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Replaces the configured bad-request message for this request only.
    pub bad_request_message: Option<String>,
}

/// The three credentials extracted from a request.
///
/// `wav` is the raw data-URI string as submitted.
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
    pub wav: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("wav", &format_args!("<{} chars>", self.wav.len()))
            .finish()
    }
}

/// Raw audio decoded from the submitted data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAudio {
    /// Media type declared by the data URI.
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl DecodedAudio {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Everything the biometric verifier receives for one verification.
///
/// Tuning values are forwarded exactly as configured.
pub struct VerificationRequest<'a> {
    pub email: &'a str,
    pub password: &'a SecretString,
    pub audio: &'a [u8],
    pub developer_id: &'a str,
    pub accuracy: u8,
    pub accuracy_passes: u8,
    pub accuracy_pass_increment: u8,
    pub confidence: u8,
}

impl fmt::Debug for VerificationRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationRequest")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("audio_bytes", &self.audio.len())
            .field("developer_id", &self.developer_id)
            .field("accuracy", &self.accuracy)
            .field("accuracy_passes", &self.accuracy_passes)
            .field("accuracy_pass_increment", &self.accuracy_pass_increment)
            .field("confidence", &self.confidence)
            .finish()
    }
}

/// Resolution of one biometric verification.
#[derive(Debug)]
pub enum VerificationOutcome {
    /// The voice sample matched the enrollment.
    Accepted,
    /// The service answered and refused the match.
    Rejected { reason: String },
    /// The service could not produce an answer.
    Failed(VocalisError),
}

/// Supplementary information attached to a success or a rejection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Application-defined extra fields.
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl AuthInfo {
    /// Info carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            details: serde_json::Map::new(),
        }
    }
}

/// Hint for how a host should classify a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[non_exhaustive]
pub enum StatusHint {
    /// Required credentials were missing from the request.
    BadRequest,
}

/// What the application verify callback reports for verified credentials.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<I> {
    Found { identity: I, info: Option<AuthInfo> },
    NotFound { info: Option<AuthInfo> },
}

/// The single terminal result of one pipeline run.
#[derive(Debug)]
pub enum RequestOutcome<I> {
    Authenticated {
        identity: I,
        info: Option<AuthInfo>,
    },
    Rejected {
        info: Option<AuthInfo>,
        status: Option<StatusHint>,
    },
    Errored(VocalisError),
}

impl<I> RequestOutcome<I> {
    /// Reports this outcome through exactly one sink signal.
    pub fn dispatch<S: OutcomeSink<I>>(self, sink: S) -> S::Output {
        match self {
            Self::Authenticated { identity, info } => sink.success(identity, info),
            Self::Rejected { info, status } => sink.fail(info, status),
            Self::Errored(err) => sink.error(err),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    pub fn is_errored(&self) -> bool {
        matches!(self, Self::Errored(_))
    }

    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Authenticated { .. } => "authenticated",
            Self::Rejected { .. } => "rejected",
            Self::Errored(_) => "errored",
        }
    }
}
