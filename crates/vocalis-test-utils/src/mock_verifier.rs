// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock biometric verifier for deterministic testing.
//!
//! `MockVerifier` implements `BiometricVerifier` with scripted outcomes and
//! records every request it receives, so tests can assert on call counts and
//! forwarded values without a live biometric service.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use tokio::sync::Mutex;

use vocalis_core::traits::adapter::PluginAdapter;
use vocalis_core::traits::verifier::BiometricVerifier;
use vocalis_core::types::{AdapterType, HealthStatus, VerificationOutcome, VerificationRequest};
use vocalis_core::VocalisError;

/// One scripted verifier answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scripted {
    Accept,
    Reject(String),
    Fail(String),
}

impl Scripted {
    fn into_outcome(self) -> VerificationOutcome {
        match self {
            Self::Accept => VerificationOutcome::Accepted,
            Self::Reject(reason) => VerificationOutcome::Rejected { reason },
            Self::Fail(message) => VerificationOutcome::Failed(VocalisError::verifier(message)),
        }
    }
}

/// An owned copy of one `VerificationRequest`, secrets exposed for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedVerification {
    pub email: String,
    pub password: String,
    pub audio: Vec<u8>,
    pub developer_id: String,
    pub accuracy: u8,
    pub accuracy_passes: u8,
    pub accuracy_pass_increment: u8,
    pub confidence: u8,
}

/// A mock verifier that answers from a FIFO script.
///
/// When the script is exhausted every further call is accepted. Clones share
/// the script and the call log.
#[derive(Clone)]
pub struct MockVerifier {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    calls: Arc<Mutex<Vec<RecordedVerification>>>,
    delay: Option<Duration>,
}

impl MockVerifier {
    /// A verifier that accepts every sample.
    pub fn accepting() -> Self {
        Self::with_script(Vec::new())
    }

    /// A verifier whose first answer is a denial with `reason`.
    pub fn rejecting(reason: &str) -> Self {
        Self::with_script(vec![Scripted::Reject(reason.to_string())])
    }

    /// A verifier whose first answer is a transport-style failure.
    pub fn failing(message: &str) -> Self {
        Self::with_script(vec![Scripted::Fail(message.to_string())])
    }

    /// A verifier answering with `script` in order.
    pub fn with_script(script: Vec<Scripted>) -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::from(script))),
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// Sleep for `delay` before answering each call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of `verify` calls received so far.
    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    /// Every request received so far, oldest first.
    pub async fn calls(&self) -> Vec<RecordedVerification> {
        self.calls.lock().await.clone()
    }

    async fn next_answer(&self) -> Scripted {
        self.script
            .lock()
            .await
            .pop_front()
            .unwrap_or(Scripted::Accept)
    }
}

#[async_trait]
impl PluginAdapter for MockVerifier {
    fn name(&self) -> &str {
        "mock-verifier"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Verifier
    }

    async fn health_check(&self) -> Result<HealthStatus, VocalisError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), VocalisError> {
        Ok(())
    }
}

#[async_trait]
impl BiometricVerifier for MockVerifier {
    async fn verify(&self, request: &VerificationRequest<'_>) -> VerificationOutcome {
        self.calls.lock().await.push(RecordedVerification {
            email: request.email.to_string(),
            password: request.password.expose_secret().to_string(),
            audio: request.audio.to_vec(),
            developer_id: request.developer_id.to_string(),
            accuracy: request.accuracy,
            accuracy_passes: request.accuracy_passes,
            accuracy_pass_increment: request.accuracy_pass_increment,
            confidence: request.confidence,
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.next_answer().await.into_outcome()
    }
}
