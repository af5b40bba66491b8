// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock application verify callback.

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::Value;
use tokio::sync::Mutex;

use vocalis_core::traits::resolver::IdentityResolver;
use vocalis_core::types::{AuthInfo, Credentials, DecodedAudio, Resolution};
use vocalis_core::VocalisError;

/// What the mock answers with on every call.
#[derive(Debug, Clone)]
enum Answer {
    Found(Value, Option<AuthInfo>),
    NotFound(Option<AuthInfo>),
    Error(String),
}

/// Arguments the mock was called with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverCall {
    pub email: String,
    pub password: String,
    pub wav: String,
    pub audio: Vec<u8>,
}

/// A verify callback with a fixed answer and a shared call log.
#[derive(Clone)]
pub struct MockResolver {
    answer: Answer,
    calls: Arc<Mutex<Vec<ResolverCall>>>,
}

impl MockResolver {
    fn with_answer(answer: Answer) -> Self {
        Self {
            answer,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Resolves every request to `identity` with no info.
    pub fn found(identity: Value) -> Self {
        Self::with_answer(Answer::Found(identity, None))
    }

    /// Resolves every request to `identity` with `info`.
    pub fn found_with_info(identity: Value, info: AuthInfo) -> Self {
        Self::with_answer(Answer::Found(identity, Some(info)))
    }

    /// Reports "no such identity" with `info`.
    pub fn not_found(info: Option<AuthInfo>) -> Self {
        Self::with_answer(Answer::NotFound(info))
    }

    /// Reports an application error.
    pub fn failing(message: &str) -> Self {
        Self::with_answer(Answer::Error(message.to_string()))
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    pub async fn calls(&self) -> Vec<ResolverCall> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl IdentityResolver for MockResolver {
    type Identity = Value;

    async fn resolve(
        &self,
        credentials: &Credentials,
        audio: &DecodedAudio,
    ) -> Result<Resolution<Value>, VocalisError> {
        self.calls.lock().await.push(ResolverCall {
            email: credentials.email.clone(),
            password: credentials.password.expose_secret().to_string(),
            wav: credentials.wav.clone(),
            audio: audio.bytes.clone(),
        });

        match &self.answer {
            Answer::Found(identity, info) => Ok(Resolution::Found {
                identity: identity.clone(),
                info: info.clone(),
            }),
            Answer::NotFound(info) => Ok(Resolution::NotFound { info: info.clone() }),
            Answer::Error(message) => Err(VocalisError::application(message.clone())),
        }
    }
}
