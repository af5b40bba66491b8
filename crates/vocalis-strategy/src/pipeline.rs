// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The voice verification pipeline.
//!
//! Extraction, audio decode, one biometric verification and at most one
//! application lookup, ending in exactly one [`RequestOutcome`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use vocalis_config::StrategyConfig;
use vocalis_core::traits::adapter::PluginAdapter;
use vocalis_core::traits::resolver::IdentityResolver;
use vocalis_core::traits::sink::OutcomeSink;
use vocalis_core::traits::strategy::AuthStrategy;
use vocalis_core::traits::verifier::BiometricVerifier;
use vocalis_core::types::{
    AdapterType, AuthInfo, Credentials, DecodedAudio, HealthStatus, RequestFields, RequestOptions,
    RequestOutcome, Resolution, StatusHint, VerificationOutcome, VerificationRequest,
};
use vocalis_core::VocalisError;

use crate::data_uri;
use crate::locator::{self, FieldNames};

/// Name a strategy registers under when none is given.
pub const DEFAULT_STRATEGY_NAME: &str = "voiceit";

/// Voice-biometric login strategy.
///
/// Holds the shared verifier client and the application's resolver; keeps no
/// per-request state.
pub struct VoiceStrategy<R: IdentityResolver> {
    name: String,
    developer_id: String,
    config: StrategyConfig,
    fields: FieldNames,
    verifier: Arc<dyn BiometricVerifier>,
    resolver: R,
}

impl<R: IdentityResolver> std::fmt::Debug for VoiceStrategy<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceStrategy")
            .field("name", &self.name)
            .field("developer_id", &self.developer_id)
            .field("fields", &self.fields)
            .field("verifier", &self.verifier.name())
            .finish_non_exhaustive()
    }
}

impl<R: IdentityResolver> VoiceStrategy<R> {
    pub fn builder() -> VoiceStrategyBuilder<R> {
        VoiceStrategyBuilder::default()
    }

    /// Build a strategy under the default name.
    pub fn new(
        config: StrategyConfig,
        verifier: Arc<dyn BiometricVerifier>,
        resolver: R,
    ) -> Result<Self, VocalisError> {
        Self::builder()
            .config(config)
            .verifier(verifier)
            .resolver(resolver)
            .build()
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Run the pipeline and report the outcome through `sink`.
    pub async fn handle<S>(
        &self,
        fields: &RequestFields,
        options: &RequestOptions,
        sink: S,
    ) -> S::Output
    where
        S: OutcomeSink<R::Identity>,
    {
        self.run(fields, options).await.dispatch(sink)
    }

    async fn run(
        &self,
        fields: &RequestFields,
        options: &RequestOptions,
    ) -> RequestOutcome<R::Identity> {
        let credentials = match locator::extract(fields, &self.fields) {
            Ok(credentials) => credentials,
            Err(missing) => {
                let missing: Vec<String> = missing.iter().map(ToString::to_string).collect();
                debug!(
                    strategy = %self.name,
                    missing = %missing.join(","),
                    "credentials incomplete"
                );
                let message = options
                    .bad_request_message
                    .clone()
                    .unwrap_or_else(|| self.config.bad_request_message.clone());
                return RequestOutcome::Rejected {
                    info: Some(AuthInfo::message(message)),
                    status: Some(StatusHint::BadRequest),
                };
            }
        };

        let audio = match data_uri::decode(&credentials.wav) {
            Ok(audio) => audio,
            Err(e) => {
                debug!(strategy = %self.name, email = %credentials.email, "undecodable voice sample");
                warn!(strategy = %self.name, error = %e, "voice sample rejected");
                return RequestOutcome::Errored(e);
            }
        };

        debug!(
            strategy = %self.name,
            email = %credentials.email,
            media_type = %audio.media_type,
            audio_bytes = audio.len(),
            "verifying voice sample"
        );

        if let Err(e) = self.verify_voice(&credentials, &audio).await {
            debug!(strategy = %self.name, email = %credentials.email, "voice not verified");
            warn!(
                strategy = %self.name,
                kind = e.kind(),
                error = %e,
                "biometric verification did not pass"
            );
            return RequestOutcome::Errored(e);
        }

        match self.resolver.resolve(&credentials, &audio).await {
            Ok(Resolution::Found { identity, info }) => {
                debug!(strategy = %self.name, email = %credentials.email, "identity found");
                info!(strategy = %self.name, "voice login authenticated");
                RequestOutcome::Authenticated { identity, info }
            }
            Ok(Resolution::NotFound { info }) => {
                debug!(strategy = %self.name, email = %credentials.email, "no identity found");
                info!(strategy = %self.name, "no identity for verified voice");
                RequestOutcome::Rejected { info, status: None }
            }
            Err(e) => {
                debug!(strategy = %self.name, email = %credentials.email, "identity lookup errored");
                warn!(strategy = %self.name, error = %e, "identity lookup failed");
                RequestOutcome::Errored(e)
            }
        }
    }

    /// One call to the verifier, bounded when a timeout is configured.
    async fn verify_voice(
        &self,
        credentials: &Credentials,
        audio: &DecodedAudio,
    ) -> Result<(), VocalisError> {
        let request = VerificationRequest {
            email: &credentials.email,
            password: &credentials.password,
            audio: audio.as_bytes(),
            developer_id: &self.developer_id,
            accuracy: self.config.accuracy,
            accuracy_passes: self.config.accuracy_passes,
            accuracy_pass_increment: self.config.accuracy_pass_increment,
            confidence: self.config.confidence,
        };

        let outcome = match self.config.verifier_timeout() {
            Some(limit) => tokio::time::timeout(limit, self.verifier.verify(&request))
                .await
                .map_err(|_| VocalisError::Timeout { duration: limit })?,
            None => self.verifier.verify(&request).await,
        };

        match outcome {
            VerificationOutcome::Accepted => Ok(()),
            VerificationOutcome::Rejected { reason } => {
                Err(VocalisError::VerificationDenied { reason })
            }
            VerificationOutcome::Failed(e) => Err(e),
        }
    }
}

#[async_trait]
impl<R: IdentityResolver> PluginAdapter for VoiceStrategy<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Strategy
    }

    async fn health_check(&self) -> Result<HealthStatus, VocalisError> {
        self.verifier.health_check().await
    }

    async fn shutdown(&self) -> Result<(), VocalisError> {
        debug!(strategy = %self.name, "voice strategy shutting down");
        Ok(())
    }
}

#[async_trait]
impl<R: IdentityResolver> AuthStrategy for VoiceStrategy<R> {
    type Identity = R::Identity;

    async fn authenticate(
        &self,
        fields: &RequestFields,
        options: &RequestOptions,
    ) -> RequestOutcome<R::Identity> {
        self.run(fields, options).await
    }
}

/// Builder for [`VoiceStrategy`].
pub struct VoiceStrategyBuilder<R> {
    name: Option<String>,
    config: Option<StrategyConfig>,
    verifier: Option<Arc<dyn BiometricVerifier>>,
    resolver: Option<R>,
}

impl<R> Default for VoiceStrategyBuilder<R> {
    fn default() -> Self {
        Self {
            name: None,
            config: None,
            verifier: None,
            resolver: None,
        }
    }
}

impl<R: IdentityResolver> VoiceStrategyBuilder<R> {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn config(mut self, config: StrategyConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn verifier(mut self, verifier: Arc<dyn BiometricVerifier>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    /// The application's verify callback.
    pub fn resolver(mut self, resolver: R) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Fails with [`VocalisError::Config`] when the developer id, verifier or
    /// resolver is missing, or the verifier timeout is zero.
    pub fn build(self) -> Result<VoiceStrategy<R>, VocalisError> {
        let config = self
            .config
            .ok_or_else(|| VocalisError::Config("voice strategy requires a configuration".into()))?;
        let developer_id = config
            .developer_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                VocalisError::Config("voice strategy requires strategy.developer_id".into())
            })?;
        if config.verifier_timeout_secs == Some(0) {
            return Err(VocalisError::Config(
                "strategy.verifier_timeout_secs must be at least 1".into(),
            ));
        }
        let verifier = self
            .verifier
            .ok_or_else(|| VocalisError::Config("voice strategy requires a verifier".into()))?;
        let resolver = self.resolver.ok_or_else(|| {
            VocalisError::Config("voice strategy requires a verify callback".into())
        })?;

        Ok(VoiceStrategy {
            name: self.name.unwrap_or_else(|| DEFAULT_STRATEGY_NAME.to_string()),
            developer_id,
            fields: FieldNames::from(&config),
            config,
            verifier,
            resolver,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use tracing_test::traced_test;
    use vocalis_test_utils::fixtures::{
        complete_request, request_fields, SAMPLE_EMAIL, SAMPLE_PASSWORD, SAMPLE_WAV_URI,
    };
    use vocalis_test_utils::{MockResolver, MockVerifier, RecordingSink, Signal};

    fn strategy(verifier: &MockVerifier, resolver: &MockResolver) -> VoiceStrategy<MockResolver> {
        VoiceStrategy::new(
            StrategyConfig::with_developer_id("D1"),
            Arc::new(verifier.clone()),
            resolver.clone(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn authenticates_when_voice_and_identity_match() {
        let verifier = MockVerifier::accepting();
        let resolver = MockResolver::found(json!({"id": 42}));
        let strategy = strategy(&verifier, &resolver);

        let outcome = strategy
            .authenticate(&complete_request(), &RequestOptions::default())
            .await;

        match outcome {
            RequestOutcome::Authenticated { identity, info } => {
                assert_eq!(identity, json!({"id": 42}));
                assert!(info.is_none());
            }
            other => panic!("expected Authenticated, got {other:?}"),
        }

        let calls = verifier.calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].email, SAMPLE_EMAIL);
        assert_eq!(calls[0].password, SAMPLE_PASSWORD);
        assert_eq!(calls[0].audio, vec![0, 0, 0]);
        assert_eq!(calls[0].developer_id, "D1");
        assert_eq!(
            (calls[0].accuracy, calls[0].accuracy_passes, calls[0].accuracy_pass_increment, calls[0].confidence),
            (0, 5, 2, 85)
        );

        let lookups = resolver.calls().await;
        assert_eq!(lookups.len(), 1);
        assert_eq!(lookups[0].email, SAMPLE_EMAIL);
        assert_eq!(lookups[0].password, SAMPLE_PASSWORD);
        assert_eq!(lookups[0].wav, SAMPLE_WAV_URI);
        assert_eq!(lookups[0].audio, vec![0, 0, 0]);
    }

    #[tokio::test]
    async fn missing_password_is_a_bad_request() {
        let verifier = MockVerifier::accepting();
        let resolver = MockResolver::found(json!({"id": 42}));
        let strategy = strategy(&verifier, &resolver);
        let fields = request_fields(&[("email", SAMPLE_EMAIL), ("wav", SAMPLE_WAV_URI)], &[]);

        let outcome = strategy
            .authenticate(&fields, &RequestOptions::default())
            .await;

        match outcome {
            RequestOutcome::Rejected { info, status } => {
                assert_eq!(info, Some(AuthInfo::message("Missing credentials")));
                assert_eq!(status, Some(StatusHint::BadRequest));
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
        assert_eq!(verifier.call_count().await, 0);
        assert_eq!(resolver.call_count().await, 0);
    }

    #[tokio::test]
    async fn per_request_message_overrides_configured_one() {
        let verifier = MockVerifier::accepting();
        let resolver = MockResolver::found(json!(1));
        let mut config = StrategyConfig::with_developer_id("D1");
        config.bad_request_message = "configured".into();
        let strategy = VoiceStrategy::new(config, Arc::new(verifier.clone()), resolver).unwrap();

        let fields = request_fields(&[], &[]);
        let outcome = strategy.authenticate(&fields, &RequestOptions::default()).await;
        assert!(matches!(
            outcome,
            RequestOutcome::Rejected { info: Some(ref i), .. } if i.message.as_deref() == Some("configured")
        ));

        let options = RequestOptions {
            bad_request_message: Some("Provide email, password and voice".into()),
        };
        let outcome = strategy.authenticate(&fields, &options).await;
        assert!(matches!(
            outcome,
            RequestOutcome::Rejected { info: Some(ref i), .. }
                if i.message.as_deref() == Some("Provide email, password and voice")
        ));
    }

    #[tokio::test]
    async fn credentials_may_come_from_query() {
        let verifier = MockVerifier::accepting();
        let resolver = MockResolver::found(json!("alice"));
        let strategy = strategy(&verifier, &resolver);
        let fields = request_fields(
            &[("email", SAMPLE_EMAIL)],
            &[("password", SAMPLE_PASSWORD), ("wav", SAMPLE_WAV_URI), ("email", "other@x.com")],
        );

        let outcome = strategy.authenticate(&fields, &RequestOptions::default()).await;
        assert!(outcome.is_authenticated());
        assert_eq!(verifier.calls().await[0].email, SAMPLE_EMAIL);
    }

    #[tokio::test]
    async fn undecodable_wav_errors_before_verification() {
        let verifier = MockVerifier::accepting();
        let resolver = MockResolver::found(json!(1));
        let strategy = strategy(&verifier, &resolver);
        let fields = request_fields(
            &[("email", SAMPLE_EMAIL), ("password", SAMPLE_PASSWORD), ("wav", "not a data uri")],
            &[],
        );

        let outcome = strategy.authenticate(&fields, &RequestOptions::default()).await;
        assert!(matches!(
            outcome,
            RequestOutcome::Errored(VocalisError::MalformedAudio { .. })
        ));
        assert_eq!(verifier.call_count().await, 0);
        assert_eq!(resolver.call_count().await, 0);
    }

    #[tokio::test]
    async fn verifier_rejection_is_an_error_and_skips_lookup() {
        let verifier = MockVerifier::rejecting("Authentication failed.");
        let resolver = MockResolver::found(json!(1));
        let strategy = strategy(&verifier, &resolver);

        let outcome = strategy
            .authenticate(&complete_request(), &RequestOptions::default())
            .await;

        match outcome {
            RequestOutcome::Errored(err @ VocalisError::VerificationDenied { .. }) => {
                assert!(err.to_string().contains("Authentication failed."));
            }
            other => panic!("expected VerificationDenied, got {other:?}"),
        }
        assert_eq!(verifier.call_count().await, 1);
        assert_eq!(resolver.call_count().await, 0);
    }

    #[tokio::test]
    async fn verifier_failure_is_an_error_and_skips_lookup() {
        let verifier = MockVerifier::failing("connection refused");
        let resolver = MockResolver::found(json!(1));
        let strategy = strategy(&verifier, &resolver);

        let outcome = strategy
            .authenticate(&complete_request(), &RequestOptions::default())
            .await;

        assert!(matches!(outcome, RequestOutcome::Errored(VocalisError::Verifier { .. })));
        assert_eq!(resolver.call_count().await, 0);
    }

    #[tokio::test]
    async fn unknown_identity_is_rejected_with_callback_info() {
        let verifier = MockVerifier::accepting();
        let resolver = MockResolver::not_found(Some(AuthInfo::message("Unknown account")));
        let strategy = strategy(&verifier, &resolver);

        let outcome = strategy
            .authenticate(&complete_request(), &RequestOptions::default())
            .await;

        match outcome {
            RequestOutcome::Rejected { info, status } => {
                assert_eq!(info, Some(AuthInfo::message("Unknown account")));
                assert_eq!(status, None);
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
        assert_eq!(resolver.call_count().await, 1);
    }

    #[tokio::test]
    async fn callback_error_is_propagated() {
        let verifier = MockVerifier::accepting();
        let resolver = MockResolver::failing("database offline");
        let strategy = strategy(&verifier, &resolver);

        let outcome = strategy
            .authenticate(&complete_request(), &RequestOptions::default())
            .await;

        match outcome {
            RequestOutcome::Errored(err) => {
                assert_eq!(err.kind(), "application");
                assert!(err.to_string().contains("database offline"));
            }
            other => panic!("expected Errored, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn callback_info_is_passed_through() {
        let verifier = MockVerifier::accepting();
        let resolver = MockResolver::found_with_info(json!({"id": 7}), AuthInfo::message("welcome back"));
        let strategy = strategy(&verifier, &resolver);

        let outcome = strategy
            .authenticate(&complete_request(), &RequestOptions::default())
            .await;
        assert!(matches!(
            outcome,
            RequestOutcome::Authenticated { info: Some(ref i), .. } if i.message.as_deref() == Some("welcome back")
        ));
    }

    #[tokio::test]
    async fn handle_signals_the_sink_exactly_once() {
        let verifier = MockVerifier::accepting();
        let resolver = MockResolver::found(json!({"id": 42}));
        let strategy = strategy(&verifier, &resolver);
        let sink = RecordingSink::new();

        strategy
            .handle(&complete_request(), &RequestOptions::default(), sink.clone())
            .await;

        assert_eq!(
            sink.signals(),
            vec![Signal::Success {
                identity: json!({"id": 42}),
                info: None
            }]
        );
    }

    #[tokio::test]
    async fn handle_reports_errors_through_the_sink() {
        let verifier = MockVerifier::rejecting("no match");
        let resolver = MockResolver::found(json!(1));
        let strategy = strategy(&verifier, &resolver);
        let sink = RecordingSink::new();

        strategy
            .handle(&complete_request(), &RequestOptions::default(), sink.clone())
            .await;

        let signals = sink.signals();
        assert_eq!(signals.len(), 1);
        assert!(matches!(&signals[0], Signal::Error { kind: "verification_denied", .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_verifier_times_out_when_bounded() {
        let verifier = MockVerifier::accepting().with_delay(Duration::from_secs(60));
        let resolver = MockResolver::found(json!(1));
        let mut config = StrategyConfig::with_developer_id("D1");
        config.verifier_timeout_secs = Some(5);
        let strategy = VoiceStrategy::new(config, Arc::new(verifier.clone()), resolver.clone()).unwrap();

        let outcome = strategy
            .authenticate(&complete_request(), &RequestOptions::default())
            .await;

        assert!(matches!(
            outcome,
            RequestOutcome::Errored(VocalisError::Timeout { duration }) if duration == Duration::from_secs(5)
        ));
        assert_eq!(verifier.call_count().await, 1);
        assert_eq!(resolver.call_count().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_verifier_is_awaited_without_a_bound() {
        let verifier = MockVerifier::accepting().with_delay(Duration::from_secs(600));
        let resolver = MockResolver::found(json!(1));
        let strategy = strategy(&verifier, &resolver);

        let outcome = strategy
            .authenticate(&complete_request(), &RequestOptions::default())
            .await;
        assert!(outcome.is_authenticated());
    }

    #[tokio::test]
    #[traced_test]
    async fn password_is_never_logged() {
        let verifier = MockVerifier::rejecting("no match");
        let resolver = MockResolver::found(json!(1));
        let strategy = strategy(&verifier, &resolver);
        let fields = request_fields(
            &[
                ("email", SAMPLE_EMAIL),
                ("password", "correct-horse-battery"),
                ("wav", SAMPLE_WAV_URI),
            ],
            &[],
        );

        strategy.authenticate(&fields, &RequestOptions::default()).await;

        assert!(logs_contain("biometric verification did not pass"));
        assert!(logs_contain(SAMPLE_EMAIL));
        assert!(!logs_contain("correct-horse-battery"));
        assert!(!logs_contain("AAAA"));
    }

    #[tokio::test]
    #[traced_test]
    async fn email_stays_below_info() {
        for verifier in [MockVerifier::accepting(), MockVerifier::rejecting("no match")] {
            let resolver = MockResolver::found(json!(1));
            strategy(&verifier, &resolver)
                .authenticate(&complete_request(), &RequestOptions::default())
                .await;
        }

        assert!(logs_contain("voice login authenticated"));
        logs_assert(|lines: &[&str]| {
            match lines
                .iter()
                .find(|l| (l.contains(" INFO ") || l.contains(" WARN ")) && l.contains(SAMPLE_EMAIL))
            {
                Some(line) => Err(format!("email logged above debug: {line}")),
                None => Ok(()),
            }
        });
    }

    #[test]
    fn build_requires_developer_id() {
        let err = VoiceStrategy::builder()
            .config(StrategyConfig::default())
            .verifier(Arc::new(MockVerifier::accepting()))
            .resolver(MockResolver::found(json!(1)))
            .build()
            .unwrap_err();
        assert!(matches!(err, VocalisError::Config(ref m) if m.contains("developer_id")));

        let err = VoiceStrategy::builder()
            .config(StrategyConfig::with_developer_id("  "))
            .verifier(Arc::new(MockVerifier::accepting()))
            .resolver(MockResolver::found(json!(1)))
            .build()
            .unwrap_err();
        assert!(matches!(err, VocalisError::Config(_)));
    }

    #[test]
    fn build_rejects_zero_verifier_timeout() {
        let mut config = StrategyConfig::with_developer_id("D1");
        config.verifier_timeout_secs = Some(0);
        let err = VoiceStrategy::new(config, Arc::new(MockVerifier::accepting()), MockResolver::found(json!(1)))
            .unwrap_err();
        assert!(matches!(err, VocalisError::Config(ref m) if m.contains("verifier_timeout_secs")));
    }

    #[tokio::test]
    async fn developer_id_is_forwarded_as_configured() {
        let verifier = MockVerifier::accepting();
        let resolver = MockResolver::found(json!(1));
        let strategy = VoiceStrategy::new(
            StrategyConfig::with_developer_id(" D1 "),
            Arc::new(verifier.clone()),
            resolver,
        )
        .unwrap();

        strategy
            .authenticate(&complete_request(), &RequestOptions::default())
            .await;

        let calls = verifier.calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].developer_id, " D1 ");
    }

    #[test]
    fn build_requires_verifier_and_resolver() {
        let err = VoiceStrategy::builder()
            .config(StrategyConfig::with_developer_id("D1"))
            .resolver(MockResolver::found(json!(1)))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("verifier"));

        let err = VoiceStrategy::<MockResolver>::builder()
            .config(StrategyConfig::with_developer_id("D1"))
            .verifier(Arc::new(MockVerifier::accepting()))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("verify callback"));

        let err = VoiceStrategy::<MockResolver>::builder().build().unwrap_err();
        assert!(err.to_string().contains("configuration"));
    }

    #[tokio::test]
    async fn adapter_metadata() {
        let strategy = VoiceStrategy::builder()
            .name("voice-login")
            .config(StrategyConfig::with_developer_id("D1"))
            .verifier(Arc::new(MockVerifier::accepting()))
            .resolver(MockResolver::found(json!(1)))
            .build()
            .unwrap();

        assert_eq!(strategy.name(), "voice-login");
        assert_eq!(strategy.adapter_type(), AdapterType::Strategy);
        assert_eq!(strategy.health_check().await.unwrap(), HealthStatus::Healthy);
        assert!(format!("{strategy:?}").contains("mock-verifier"));
    }
}
