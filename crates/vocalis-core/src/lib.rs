// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Vocalis voice-biometric authentication.
//!
//! This crate provides the trait definitions, error type, and request/outcome
//! types shared by the verification pipeline, the biometric verifier clients,
//! and host integrations.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::VocalisError;
pub use types::{
    AdapterType, AuthInfo, Credentials, DecodedAudio, FieldMap, HealthStatus, RequestFields,
    RequestOptions, RequestOutcome, Resolution, StatusHint, VerificationOutcome,
    VerificationRequest,
};

pub use traits::{AuthStrategy, BiometricVerifier, IdentityResolver, OutcomeSink, PluginAdapter};

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[derive(Debug, PartialEq)]
    enum Signal {
        Success(u32, Option<AuthInfo>),
        Fail(Option<AuthInfo>, Option<StatusHint>),
        Error(String),
    }

    struct CapturingSink;

    impl OutcomeSink<u32> for CapturingSink {
        type Output = Signal;

        fn success(self, identity: u32, info: Option<AuthInfo>) -> Signal {
            Signal::Success(identity, info)
        }

        fn fail(self, info: Option<AuthInfo>, status: Option<StatusHint>) -> Signal {
            Signal::Fail(info, status)
        }

        fn error(self, error: VocalisError) -> Signal {
            Signal::Error(error.kind().to_string())
        }
    }

    #[test]
    fn vocalis_error_has_all_variants() {
        let _config = VocalisError::Config("test".into());
        let _audio = VocalisError::MalformedAudio {
            message: "test".into(),
        };
        let _denied = VocalisError::VerificationDenied {
            reason: "test".into(),
        };
        let _verifier = VocalisError::Verifier {
            message: "test".into(),
            source: Some(Box::new(std::io::Error::other("test"))),
        };
        let _app = VocalisError::application("test");
        let _timeout = VocalisError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
        let _internal = VocalisError::Internal("test".into());
    }

    #[test]
    fn error_messages_carry_details() {
        let err = VocalisError::VerificationDenied {
            reason: "Authentication failed.".into(),
        };
        assert_eq!(
            err.to_string(),
            "voice verification denied: Authentication failed."
        );
        assert_eq!(err.kind(), "verification_denied");

        let err = VocalisError::verifier("connection refused");
        assert_eq!(err.to_string(), "verifier error: connection refused");
        assert_eq!(err.kind(), "verifier");
    }

    #[test]
    fn verifier_error_exposes_source() {
        use std::error::Error as _;

        let err = VocalisError::Verifier {
            message: "io".into(),
            source: Some(Box::new(std::io::Error::other("socket closed"))),
        };
        let source = err.source().expect("source should be set");
        assert_eq!(source.to_string(), "socket closed");
    }

    #[test]
    fn adapter_type_round_trips_through_display() {
        use std::str::FromStr;

        for variant in [AdapterType::Verifier, AdapterType::Strategy] {
            let parsed = AdapterType::from_str(&variant.to_string()).expect("should parse back");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn dispatch_maps_each_outcome_to_one_signal() {
        let authenticated: RequestOutcome<u32> = RequestOutcome::Authenticated {
            identity: 42,
            info: None,
        };
        assert_eq!(
            authenticated.dispatch(CapturingSink),
            Signal::Success(42, None)
        );

        let rejected: RequestOutcome<u32> = RequestOutcome::Rejected {
            info: Some(AuthInfo::message("Missing credentials")),
            status: Some(StatusHint::BadRequest),
        };
        assert_eq!(
            rejected.dispatch(CapturingSink),
            Signal::Fail(
                Some(AuthInfo::message("Missing credentials")),
                Some(StatusHint::BadRequest)
            )
        );

        let errored: RequestOutcome<u32> =
            RequestOutcome::Errored(VocalisError::MalformedAudio {
                message: "bad".into(),
            });
        assert_eq!(
            errored.dispatch(CapturingSink),
            Signal::Error("malformed_audio".into())
        );
    }

    #[test]
    fn outcome_labels() {
        let outcome: RequestOutcome<()> = RequestOutcome::Rejected {
            info: None,
            status: None,
        };
        assert!(outcome.is_rejected());
        assert!(!outcome.is_authenticated());
        assert!(!outcome.is_errored());
        assert_eq!(outcome.label(), "rejected");
    }

    #[test]
    fn auth_info_flattens_details() {
        let mut info = AuthInfo::message("welcome");
        info.details
            .insert("scope".into(), serde_json::Value::String("admin".into()));

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"message": "welcome", "scope": "admin"})
        );

        let empty = serde_json::to_value(AuthInfo::default()).unwrap();
        assert_eq!(empty, serde_json::json!({}));
    }

    #[test]
    fn credentials_debug_redacts_secrets() {
        let creds = Credentials {
            email: "u@x.com".into(),
            password: SecretString::from("hunter2".to_string()),
            wav: "data:audio/wav;base64,AAAA".into(),
        };
        let debug = format!("{creds:?}");
        assert!(debug.contains("u@x.com"));
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("AAAA"));
        assert!(debug.contains("[redacted]"));
    }

    #[test]
    fn verification_request_debug_redacts_password() {
        let password = SecretString::from("hunter2".to_string());
        let audio = [0u8; 3];
        let request = VerificationRequest {
            email: "u@x.com",
            password: &password,
            audio: &audio,
            developer_id: "D1",
            accuracy: 0,
            accuracy_passes: 5,
            accuracy_pass_increment: 2,
            confidence: 85,
        };
        let debug = format!("{request:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("audio_bytes: 3"));
    }

    #[test]
    fn all_trait_modules_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_verifier<T: BiometricVerifier>() {}
        fn _assert_resolver<T: IdentityResolver>() {}
        fn _assert_strategy<T: AuthStrategy>() {}
        fn _assert_sink<T: OutcomeSink<u32>>() {}
    }
}
