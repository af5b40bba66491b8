// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Vocalis.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level Vocalis configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VocalisConfig {
    /// Voice strategy settings (field names, biometric tuning, messages).
    #[serde(default)]
    pub strategy: StrategyConfig,

    /// VoiceIt biometric API client settings.
    #[serde(default)]
    pub voiceit: VoiceItConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Application accounts known to the built-in directory resolver.
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
}

/// Voice strategy configuration.
///
/// Shared read-only by every request once the strategy is built.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StrategyConfig {
    /// Developer id issued by the biometric service. Required.
    #[serde(default)]
    pub developer_id: Option<String>,

    /// Request field holding the email address.
    #[serde(default = "default_email_field")]
    pub email_field: String,

    /// Request field holding the password.
    #[serde(default = "default_password_field")]
    pub password_field: String,

    /// Request field holding the voice sample as a data URI.
    #[serde(default = "default_wav_field")]
    pub wav_field: String,

    /// Matching accuracy level (0..5), forwarded verbatim.
    #[serde(default)]
    pub accuracy: u8,

    /// Number of accuracy passes (1..10), forwarded verbatim.
    #[serde(default = "default_accuracy_passes")]
    pub accuracy_passes: u8,

    /// Accuracy increment between passes (1..5), forwarded verbatim.
    #[serde(default = "default_accuracy_pass_increment")]
    pub accuracy_pass_increment: u8,

    /// Minimum match confidence (85..100), forwarded verbatim.
    #[serde(default = "default_confidence")]
    pub confidence: u8,

    /// Message used when a request lacks one of the three credentials.
    #[serde(default = "default_bad_request_message")]
    pub bad_request_message: String,

    /// Upper bound on one biometric verification, in seconds. Unset means no bound.
    #[serde(default)]
    pub verifier_timeout_secs: Option<u64>,
}

impl StrategyConfig {
    /// Strategy config with the given developer id and defaults elsewhere.
    pub fn with_developer_id(developer_id: impl Into<String>) -> Self {
        Self {
            developer_id: Some(developer_id.into()),
            ..Self::default()
        }
    }

    /// The configured verifier bound as a [`Duration`].
    pub fn verifier_timeout(&self) -> Option<Duration> {
        self.verifier_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            developer_id: None,
            email_field: default_email_field(),
            password_field: default_password_field(),
            wav_field: default_wav_field(),
            accuracy: 0,
            accuracy_passes: default_accuracy_passes(),
            accuracy_pass_increment: default_accuracy_pass_increment(),
            confidence: default_confidence(),
            bad_request_message: default_bad_request_message(),
            verifier_timeout_secs: None,
        }
    }
}

fn default_email_field() -> String {
    "email".to_string()
}

fn default_password_field() -> String {
    "password".to_string()
}

fn default_wav_field() -> String {
    "wav".to_string()
}

fn default_accuracy_passes() -> u8 {
    5
}

fn default_accuracy_pass_increment() -> u8 {
    2
}

fn default_confidence() -> u8 {
    85
}

fn default_bad_request_message() -> String {
    "Missing credentials".to_string()
}

/// VoiceIt API client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VoiceItConfig {
    /// Base URL of the VoiceIt service.
    #[serde(default = "default_voiceit_base_url")]
    pub base_url: String,

    /// TCP connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for VoiceItConfig {
    fn default() -> Self {
        Self {
            base_url: default_voiceit_base_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

fn default_voiceit_base_url() -> String {
    "https://siv.voiceprintportal.com".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Name the voice strategy is registered under (`POST /v1/auth/{name}`).
    #[serde(default = "default_strategy_name")]
    pub strategy_name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            strategy_name: default_strategy_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_strategy_name() -> String {
    "voiceit".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// One account in the built-in directory.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AccountConfig {
    /// Email the account is looked up by.
    pub email: String,

    /// Application identifier returned on success.
    pub id: String,

    /// Optional display label.
    #[serde(default)]
    pub label: Option<String>,
}
