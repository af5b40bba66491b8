// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vocalis serve` command implementation.
//!
//! Builds the VoiceIt verifier once, wraps it in a voice strategy backed by the
//! configured account directory, and serves it through the gateway until
//! Ctrl-C.

use std::sync::Arc;

use tracing::{info, warn};

use vocalis_config::VocalisConfig;
use vocalis_core::traits::BiometricVerifier;
use vocalis_core::VocalisError;
use vocalis_gateway::{start_server, GatewayState, ServerConfig, StrategyRegistry};
use vocalis_strategy::VoiceStrategy;
use vocalis_voiceit::VoiceItVerifier;

use crate::directory::{Account, AccountDirectory};

/// Runs the `vocalis serve` command.
pub async fn run_serve(config: VocalisConfig) -> Result<(), VocalisError> {
    init_tracing(&config.gateway.log_level);

    info!("starting vocalis serve");

    let registry = build_registry(&config)?;
    let server = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };

    start_server(&server, GatewayState::new(registry), shutdown_signal()).await
}

/// Build the strategy registry described by `config`.
pub fn build_registry(config: &VocalisConfig) -> Result<StrategyRegistry<Account>, VocalisError> {
    let verifier: Arc<dyn BiometricVerifier> = Arc::new(VoiceItVerifier::new(&config.voiceit)?);

    let directory = AccountDirectory::from_config(&config.accounts);
    if directory.is_empty() {
        warn!("no [[accounts]] configured; every verified voice will be rejected");
    } else {
        info!(accounts = directory.len(), "account directory loaded");
    }

    let strategy = VoiceStrategy::builder()
        .name(config.gateway.strategy_name.clone())
        .config(config.strategy.clone())
        .verifier(verifier)
        .resolver(directory)
        .build()?;

    let mut registry = StrategyRegistry::new();
    registry.register(Arc::new(strategy))?;
    Ok(registry)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C; serving until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Initialize the tracing subscriber. `RUST_LOG` overrides `log_level`.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vocalis={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
