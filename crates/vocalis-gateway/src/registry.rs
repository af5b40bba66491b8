// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named authentication strategies served by the gateway.

use std::collections::HashMap;
use std::sync::Arc;

use vocalis_core::traits::adapter::PluginAdapter;
use vocalis_core::traits::strategy::AuthStrategy;
use vocalis_core::types::HealthStatus;
use vocalis_core::VocalisError;

/// A strategy shared between the registry and in-flight requests.
pub type SharedStrategy<I> = Arc<dyn AuthStrategy<Identity = I>>;

/// Strategies keyed by the name they registered under.
pub struct StrategyRegistry<I> {
    strategies: HashMap<String, SharedStrategy<I>>,
}

impl<I: Send + 'static> StrategyRegistry<I> {
    pub fn new() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Register `strategy` under its adapter name.
    ///
    /// A second strategy with the same name is rejected.
    pub fn register(&mut self, strategy: SharedStrategy<I>) -> Result<(), VocalisError> {
        let name = strategy.name().to_string();
        if self.strategies.contains_key(&name) {
            return Err(VocalisError::Config(format!(
                "strategy `{name}` is already registered"
            )));
        }
        tracing::debug!(strategy = %name, "strategy registered");
        self.strategies.insert(name, strategy);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<SharedStrategy<I>> {
        self.strategies.get(name).cloned()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.strategies.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Health of every registered strategy, sorted by name.
    pub async fn health(&self) -> Vec<(String, HealthStatus)> {
        let mut report = Vec::with_capacity(self.strategies.len());
        for name in self.names() {
            let Some(strategy) = self.strategies.get(name) else {
                continue;
            };
            let status = strategy
                .health_check()
                .await
                .unwrap_or_else(|e| HealthStatus::Unhealthy(e.to_string()));
            report.push((name.to_string(), status));
        }
        report
    }

    /// Shut down every registered strategy, logging failures.
    pub async fn shutdown(&self) {
        for (name, strategy) in &self.strategies {
            if let Err(e) = strategy.shutdown().await {
                tracing::warn!(strategy = %name, error = %e, "strategy shutdown failed");
            }
        }
    }
}

impl<I: Send + 'static> Default for StrategyRegistry<I> {
    fn default() -> Self {
        Self::new()
    }
}
