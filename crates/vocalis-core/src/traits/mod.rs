// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! Adapters extend the [`PluginAdapter`] base trait and use `#[async_trait]`
//! for dynamic dispatch compatibility.

pub mod adapter;
pub mod resolver;
pub mod sink;
pub mod strategy;
pub mod verifier;

pub use adapter::PluginAdapter;
pub use resolver::IdentityResolver;
pub use sink::OutcomeSink;
pub use strategy::AuthStrategy;
pub use verifier::BiometricVerifier;
