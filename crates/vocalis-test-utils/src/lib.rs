// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Vocalis integration tests.
//!
//! Provides mock collaborators and fixtures for fast, deterministic tests
//! without a live biometric service.
//!
//! # Components
//!
//! - [`MockVerifier`] - scripted biometric verifier with a call log
//! - [`MockResolver`] - verify callback with a fixed answer and a call log
//! - [`RecordingSink`] - outcome sink that records every signal
//! - [`fixtures`] - sample credentials and request builders

pub mod fixtures;
pub mod mock_resolver;
pub mod mock_verifier;
pub mod recording_sink;

pub use mock_resolver::{MockResolver, ResolverCall};
pub use mock_verifier::{MockVerifier, RecordedVerification, Scripted};
pub use recording_sink::{RecordingSink, Signal};
