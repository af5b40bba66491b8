// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outcome sink that records the signals it receives.

use std::sync::{Arc, Mutex};

use vocalis_core::traits::sink::OutcomeSink;
use vocalis_core::types::{AuthInfo, StatusHint};
use vocalis_core::VocalisError;

/// One recorded sink signal.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal<I> {
    Success {
        identity: I,
        info: Option<AuthInfo>,
    },
    Fail {
        info: Option<AuthInfo>,
        status: Option<StatusHint>,
    },
    Error {
        kind: &'static str,
        message: String,
    },
}

/// A sink whose clones share one signal log.
///
/// Hand a clone to the strategy and inspect the original afterwards.
pub struct RecordingSink<I> {
    signals: Arc<Mutex<Vec<Signal<I>>>>,
}

impl<I> RecordingSink<I> {
    pub fn new() -> Self {
        Self {
            signals: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn push(&self, signal: Signal<I>) {
        self.signals
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(signal);
    }
}

impl<I: Clone> RecordingSink<I> {
    /// All signals received so far.
    pub fn signals(&self) -> Vec<Signal<I>> {
        self.signals
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl<I> Clone for RecordingSink<I> {
    fn clone(&self) -> Self {
        Self {
            signals: Arc::clone(&self.signals),
        }
    }
}

impl<I> Default for RecordingSink<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> OutcomeSink<I> for RecordingSink<I> {
    type Output = ();

    fn success(self, identity: I, info: Option<AuthInfo>) {
        self.push(Signal::Success { identity, info });
    }

    fn fail(self, info: Option<AuthInfo>, status: Option<StatusHint>) {
        self.push(Signal::Fail { info, status });
    }

    fn error(self, error: VocalisError) {
        self.push(Signal::Error {
            kind: error.kind(),
            message: error.to_string(),
        });
    }
}
