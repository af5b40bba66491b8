// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outcome sink through which a strategy reports its terminal result.

use crate::error::VocalisError;
use crate::types::{AuthInfo, StatusHint};

/// Host-side receiver for the terminal result of one request.
///
/// Every method takes `self`, so a sink can be signalled once.
pub trait OutcomeSink<I> {
    /// What the host produces from the signal (an HTTP response, a log entry, ...).
    type Output;

    /// The request authenticated as `identity`.
    fn success(self, identity: I, info: Option<AuthInfo>) -> Self::Output;

    /// The request was refused.
    fn fail(self, info: Option<AuthInfo>, status: Option<StatusHint>) -> Self::Output;

    /// The request could not be evaluated.
    fn error(self, error: VocalisError) -> Self::Output;
}
