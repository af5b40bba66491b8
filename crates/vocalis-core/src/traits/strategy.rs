// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication strategy trait registered with a host.

use async_trait::async_trait;

use crate::traits::adapter::PluginAdapter;
use crate::types::{RequestFields, RequestOptions, RequestOutcome};

/// A named authentication strategy a host can route requests to.
///
/// One call handles exactly one request and yields exactly one outcome.
/// Failures are carried inside the outcome, never returned separately.
#[async_trait]
pub trait AuthStrategy: PluginAdapter {
    /// Application identity produced on success.
    type Identity: Send + 'static;

    /// Runs the strategy against the request's field sources.
    async fn authenticate(
        &self,
        fields: &RequestFields,
        options: &RequestOptions,
    ) -> RequestOutcome<Self::Identity>;
}
