// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP host for Vocalis authentication strategies.
//!
//! Strategies register by name in a [`StrategyRegistry`]; each
//! `POST /v1/auth/{strategy}` request builds its fields from the body and
//! query string, runs the strategy, and answers through an
//! [`HttpOutcomeSink`].

pub mod handlers;
pub mod registry;
pub mod server;
pub mod sink;

pub use handlers::BAD_REQUEST_MESSAGE_HEADER;
pub use registry::{SharedStrategy, StrategyRegistry};
pub use server::{router, start_server, GatewayState, ServerConfig};
pub use sink::{HttpOutcomeSink, REQUEST_ID_HEADER};
