// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns a strategy outcome into an HTTP response.

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use vocalis_core::traits::sink::OutcomeSink;
use vocalis_core::types::{AuthInfo, StatusHint};
use vocalis_core::VocalisError;

/// Response header carrying the gateway's request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Body of a 200 response.
#[derive(Debug, Serialize)]
pub struct AuthSuccessResponse<I> {
    pub identity: I,
    pub info: Option<AuthInfo>,
}

/// Body of a 400 or 401 response.
#[derive(Debug, Serialize)]
pub struct AuthFailureResponse {
    pub error: &'static str,
    pub info: Option<AuthInfo>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// HTTP sink for one request.
#[derive(Debug, Clone)]
pub struct HttpOutcomeSink {
    request_id: String,
}

impl HttpOutcomeSink {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }

    fn finish(&self, mut response: Response) -> Response {
        if let Ok(value) = HeaderValue::from_str(&self.request_id) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        response
    }
}

impl<I: Serialize> OutcomeSink<I> for HttpOutcomeSink {
    type Output = Response;

    fn success(self, identity: I, info: Option<AuthInfo>) -> Response {
        self.finish((StatusCode::OK, Json(AuthSuccessResponse { identity, info })).into_response())
    }

    fn fail(self, info: Option<AuthInfo>, status: Option<StatusHint>) -> Response {
        let (code, error) = match status {
            Some(StatusHint::BadRequest) => (StatusCode::BAD_REQUEST, "bad_request"),
            _ => (StatusCode::UNAUTHORIZED, "unauthorized"),
        };
        self.finish((code, Json(AuthFailureResponse { error, info })).into_response())
    }

    fn error(self, error: VocalisError) -> Response {
        tracing::error!(
            request_id = %self.request_id,
            kind = error.kind(),
            error = %error,
            "authentication errored"
        );
        self.finish(
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "internal error".to_string(),
                }),
            )
                .into_response(),
        )
    }
}
