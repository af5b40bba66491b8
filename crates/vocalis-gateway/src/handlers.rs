// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway.
//!
//! Handles GET /health and POST /v1/auth/{strategy}.

use std::collections::{BTreeMap, HashMap};

use axum::{
    body::Bytes,
    extract::{FromRequest, Path, Query, Request, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::Serialize;
use tracing::Instrument;

use vocalis_core::types::{FieldMap, HealthStatus, RequestFields, RequestOptions};

use crate::server::GatewayState;
use crate::sink::{ErrorResponse, HttpOutcomeSink, REQUEST_ID_HEADER};

/// Request header overriding the bad-request message for one request.
pub const BAD_REQUEST_MESSAGE_HEADER: &str = "x-bad-request-message";

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok" when every strategy is healthy, otherwise "degraded".
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub strategies: BTreeMap<String, String>,
}

/// GET /health
pub async fn get_health<I: Send + 'static>(State(state): State<GatewayState<I>>) -> Response {
    let report = state.registry.health().await;
    let all_healthy = report
        .iter()
        .all(|(_, status)| *status == HealthStatus::Healthy);

    let strategies = report
        .into_iter()
        .map(|(name, status)| (name, describe(&status)))
        .collect();

    let body = HealthResponse {
        status: if all_healthy { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.started.elapsed().as_secs(),
        strategies,
    };
    let code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(body)).into_response()
}

/// POST /v1/auth/{strategy}
///
/// Reads credentials from a JSON object or form body plus the query string and
/// runs the named strategy.
pub async fn post_authenticate<I>(
    State(state): State<GatewayState<I>>,
    Path(name): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    request: Request,
) -> Response
where
    I: Serialize + Send + 'static,
{
    let request_id = uuid::Uuid::new_v4().to_string();
    let span = tracing::info_span!("auth_request", %request_id, strategy = %name);

    async move {
        let Some(strategy) = state.registry.get(&name) else {
            tracing::debug!("unknown strategy");
            return error_response(
                StatusCode::NOT_FOUND,
                &request_id,
                format!("unknown strategy: {name}"),
            );
        };

        let options = request_options(request.headers());
        let body = match read_body(request).await {
            Ok(body) => body,
            Err(message) => {
                tracing::debug!(error = %message, "unreadable request body");
                return error_response(StatusCode::BAD_REQUEST, &request_id, message);
            }
        };

        let fields = RequestFields::new(body, query);
        let outcome = strategy.authenticate(&fields, &options).await;
        tracing::info!(outcome = outcome.label(), "authentication finished");
        outcome.dispatch(HttpOutcomeSink::new(request_id.clone()))
    }
    .instrument(span)
    .await
}

fn request_options(headers: &HeaderMap) -> RequestOptions {
    RequestOptions {
        bad_request_message: headers
            .get(BAD_REQUEST_MESSAGE_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string),
    }
}

/// Parse the body into string fields according to its content type.
///
/// A missing or empty body yields no fields. JSON bodies must be objects;
/// their non-string values are skipped.
async fn read_body(request: Request) -> Result<FieldMap, String> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();

    if content_type.starts_with("application/json") {
        let bytes = Bytes::from_request(request, &())
            .await
            .map_err(|rejection| rejection.body_text())?;
        if bytes.trim_ascii().is_empty() {
            return Ok(FieldMap::new());
        }
        let value: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| format!("failed to parse JSON body: {e}"))?;
        return match value {
            serde_json::Value::Object(map) => Ok(map
                .into_iter()
                .filter_map(|(key, value)| match value {
                    serde_json::Value::String(s) => Some((key, s)),
                    _ => None,
                })
                .collect()),
            _ => Err("JSON body must be an object".to_string()),
        };
    }

    if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(fields) = Form::<FieldMap>::from_request(request, &())
            .await
            .map_err(|rejection| rejection.body_text())?;
        return Ok(fields);
    }

    Ok(FieldMap::new())
}

fn describe(status: &HealthStatus) -> String {
    match status {
        HealthStatus::Healthy => "healthy".to_string(),
        HealthStatus::Degraded(reason) => format!("degraded: {reason}"),
        HealthStatus::Unhealthy(reason) => format!("unhealthy: {reason}"),
    }
}

fn error_response(code: StatusCode, request_id: &str, error: String) -> Response {
    let mut response = (code, Json(ErrorResponse { error })).into_response();
    if let Ok(value) = request_id.parse() {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
