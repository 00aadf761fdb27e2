// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! external-dns webhook HTTP API.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Domain filter negotiation |
//! | GET | `/records` | All records of all zones in scope |
//! | POST | `/records` | Apply a change plan (204 on success) |
//! | POST | `/adjustendpoints` | Echo endpoints back unchanged |
//! | GET | `/healthz` | Liveness probe |
//! | GET | `/metrics` | Prometheus metrics |
//!
//! JSON responses use the external-dns webhook media type
//! ([`WEBHOOK_MEDIA_TYPE`]). Every request is counted and timed by
//! [`track_metrics`].

use crate::constants::WEBHOOK_MEDIA_TYPE;
use crate::dns_errors::ProviderError;
use crate::endpoint::{Changes, Endpoint};
use crate::http_errors::{error_response, ErrorResponse, REASON_BAD_REQUEST};
use crate::metrics;
use crate::provider::Provider;
use axum::{
    extract::{rejection::JsonRejection, MatchedPath, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, warn};

/// Content type of the Prometheus text exposition format
const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Shared state of all handlers.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<Provider>,
}

/// Build the webhook router around `provider`.
pub fn create_router(provider: Arc<Provider>) -> Router {
    Router::new()
        .route("/", get(negotiate))
        .route("/records", get(get_records).post(apply_changes))
        .route("/adjustendpoints", post(adjust_endpoints))
        .route("/healthz", get(health_check))
        .route("/metrics", get(get_metrics))
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(AppState { provider })
}

/// JSON body served with the external-dns webhook media type.
pub struct WebhookJson<T>(pub T);

impl<T: Serialize> IntoResponse for WebhookJson<T> {
    fn into_response(self) -> Response {
        (
            [(header::CONTENT_TYPE, WEBHOOK_MEDIA_TYPE)],
            Json(self.0),
        )
            .into_response()
    }
}

/// A provider error turned into an HTTP response.
pub struct ApiError(pub ProviderError);

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = error_response(&self.0);
        (status, Json(body)).into_response()
    }
}

fn bad_request(rejection: &JsonRejection) -> Response {
    warn!(error = %rejection, "Rejected malformed request body");
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: rejection.body_text(),
            reason: REASON_BAD_REQUEST.to_string(),
        }),
    )
        .into_response()
}

/// Domain filter as external-dns expects it during negotiation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainFilterResponse {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
}

async fn negotiate(State(state): State<AppState>) -> WebhookJson<DomainFilterResponse> {
    WebhookJson(DomainFilterResponse {
        include: state.provider.domain_filter().filters().to_vec(),
    })
}

async fn get_records(State(state): State<AppState>) -> Result<WebhookJson<Vec<Endpoint>>, ApiError> {
    match state.provider.records().await {
        Ok(endpoints) => Ok(WebhookJson(endpoints)),
        Err(e) => {
            error!(error = %e, "Failed to list records");
            Err(e.into())
        }
    }
}

async fn apply_changes(
    State(state): State<AppState>,
    body: Result<Json<Changes>, JsonRejection>,
) -> Response {
    let Json(changes) = match body {
        Ok(changes) => changes,
        Err(rejection) => return bad_request(&rejection),
    };

    match state.provider.apply_changes(&changes).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!(error = %e, "Failed to apply changes");
            ApiError(e).into_response()
        }
    }
}

async fn adjust_endpoints(body: Result<Json<Vec<Endpoint>>, JsonRejection>) -> Response {
    match body {
        Ok(Json(endpoints)) => {
            debug!(count = endpoints.len(), "Adjusting endpoints");
            WebhookJson(endpoints).into_response()
        }
        Err(rejection) => bad_request(&rejection),
    }
}

async fn health_check() -> &'static str {
    "ok"
}

async fn get_metrics() -> Response {
    match metrics::gather_metrics() {
        Ok(text) => ([(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], text).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Record the method, route, status and latency of every request.
pub async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path().to_string(), |p| p.as_str().to_string());

    let response = next.run(request).await;

    metrics::record_http_request(&method, &path, response.status().as_u16(), start.elapsed());
    response
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod api_tests;
