// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Mapping of provider errors to webhook HTTP responses.
//!
//! external-dns only distinguishes success from failure, so every provider
//! error becomes a 5xx response and the orchestrator retries on its next cycle.
//! The reason string in the body makes the failure class visible in external-dns
//! logs without parsing the message.
//!
//! # Usage
//!
//! ```rust
//! use selectel_dns_webhook::dns_errors::ProviderError;
//! use selectel_dns_webhook::http_errors::map_provider_error;
//!
//! let (status, reason) = map_provider_error(&ProviderError::Cancelled);
//! assert_eq!(status.as_u16(), 503);
//! assert_eq!(reason, "ShuttingDown");
//! ```

use crate::dns_errors::ProviderError;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Keystone did not issue a token
pub const REASON_AUTH_FAILED: &str = "AuthFailed";

/// The Domains API failed or answered with something unexpected
pub const REASON_UPSTREAM_ERROR: &str = "UpstreamError";

/// A change could not be placed in a zone or matched to a record set
pub const REASON_RESOLUTION_FAILED: &str = "ResolutionFailed";

/// The webhook is shutting down and abandoned the request
pub const REASON_SHUTTING_DOWN: &str = "ShuttingDown";

/// A bug or misconfiguration inside the webhook
pub const REASON_INTERNAL_ERROR: &str = "InternalError";

/// The request body could not be parsed
pub const REASON_BAD_REQUEST: &str = "BadRequest";

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Failure class, one of the `REASON_*` constants
    pub reason: String,
}

/// Map a provider error to an HTTP status code and reason.
///
/// # Error Mapping
///
/// | Error | Status | Reason |
/// |-------|--------|--------|
/// | `Auth` | 500 | `AuthFailed` |
/// | `Transport`, `Api`, `Decode` | 500 | `UpstreamError` |
/// | `NoMatchingZone`, `RecordNotFound` | 500 | `ResolutionFailed` |
/// | `Cancelled` | 503 | `ShuttingDown` |
/// | `InvalidConfig`, `WorkerPanicked` | 500 | `InternalError` |
#[must_use]
pub fn map_provider_error(error: &ProviderError) -> (StatusCode, &'static str) {
    match error {
        ProviderError::Auth(_) => (StatusCode::INTERNAL_SERVER_ERROR, REASON_AUTH_FAILED),
        ProviderError::Transport { .. } | ProviderError::Api { .. } | ProviderError::Decode { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, REASON_UPSTREAM_ERROR)
        }
        ProviderError::NoMatchingZone { .. } | ProviderError::RecordNotFound { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, REASON_RESOLUTION_FAILED)
        }
        ProviderError::Cancelled => (StatusCode::SERVICE_UNAVAILABLE, REASON_SHUTTING_DOWN),
        ProviderError::InvalidConfig(_) | ProviderError::WorkerPanicked(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, REASON_INTERNAL_ERROR)
        }
    }
}

/// Build the response body for `error`.
#[must_use]
pub fn error_response(error: &ProviderError) -> (StatusCode, ErrorResponse) {
    let (status, reason) = map_provider_error(error);
    (
        status,
        ErrorResponse {
            error: error.to_string(),
            reason: reason.to_string(),
        },
    )
}
