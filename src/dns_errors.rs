// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for the Selectel DNS provider.
//!
//! Errors fall into three families:
//! - **Transport** - the Domains or identity API could not be reached, answered
//!   with a non-2xx status, or returned a body we could not decode
//! - **Resolution** - a change names a record that maps to no zone, or an
//!   update/delete targets a record set that does not exist
//! - **Authentication** - the Keystone token could not be obtained
//!
//! None of these are retried inside the provider. They bubble up to the
//! `Records`/`ApplyChanges` boundary and external-dns retries the whole
//! reconciliation cycle on its own schedule.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by the provider, the Domains API client and the token source.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The request could not be sent or the response body could not be read
    #[error("{method} {url} failed: {source}")]
    Transport {
        /// HTTP method of the failed request
        method: String,
        /// Full request URL
        url: String,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status code
    #[error("{method} {url} returned HTTP {status}: {message}")]
    Api {
        /// HTTP method of the failed request
        method: String,
        /// Full request URL
        url: String,
        /// Status code returned by the API
        status: StatusCode,
        /// Response body, as text
        message: String,
    },

    /// The response body was not the JSON we expected
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        /// Full request URL
        url: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Keystone did not issue a token
    #[error("authorization error during getting keystone token: {0}")]
    Auth(String),

    /// No zone name is contained in the record name
    #[error("no matching zone found for {name}")]
    NoMatchingZone {
        /// Record name that could not be placed in a zone
        name: String,
    },

    /// The zone matched but no record set has this name and type
    #[error("record not found on record sets: {name} ({record_type})")]
    RecordNotFound {
        /// Record name that was looked up
        name: String,
        /// Record type that was looked up
        record_type: String,
    },

    /// Configuration rejected at startup
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The operation was abandoned because its worker group was cancelled
    #[error("operation cancelled")]
    Cancelled,

    /// A worker task panicked or was aborted before reporting
    #[error("worker task failed: {0}")]
    WorkerPanicked(String),
}

impl ProviderError {
    /// Whether this is a zone or record-set resolution failure.
    #[must_use]
    pub fn is_resolution_error(&self) -> bool {
        matches!(self, Self::NoMatchingZone { .. } | Self::RecordNotFound { .. })
    }

    /// Whether this error came from talking to a remote API.
    #[must_use]
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Api { .. } | Self::Decode { .. }
        )
    }

    /// HTTP status code returned by the remote API, if any.
    #[must_use]
    pub fn api_status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the provider.
pub type Result<T, E = ProviderError> = std::result::Result<T, E>;
