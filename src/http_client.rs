// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Shared outbound HTTP client configuration.
//!
//! Both the Keystone token source and the Domains API client use a client built
//! here, so timeouts, connection pooling and the User-Agent are identical for
//! every request the webhook makes.

use crate::constants::{
    HTTP_CONNECT_TIMEOUT_SECS, HTTP_POOL_IDLE_TIMEOUT_SECS, HTTP_POOL_MAX_IDLE_PER_HOST,
    HTTP_REQUEST_TIMEOUT_SECS, HTTP_TCP_KEEPALIVE_SECS, USER_AGENT,
};
use crate::dns_errors::{ProviderError, Result};
use reqwest::Client as HttpClient;
use std::time::Duration;
use url::Url;

/// Build the default HTTP client.
///
/// # Errors
///
/// Returns `ProviderError::InvalidConfig` if the TLS backend cannot be initialised.
pub fn default_http_client() -> Result<HttpClient> {
    HttpClient::builder()
        .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
        .tcp_keepalive(Duration::from_secs(HTTP_TCP_KEEPALIVE_SECS))
        .pool_idle_timeout(Duration::from_secs(HTTP_POOL_IDLE_TIMEOUT_SECS))
        .pool_max_idle_per_host(HTTP_POOL_MAX_IDLE_PER_HOST)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ProviderError::InvalidConfig(format!("failed to build HTTP client: {e}")))
}

/// Parse an API base URL, accepting only absolute `http`/`https` URLs.
///
/// A trailing slash is dropped so that path segments can be appended safely.
///
/// # Errors
///
/// Returns `ProviderError::InvalidConfig` if the URL does not parse or uses
/// another scheme.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed)
        .map_err(|e| ProviderError::InvalidConfig(format!("invalid URL '{raw}': {e}")))?;

    match url.scheme() {
        "http" | "https" if !url.cannot_be_a_base() => Ok(url),
        scheme => Err(ProviderError::InvalidConfig(format!(
            "URL '{raw}' must use http or https, got '{scheme}'"
        ))),
    }
}
