// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! HTTP implementation of [`ZoneRecordClient`] for the Selectel Domains v2 API.
//!
//! Requests are sent once. A failed call is reported to the caller as-is and the
//! next reconciliation cycle is the retry.

use super::types::{ListOptions, PagedList, RecordSet, Zone};
use super::{ClientFactory, ZoneRecordClient};
use crate::constants::AUTH_TOKEN_HEADER;
use crate::dns_errors::{ProviderError, Result};
use crate::http_client::{default_http_client, parse_base_url};
use async_trait::async_trait;
use reqwest::{Client as HttpClient, Method};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, error};
use url::Url;

/// Builds [`HttpDomainsClient`]s that share one connection pool.
#[derive(Clone, Debug)]
pub struct HttpClientFactory {
    http: HttpClient,
    base_url: Url,
}

impl HttpClientFactory {
    /// Create a factory for the API at `base_url` with the default HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InvalidConfig` if `base_url` is not an absolute
    /// http(s) URL or the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self::with_http_client(default_http_client()?, parse_base_url(base_url)?))
    }

    /// Create a factory around an existing HTTP client.
    #[must_use]
    pub fn with_http_client(http: HttpClient, base_url: Url) -> Self {
        Self { http, base_url }
    }
}

impl ClientFactory for HttpClientFactory {
    fn client(&self, token: &str) -> Arc<dyn ZoneRecordClient> {
        Arc::new(HttpDomainsClient {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: token.to_string(),
        })
    }
}

/// Domains API client authorised with one Keystone token.
#[derive(Clone)]
pub struct HttpDomainsClient {
    http: HttpClient,
    base_url: Url,
    token: String,
}

impl std::fmt::Debug for HttpDomainsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDomainsClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl HttpDomainsClient {
    /// Build `{base}/{segments...}?{query}`. Segments are percent-encoded.
    fn url(&self, segments: &[&str], query: Option<&ListOptions>) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ProviderError::InvalidConfig(format!(
                    "base URL '{}' cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);

        if let Some(options) = query {
            if !options.is_empty() {
                url.query_pairs_mut().extend_pairs(options.iter());
            }
        }

        Ok(url)
    }

    /// Send one request and return the response body.
    ///
    /// # Errors
    ///
    /// - `ProviderError::Transport` if the request cannot be sent or the body read
    /// - `ProviderError::Api` on a non-2xx status
    async fn request(&self, method: Method, url: Url, body: Option<&RecordSet>) -> Result<String> {
        debug!(method = %method, url = %url, body = ?body, "HTTP request to Domains API");

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(AUTH_TOKEN_HEADER, &self.token);
        if let Some(body_data) = body {
            request = request.json(body_data);
        }

        let response = request.send().await.map_err(|source| ProviderError::Transport {
            method: method.to_string(),
            url: url.to_string(),
            source,
        })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(
                method = %method,
                url = %url,
                status = %status,
                error = %error_text,
                "Domains API request failed"
            );
            return Err(ProviderError::Api {
                method: method.to_string(),
                url: url.to_string(),
                status,
                message: error_text,
            });
        }

        let text = response.text().await.map_err(|source| ProviderError::Transport {
            method: method.to_string(),
            url: url.to_string(),
            source,
        })?;

        debug!(
            method = %method,
            url = %url,
            status = %status,
            response_len = text.len(),
            "Domains API request successful"
        );

        Ok(text)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let text = self.request(Method::GET, url.clone(), None).await?;
        serde_json::from_str(&text).map_err(|source| ProviderError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl ZoneRecordClient for HttpDomainsClient {
    async fn list_zones(&self, options: &ListOptions) -> Result<PagedList<Zone>> {
        let url = self.url(&["zones"], Some(options))?;
        self.get_json(url).await
    }

    async fn list_rrsets(
        &self,
        zone_id: &str,
        options: &ListOptions,
    ) -> Result<PagedList<RecordSet>> {
        let url = self.url(&["zones", zone_id, "rrset"], Some(options))?;
        self.get_json(url).await
    }

    async fn create_rrset(&self, zone_id: &str, rrset: &RecordSet) -> Result<()> {
        let url = self.url(&["zones", zone_id, "rrset"], None)?;
        self.request(Method::POST, url, Some(rrset)).await?;
        Ok(())
    }

    async fn update_rrset(&self, zone_id: &str, rrset_id: &str, rrset: &RecordSet) -> Result<()> {
        let url = self.url(&["zones", zone_id, "rrset", rrset_id], None)?;
        self.request(Method::PATCH, url, Some(rrset)).await?;
        Ok(())
    }

    async fn delete_rrset(&self, zone_id: &str, rrset_id: &str) -> Result<()> {
        let url = self.url(&["zones", zone_id, "rrset", rrset_id], None)?;
        self.request(Method::DELETE, url, None).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod http_tests;
