// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Keystone token source.
//!
//! Every request to the Domains API is authorised with an `X-Auth-Token` header
//! holding a project-scoped Keystone token. The token is obtained by password
//! authentication of a service user against the OpenStack identity v3 API.
//!
//! A new token is requested for every `Records`/`ApplyChanges` call; tokens are
//! never cached or shared between calls.

use crate::constants::SUBJECT_TOKEN_HEADER;
use crate::dns_errors::{ProviderError, Result};
use crate::http_client::{default_http_client, parse_base_url};
use crate::metrics;
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::json;
use tracing::{debug, error, info};
use url::Url;

/// Source of bearer tokens for the Domains API.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Obtain a token valid for the configured project.
    async fn token(&self) -> Result<String>;
}

/// Service-user credentials for Keystone.
#[derive(Clone, Default)]
pub struct KeystoneCredentials {
    /// Identity API endpoint (`OS_AUTH_URL`)
    pub identity_endpoint: String,
    /// Account ID, used as the user domain name (`OS_PROJECT_DOMAIN_NAME`)
    pub account_id: String,
    /// Project the token is scoped to (`OS_PROJECT_ID`)
    pub project_id: String,
    /// Service user name (`OS_USERNAME`)
    pub username: String,
    /// Service user password (`OS_PASSWORD`)
    pub password: String,
}

impl std::fmt::Debug for KeystoneCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeystoneCredentials")
            .field("identity_endpoint", &self.identity_endpoint)
            .field("account_id", &self.account_id)
            .field("project_id", &self.project_id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// [`TokenSource`] backed by Keystone password authentication.
#[derive(Debug, Clone)]
pub struct KeystoneTokenSource {
    http: HttpClient,
    tokens_url: Url,
    credentials: KeystoneCredentials,
}

impl KeystoneTokenSource {
    /// Create a token source for the given credentials.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InvalidConfig` if the identity endpoint is not a
    /// valid http(s) URL.
    pub fn new(credentials: KeystoneCredentials) -> Result<Self> {
        Self::with_http_client(default_http_client()?, credentials)
    }

    /// Create a token source around an existing HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InvalidConfig` if the identity endpoint is not a
    /// valid http(s) URL.
    pub fn with_http_client(http: HttpClient, credentials: KeystoneCredentials) -> Result<Self> {
        let mut tokens_url = parse_base_url(&credentials.identity_endpoint)?;
        tokens_url
            .path_segments_mut()
            .map_err(|()| {
                ProviderError::InvalidConfig(format!(
                    "identity endpoint '{}' cannot carry a path",
                    credentials.identity_endpoint
                ))
            })?
            .pop_if_empty()
            .extend(["auth", "tokens"]);

        Ok(Self {
            http,
            tokens_url,
            credentials,
        })
    }

    /// Keystone v3 password authentication document, scoped to the project.
    fn auth_request(&self) -> serde_json::Value {
        json!({
            "auth": {
                "identity": {
                    "methods": ["password"],
                    "password": {
                        "user": {
                            "name": self.credentials.username,
                            "domain": {"name": self.credentials.account_id},
                            "password": self.credentials.password,
                        }
                    }
                },
                "scope": {
                    "project": {"id": self.credentials.project_id}
                }
            }
        })
    }

    async fn request_token(&self) -> Result<String> {
        debug!(url = %self.tokens_url, "connecting to identity endpoint");

        let response = self
            .http
            .post(self.tokens_url.clone())
            .json(&self.auth_request())
            .send()
            .await
            .map_err(|e| ProviderError::Auth(format!("failed to reach identity endpoint: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Auth(format!(
                "identity endpoint returned HTTP {status}: {body}"
            )));
        }

        response
            .headers()
            .get(SUBJECT_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                ProviderError::Auth(format!("response is missing the {SUBJECT_TOKEN_HEADER} header"))
            })
    }
}

#[async_trait]
impl TokenSource for KeystoneTokenSource {
    async fn token(&self) -> Result<String> {
        info!(
            identity_endpoint = %self.credentials.identity_endpoint,
            username = %self.credentials.username,
            account_id = %self.credentials.account_id,
            project_id = %self.credentials.project_id,
            "getting keystone token"
        );

        match self.request_token().await {
            Ok(token) => {
                metrics::record_token_fetch("success");
                Ok(token)
            }
            Err(e) => {
                error!(error = %e, "authorization error during getting keystone token");
                metrics::record_token_fetch("error");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[path = "keystone_tests.rs"]
mod keystone_tests;
