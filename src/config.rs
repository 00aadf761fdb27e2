// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Provider configuration.
//!
//! Built once at startup from the command line and passed by value into
//! [`Provider::new`](crate::provider::Provider::new). Nothing in the provider
//! reads flags or environment variables directly.

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_WORKERS};
use crate::dns_errors::{ProviderError, Result};
use crate::endpoint::DomainFilter;
use crate::http_client::parse_base_url;

/// Immutable settings of the DNS provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Domains API base URL
    pub base_url: String,
    /// Resolve and log changes without sending them
    pub dry_run: bool,
    /// Number of concurrent workers talking to the Domains API
    pub workers: usize,
    /// Zones in scope; empty means all zones
    pub domain_filter: DomainFilter,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            dry_run: false,
            workers: DEFAULT_WORKERS,
            domain_filter: DomainFilter::default(),
        }
    }
}

impl ProviderConfig {
    /// Check the configuration before the provider is built.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InvalidConfig` if `workers` is zero or the base
    /// URL is not an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(ProviderError::InvalidConfig(
                "worker count must be at least 1".to_string(),
            ));
        }
        parse_base_url(&self.base_url)?;
        Ok(())
    }
}
