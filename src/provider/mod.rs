// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Reconciliation engine for the Selectel Domains v2 API.
//!
//! The [`Provider`] is what the webhook server drives. It exposes the two
//! operations external-dns needs:
//!
//! - [`Provider::records`] lists every record of every zone in scope
//! - [`Provider::apply_changes`] applies a change plan (creates, then updates,
//!   then deletes)
//!
//! Both operations start by obtaining a fresh Keystone token and building an
//! authorised Domains client from it. Work is spread over a bounded worker pool
//! (see [`workers`]); the first failure cancels the remaining work and is
//! returned to the caller. Nothing is retried here: external-dns calls again on
//! its next reconciliation cycle.
//!
//! # Example
//!
//! ```rust,no_run
//! use selectel_dns_webhook::config::ProviderConfig;
//! use selectel_dns_webhook::domains::HttpClientFactory;
//! use selectel_dns_webhook::keystone::{KeystoneCredentials, KeystoneTokenSource};
//! use selectel_dns_webhook::provider::Provider;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ProviderConfig::default();
//! let tokens = KeystoneTokenSource::new(KeystoneCredentials::default())?;
//! let clients = HttpClientFactory::new(&config.base_url)?;
//!
//! let provider = Provider::new(config, Arc::new(tokens), Arc::new(clients))?;
//! for endpoint in provider.records().await? {
//!     println!("{} {} {:?}", endpoint.dns_name, endpoint.record_type, endpoint.targets);
//! }
//! # Ok(())
//! # }
//! ```

mod apply;
pub mod changes;
pub mod matching;
pub mod normalize;
pub mod pagination;
pub mod rrsets;
pub mod workers;
pub mod zones;

use crate::config::ProviderConfig;
use crate::dns_errors::Result;
use crate::domains::{ClientFactory, ListOptions, ZoneRecordClient};
use crate::endpoint::{Changes, DomainFilter, Endpoint};
use crate::keystone::TokenSource;
use crate::metrics;
use apply::ChangeContext;
use changes::ChangeAction;
use normalize::to_endpoints;
use rrsets::RecordSetCatalog;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use workers::run_worker_pool;
use zones::ZoneCatalog;

/// DNS provider backed by the Selectel Domains v2 API.
pub struct Provider {
    config: ProviderConfig,
    token_source: Arc<dyn TokenSource>,
    clients: Arc<dyn ClientFactory>,
    zones: ZoneCatalog,
    rrsets: RecordSetCatalog,
    shutdown: CancellationToken,
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Provider {
    /// Create a provider.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated provider settings
    /// * `token_source` - Issues a token at the start of every call
    /// * `clients` - Builds an authorised Domains client from a token
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InvalidConfig` if `config` does not validate.
    pub fn new(
        config: ProviderConfig,
        token_source: Arc<dyn TokenSource>,
        clients: Arc<dyn ClientFactory>,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            zones: ZoneCatalog::new(config.domain_filter.clone()),
            rrsets: RecordSetCatalog,
            config,
            token_source,
            clients,
            shutdown: CancellationToken::new(),
        })
    }

    /// Tie in-flight work to `shutdown`; cancelling it aborts running calls.
    #[must_use]
    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Zones this provider manages, as advertised to external-dns.
    #[must_use]
    pub fn domain_filter(&self) -> &DomainFilter {
        &self.config.domain_filter
    }

    #[must_use]
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// List every supported record of every zone in scope.
    ///
    /// Zones are listed first, then the record sets of each zone are fetched
    /// concurrently. Each record becomes its own endpoint; unsupported record
    /// types are left out.
    ///
    /// # Errors
    ///
    /// Returns the token error, the zone-listing error or the first record-set
    /// listing error. No partial result is returned.
    pub async fn records(&self) -> Result<Vec<Endpoint>> {
        let client = self.authorized_client().await?;
        let zones = self.zones.zones(client.as_ref()).await?;
        let zone_ids: Vec<String> = zones.into_iter().map(|zone| zone.id).collect();

        let rrsets = self.rrsets;
        let per_zone = run_worker_pool(self.config.workers, zone_ids, &self.shutdown, move |zone_id| {
            let client = Arc::clone(&client);
            async move {
                let rrsets = rrsets
                    .fetch_records(client.as_ref(), &zone_id, ListOptions::new())
                    .await?;
                Ok(to_endpoints(&rrsets))
            }
        })
        .await?;

        let endpoints: Vec<Endpoint> = per_zone.into_iter().flatten().collect();
        metrics::record_endpoints_listed(endpoints.len());
        info!(count = endpoints.len(), "Listed endpoints");
        Ok(endpoints)
    }

    /// Apply a change plan.
    ///
    /// Creates run first, then updates (`update_new`), then deletes. Each
    /// non-empty phase lists the zones in scope again and applies its changes on
    /// the worker pool. An empty phase makes no API calls. The first error stops
    /// the current phase and skips the remaining phases.
    ///
    /// # Errors
    ///
    /// Returns the token error or the first error of any phase.
    pub async fn apply_changes(&self, changes: &Changes) -> Result<()> {
        let client = self.authorized_client().await?;

        debug!(
            create = changes.create.len(),
            update = changes.update_new.len(),
            delete = changes.delete.len(),
            dry_run = self.config.dry_run,
            "Applying changes"
        );

        self.apply_phase(&client, ChangeAction::Create, &changes.create)
            .await?;
        self.apply_phase(&client, ChangeAction::Update, &changes.update_new)
            .await?;
        self.apply_phase(&client, ChangeAction::Delete, &changes.delete)
            .await?;

        Ok(())
    }

    async fn apply_phase(
        &self,
        client: &Arc<dyn ZoneRecordClient>,
        action: ChangeAction,
        endpoints: &[Endpoint],
    ) -> Result<()> {
        if endpoints.is_empty() {
            return Ok(());
        }

        let zones = self.zones.zones(client.as_ref()).await?;
        let context = Arc::new(ChangeContext::new(
            Arc::clone(client),
            zones,
            self.rrsets,
            self.config.dry_run,
        ));

        run_worker_pool(
            self.config.workers,
            endpoints.to_vec(),
            &self.shutdown,
            move |endpoint| {
                let context = Arc::clone(&context);
                async move { context.apply(action, endpoint).await }
            },
        )
        .await?;

        info!(action = %action, count = endpoints.len(), "Applied changes");
        Ok(())
    }

    /// Fetch a token and build a Domains client authorised with it.
    async fn authorized_client(&self) -> Result<Arc<dyn ZoneRecordClient>> {
        let token = self.token_source.token().await?;
        Ok(self.clients.client(&token))
    }
}

#[cfg(test)]
pub(crate) mod test_support;
