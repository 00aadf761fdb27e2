// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone listing honouring the domain filter.

use crate::dns_errors::Result;
use crate::domains::{ListOptions, Zone, ZoneRecordClient};
use crate::endpoint::DomainFilter;
use crate::provider::pagination::list_all_paginated;
use tracing::{debug, info};

/// Fetches the zones the webhook is allowed to manage.
#[derive(Debug, Clone, Default)]
pub struct ZoneCatalog {
    domain_filter: DomainFilter,
}

impl ZoneCatalog {
    #[must_use]
    pub fn new(domain_filter: DomainFilter) -> Self {
        Self { domain_filter }
    }

    /// Fetch all zones in scope.
    ///
    /// With an empty domain filter every zone of the account is listed. Otherwise
    /// one paginated listing runs per filter entry, passed as the `filter` query
    /// parameter, and the results are concatenated in filter order. Zones
    /// matched by more than one filter appear more than once.
    ///
    /// # Errors
    ///
    /// Returns the first error of any page of any listing.
    pub async fn zones(&self, client: &dyn ZoneRecordClient) -> Result<Vec<Zone>> {
        if self.domain_filter.is_empty() {
            let zones = fetch_zones(client, ListOptions::new()).await?;
            info!(count = zones.len(), "Fetched zones");
            return Ok(zones);
        }

        let mut zones = Vec::new();
        for filter in self.domain_filter.filters() {
            let mut options = ListOptions::new();
            options.insert("filter".to_string(), filter.clone());

            let matched = fetch_zones(client, options).await?;
            debug!(filter = %filter, count = matched.len(), "Fetched zones for domain filter");
            zones.extend(matched);
        }

        info!(
            count = zones.len(),
            filters = self.domain_filter.filters().len(),
            "Fetched zones"
        );
        Ok(zones)
    }
}

async fn fetch_zones(client: &dyn ZoneRecordClient, options: ListOptions) -> Result<Vec<Zone>> {
    list_all_paginated(options, |options| async move { client.list_zones(&options).await }).await
}
