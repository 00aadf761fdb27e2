// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Record-set listing and lookup for updates and deletes.

use crate::dns_errors::{ProviderError, Result};
use crate::domains::{ListOptions, RecordSet, Zone, ZoneRecordClient};
use crate::endpoint::Endpoint;
use crate::provider::matching::{find_best_matching_zone, find_rrset};
use crate::provider::pagination::list_all_paginated;
use tracing::{debug, warn};

/// Fetches record sets of a zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordSetCatalog;

impl RecordSetCatalog {
    /// Fetch every record set of `zone_id`, following pagination.
    ///
    /// `options` may narrow the listing, e.g. `name` to a single record name.
    ///
    /// # Errors
    ///
    /// Returns the first error of any page.
    pub async fn fetch_records(
        &self,
        client: &dyn ZoneRecordClient,
        zone_id: &str,
        options: ListOptions,
    ) -> Result<Vec<RecordSet>> {
        let rrsets = list_all_paginated(options, |options| async move {
            client.list_rrsets(zone_id, &options).await
        })
        .await?;

        debug!(zone_id = %zone_id, count = rrsets.len(), "Fetched record sets");
        Ok(rrsets)
    }

    /// Resolve the zone and existing record set an update or delete targets.
    ///
    /// `endpoint` must already be normalized. The zone is chosen by
    /// [`find_best_matching_zone`]; its record sets are then listed narrowed to
    /// the endpoint's name and matched on exact name and type.
    ///
    /// # Errors
    ///
    /// - `ProviderError::NoMatchingZone` if no zone contains the record name
    /// - `ProviderError::RecordNotFound` if the zone has no such record set
    /// - any error from listing the record sets
    pub async fn rrset_for_change<'z>(
        &self,
        client: &dyn ZoneRecordClient,
        endpoint: &Endpoint,
        zones: &'z [Zone],
    ) -> Result<(&'z Zone, RecordSet)> {
        let Some(zone) = find_best_matching_zone(&endpoint.dns_name, zones) else {
            warn!(record = %endpoint.dns_name, "Record name contains no zone name");
            return Err(ProviderError::NoMatchingZone {
                name: endpoint.dns_name.clone(),
            });
        };

        let mut options = ListOptions::new();
        options.insert("name".to_string(), endpoint.dns_name.clone());
        let rrsets = self.fetch_records(client, &zone.id, options).await?;

        let Some(rrset) = find_rrset(&endpoint.dns_name, &endpoint.record_type, &rrsets) else {
            warn!(
                record = %endpoint.dns_name,
                record_type = %endpoint.record_type,
                zone_id = %zone.id,
                "Record set not found in zone"
            );
            return Err(ProviderError::RecordNotFound {
                name: endpoint.dns_name.clone(),
                record_type: endpoint.record_type.clone(),
            });
        };

        Ok((zone, rrset.clone()))
    }
}
