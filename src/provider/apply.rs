// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Execution of a single record-set change.
//!
//! Every change is normalized, resolved to its zone (and, for updates and
//! deletes, to the existing record set) and then sent to the Domains API. In
//! dry-run mode the resolution still happens so misplaced records are reported,
//! but nothing is sent.

use crate::dns_errors::{ProviderError, Result};
use crate::domains::{Zone, ZoneRecordClient};
use crate::endpoint::Endpoint;
use crate::metrics;
use crate::provider::changes::{change_log_fields, ChangeAction, ChangeLogFields};
use crate::provider::matching::find_best_matching_zone;
use crate::provider::normalize::{normalize, to_wire_rrset};
use crate::provider::rrsets::RecordSetCatalog;
use std::future::Future;
use std::sync::Arc;
use tracing::{error, info, warn, Instrument};

/// Everything one phase of `apply_changes` shares between its workers.
pub(crate) struct ChangeContext {
    client: Arc<dyn ZoneRecordClient>,
    zones: Vec<Zone>,
    rrsets: RecordSetCatalog,
    dry_run: bool,
}

impl ChangeContext {
    pub(crate) fn new(
        client: Arc<dyn ZoneRecordClient>,
        zones: Vec<Zone>,
        rrsets: RecordSetCatalog,
        dry_run: bool,
    ) -> Self {
        Self {
            client,
            zones,
            rrsets,
            dry_run,
        }
    }

    /// Apply one change of `action` for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns resolution errors (`NoMatchingZone`, `RecordNotFound`) and any
    /// error reported by the Domains API.
    pub(crate) async fn apply(&self, action: ChangeAction, endpoint: Endpoint) -> Result<()> {
        let endpoint = normalize(endpoint);

        let result = match action {
            ChangeAction::Create => self.create(&endpoint).await,
            ChangeAction::Update => self.update(&endpoint).await,
            ChangeAction::Delete => self.delete(&endpoint).await,
        };

        if result.is_err() {
            metrics::record_rrset_operation(action.as_str(), "error");
        }
        result
    }

    async fn create(&self, endpoint: &Endpoint) -> Result<()> {
        let Some(zone) = find_best_matching_zone(&endpoint.dns_name, &self.zones) else {
            warn!(record = %endpoint.dns_name, "No matching zone found for record");
            return Err(ProviderError::NoMatchingZone {
                name: endpoint.dns_name.clone(),
            });
        };

        let fields = change_log_fields(endpoint, ChangeAction::Create, &zone.id);
        let rrset = to_wire_rrset(endpoint);
        self.execute(&fields, self.client.create_rrset(&zone.id, &rrset))
            .await
    }

    async fn update(&self, endpoint: &Endpoint) -> Result<()> {
        let (zone, existing) = self
            .rrsets
            .rrset_for_change(self.client.as_ref(), endpoint, &self.zones)
            .await?;

        let fields = change_log_fields(endpoint, ChangeAction::Update, &existing.id);
        let rrset = to_wire_rrset(endpoint);
        self.execute(
            &fields,
            self.client.update_rrset(&zone.id, &existing.id, &rrset),
        )
        .await
    }

    async fn delete(&self, endpoint: &Endpoint) -> Result<()> {
        let (zone, existing) = self
            .rrsets
            .rrset_for_change(self.client.as_ref(), endpoint, &self.zones)
            .await?;

        let fields = change_log_fields(endpoint, ChangeAction::Delete, &existing.id);
        self.execute(&fields, self.client.delete_rrset(&zone.id, &existing.id))
            .await
    }

    /// Send `call` unless in dry-run mode, logging inside the change's span.
    async fn execute<Fut>(&self, fields: &ChangeLogFields, call: Fut) -> Result<()>
    where
        Fut: Future<Output = Result<()>>,
    {
        let action = fields.action;

        async move {
            if self.dry_run {
                info!("Dry run, not sending {action} record set");
                metrics::record_rrset_operation(action.as_str(), "dry_run");
                return Ok(());
            }

            info!("{action} record set");
            match call.await {
                Ok(()) => {
                    info!("{action} record set successfully");
                    metrics::record_rrset_operation(action.as_str(), "success");
                    Ok(())
                }
                Err(e) => {
                    error!(error = %e, "Failed to {action} record set");
                    Err(e)
                }
            }
        }
        .instrument(fields.span())
        .await
    }
}
