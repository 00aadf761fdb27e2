// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Selectel Domains v2 API client.
//!
//! The provider never talks HTTP directly. It goes through the
//! [`ZoneRecordClient`] capability, which exposes exactly the five operations the
//! reconciliation engine needs:
//!
//! - list zones (paged, optionally filtered)
//! - list record sets of a zone (paged, optionally narrowed by name)
//! - create, update and delete a record set
//!
//! A [`ClientFactory`] builds one authorised client per Keystone token. The
//! provider asks for a fresh client at the start of every `Records` /
//! `ApplyChanges` call.
//!
//! # Example
//!
//! ```rust,no_run
//! use selectel_dns_webhook::domains::{ClientFactory, HttpClientFactory, ListOptions};
//!
//! # async fn example() -> Result<(), selectel_dns_webhook::dns_errors::ProviderError> {
//! let factory = HttpClientFactory::new("https://api.selectel.ru/domains/v2")?;
//! let client = factory.client("keystone-token");
//!
//! let page = client.list_zones(&ListOptions::new()).await?;
//! println!("first page has {} zones", page.result.len());
//! # Ok(())
//! # }
//! ```

pub mod http;
pub mod types;

pub use http::{HttpClientFactory, HttpDomainsClient};
pub use types::{ListOptions, PagedList, RecordItem, RecordSet, RecordType, Zone};

use crate::dns_errors::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Operations against the zone/record-set API.
#[async_trait]
pub trait ZoneRecordClient: Send + Sync {
    /// `GET /zones` - one page of zones.
    async fn list_zones(&self, options: &ListOptions) -> Result<PagedList<Zone>>;

    /// `GET /zones/{zone_id}/rrset` - one page of record sets.
    async fn list_rrsets(&self, zone_id: &str, options: &ListOptions)
        -> Result<PagedList<RecordSet>>;

    /// `POST /zones/{zone_id}/rrset`
    async fn create_rrset(&self, zone_id: &str, rrset: &RecordSet) -> Result<()>;

    /// `PATCH /zones/{zone_id}/rrset/{rrset_id}`
    async fn update_rrset(&self, zone_id: &str, rrset_id: &str, rrset: &RecordSet) -> Result<()>;

    /// `DELETE /zones/{zone_id}/rrset/{rrset_id}`
    async fn delete_rrset(&self, zone_id: &str, rrset_id: &str) -> Result<()>;
}

/// Builds a [`ZoneRecordClient`] authorised with a Keystone token.
pub trait ClientFactory: Send + Sync {
    fn client(&self, token: &str) -> Arc<dyn ZoneRecordClient>;
}
