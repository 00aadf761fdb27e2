// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Generic record model exchanged with external-dns.
//!
//! An [`Endpoint`] is what external-dns wants to exist: a name, a type, a list of
//! targets and a TTL. It carries no zone reference; the owning zone is derived by
//! longest-suffix matching every time a change is applied.
//!
//! [`Changes`] is the plan computed by external-dns for one reconciliation cycle
//! and [`DomainFilter`] narrows the zones this webhook manages.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A DNS record as external-dns sees it.
///
/// `record_ttl` of 0 means "unset"; the provider replaces it with the default TTL
/// before talking to the Domains API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Record name, not necessarily fully qualified
    pub dns_name: String,

    /// Record values (IP addresses, host names, text)
    #[serde(default, deserialize_with = "null_as_default")]
    pub targets: Vec<String>,

    /// Record type (`A`, `CNAME`, `TXT`, ...)
    #[serde(default)]
    pub record_type: String,

    /// Identifier used by routing policies; passed through untouched
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub set_identifier: String,

    /// TTL in seconds, 0 when unset
    #[serde(rename = "recordTTL", default, skip_serializing_if = "is_zero")]
    pub record_ttl: u32,

    /// Labels attached by external-dns (owner, resource)
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub labels: BTreeMap<String, String>,

    /// Provider-specific properties; unused by this provider
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub provider_specific: Vec<ProviderSpecificProperty>,
}

impl Endpoint {
    /// Create an endpoint with the given name, type, TTL and targets.
    pub fn new<I, S>(
        dns_name: impl Into<String>,
        record_type: impl Into<String>,
        ttl: u32,
        targets: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dns_name: dns_name.into(),
            targets: targets.into_iter().map(Into::into).collect(),
            record_type: record_type.into(),
            record_ttl: ttl,
            ..Self::default()
        }
    }
}

/// A name/value pair external-dns attaches for a specific provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSpecificProperty {
    pub name: String,
    pub value: String,
}

/// The change plan for one reconciliation cycle.
///
/// Only `update_new` is applied for updates; `update_old` describes the state
/// external-dns believes it is replacing and is accepted for wire compatibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changes {
    #[serde(rename = "Create", default, deserialize_with = "null_as_default")]
    pub create: Vec<Endpoint>,

    #[serde(rename = "UpdateOld", default, deserialize_with = "null_as_default")]
    pub update_old: Vec<Endpoint>,

    #[serde(rename = "UpdateNew", default, deserialize_with = "null_as_default")]
    pub update_new: Vec<Endpoint>,

    #[serde(rename = "Delete", default, deserialize_with = "null_as_default")]
    pub delete: Vec<Endpoint>,
}

impl Changes {
    /// Whether the plan contains nothing to create, update or delete.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.create.is_empty() && self.update_new.is_empty() && self.delete.is_empty()
    }
}

/// Zone-name suffixes this webhook is allowed to manage.
///
/// An empty filter means every zone visible to the account is in scope. Each
/// entry is sent to the Domains API as a `filter` query parameter; results of
/// overlapping entries are not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainFilter {
    #[serde(default)]
    filters: Vec<String>,
}

impl DomainFilter {
    /// Build a filter, trimming whitespace and dropping empty entries.
    pub fn new<I, S>(filters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            filters: filters
                .into_iter()
                .map(|f| f.as_ref().trim().to_string())
                .filter(|f| !f.is_empty())
                .collect(),
        }
    }

    #[must_use]
    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

/// Go encodes empty slices and maps as `null`; treat that as the default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(value: &u32) -> bool {
    *value == 0
}

#[cfg(test)]
#[path = "endpoint_tests.rs"]
mod endpoint_tests;
