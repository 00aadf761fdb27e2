// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Wire types of the Selectel Domains v2 API.

use crate::constants::{DOMAIN_TARGET_RECORD_TYPES, SUPPORTED_RECORD_TYPES};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Extra query parameters for list calls (`filter`, `name`, ...).
///
/// Pagination keys (`limit`, `offset`) are owned by the pager and overwritten.
pub type ListOptions = BTreeMap<String, String>;

/// A DNS zone owned by the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Zone identifier used in record-set URLs
    pub id: String,
    /// Fully-qualified zone name, dot-terminated (e.g. `example.com.`)
    pub name: String,
}

/// DNS record type as reported by the Domains API.
///
/// Types the webhook knows about get their own variant; anything else is kept
/// verbatim in [`RecordType::Other`] so it survives a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Alias,
    Mx,
    Srv,
    Txt,
    Ns,
    Caa,
    Soa,
    Sshfp,
    Other(String),
}

impl RecordType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Alias => "ALIAS",
            Self::Mx => "MX",
            Self::Srv => "SRV",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Caa => "CAA",
            Self::Soa => "SOA",
            Self::Sshfp => "SSHFP",
            Self::Other(other) => other,
        }
    }

    /// Whether record values of this type are domain names.
    #[must_use]
    pub fn has_domain_targets(&self) -> bool {
        DOMAIN_TARGET_RECORD_TYPES.contains(&self.as_str())
    }

    /// Whether record sets of this type are reported to external-dns.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        SUPPORTED_RECORD_TYPES.contains(&self.as_str())
    }
}

impl From<&str> for RecordType {
    fn from(value: &str) -> Self {
        match value {
            "A" => Self::A,
            "AAAA" => Self::Aaaa,
            "CNAME" => Self::Cname,
            "ALIAS" => Self::Alias,
            "MX" => Self::Mx,
            "SRV" => Self::Srv,
            "TXT" => Self::Txt,
            "NS" => Self::Ns,
            "CAA" => Self::Caa,
            "SOA" => Self::Soa,
            "SSHFP" => Self::Sshfp,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for RecordType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<RecordType> for String {
    fn from(value: RecordType) -> Self {
        match value {
            RecordType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value inside a record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordItem {
    pub content: String,
    #[serde(default)]
    pub disabled: bool,
}

impl RecordItem {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            disabled: false,
        }
    }
}

/// A named, typed group of records sharing a TTL.
///
/// Lookup identity is `(name, record_type)`; mutation identity is `id`, which is
/// empty for a record set that has not been created yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    #[serde(default)]
    pub ttl: u32,
    #[serde(default)]
    pub records: Vec<RecordItem>,
}

/// One page of a list response.
///
/// `next_offset` of 0 (or absent) marks the last page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedList<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next_offset: u64,
    #[serde(default = "Vec::new")]
    pub result: Vec<T>,
}

impl<T> PagedList<T> {
    /// A page holding `items` and pointing at `next_offset`.
    pub fn new(items: Vec<T>, next_offset: u64) -> Self {
        Self {
            count: items.len() as u64,
            next_offset,
            result: items,
        }
    }

    /// A final page holding `items`.
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, 0)
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
