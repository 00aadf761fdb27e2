// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Conversion between external-dns endpoints and Domains API record sets.
//!
//! Endpoints arriving from external-dns are normalized before any zone lookup:
//!
//! - the record name gets a trailing dot
//! - a TTL of 0 becomes [`DEFAULT_RECORD_TTL_SECS`]
//! - targets of `CNAME`, `ALIAS`, `MX` and `SRV` records get a trailing dot
//!
//! Normalization is idempotent. The reverse direction fans every record of a
//! record set out into its own single-target endpoint.

use crate::constants::DEFAULT_RECORD_TTL_SECS;
use crate::domains::{RecordItem, RecordSet, RecordType};
use crate::endpoint::Endpoint;
use std::net::IpAddr;

/// Append a trailing dot to a host name.
///
/// IP addresses are returned unchanged; they are never fully-qualified names.
#[must_use]
pub fn ensure_trailing_dot(name: &str) -> String {
    if name.parse::<IpAddr>().is_ok() {
        return name.to_string();
    }
    format!("{}.", name.trim_end_matches('.'))
}

/// Normalize an endpoint received from external-dns.
///
/// Applying this twice yields the same endpoint as applying it once.
///
/// # Example
///
/// ```
/// use selectel_dns_webhook::endpoint::Endpoint;
/// use selectel_dns_webhook::provider::normalize::normalize;
///
/// let endpoint = normalize(Endpoint::new("www.test.com", "CNAME", 0, ["test.com"]));
/// assert_eq!(endpoint.dns_name, "www.test.com.");
/// assert_eq!(endpoint.record_ttl, 300);
/// assert_eq!(endpoint.targets, vec!["test.com."]);
/// ```
#[must_use]
pub fn normalize(mut endpoint: Endpoint) -> Endpoint {
    endpoint.dns_name = ensure_trailing_dot(&endpoint.dns_name);

    if endpoint.record_ttl == 0 {
        endpoint.record_ttl = DEFAULT_RECORD_TTL_SECS;
    }

    if RecordType::from(endpoint.record_type.as_str()).has_domain_targets() {
        for target in &mut endpoint.targets {
            *target = ensure_trailing_dot(target);
        }
    }

    endpoint
}

/// Build the wire record set for a normalized endpoint.
///
/// Each target becomes one enabled record. The id is left empty; updates and
/// deletes carry the record-set id in the URL instead.
#[must_use]
pub fn to_wire_rrset(endpoint: &Endpoint) -> RecordSet {
    RecordSet {
        id: String::new(),
        name: endpoint.dns_name.clone(),
        record_type: RecordType::from(endpoint.record_type.as_str()),
        ttl: endpoint.record_ttl,
        records: endpoint
            .targets
            .iter()
            .map(|target| RecordItem::new(target.as_str()))
            .collect(),
    }
}

/// Convert API record sets into endpoints for external-dns.
///
/// Record sets of unsupported types (`SOA`, `CAA`, ...) are dropped. Every record
/// of a supported record set becomes its own endpoint carrying the record set's
/// name, type and TTL.
#[must_use]
pub fn to_endpoints(rrsets: &[RecordSet]) -> Vec<Endpoint> {
    rrsets
        .iter()
        .filter(|rrset| rrset.record_type.is_supported())
        .flat_map(|rrset| {
            rrset.records.iter().map(move |record| {
                Endpoint::new(
                    rrset.name.as_str(),
                    rrset.record_type.as_str(),
                    rrset.ttl,
                    [record.content.as_str()],
                )
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod normalize_tests;
