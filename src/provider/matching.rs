// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone and record-set lookup.
//!
//! Endpoints carry no zone reference. Every change is placed into a zone by
//! scanning the zone list for the longest zone name contained in the record
//! name, and updates/deletes then look up the record set by exact name and type.

use crate::domains::{RecordSet, Zone};
use crate::provider::normalize::ensure_trailing_dot;

/// Find the zone that owns `name`.
///
/// The record name is dot-terminated and compared against every zone name as a
/// non-anchored substring; the longest contained zone name wins. When several
/// zones share the winning length the first one in `zones` is returned.
///
/// # Arguments
///
/// * `name` - Record name, with or without a trailing dot
/// * `zones` - Candidate zones, names dot-terminated as the API reports them
///
/// # Returns
///
/// The owning zone, or `None` when no zone name is contained in `name`.
///
/// # Example
///
/// ```
/// use selectel_dns_webhook::domains::Zone;
/// use selectel_dns_webhook::provider::matching::find_best_matching_zone;
///
/// let zones = vec![
///     Zone { id: "1".into(), name: "foo.com.".into() },
///     Zone { id: "2".into(), name: "bar.com.".into() },
/// ];
/// let zone = find_best_matching_zone("www.foo.com", &zones).unwrap();
/// assert_eq!(zone.id, "1");
/// ```
#[must_use]
pub fn find_best_matching_zone<'a>(name: &str, zones: &'a [Zone]) -> Option<&'a Zone> {
    let name = ensure_trailing_dot(name);
    let mut best: Option<&'a Zone> = None;
    let mut best_len = 0;

    // An empty zone name is contained in every name and never matches.
    for zone in zones {
        if zone.name.len() > best_len && name.contains(zone.name.as_str()) {
            best_len = zone.name.len();
            best = Some(zone);
        }
    }

    best
}

/// Find the record set with exactly this name and type.
///
/// `name` must already be normalized; no dot or case folding happens here.
#[must_use]
pub fn find_rrset<'a>(name: &str, record_type: &str, rrsets: &'a [RecordSet]) -> Option<&'a RecordSet> {
    rrsets
        .iter()
        .find(|rrset| rrset.name == name && rrset.record_type.as_str() == record_type)
}

#[cfg(test)]
#[path = "matching_tests.rs"]
mod matching_tests;
