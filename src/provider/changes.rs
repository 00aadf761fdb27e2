// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Change actions and their log context.

use crate::endpoint::Endpoint;
use std::fmt;
use tracing::{info_span, Span};

/// What a change does to a record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeAction {
    Create,
    Update,
    Delete,
}

impl ChangeAction {
    /// Lowercase name used in logs and metric labels.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured fields logged for every record-set change.
///
/// `id` is the zone id for creates and the record-set id for updates and
/// deletes. `content` is the endpoint's targets joined with commas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeLogFields {
    pub record: String,
    pub content: String,
    pub record_type: String,
    pub action: ChangeAction,
    pub id: String,
}

/// Build the log fields for a change of `endpoint`.
#[must_use]
pub fn change_log_fields(endpoint: &Endpoint, action: ChangeAction, id: &str) -> ChangeLogFields {
    ChangeLogFields {
        record: endpoint.dns_name.clone(),
        content: endpoint.targets.join(","),
        record_type: endpoint.record_type.clone(),
        action,
        id: id.to_string(),
    }
}

impl ChangeLogFields {
    /// A span carrying these fields; events emitted inside it inherit them.
    #[must_use]
    pub fn span(&self) -> Span {
        info_span!(
            "rrset_change",
            record = %self.record,
            content = %self.content,
            record_type = %self.record_type,
            action = %self.action,
            id = %self.id,
        )
    }
}
