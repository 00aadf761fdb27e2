// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! In-memory Domains API and token source for provider tests.

use crate::config::ProviderConfig;
use crate::dns_errors::{ProviderError, Result};
use crate::domains::{
    ClientFactory, ListOptions, PagedList, RecordItem, RecordSet, RecordType, Zone,
    ZoneRecordClient,
};
use crate::keystone::TokenSource;
use crate::provider::Provider;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// One call received by [`MockDomains`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    ListZones(ListOptions),
    ListRrsets {
        zone_id: String,
        options: ListOptions,
    },
    Create {
        zone_id: String,
        rrset: RecordSet,
    },
    Update {
        zone_id: String,
        rrset_id: String,
        rrset: RecordSet,
    },
    Delete {
        zone_id: String,
        rrset_id: String,
    },
}

impl Call {
    pub(crate) fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::Create { .. } | Self::Update { .. } | Self::Delete { .. }
        )
    }
}

/// Domains API double that serves fixed zones and record sets and records
/// every call it receives.
#[derive(Debug, Default)]
pub(crate) struct MockDomains {
    zones: Vec<Zone>,
    rrsets: BTreeMap<String, Vec<RecordSet>>,
    page_size: usize,
    fail_mutations: bool,
    fail_rrset_listing: bool,
    calls: Mutex<Vec<Call>>,
}

impl MockDomains {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_zone(mut self, id: &str, name: &str) -> Self {
        self.zones.push(Zone {
            id: id.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub(crate) fn with_rrset(
        mut self,
        zone_id: &str,
        id: &str,
        name: &str,
        record_type: RecordType,
        contents: &[&str],
    ) -> Self {
        self.rrsets
            .entry(zone_id.to_string())
            .or_default()
            .push(RecordSet {
                id: id.to_string(),
                name: name.to_string(),
                record_type,
                ttl: 300,
                records: contents.iter().map(|c| RecordItem::new(*c)).collect(),
            });
        self
    }

    /// Serve list results in pages of `page_size` items.
    pub(crate) fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub(crate) fn failing_mutations(mut self) -> Self {
        self.fail_mutations = true;
        self
    }

    pub(crate) fn failing_rrset_listing(mut self) -> Self {
        self.fail_rrset_listing = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn page<T: Clone>(&self, items: &[T], options: &ListOptions) -> PagedList<T> {
        let offset: usize = options
            .get("offset")
            .and_then(|o| o.parse().ok())
            .unwrap_or(0);
        let rest = items.get(offset..).unwrap_or_default();

        if self.page_size == 0 || rest.len() <= self.page_size {
            return PagedList::last(rest.to_vec());
        }
        PagedList::new(
            rest[..self.page_size].to_vec(),
            (offset + self.page_size) as u64,
        )
    }

    fn api_error(method: &str, url: &str) -> ProviderError {
        ProviderError::Api {
            method: method.to_string(),
            url: url.to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "internal error".to_string(),
        }
    }
}

#[async_trait]
impl ZoneRecordClient for MockDomains {
    async fn list_zones(&self, options: &ListOptions) -> Result<PagedList<Zone>> {
        self.record(Call::ListZones(options.clone()));

        let zones: Vec<Zone> = match options.get("filter") {
            Some(filter) => self
                .zones
                .iter()
                .filter(|zone| zone.name.contains(filter.as_str()))
                .cloned()
                .collect(),
            None => self.zones.clone(),
        };
        Ok(self.page(&zones, options))
    }

    async fn list_rrsets(&self, zone_id: &str, options: &ListOptions) -> Result<PagedList<RecordSet>> {
        self.record(Call::ListRrsets {
            zone_id: zone_id.to_string(),
            options: options.clone(),
        });
        if self.fail_rrset_listing {
            return Err(Self::api_error("GET", "/zones/rrset"));
        }

        let all = self.rrsets.get(zone_id).cloned().unwrap_or_default();
        let rrsets: Vec<RecordSet> = match options.get("name") {
            Some(name) => all.into_iter().filter(|r| &r.name == name).collect(),
            None => all,
        };
        Ok(self.page(&rrsets, options))
    }

    async fn create_rrset(&self, zone_id: &str, rrset: &RecordSet) -> Result<()> {
        self.record(Call::Create {
            zone_id: zone_id.to_string(),
            rrset: rrset.clone(),
        });
        if self.fail_mutations {
            return Err(Self::api_error("POST", "/zones/rrset"));
        }
        Ok(())
    }

    async fn update_rrset(&self, zone_id: &str, rrset_id: &str, rrset: &RecordSet) -> Result<()> {
        self.record(Call::Update {
            zone_id: zone_id.to_string(),
            rrset_id: rrset_id.to_string(),
            rrset: rrset.clone(),
        });
        if self.fail_mutations {
            return Err(Self::api_error("PATCH", "/zones/rrset"));
        }
        Ok(())
    }

    async fn delete_rrset(&self, zone_id: &str, rrset_id: &str) -> Result<()> {
        self.record(Call::Delete {
            zone_id: zone_id.to_string(),
            rrset_id: rrset_id.to_string(),
        });
        if self.fail_mutations {
            return Err(Self::api_error("DELETE", "/zones/rrset"));
        }
        Ok(())
    }
}

/// Hands out the same [`MockDomains`] for every token and remembers the tokens.
pub(crate) struct MockClientFactory {
    domains: Arc<MockDomains>,
    tokens: Mutex<Vec<String>>,
}

impl MockClientFactory {
    pub(crate) fn new(domains: Arc<MockDomains>) -> Self {
        Self {
            domains,
            tokens: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }
}

impl ClientFactory for MockClientFactory {
    fn client(&self, token: &str) -> Arc<dyn ZoneRecordClient> {
        self.tokens.lock().unwrap().push(token.to_string());
        self.domains.clone()
    }
}

/// Issues `token-1`, `token-2`, ... or fails every time.
#[derive(Debug, Default)]
pub(crate) struct CountingTokenSource {
    issued: AtomicUsize,
    fail: bool,
}

impl CountingTokenSource {
    pub(crate) fn failing() -> Self {
        Self {
            issued: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub(crate) fn issued(&self) -> usize {
        self.issued.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenSource for CountingTokenSource {
    async fn token(&self) -> Result<String> {
        if self.fail {
            return Err(ProviderError::Auth("invalid credentials".to_string()));
        }
        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("token-{n}"))
    }
}

/// A provider wired to `domains`, plus handles to inspect it.
pub(crate) struct Harness {
    pub(crate) provider: Arc<Provider>,
    pub(crate) domains: Arc<MockDomains>,
    pub(crate) clients: Arc<MockClientFactory>,
    pub(crate) tokens: Arc<CountingTokenSource>,
}

pub(crate) fn harness(domains: MockDomains, config: ProviderConfig) -> Harness {
    harness_with_tokens(domains, config, CountingTokenSource::default())
}

pub(crate) fn harness_with_tokens(
    domains: MockDomains,
    config: ProviderConfig,
    tokens: CountingTokenSource,
) -> Harness {
    let domains = Arc::new(domains);
    let clients = Arc::new(MockClientFactory::new(Arc::clone(&domains)));
    let tokens = Arc::new(tokens);
    let provider = Provider::new(config, tokens.clone(), clients.clone()).unwrap();

    Harness {
        provider: Arc::new(provider),
        domains,
        clients,
        tokens,
    }
}
