// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Offset pagination for Domains API list operations.
//!
//! The API returns at most [`LIST_PAGE_SIZE`] items per page together with a
//! `next_offset`. A `next_offset` of 0 means there are no more pages, including
//! on the very first page.

use crate::constants::LIST_PAGE_SIZE;
use crate::dns_errors::Result;
use crate::domains::{ListOptions, PagedList};
use std::future::Future;
use tracing::debug;

/// List all items with automatic pagination.
///
/// `fetch` is called with `options` plus `limit` and `offset`, starting at
/// offset 0 and following `next_offset` until it reports 0. Items are returned in
/// page order. Any page error aborts the listing; no partial result is returned.
///
/// # Example
///
/// ```no_run
/// use selectel_dns_webhook::domains::{ClientFactory, HttpClientFactory, ListOptions};
/// use selectel_dns_webhook::provider::pagination::list_all_paginated;
///
/// # async fn example() -> Result<(), selectel_dns_webhook::dns_errors::ProviderError> {
/// let client = HttpClientFactory::new("https://api.selectel.ru/domains/v2")?.client("token");
///
/// let zones = list_all_paginated(ListOptions::new(), |options| {
///     let client = client.clone();
///     async move { client.list_zones(&options).await }
/// })
/// .await?;
/// println!("Found {} zones", zones.len());
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns the first error reported by `fetch`.
pub async fn list_all_paginated<T, F, Fut>(mut options: ListOptions, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(ListOptions) -> Fut,
    Fut: Future<Output = Result<PagedList<T>>>,
{
    options.insert("limit".to_string(), LIST_PAGE_SIZE.to_string());
    options.insert("offset".to_string(), "0".to_string());

    let mut all_items = Vec::new();
    let mut page_count = 0;

    loop {
        page_count += 1;
        let page = fetch(options.clone()).await?;

        let item_count = page.result.len();
        all_items.extend(page.result);

        debug!(
            page = page_count,
            items_in_page = item_count,
            total_items = all_items.len(),
            next_offset = page.next_offset,
            "Fetched page from Domains API"
        );

        if page.next_offset == 0 {
            break;
        }
        options.insert("offset".to_string(), page.next_offset.to_string());
    }

    debug!(
        total_pages = page_count,
        total_items = all_items.len(),
        "Completed paginated list operation"
    );

    Ok(all_items)
}

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod pagination_tests;
