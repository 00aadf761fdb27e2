// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # Selectel DNS Webhook - external-dns provider for Selectel Domains v2
//!
//! This crate implements the external-dns webhook protocol on top of the
//! Selectel Domains v2 API. external-dns computes which DNS records should
//! exist; the webhook lists what does exist and applies the difference.
//!
//! ## Overview
//!
//! - Zones and record sets are listed with offset pagination
//! - Every change is placed into a zone by longest zone-name match
//! - Records are normalized (trailing dots, default TTL) before they are sent
//! - Bulk creates, updates and deletes run on a bounded worker pool that stops
//!   at the first failure
//! - Every call authenticates with a fresh Keystone token
//!
//! ## Modules
//!
//! - [`provider`] - Reconciliation engine (`records`, `apply_changes`)
//! - [`domains`] - Domains v2 API client and wire types
//! - [`keystone`] - Keystone token source
//! - [`endpoint`] - external-dns endpoint and change-plan model
//! - [`api`] - Webhook HTTP server
//! - [`cli`] / [`config`] - Command line and provider configuration
//! - [`metrics`] - Prometheus metrics
//!
//! ## Example
//!
//! ```rust,no_run
//! use selectel_dns_webhook::config::ProviderConfig;
//! use selectel_dns_webhook::domains::HttpClientFactory;
//! use selectel_dns_webhook::endpoint::{Changes, Endpoint};
//! use selectel_dns_webhook::keystone::{KeystoneCredentials, KeystoneTokenSource};
//! use selectel_dns_webhook::provider::Provider;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let credentials = KeystoneCredentials {
//!     identity_endpoint: "https://cloud.api.selcloud.ru/identity/v3".to_string(),
//!     account_id: "123456".to_string(),
//!     project_id: "project-id".to_string(),
//!     username: "service-user".to_string(),
//!     password: "secret".to_string(),
//! };
//! let config = ProviderConfig::default();
//! let clients = HttpClientFactory::new(&config.base_url)?;
//! let provider = Provider::new(
//!     config,
//!     Arc::new(KeystoneTokenSource::new(credentials)?),
//!     Arc::new(clients),
//! )?;
//!
//! let changes = Changes {
//!     create: vec![Endpoint::new("www.example.com", "A", 300, ["192.0.2.1"])],
//!     ..Changes::default()
//! };
//! provider.apply_changes(&changes).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod constants;
pub mod dns_errors;
pub mod domains;
pub mod endpoint;
pub mod http_client;
pub mod http_errors;
pub mod keystone;
pub mod metrics;
pub mod provider;
