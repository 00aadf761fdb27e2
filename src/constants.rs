// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the Selectel DNS webhook.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// DNS Record Constants
// ============================================================================

/// TTL applied to an endpoint that arrives without one (TTL of 0)
pub const DEFAULT_RECORD_TTL_SECS: u32 = 300;

/// Record types whose targets are domain names and must be dot-terminated
pub const DOMAIN_TARGET_RECORD_TYPES: &[&str] = &["CNAME", "ALIAS", "MX", "SRV"];

/// Record types reported back to the orchestrator when listing records
///
/// Record sets of any other type are dropped from `GET /records`.
pub const SUPPORTED_RECORD_TYPES: &[&str] = &["A", "AAAA", "CNAME", "SRV", "TXT", "NS", "MX"];

// ============================================================================
// Domains API Constants
// ============================================================================

/// Default base URL of the Selectel Domains v2 API
pub const DEFAULT_BASE_URL: &str = "https://api.selectel.ru/domains/v2";

/// Default Keystone identity endpoint
pub const DEFAULT_AUTH_URL: &str = "https://cloud.api.selcloud.ru/identity/v3";

/// Page size for zone and record-set listings
pub const LIST_PAGE_SIZE: u32 = 1000;

/// Header carrying the Keystone token on Domains API requests
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Header carrying the issued token on Keystone responses
pub const SUBJECT_TOKEN_HEADER: &str = "X-Subject-Token";

/// User-Agent sent on every outbound request
pub const USER_AGENT: &str = "external-dns-selectel-webhook";

// ============================================================================
// HTTP Client Constants
// ============================================================================

/// Total request timeout (30 seconds)
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection establishment timeout (60 seconds)
pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 60;

/// TCP keep-alive period for open connections (60 seconds)
pub const HTTP_TCP_KEEPALIVE_SECS: u64 = 60;

/// How long an idle pooled connection is kept (100 seconds)
pub const HTTP_POOL_IDLE_TIMEOUT_SECS: u64 = 100;

/// Maximum idle pooled connections per host
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 100;

// ============================================================================
// Worker Pool Constants
// ============================================================================

/// Default number of concurrent workers talking to the Domains API
///
/// Keep this low enough to stay clear of 429 rate limiting.
pub const DEFAULT_WORKERS: usize = 10;

// ============================================================================
// Webhook API Constants
// ============================================================================

/// Default port of the webhook HTTP server
pub const DEFAULT_API_PORT: u16 = 8888;

/// Media type negotiated with external-dns
pub const WEBHOOK_MEDIA_TYPE: &str = "application/external.dns.webhook+json;version=1";
