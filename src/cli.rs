// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Command-line interface of the webhook binary.
//!
//! Every flag can also be set through an environment variable named after the
//! flag in upper case with `-` replaced by `_` (`--base-url` is `BASE_URL`).
//! The parsed [`Cli`] is converted once into a [`ProviderConfig`] and
//! [`KeystoneCredentials`]; nothing else reads flags or the environment.

use crate::config::ProviderConfig;
use crate::constants::{DEFAULT_API_PORT, DEFAULT_AUTH_URL, DEFAULT_BASE_URL, DEFAULT_WORKERS};
use crate::endpoint::DomainFilter;
use crate::keystone::KeystoneCredentials;
use clap::Parser;

/// external-dns webhook provider for the Selectel DNS service
#[derive(Parser)]
#[command(name = "selectel-dns-webhook")]
#[command(about = "external-dns webhook provider for the Selectel DNS service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Port to listen on
    #[arg(long, env = "API_PORT", default_value_t = DEFAULT_API_PORT)]
    pub api_port: u16,

    /// Base URL of the Domains API
    #[arg(long, env = "BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Identity API URL used to obtain a Keystone token
    #[arg(long, env = "AUTH_URL", default_value = DEFAULT_AUTH_URL)]
    pub auth_url: String,

    /// Project id the token is scoped to
    #[arg(long, env = "PROJECT_ID", default_value = "")]
    pub project_id: String,

    /// Account id of the service user
    #[arg(long, env = "ACCOUNT_ID", default_value = "")]
    pub account_id: String,

    /// Service user name
    #[arg(long, env = "USERNAME", default_value = "")]
    pub username: String,

    /// Service user password
    #[arg(long, env = "PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Number of concurrent workers querying the API.
    ///
    /// Zones and records are fetched in parallel; keep this moderate to avoid
    /// 429 rate limiting from the API.
    #[arg(long, env = "WORKER", default_value_t = DEFAULT_WORKERS)]
    pub worker: usize,

    /// Zone-name filter; repeat the flag or separate entries with commas
    #[arg(long = "domain-filter", env = "DOMAIN_FILTER", value_delimiter = ',')]
    pub domain_filter: Vec<String>,

    /// Resolve and log changes without sending them
    #[arg(long, env = "DRY_RUN")]
    pub dry_run: bool,

    /// Log level: debug, info, warn or error (RUST_LOG takes precedence)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Provider settings taken from the command line.
    #[must_use]
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            base_url: self.base_url.clone(),
            dry_run: self.dry_run,
            workers: self.worker,
            domain_filter: DomainFilter::new(&self.domain_filter),
        }
    }

    /// Keystone credentials taken from the command line.
    #[must_use]
    pub fn keystone_credentials(&self) -> KeystoneCredentials {
        KeystoneCredentials {
            identity_endpoint: self.auth_url.clone(),
            account_id: self.account_id.clone(),
            project_id: self.project_id.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    /// Tracing filter directive for `--log-level`; unknown values mean `info`.
    #[must_use]
    pub fn log_filter(&self) -> &'static str {
        match self.log_level.to_lowercase().as_str() {
            "debug" => "debug",
            "warn" => "warn",
            "error" => "error",
            _ => "info",
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod cli_tests;
