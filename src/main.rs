// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use clap::Parser;
use selectel_dns_webhook::{
    api::create_router, cli::Cli, domains::HttpClientFactory, keystone::KeystoneTokenSource,
    provider::Provider,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Build Tokio runtime with custom thread names
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .thread_name("selectel-webhook")
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cli))
}

/// Initialize logging.
///
/// Format: timestamp file:line LEVEL message
///
/// Respects RUST_LOG environment variable if set, otherwise uses `--log-level`
/// Example: RUST_LOG=debug selectel-dns-webhook
///
/// Respects RUST_LOG_FORMAT environment variable for output format
/// Example: RUST_LOG_FORMAT=json selectel-dns-webhook
fn init_tracing(default_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }
}

async fn async_main(cli: Cli) -> Result<()> {
    init_tracing(cli.log_filter());

    info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %cli.base_url,
        auth_url = %cli.auth_url,
        workers = cli.worker,
        dry_run = cli.dry_run,
        "Starting Selectel DNS webhook"
    );

    let shutdown = CancellationToken::new();

    debug!("Creating Keystone token source");
    let tokens = KeystoneTokenSource::new(cli.keystone_credentials())
        .context("failed to create Keystone token source")?;

    debug!("Creating Domains API client factory");
    let clients =
        HttpClientFactory::new(&cli.base_url).context("failed to create Domains API client")?;

    let provider = Provider::new(cli.provider_config(), Arc::new(tokens), Arc::new(clients))
        .context("invalid provider configuration")?
        .with_shutdown(shutdown.clone());

    if !provider.domain_filter().is_empty() {
        info!(filters = ?provider.domain_filter().filters(), "Domain filter enabled");
    }

    let app = create_router(Arc::new(provider));

    let addr = SocketAddr::from(([0, 0, 0, 0], cli.api_port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "Webhook API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("webhook server failed")?;

    info!("Webhook stopped");
    Ok(())
}

/// Resolve on SIGINT or SIGTERM and cancel in-flight provider work.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }

    shutdown.cancel();
}
