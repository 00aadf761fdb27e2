// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Common test utilities for integration tests
//!
//! One wiremock server plays both Keystone (`/identity/v3`) and the Domains
//! API (`/domains/v2`). The provider and router are built exactly the way the
//! binary builds them.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use selectel_dns_webhook::api::create_router;
use selectel_dns_webhook::config::ProviderConfig;
use selectel_dns_webhook::domains::HttpClientFactory;
use selectel_dns_webhook::endpoint::DomainFilter;
use selectel_dns_webhook::keystone::{KeystoneCredentials, KeystoneTokenSource};
use selectel_dns_webhook::provider::Provider;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "integration-token";
pub const DOMAINS_PREFIX: &str = "/domains/v2";

/// Settings for [`webhook`].
#[derive(Default)]
pub struct WebhookOptions {
    pub dry_run: bool,
    pub domain_filter: Vec<String>,
}

pub fn domains_url(server: &MockServer) -> String {
    format!("{}{DOMAINS_PREFIX}", server.uri())
}

pub fn credentials(server: &MockServer) -> KeystoneCredentials {
    KeystoneCredentials {
        identity_endpoint: format!("{}/identity/v3", server.uri()),
        account_id: "123456".to_string(),
        project_id: "project-1".to_string(),
        username: "svc-user".to_string(),
        password: "s3cret".to_string(),
    }
}

/// Build the webhook router against `server`.
pub fn webhook(server: &MockServer, options: WebhookOptions) -> Router {
    let config = ProviderConfig {
        base_url: domains_url(server),
        dry_run: options.dry_run,
        workers: 2,
        domain_filter: DomainFilter::new(&options.domain_filter),
    };

    let tokens = KeystoneTokenSource::new(credentials(server)).unwrap();
    let clients = HttpClientFactory::new(&config.base_url).unwrap();
    let provider = Provider::new(config, Arc::new(tokens), Arc::new(clients)).unwrap();

    create_router(Arc::new(provider))
}

/// Keystone issues `TOKEN` for the service user, `times` times.
pub async fn mount_keystone(server: &MockServer, times: u64) {
    Mock::given(method("POST"))
        .and(path("/identity/v3/auth/tokens"))
        .and(body_partial_json(json!({
            "auth": {
                "identity": {"password": {"user": {"name": "svc-user"}}},
                "scope": {"project": {"id": "project-1"}}
            }
        })))
        .respond_with(ResponseTemplate::new(201).insert_header("X-Subject-Token", TOKEN))
        .expect(times)
        .mount(server)
        .await;
}

/// A single-page list response.
pub fn page(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "count": result.as_array().map_or(0, Vec::len),
        "next_offset": 0,
        "result": result,
    }))
}

pub async fn send(router: Router, request: Request<Body>) -> Response {
    router.oneshot(request).await.unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
