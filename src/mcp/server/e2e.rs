// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-OverseerrMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of overseerr-mcp and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tool calls through the streamable HTTP service, with the session named by header.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Request, StatusCode};
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::{StreamableHttpServerConfig, StreamableHttpService};

use super::*;
use crate::catalog::wire::SearchPage;
use crate::model::MediaKind;
use crate::tools::test_support::{
    movie_details, movie_result, new_runtime, toolbox_with, tv_result, CatalogCall, FakeCatalog,
};

struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

struct Harness {
    service: StreamableHttpService<OverseerrMcp, LocalSessionManager>,
    catalog: Arc<FakeCatalog>,
    server: OverseerrMcp,
}

impl Harness {
    /// Every POST stands alone; the session header is whatever the caller sends.
    fn stateless(catalog: FakeCatalog) -> Self {
        Self::with_mode(catalog, false)
    }

    /// Sessions are created by `initialize`, as in the shipped HTTP server.
    fn stateful(catalog: FakeCatalog) -> Self {
        Self::with_mode(catalog, true)
    }

    fn with_mode(catalog: FakeCatalog, stateful_mode: bool) -> Self {
        let (toolbox, catalog) = toolbox_with(catalog);
        let server = OverseerrMcp::new(toolbox);
        let config = StreamableHttpServerConfig {
            stateful_mode,
            sse_keep_alive: None,
            sse_retry: None,
            ..StreamableHttpServerConfig::default()
        };
        let service = {
            let server = server.clone();
            StreamableHttpService::new(
                move || Ok(server.clone()),
                Arc::new(LocalSessionManager::default()),
                config,
            )
        };
        Self { service, catalog, server }
    }

    async fn post(&self, session: Option<&str>, message: serde_json::Value) -> Reply {
        let mut request = Request::builder()
            .method("POST")
            .uri("/mcp")
            .header(header::ACCEPT, "application/json, text/event-stream")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(session) = session {
            request = request.header(SESSION_HEADER, session);
        }

        let request = request.body(Body::from(message.to_string())).expect("request");
        let response = self.service.handle(request).await;
        let status = response.status();
        let headers = response.headers().clone();

        let bytes = tokio::time::timeout(
            std::time::Duration::from_secs(3),
            to_bytes(Body::new(response.into_body()), usize::MAX),
        )
        .await
        .expect("timeout collecting response body")
        .expect("collect response body");
        let body = String::from_utf8(bytes.to_vec()).expect("utf-8 body");
        Reply { status, headers, body }
    }

    /// Call `tool` and return the raw response body (an SSE stream with one JSON-RPC reply).
    async fn call(
        &self,
        session: Option<&str>,
        tool: &str,
        arguments: serde_json::Value,
    ) -> String {
        let reply = self
            .post(
                session,
                serde_json::json!({
                    "jsonrpc": "2.0",
                    "id": 1,
                    "method": "tools/call",
                    "params": { "name": tool, "arguments": arguments }
                }),
            )
            .await;
        assert_eq!(reply.status, StatusCode::OK, "unexpected reply: {}", reply.body);
        reply.body
    }

    /// Run the MCP handshake and return the session id the server assigned.
    async fn initialize(&self) -> String {
        let reply = self
            .post(
                None,
                serde_json::json!({
                    "jsonrpc": "2.0",
                    "id": 0,
                    "method": "initialize",
                    "params": {
                        "protocolVersion": "2025-03-26",
                        "capabilities": {},
                        "clientInfo": { "name": "e2e", "version": "0.0.0" }
                    }
                }),
            )
            .await;
        assert_eq!(reply.status, StatusCode::OK, "initialize failed: {}", reply.body);
        let session_id = reply
            .headers
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .expect("server assigns a session id")
            .to_owned();

        let initialized = self
            .post(
                Some(&session_id),
                serde_json::json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
            )
            .await;
        assert_eq!(initialized.status, StatusCode::ACCEPTED);
        session_id
    }
}

fn batman_catalog() -> FakeCatalog {
    FakeCatalog::default()
        .with_search(
            "batman",
            SearchPage {
                page: 1,
                total_pages: 1,
                total_results: 3,
                results: vec![
                    movie_result(268, "Batman"),
                    tv_result(2098, "Batman: The Animated Series"),
                    movie_result(272, "Batman Begins"),
                ],
            },
        )
        .with_details(movie_details(268, "Batman"), MediaKind::Movie)
}

#[test]
fn reference_follows_the_search_of_the_same_session() {
    let runtime = new_runtime();
    let harness = Harness::stateless(batman_catalog());

    runtime.block_on(async {
        let searched = harness
            .call(Some("s1"), "search_media", serde_json::json!({ "query": "batman" }))
            .await;
        assert!(searched.contains("Batman Begins"), "unexpected body: {searched}");

        let details = harness
            .call(Some("s1"), "get_media_details", serde_json::json!({ "reference": "first" }))
            .await;
        assert!(details.contains("A hacker learns the truth."), "unexpected body: {details}");
    });

    assert_eq!(
        harness.catalog.calls().last(),
        Some(&CatalogCall::Details { kind: MediaKind::Movie, id: 268 })
    );
}

#[test]
fn numeric_reference_is_accepted() {
    let runtime = new_runtime();
    let harness = Harness::stateless(batman_catalog());

    let body = runtime.block_on(async {
        harness.call(Some("s1"), "search_media", serde_json::json!({ "query": "batman" })).await;
        harness.call(Some("s1"), "request_media", serde_json::json!({ "reference": 3 })).await
    });

    assert!(body.contains("Successfully requested movie with ID 272"), "unexpected body: {body}");
}

#[test]
fn out_of_range_reference_names_the_range() {
    let runtime = new_runtime();
    let harness = Harness::stateless(batman_catalog());

    let body = runtime.block_on(async {
        harness.call(Some("s1"), "search_media", serde_json::json!({ "query": "batman" })).await;
        harness.call(Some("s1"), "get_media_details", serde_json::json!({ "reference": "4" })).await
    });

    assert!(body.contains("Available options: 1-3"), "unexpected body: {body}");
    assert!(body.contains("\"isError\":true"), "expected an error result: {body}");
}

#[test]
fn sessions_do_not_see_each_other() {
    let runtime = new_runtime();
    let harness = Harness::stateless(batman_catalog());

    let body = runtime.block_on(async {
        harness.call(Some("s1"), "search_media", serde_json::json!({ "query": "batman" })).await;
        harness.call(Some("s2"), "request_media", serde_json::json!({ "reference": "last" })).await
    });

    assert!(body.contains("No previous search results found"), "unexpected body: {body}");
    let s2 = SessionId::new("s2").expect("session id");
    assert!(harness.server.toolbox().sessions().last_search(&s2).is_none());
}

#[test]
fn calls_without_session_header_remember_nothing() {
    let runtime = new_runtime();
    let harness = Harness::stateless(batman_catalog());

    runtime.block_on(async {
        let searched =
            harness.call(None, "search_media", serde_json::json!({ "query": "batman" })).await;
        assert!(searched.contains("Batman"), "unexpected body: {searched}");
        assert!(harness.server.toolbox().sessions().is_empty());

        let body = harness
            .call(
                None,
                "request_media",
                serde_json::json!({ "mediaType": "movie", "mediaId": "268" }),
            )
            .await;
        assert!(
            body.contains("Successfully requested movie with ID 268"),
            "unexpected body: {body}"
        );
    });
}

#[test]
fn server_assigned_session_carries_references() {
    let runtime = new_runtime();
    let harness = Harness::stateful(batman_catalog());

    let (session_id, details) = runtime.block_on(async {
        let session_id = harness.initialize().await;
        let searched = harness
            .call(Some(&session_id), "search_media", serde_json::json!({ "query": "batman" }))
            .await;
        assert!(searched.contains("Batman Begins"), "unexpected body: {searched}");

        let details = harness
            .call(
                Some(&session_id),
                "get_media_details",
                serde_json::json!({ "reference": "first" }),
            )
            .await;
        (session_id, details)
    });

    assert!(details.contains("A hacker learns the truth."), "unexpected body: {details}");
    let stored = SessionId::new(session_id).expect("session id");
    let snapshot = harness.server.toolbox().sessions().last_search(&stored).expect("snapshot");
    assert_eq!(snapshot.len(), 3);
}

#[test]
fn stateful_service_rejects_unknown_sessions() {
    let runtime = new_runtime();
    let harness = Harness::stateful(batman_catalog());

    let reply = runtime.block_on(harness.post(
        Some("made-up"),
        serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": { "name": "search_media", "arguments": { "query": "batman" } }
        }),
    ));

    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert!(harness.catalog.calls().is_empty());
}
