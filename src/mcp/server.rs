// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-OverseerrMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of overseerr-mcp and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Extensions, ServerCapabilities, ServerInfo};
use rmcp::service::RequestContext;
use rmcp::{tool, tool_handler, tool_router, ErrorData, RoleServer, ServerHandler, ServiceExt};
use serde::Serialize;

use crate::model::{ReviewDecision, SessionId};
use crate::tools::input::{
    ApprovePendingParams, ClearSessionParams, ListRequestsParams, MediaDetailsParams,
    RequestIdParams, RequestMediaParams, SearchMediaParams,
};
use crate::tools::output::FailureOutput;
use crate::tools::{ToolError, Toolbox};

/// Header the streamable HTTP transport uses to name the MCP session.
pub const SESSION_HEADER: &str = "mcp-session-id";

const INSTRUCTIONS: &str = concat!(
    "Overseerr media request server (tools: search_media, get_media_details, request_media, ",
    "get_requests, get_request_status, approve_request, decline_request, ",
    "approve_pending_request, clear_search_results). Search first, then refer to results by ",
    "position ('first', 'second', 'third', 'last' or a number).",
);

#[derive(Clone)]
pub struct OverseerrMcp {
    toolbox: Arc<Toolbox>,
    fixed_session: Option<SessionId>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl OverseerrMcp {
    pub fn new(toolbox: Toolbox) -> Self {
        Self { toolbox: Arc::new(toolbox), fixed_session: None, tool_router: Self::tool_router() }
    }

    /// Session used when the transport does not name one (stdio: one client per process).
    pub fn with_fixed_session(mut self, session_id: SessionId) -> Self {
        self.fixed_session = Some(session_id);
        self
    }

    pub fn toolbox(&self) -> &Toolbox {
        &self.toolbox
    }

    pub async fn serve_stdio(self) -> Result<(), rmcp::RmcpError> {
        let service = self.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
        service.waiting().await?;
        Ok(())
    }

    fn session_for(&self, context: &RequestContext<RoleServer>) -> Option<SessionId> {
        session_from_extensions(&context.extensions).or_else(|| self.fixed_session.clone())
    }

    /// Search movies and TV shows. Results are numbered and remembered for this session, so
    /// follow-up calls can say `reference: "first"`, `"2"` or `"last"` instead of ids.
    #[tool(name = "search_media")]
    async fn search_media(
        &self,
        params: Parameters<SearchMediaParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let session_id = self.session_for(&context);
        Ok(render(self.toolbox.search_media(session_id.as_ref(), &params.0).await))
    }

    /// Details for a movie or TV show, by `reference` into the last search or by
    /// `media_type` + `media_id`.
    #[tool(name = "get_media_details")]
    async fn get_media_details(
        &self,
        params: Parameters<MediaDetailsParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let session_id = self.session_for(&context);
        Ok(render(self.toolbox.media_details(session_id.as_ref(), &params.0).await))
    }

    /// Request a movie or TV show (optionally specific seasons, optionally 4K), by
    /// `reference` into the last search or by `media_type` + `media_id`.
    #[tool(name = "request_media")]
    async fn request_media(
        &self,
        params: Parameters<RequestMediaParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let session_id = self.session_for(&context);
        Ok(render(self.toolbox.request_media(session_id.as_ref(), &params.0).await))
    }

    /// List media requests, optionally filtered by status (all, pending, approved,
    /// processing, available). 20 per page.
    #[tool(name = "get_requests")]
    async fn get_requests(
        &self,
        params: Parameters<ListRequestsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(render(self.toolbox.list_requests(&params.0).await))
    }

    /// Current state of a single request.
    #[tool(name = "get_request_status")]
    async fn get_request_status(
        &self,
        params: Parameters<RequestIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(render(self.toolbox.request_status(&params.0).await))
    }

    /// Approve a pending request (requires request management permission).
    #[tool(name = "approve_request")]
    async fn approve_request(
        &self,
        params: Parameters<RequestIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(render(self.toolbox.review_request(&params.0, ReviewDecision::Approve).await))
    }

    /// Decline a pending request (requires request management permission).
    #[tool(name = "decline_request")]
    async fn decline_request(
        &self,
        params: Parameters<RequestIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(render(self.toolbox.review_request(&params.0, ReviewDecision::Decline).await))
    }

    /// Approve the pending request at a position of the pending list ("first", "2", "last"),
    /// as shown by `get_requests` with status "pending".
    #[tool(name = "approve_pending_request")]
    async fn approve_pending_request(
        &self,
        params: Parameters<ApprovePendingParams>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(render(self.toolbox.approve_pending(&params.0).await))
    }

    /// Forget this session's remembered search results (`all: true` forgets everything
    /// stored for the session).
    #[tool(name = "clear_search_results")]
    async fn clear_search_results(
        &self,
        params: Parameters<ClearSessionParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let session_id = self.session_for(&context);
        Ok(render(Ok(self.toolbox.clear_search_results(session_id.as_ref(), &params.0))))
    }
}

#[tool_handler]
impl ServerHandler for OverseerrMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Session named by the HTTP request that carried the tool call, if any.
pub(crate) fn session_from_extensions(extensions: &Extensions) -> Option<SessionId> {
    let parts = extensions.get::<axum::http::request::Parts>()?;
    let value = parts.headers.get(SESSION_HEADER)?.to_str().ok()?;
    SessionId::new(value).ok()
}

fn json_text<T: Serialize>(body: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(body)
}

/// Every outcome becomes a single text block; failures are flagged, never raised.
pub(crate) fn render<T: Serialize>(outcome: Result<T, ToolError>) -> CallToolResult {
    let err = match outcome {
        Ok(body) => {
            return match json_text(&body) {
                Ok(text) => CallToolResult::success(vec![Content::text(text)]),
                Err(err) => CallToolResult::error(vec![Content::text(format!(
                    "Failed to encode response: {err}"
                ))]),
            };
        }
        Err(err) => err,
    };

    if let ToolError::AlreadyRequested { message, .. } = &err {
        let body =
            FailureOutput { success: false, message: err.to_string(), error: message.clone() };
        if let Ok(text) = json_text(&body) {
            return CallToolResult::error(vec![Content::text(text)]);
        }
    }
    log::debug!("tool failed: {err}");
    CallToolResult::error(vec![Content::text(err.to_string())])
}

#[cfg(test)]
mod e2e;
