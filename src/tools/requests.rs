// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-OverseerrMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of overseerr-mcp and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::input::{ApprovePendingParams, ListRequestsParams, RequestIdParams};
use super::output::{
    PendingApprovalOutput, RequestListOutput, RequestPageInfo, RequestSummary, ReviewOutput,
};
use super::{ToolError, Toolbox};
use crate::model::{resolve_index, RequestFilter, ReviewDecision};

impl Toolbox {
    pub async fn list_requests(
        &self,
        params: &ListRequestsParams,
    ) -> Result<RequestListOutput, ToolError> {
        let command = params.normalize();
        log::debug!("get_requests {command:?}");

        let page = self
            .catalog()
            .list_requests(command.page, command.filter)
            .await
            .map_err(ToolError::upstream("get requests"))?;

        Ok(RequestListOutput {
            page_info: RequestPageInfo {
                // 0 means upstream left the page out.
                page: match page.page_info.page {
                    0 => command.page,
                    reported => reported,
                },
                total_pages: page.page_info.pages,
                page_size: page.page_info.page_size,
                total_results: page.page_info.results,
            },
            filter: command.filter.as_str(),
            requests: page.results.iter().map(RequestSummary::from).collect(),
        })
    }

    pub async fn request_status(
        &self,
        params: &RequestIdParams,
    ) -> Result<RequestSummary, ToolError> {
        let request_id = params.normalize()?;
        let request = self
            .catalog()
            .request(request_id)
            .await
            .map_err(ToolError::upstream("get request status"))?;
        Ok(RequestSummary::from(&request))
    }

    /// Approve or decline a pending request. Needs an API key with request management
    /// permission upstream.
    pub async fn review_request(
        &self,
        params: &RequestIdParams,
        decision: ReviewDecision,
    ) -> Result<ReviewOutput, ToolError> {
        let request_id = params.normalize()?;
        log::debug!("{} request {request_id}", decision.as_str());

        let action = match decision {
            ReviewDecision::Approve => "approve request",
            ReviewDecision::Decline => "decline request",
        };
        let request = self
            .catalog()
            .review_request(request_id, decision)
            .await
            .map_err(ToolError::upstream(action))?;

        Ok(ReviewOutput {
            success: true,
            message: format!("Request {request_id} {}", decision.past_tense()),
            request: RequestSummary::from(&request),
        })
    }

    /// Approve the request at a position ("first", "2", "last") of the pending list.
    pub async fn approve_pending(
        &self,
        params: &ApprovePendingParams,
    ) -> Result<PendingApprovalOutput, ToolError> {
        let command = params.normalize()?;
        log::debug!("approve_pending_request {command:?}");

        let pending = self
            .catalog()
            .list_requests(command.page, RequestFilter::Pending)
            .await
            .map_err(ToolError::upstream("list pending requests"))?;
        if pending.results.is_empty() {
            return Err(ToolError::NoPendingRequests);
        }

        let index = resolve_index(&command.reference, pending.results.len())?;
        let target = pending.results[index].id;
        let approved = self
            .catalog()
            .review_request(target, ReviewDecision::Approve)
            .await
            .map_err(ToolError::upstream("approve request"))?;

        let position = index + 1;
        Ok(PendingApprovalOutput {
            success: true,
            message: format!("Approved pending request #{position} (request {target})"),
            position,
            request: RequestSummary::from(&approved),
        })
    }
}
