// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-OverseerrMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of overseerr-mcp and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Serializable tool responses (camelCase, like the Overseerr API they summarize).

use serde::Serialize;

use crate::catalog::wire::{MediaRequest, RequestMedia, RequestUser};
use crate::model::{media_status_label, request_status_label, MediaKind, MediaSummary};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPageInfo {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u64,
}

/// A search result with its 1-based position, which is what references point at.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub position: usize,
    #[serde(flatten)]
    pub media: MediaSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutput {
    pub page_info: SearchPageInfo,
    pub results: Vec<SearchHit>,
    /// Whether the results were kept for follow-up references.
    pub remembered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDetailsOutput {
    pub id: u64,
    pub tmdb_id: u64,
    pub media_type: MediaKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop_url: Option<String>,
    /// Minutes; per episode for series.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_seasons: Option<u32>,
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
    /// Availability on the media server, when Overseerr tracks the item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_4k: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedMediaInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestCreatedOutput {
    pub success: bool,
    pub message: String,
    pub request_id: u64,
    pub status: String,
    pub media_info: CreatedMediaInfo,
}

/// Body of an expected, non-fatal failure such as a duplicate request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureOutput {
    pub success: bool,
    pub message: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMediaInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmdb_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop_url: Option<String>,
}

impl From<&RequestMedia> for RequestMediaInfo {
    fn from(media: &RequestMedia) -> Self {
        Self {
            id: media.id,
            tmdb_id: media.tmdb_id,
            media_type: media.media_type.clone(),
            title: media.title.clone().or_else(|| media.name.clone()),
            status: media.status.map(media_status_label).unwrap_or("unknown"),
            poster_url: media.poster_url.clone(),
            backdrop_url: media.backdrop_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Requester {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl From<&RequestUser> for Requester {
    fn from(user: &RequestUser) -> Self {
        Self { id: user.id, username: user.best_name().map(ToOwned::to_owned) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSummary {
    pub id: u64,
    pub status: &'static str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(rename = "is4k")]
    pub is_4k: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_info: Option<RequestMediaInfo>,
    pub seasons: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_by: Option<Requester>,
}

impl From<&MediaRequest> for RequestSummary {
    fn from(request: &MediaRequest) -> Self {
        Self {
            id: request.id,
            status: request.status.map(request_status_label).unwrap_or("unknown"),
            media_type: request.media_type.clone(),
            is_4k: request.is_4k,
            created_at: request.created_at.clone(),
            updated_at: request.updated_at.clone(),
            media_info: request.media.as_ref().map(RequestMediaInfo::from),
            seasons: request.seasons.iter().map(|season| season.season_number).collect(),
            requested_by: request.requested_by.as_ref().map(Requester::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPageInfo {
    pub page: u32,
    pub total_pages: u32,
    pub page_size: u32,
    pub total_results: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestListOutput {
    pub page_info: RequestPageInfo,
    pub filter: &'static str,
    pub requests: Vec<RequestSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOutput {
    pub success: bool,
    pub message: String,
    pub request: RequestSummary,
}

/// Result of approving the request at a position of the pending list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingApprovalOutput {
    pub success: bool,
    pub message: String,
    /// 1-based position in the pending list that was approved.
    pub position: usize,
    pub request: RequestSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearOutput {
    pub cleared: bool,
    pub message: String,
}
