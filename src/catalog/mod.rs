// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-OverseerrMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of overseerr-mcp and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Remote catalog access (Overseerr).
//!
//! [`Catalog`] is the seam the tools talk to; [`OverseerrClient`] is the HTTP implementation.
//! Calls are single-shot: no retries, no backoff.

pub mod client;
pub mod wire;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{MediaKind, RequestFilter, ReviewDecision};

pub use client::{ImageKind, OverseerrClient, REQUEST_PAGE_SIZE};
pub use wire::{MediaDetails, MediaRequest, NewRequest, RequestPage, SearchPage};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Overseerr API error ({status}): {body}")]
    Status { status: u16, body: String },
    #[error("Overseerr API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Overseerr API returned an unexpected payload: {0}")]
    Decode(String),
    #[error("invalid Overseerr base URL '{0}'")]
    InvalidBaseUrl(String),
}

impl CatalogError {
    /// Case-insensitive substring match on the upstream error body.
    pub fn mentions(&self, needle: &str) -> bool {
        match self {
            Self::Status { body, .. } => body.to_lowercase().contains(&needle.to_lowercase()),
            _ => false,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}

#[async_trait]
pub trait Catalog: Send + Sync {
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, CatalogError>;

    async fn media_details(&self, kind: MediaKind, id: u64) -> Result<MediaDetails, CatalogError>;

    async fn create_request(&self, request: &NewRequest) -> Result<MediaRequest, CatalogError>;

    async fn list_requests(
        &self,
        page: u32,
        filter: RequestFilter,
    ) -> Result<RequestPage, CatalogError>;

    async fn request(&self, request_id: u64) -> Result<MediaRequest, CatalogError>;

    async fn review_request(
        &self,
        request_id: u64,
        decision: ReviewDecision,
    ) -> Result<MediaRequest, CatalogError>;
}
