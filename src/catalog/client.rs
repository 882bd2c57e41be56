// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-OverseerrMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of overseerr-mcp and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::wire::{MediaDetails, MediaRequest, NewRequest, RequestMedia, RequestPage, SearchPage};
use super::{Catalog, CatalogError};
use crate::model::{MediaKind, RequestFilter, ReviewDecision};

const API_PREFIX: &str = "/api/v1";
const API_KEY_HEADER: &str = "X-Api-Key";

/// Page size used for `GET /request` (Overseerr pages with `take`/`skip`).
pub const REQUEST_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Poster,
    Backdrop,
}

impl ImageKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Poster => "poster",
            Self::Backdrop => "backdrop",
        }
    }
}

/// Stateless HTTP client for one Overseerr instance.
#[derive(Debug, Clone)]
pub struct OverseerrClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl OverseerrClient {
    /// `base_url` is the instance root, e.g. `http://localhost:5055` (a trailing `/` is
    /// ignored).
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, CatalogError> {
        let base_url = base_url.trim().trim_end_matches('/');
        let parsed =
            Url::parse(base_url).map_err(|_| CatalogError::InvalidBaseUrl(base_url.to_owned()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CatalogError::InvalidBaseUrl(base_url.to_owned()));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("overseerr-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { base_url: base_url.to_owned(), api_key: api_key.into(), http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{API_PREFIX}{path}", self.base_url)
    }

    /// URL of `path` served through Overseerr's image proxy, so the caller never needs TMDB
    /// credentials.
    pub fn image_url(&self, path: Option<&str>, kind: ImageKind) -> Option<String> {
        let path = path.filter(|path| !path.trim().is_empty())?;
        let mut url = Url::parse(&self.endpoint("/image")).ok()?;
        url.query_pairs_mut().append_pair("img", path).append_pair("i", kind.as_str());
        Some(url.to_string())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        log::debug!("overseerr GET {path}");
        let response = self
            .http
            .get(self.endpoint(path))
            .header(API_KEY_HEADER, &self.api_key)
            .header(ACCEPT, "application/json")
            .query(query)
            .send()
            .await?;
        decode_response(response).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, CatalogError> {
        log::debug!("overseerr POST {path}");
        let mut request = self
            .http
            .post(self.endpoint(path))
            .header(API_KEY_HEADER, &self.api_key)
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        decode_response(response).await
    }

    fn with_request_images(&self, mut request: MediaRequest) -> MediaRequest {
        if let Some(media) = request.media.as_mut() {
            self.fill_media_images(media);
        }
        request
    }

    fn fill_media_images(&self, media: &mut RequestMedia) {
        media.poster_url = self.image_url(media.poster_path.as_deref(), ImageKind::Poster);
        media.backdrop_url = self.image_url(media.backdrop_path.as_deref(), ImageKind::Backdrop);
    }
}

async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, CatalogError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        log::warn!("overseerr responded {status}: {body}");
        return Err(CatalogError::Status { status: status.as_u16(), body });
    }
    serde_json::from_str(&body).map_err(|err| CatalogError::Decode(err.to_string()))
}

#[async_trait]
impl Catalog for OverseerrClient {
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, CatalogError> {
        self.get_json("/search", &[("query", query.to_owned()), ("page", page.to_string())]).await
    }

    async fn media_details(&self, kind: MediaKind, id: u64) -> Result<MediaDetails, CatalogError> {
        let mut details: MediaDetails = self.get_json(&format!("/{kind}/{id}"), &[]).await?;
        details.poster_url = self.image_url(details.poster_path.as_deref(), ImageKind::Poster);
        details.backdrop_url =
            self.image_url(details.backdrop_path.as_deref(), ImageKind::Backdrop);
        Ok(details)
    }

    async fn create_request(&self, request: &NewRequest) -> Result<MediaRequest, CatalogError> {
        let created = self.post_json("/request", Some(request)).await?;
        Ok(self.with_request_images(created))
    }

    async fn list_requests(
        &self,
        page: u32,
        filter: RequestFilter,
    ) -> Result<RequestPage, CatalogError> {
        let skip = page.saturating_sub(1).saturating_mul(REQUEST_PAGE_SIZE);
        let mut requests: RequestPage = self
            .get_json(
                "/request",
                &[
                    ("take", REQUEST_PAGE_SIZE.to_string()),
                    ("skip", skip.to_string()),
                    ("filter", filter.as_str().to_owned()),
                    ("sort", "added".to_owned()),
                ],
            )
            .await?;
        requests.results =
            requests.results.into_iter().map(|request| self.with_request_images(request)).collect();
        Ok(requests)
    }

    async fn request(&self, request_id: u64) -> Result<MediaRequest, CatalogError> {
        let request = self.get_json(&format!("/request/{request_id}"), &[]).await?;
        Ok(self.with_request_images(request))
    }

    async fn review_request(
        &self,
        request_id: u64,
        decision: ReviewDecision,
    ) -> Result<MediaRequest, CatalogError> {
        let path = format!("/request/{request_id}/{}", decision.as_str());
        let request = self.post_json::<_, ()>(&path, None).await?;
        Ok(self.with_request_images(request))
    }
}
