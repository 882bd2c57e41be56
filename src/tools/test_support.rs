// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-OverseerrMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of overseerr-mcp and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! In-memory catalog and fixtures shared by the tool and server tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::Toolbox;
use crate::catalog::wire::{
    MediaDetails, MediaInfo, MediaRequest, NewRequest, PageInfo, RequestMedia, RequestPage,
    RequestSeason, SearchPage, SearchResult,
};
use crate::catalog::{Catalog, CatalogError, REQUEST_PAGE_SIZE};
use crate::model::{MediaKind, MediaSummary, RequestFilter, ReviewDecision, SessionId};
use crate::store::SessionStore;

pub(crate) const CREATED_REQUEST_ID: u64 = 42;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CatalogCall {
    Search { query: String, page: u32 },
    Details { kind: MediaKind, id: u64 },
    CreateRequest(NewRequest),
    ListRequests { page: u32, filter: RequestFilter },
    Request(u64),
    Review { request_id: u64, decision: ReviewDecision },
}

#[derive(Debug, Default)]
pub(crate) struct FakeCatalog {
    searches: HashMap<String, Result<SearchPage, (u16, String)>>,
    details: HashMap<(MediaKind, u64), MediaDetails>,
    request_failure: Option<(u16, String)>,
    requests: Mutex<Vec<MediaRequest>>,
    reported_page: Option<u32>,
    calls: Mutex<Vec<CatalogCall>>,
}

impl FakeCatalog {
    pub(crate) fn with_search(mut self, query: &str, page: SearchPage) -> Self {
        self.searches.insert(query.to_owned(), Ok(page));
        self
    }

    pub(crate) fn with_search_failure(mut self, query: &str, status: u16, body: &str) -> Self {
        self.searches.insert(query.to_owned(), Err((status, body.to_owned())));
        self
    }

    pub(crate) fn with_details(mut self, details: MediaDetails, kind: MediaKind) -> Self {
        self.details.insert((kind, details.id), details);
        self
    }

    pub(crate) fn with_request_failure(mut self, status: u16, body: &str) -> Self {
        self.request_failure = Some((status, body.to_owned()));
        self
    }

    pub(crate) fn with_requests(self, requests: Vec<MediaRequest>) -> Self {
        *self.requests.lock() = requests;
        self
    }

    /// Page number the request listing reports instead of echoing the requested one.
    pub(crate) fn with_reported_page(mut self, page: Option<u32>) -> Self {
        self.reported_page = page;
        self
    }

    pub(crate) fn calls(&self) -> Vec<CatalogCall> {
        self.calls.lock().clone()
    }

    fn record(&self, call: CatalogCall) {
        self.calls.lock().push(call);
    }
}

fn matches_filter(request: &MediaRequest, filter: RequestFilter) -> bool {
    let media_status = request.media.as_ref().and_then(|media| media.status);
    match filter {
        RequestFilter::All => true,
        RequestFilter::Pending => request.status == Some(1),
        RequestFilter::Approved => request.status == Some(2),
        RequestFilter::Processing => media_status == Some(3),
        RequestFilter::Available => media_status == Some(5),
    }
}

fn not_found(what: &str) -> CatalogError {
    CatalogError::Status {
        status: 404,
        body: format!(r#"{{"message":"Unable to retrieve {what}."}}"#),
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, CatalogError> {
        self.record(CatalogCall::Search { query: query.to_owned(), page });
        match self.searches.get(query) {
            Some(Ok(found)) => Ok(found.clone()),
            Some(Err((status, body))) => {
                Err(CatalogError::Status { status: *status, body: body.clone() })
            }
            None => Ok(SearchPage { page, total_pages: 0, total_results: 0, results: Vec::new() }),
        }
    }

    async fn media_details(&self, kind: MediaKind, id: u64) -> Result<MediaDetails, CatalogError> {
        self.record(CatalogCall::Details { kind, id });
        self.details.get(&(kind, id)).cloned().ok_or_else(|| not_found(kind.as_str()))
    }

    async fn create_request(&self, request: &NewRequest) -> Result<MediaRequest, CatalogError> {
        self.record(CatalogCall::CreateRequest(request.clone()));
        if let Some((status, body)) = &self.request_failure {
            return Err(CatalogError::Status { status: *status, body: body.clone() });
        }

        let created = MediaRequest {
            id: CREATED_REQUEST_ID,
            status: Some(1),
            media_type: Some(request.media_type.as_str().to_owned()),
            is_4k: request.is_4k,
            media: Some(RequestMedia {
                tmdb_id: Some(request.media_id),
                media_type: Some(request.media_type.as_str().to_owned()),
                status: Some(2),
                title: Some(format!("Media {}", request.media_id)),
                ..RequestMedia::default()
            }),
            seasons: request
                .seasons
                .iter()
                .flatten()
                .map(|season_number| RequestSeason { season_number: *season_number, status: None })
                .collect(),
            ..MediaRequest::default()
        };
        self.requests.lock().push(created.clone());
        Ok(created)
    }

    async fn list_requests(
        &self,
        page: u32,
        filter: RequestFilter,
    ) -> Result<RequestPage, CatalogError> {
        self.record(CatalogCall::ListRequests { page, filter });
        let requests = self
            .requests
            .lock()
            .iter()
            .filter(|request| matches_filter(request, filter))
            .cloned()
            .collect::<Vec<_>>();
        Ok(RequestPage {
            page_info: PageInfo {
                page: self.reported_page.unwrap_or(page),
                pages: 1,
                page_size: REQUEST_PAGE_SIZE,
                results: requests.len() as u64,
            },
            results: requests,
        })
    }

    async fn request(&self, request_id: u64) -> Result<MediaRequest, CatalogError> {
        self.record(CatalogCall::Request(request_id));
        self.requests
            .lock()
            .iter()
            .find(|request| request.id == request_id)
            .cloned()
            .ok_or_else(|| not_found("request"))
    }

    async fn review_request(
        &self,
        request_id: u64,
        decision: ReviewDecision,
    ) -> Result<MediaRequest, CatalogError> {
        self.record(CatalogCall::Review { request_id, decision });
        let mut requests = self.requests.lock();
        let request = requests
            .iter_mut()
            .find(|request| request.id == request_id)
            .ok_or_else(|| not_found("request"))?;
        request.status = Some(match decision {
            ReviewDecision::Approve => 2,
            ReviewDecision::Decline => 3,
        });
        Ok(request.clone())
    }
}

pub(crate) fn new_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread().enable_all().build().expect("tokio runtime")
}

pub(crate) fn session(id: &str) -> SessionId {
    SessionId::new(id).expect("session id")
}

pub(crate) fn toolbox_with(catalog: FakeCatalog) -> (Toolbox, Arc<FakeCatalog>) {
    let catalog = Arc::new(catalog);
    let toolbox = Toolbox::new(catalog.clone(), Arc::new(SessionStore::default()));
    (toolbox, catalog)
}

/// `len` summaries alternating movie/series, ids 100, 101, ...
pub(crate) fn summaries(len: usize) -> Vec<MediaSummary> {
    (0..len)
        .map(|index| {
            let kind = if index % 2 == 0 { MediaKind::Movie } else { MediaKind::Tv };
            MediaSummary::new(100 + index as u64, kind, format!("Item {}", index + 1))
        })
        .collect()
}

pub(crate) fn movie_result(id: u64, title: &str) -> SearchResult {
    SearchResult {
        id,
        media_type: "movie".to_owned(),
        title: Some(title.to_owned()),
        release_date: Some("1989-06-23".to_owned()),
        overview: Some(format!("{title} overview")),
        poster_path: Some(format!("/{id}.jpg")),
        backdrop_path: Some(format!("/{id}-backdrop.jpg")),
        media_info: Some(MediaInfo { status: Some(5), ..MediaInfo::default() }),
        ..SearchResult::default()
    }
}

pub(crate) fn tv_result(id: u64, name: &str) -> SearchResult {
    SearchResult {
        id,
        media_type: "tv".to_owned(),
        name: Some(name.to_owned()),
        first_air_date: Some("1992-09-05".to_owned()),
        ..SearchResult::default()
    }
}

pub(crate) fn person_result(id: u64, name: &str) -> SearchResult {
    SearchResult {
        id,
        media_type: "person".to_owned(),
        name: Some(name.to_owned()),
        ..SearchResult::default()
    }
}

pub(crate) fn movie_details(id: u64, title: &str) -> MediaDetails {
    MediaDetails {
        id,
        title: Some(title.to_owned()),
        original_title: Some(title.to_owned()),
        release_date: Some("1999-03-30".to_owned()),
        overview: Some("A hacker learns the truth.".to_owned()),
        status: Some("Released".to_owned()),
        runtime: Some(136),
        vote_average: Some(8.2),
        ..MediaDetails::default()
    }
}

pub(crate) fn request_record(id: u64, status: u8, tmdb_id: u64) -> MediaRequest {
    MediaRequest {
        id,
        status: Some(status),
        media_type: Some("movie".to_owned()),
        media: Some(RequestMedia {
            tmdb_id: Some(tmdb_id),
            media_type: Some("movie".to_owned()),
            status: Some(3),
            title: Some(format!("Movie {tmdb_id}")),
            ..RequestMedia::default()
        }),
        ..MediaRequest::default()
    }
}
