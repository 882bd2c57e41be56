// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-OverseerrMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of overseerr-mcp and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Overseerr `/api/v1` payloads.
//!
//! Only the fields the tools read are modelled; everything is defaulted so that newer or
//! older Overseerr (and Jellyseerr) versions with extra/missing fields still decode.

use serde::{Deserialize, Serialize};

use crate::model::MediaKind;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchPage {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u64,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResult {
    pub id: u64,
    /// `movie`, `tv` or `person`.
    pub media_type: String,
    pub title: Option<String>,
    pub name: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub media_info: Option<MediaInfo>,
}

impl SearchResult {
    /// `None` for people and anything else that cannot be requested.
    pub fn kind(&self) -> Option<MediaKind> {
        match self.media_type.as_str() {
            "movie" => Some(MediaKind::Movie),
            "tv" => Some(MediaKind::Tv),
            _ => None,
        }
    }

    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref().or(self.name.as_deref())
    }

    pub fn display_date(&self) -> Option<&str> {
        self.release_date.as_deref().or(self.first_air_date.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaInfo {
    pub id: Option<u64>,
    pub tmdb_id: Option<u64>,
    pub status: Option<u8>,
    pub status4k: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// `GET /movie/{id}` and `GET /tv/{id}`. Movies carry `title`/`releaseDate`, series carry
/// `name`/`firstAirDate`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaDetails {
    pub id: u64,
    pub title: Option<String>,
    pub name: Option<String>,
    pub original_title: Option<String>,
    pub original_name: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub overview: Option<String>,
    pub status: Option<String>,
    pub runtime: Option<u32>,
    pub episode_run_time: Vec<u32>,
    pub number_of_seasons: Option<u32>,
    pub genres: Vec<Genre>,
    pub vote_average: Option<f64>,
    pub popularity: Option<f64>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub media_info: Option<MediaInfo>,
    /// Filled in by the client from `poster_path`, pointing at the Overseerr image proxy.
    #[serde(skip_deserializing)]
    pub poster_url: Option<String>,
    #[serde(skip_deserializing)]
    pub backdrop_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestSeason {
    pub season_number: u32,
    pub status: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestUser {
    pub id: u64,
    pub display_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
}

impl RequestUser {
    pub fn best_name(&self) -> Option<&str> {
        self.display_name
            .as_deref()
            .or(self.username.as_deref())
            .or(self.email.as_deref())
            .filter(|name| !name.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestMedia {
    pub id: Option<u64>,
    pub tmdb_id: Option<u64>,
    pub media_type: Option<String>,
    pub status: Option<u8>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(skip_deserializing)]
    pub poster_url: Option<String>,
    #[serde(skip_deserializing)]
    pub backdrop_url: Option<String>,
}

/// A `MediaRequest` as returned by the request endpoints.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaRequest {
    pub id: u64,
    pub status: Option<u8>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    #[serde(rename = "is4k")]
    pub is_4k: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub media: Option<RequestMedia>,
    pub seasons: Vec<RequestSeason>,
    pub requested_by: Option<RequestUser>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageInfo {
    pub page: u32,
    pub pages: u32,
    pub page_size: u32,
    pub results: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestPage {
    pub page_info: PageInfo,
    pub results: Vec<MediaRequest>,
}

/// Body of `POST /request`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRequest {
    pub media_type: MediaKind,
    pub media_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seasons: Option<Vec<u32>>,
    #[serde(rename = "is4k")]
    pub is_4k: bool,
}
