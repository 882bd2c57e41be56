// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-OverseerrMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of overseerr-mcp and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The two kinds of media Overseerr can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    /// Wire label used by the Overseerr API (`movie` / `tv`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }

    /// Human-facing noun for messages.
    pub fn noun(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "TV show",
        }
    }

    /// Lenient matching for agent-supplied kinds: `movie`/`movies`, `tv`/`tvshow`/`tv show`.
    pub fn parse_loose(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "movie" | "movies" => Some(Self::Movie),
            "tv" | "tvshow" | "tv show" => Some(Self::Tv),
            _ => None,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid media type: {0}")]
pub struct ParseMediaKindError(String);

impl FromStr for MediaKind {
    type Err = ParseMediaKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_loose(s).ok_or_else(|| ParseMediaKindError(s.to_owned()))
    }
}

/// One entry of a stored search snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSummary {
    pub id: u64,
    pub media_type: MediaKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
}

impl MediaSummary {
    pub fn new(id: u64, media_type: MediaKind, title: impl Into<String>) -> Self {
        Self {
            id,
            media_type,
            title: title.into(),
            release_date: None,
            overview: None,
            poster_url: None,
            backdrop_url: None,
            availability: None,
        }
    }
}

/// Frozen, ordered copy of a search response. Shared read-only between the store and
/// whichever tool invocation is currently resolving against it.
pub type ResultSnapshot = Arc<[MediaSummary]>;
