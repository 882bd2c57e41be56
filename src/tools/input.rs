// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-OverseerrMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of overseerr-mcp and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tool parameters as agents actually send them, and their normalization.
//!
//! Agents mix strings and numbers freely (`"603"` vs `603`, `"1,2"` vs `[1, 2]`), so every
//! loosely typed field gets an untagged wrapper here. Each tool turns its parameter struct
//! into a typed command exactly once, before touching the session store or the catalog.

use schemars::JsonSchema;
use serde::Deserialize;

use super::ToolError;
use crate::model::{MediaKind, RequestFilter};

/// A number that may arrive as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    /// Positive integer value, or `None` for anything non-numeric, fractional or `<= 0`.
    pub fn positive_integer(&self) -> Option<u64> {
        match self {
            Self::Number(value) => {
                let is_integer = value.is_finite() && value.fract() == 0.0;
                (is_integer && *value >= 1.0 && *value <= u64::MAX as f64).then(|| *value as u64)
            }
            Self::Text(text) => text.trim().parse::<u64>().ok().filter(|value| *value > 0),
        }
    }
}

impl From<u64> for LooseNumber {
    fn from(value: u64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for LooseNumber {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// A short token that may arrive as a string or a bare number (`"2"` vs `2`).
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum LooseToken {
    Text(String),
    Integer(i64),
    Number(f64),
}

impl LooseToken {
    /// Trimmed text form, or `None` when blank.
    pub fn text(&self) -> Option<String> {
        match self {
            Self::Text(text) => non_blank(Some(text)).map(ToOwned::to_owned),
            Self::Integer(value) => Some(value.to_string()),
            Self::Number(value) => Some(value.to_string()),
        }
    }
}

impl From<&str> for LooseToken {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// A flag that may arrive as a JSON bool, a string (`"true"`, `"no"`) or `0`/`1`.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum LooseBool {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl LooseBool {
    /// Unrecognized values count as `false`.
    pub fn is_set(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Number(value) => *value == 1.0,
            Self::Text(text) => {
                matches!(text.trim().to_lowercase().as_str(), "true" | "yes" | "y" | "1" | "on")
            }
        }
    }
}

impl From<bool> for LooseBool {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

fn flag(value: Option<&LooseBool>) -> bool {
    value.is_some_and(LooseBool::is_set)
}

/// Season list: `[1, 2]`, `["1", "2"]` or `"1, 2"`.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum LooseSeasons {
    List(Vec<LooseNumber>),
    Text(String),
}

impl LooseSeasons {
    /// Parsed season numbers with unparseable entries dropped. Season 0 (specials) is kept.
    pub fn numbers(&self) -> Vec<u32> {
        match self {
            Self::List(values) => values.iter().filter_map(season_number).collect(),
            Self::Text(text) => {
                text.split(',').filter_map(|part| part.trim().parse::<u32>().ok()).collect()
            }
        }
    }
}

fn season_number(value: &LooseNumber) -> Option<u32> {
    match value {
        LooseNumber::Number(value) => {
            let is_integer = value.is_finite() && value.fract() == 0.0;
            (is_integer && *value >= 0.0 && *value <= u32::MAX as f64).then(|| *value as u32)
        }
        LooseNumber::Text(text) => text.trim().parse::<u32>().ok(),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn page_or_first(page: Option<&LooseNumber>) -> u32 {
    page.and_then(LooseNumber::positive_integer)
        .and_then(|page| u32::try_from(page).ok())
        .unwrap_or(1)
}

/// How a tool names the media it acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Token to resolve against the session's last search.
    Reference(String),
    Explicit { kind: MediaKind, id: u64 },
}

/// Shared selector fields of `get_media_details` and `request_media`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct MediaSelectorParams {
    /// Refers to an entry of this session's last `search_media` result: "first", "second",
    /// "third", "last", or a 1-based position like "2". Takes priority over media_type/media_id.
    #[serde(default)]
    pub reference: Option<LooseToken>,
    /// "movie" or "tv" (also accepts "movies", "tvshow", "tv show"). Needed without a reference.
    #[serde(default, alias = "mediaType")]
    pub media_type: Option<String>,
    /// TMDB id of the item, as number or string. Needed without a reference.
    #[serde(default, alias = "mediaId")]
    pub media_id: Option<LooseNumber>,
}

impl MediaSelectorParams {
    /// A non-blank reference always wins, even when an explicit pair is present too.
    pub fn normalize(&self) -> Result<Selector, ToolError> {
        if let Some(reference) = self.reference.as_ref().and_then(LooseToken::text) {
            return Ok(Selector::Reference(reference));
        }

        let id = self.media_id.as_ref().and_then(LooseNumber::positive_integer);
        let raw_kind = non_blank(self.media_type.as_deref());
        let (Some(id), Some(raw_kind)) = (id, raw_kind) else {
            return Err(ToolError::MissingSelector);
        };
        let kind = MediaKind::parse_loose(raw_kind)
            .ok_or_else(|| ToolError::InvalidMediaKind(raw_kind.to_owned()))?;
        Ok(Selector::Explicit { kind, id })
    }
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SearchMediaParams {
    /// Free-text query for movies and TV shows.
    pub query: String,
    /// Result page, defaults to 1.
    #[serde(default)]
    pub page: Option<LooseNumber>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCommand {
    pub query: String,
    pub page: u32,
}

impl SearchMediaParams {
    pub fn normalize(&self) -> Result<SearchCommand, ToolError> {
        let query = non_blank(Some(&self.query)).ok_or(ToolError::EmptyQuery)?;
        Ok(SearchCommand { query: query.to_owned(), page: page_or_first(self.page.as_ref()) })
    }
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct MediaDetailsParams {
    #[serde(flatten)]
    pub selector: MediaSelectorParams,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct RequestMediaParams {
    #[serde(flatten)]
    pub selector: MediaSelectorParams,
    /// TV only: season numbers to request, as a list or a comma-separated string. Omit for
    /// all seasons.
    #[serde(default)]
    pub seasons: Option<LooseSeasons>,
    /// Request the 4K version.
    #[serde(default, alias = "is4k")]
    pub is_4k: Option<LooseBool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestCommand {
    pub selector: Selector,
    /// Empty means "all seasons".
    pub seasons: Vec<u32>,
    pub is_4k: bool,
}

impl RequestMediaParams {
    pub fn normalize(&self) -> Result<RequestCommand, ToolError> {
        Ok(RequestCommand {
            selector: self.selector.normalize()?,
            seasons: self.seasons.as_ref().map(LooseSeasons::numbers).unwrap_or_default(),
            is_4k: flag(self.is_4k.as_ref()),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListRequestsParams {
    /// One of all, pending, approved, processing, available. Anything else means all.
    #[serde(default)]
    pub status: Option<String>,
    /// Result page, defaults to 1.
    #[serde(default)]
    pub page: Option<LooseNumber>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListRequestsCommand {
    pub filter: RequestFilter,
    pub page: u32,
}

impl ListRequestsParams {
    pub fn normalize(&self) -> ListRequestsCommand {
        ListRequestsCommand {
            filter: self.status.as_deref().map(RequestFilter::parse_or_all).unwrap_or_default(),
            page: page_or_first(self.page.as_ref()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct RequestIdParams {
    /// Overseerr request id (from `get_requests` or `request_media`).
    #[serde(default, alias = "requestId")]
    pub request_id: Option<LooseNumber>,
}

impl RequestIdParams {
    pub fn normalize(&self) -> Result<u64, ToolError> {
        self.request_id
            .as_ref()
            .and_then(LooseNumber::positive_integer)
            .ok_or(ToolError::MissingRequestId)
    }
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ClearSessionParams {
    /// Clear everything stored for this session, not only the last search results.
    #[serde(default)]
    pub all: Option<LooseBool>,
}

impl ClearSessionParams {
    pub fn clears_everything(&self) -> bool {
        flag(self.all.as_ref())
    }
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ApprovePendingParams {
    /// Position in the pending request list: "first", "second", "third", "last", or a 1-based
    /// number like 2.
    #[serde(default, alias = "index", alias = "requestIndex")]
    pub reference: Option<LooseToken>,
    /// Page of the pending list the position refers to, defaults to 1.
    #[serde(default)]
    pub page: Option<LooseNumber>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovePendingCommand {
    pub reference: String,
    pub page: u32,
}

impl ApprovePendingParams {
    pub fn normalize(&self) -> Result<ApprovePendingCommand, ToolError> {
        let reference = self
            .reference
            .as_ref()
            .and_then(LooseToken::text)
            .ok_or(ToolError::MissingPendingReference)?;
        Ok(ApprovePendingCommand { reference, page: page_or_first(self.page.as_ref()) })
    }
}
