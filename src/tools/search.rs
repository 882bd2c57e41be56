// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-OverseerrMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of overseerr-mcp and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use super::input::SearchMediaParams;
use super::output::{SearchHit, SearchOutput, SearchPageInfo};
use super::{ToolError, Toolbox};
use crate::catalog::wire::SearchResult;
use crate::model::{media_status_label, MediaSummary, ResultSnapshot, SessionId};

pub const TMDB_POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";
pub const TMDB_BACKDROP_BASE: &str = "https://image.tmdb.org/t/p/w1280";

fn tmdb_image(base: &str, path: Option<&str>) -> Option<String> {
    path.filter(|path| !path.trim().is_empty()).map(|path| format!("{base}{path}"))
}

/// `None` for results that are neither movie nor series.
fn summarize(result: &SearchResult) -> Option<MediaSummary> {
    let kind = result.kind()?;
    let title = result.display_title().unwrap_or("Untitled");
    let mut summary = MediaSummary::new(result.id, kind, title);
    summary.release_date =
        result.display_date().filter(|date| !date.is_empty()).map(ToOwned::to_owned);
    summary.overview = result.overview.clone().filter(|overview| !overview.trim().is_empty());
    summary.poster_url = tmdb_image(TMDB_POSTER_BASE, result.poster_path.as_deref());
    summary.backdrop_url = tmdb_image(TMDB_BACKDROP_BASE, result.backdrop_path.as_deref());
    summary.availability = result
        .media_info
        .as_ref()
        .and_then(|info| info.status)
        .map(|status| media_status_label(status).to_owned());
    Some(summary)
}

impl Toolbox {
    /// Search the catalog. With a session, the mapped results replace that session's last
    /// search even when there are none.
    pub async fn search_media(
        &self,
        session_id: Option<&SessionId>,
        params: &SearchMediaParams,
    ) -> Result<SearchOutput, ToolError> {
        let command = params.normalize()?;
        log::debug!("search_media {command:?}");

        let page = self
            .catalog()
            .search(&command.query, command.page)
            .await
            .map_err(ToolError::upstream("search media"))?;

        let snapshot: ResultSnapshot = page.results.iter().filter_map(summarize).collect();
        let remembered = match session_id {
            Some(session_id) => {
                self.sessions.store_search(session_id, Arc::clone(&snapshot));
                true
            }
            None => false,
        };

        let hint = match (remembered, snapshot.len()) {
            (false, _) | (true, 0) => None,
            (true, len) => Some(format!(
                "Refer to a result by position (1-{len}) or as 'first', 'second', 'third', 'last' \
                 in get_media_details or request_media."
            )),
        };

        Ok(SearchOutput {
            page_info: SearchPageInfo {
                page: page.page,
                total_pages: page.total_pages,
                total_results: page.total_results,
            },
            results: snapshot
                .iter()
                .enumerate()
                .map(|(index, media)| SearchHit { position: index + 1, media: media.clone() })
                .collect(),
            remembered,
            hint,
        })
    }
}
