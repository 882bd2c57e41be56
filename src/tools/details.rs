// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-OverseerrMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of overseerr-mcp and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::input::MediaDetailsParams;
use super::output::MediaDetailsOutput;
use super::{ToolError, Toolbox};
use crate::catalog::wire::MediaDetails;
use crate::model::{media_status_label, MediaKind, SessionId};

fn shape(kind: MediaKind, details: MediaDetails) -> MediaDetailsOutput {
    let (title, original_title, release_date) = match kind {
        MediaKind::Movie => (details.title, details.original_title, details.release_date),
        MediaKind::Tv => (details.name, details.original_name, details.first_air_date),
    };
    let runtime = match kind {
        MediaKind::Movie => details.runtime,
        MediaKind::Tv => details.episode_run_time.first().copied(),
    };
    let availability = details.media_info.as_ref().and_then(|info| info.status);
    let availability_4k = details.media_info.as_ref().and_then(|info| info.status4k);

    MediaDetailsOutput {
        id: details.id,
        tmdb_id: details.id,
        media_type: kind,
        title,
        original_title,
        release_date,
        overview: details.overview,
        status: details.status,
        poster_url: details.poster_url,
        backdrop_url: details.backdrop_url,
        runtime,
        number_of_seasons: details.number_of_seasons.filter(|_| kind == MediaKind::Tv),
        genres: details.genres.into_iter().map(|genre| genre.name).collect(),
        vote_average: details.vote_average,
        popularity: details.popularity,
        availability: availability.map(|status| media_status_label(status).to_owned()),
        availability_4k: availability_4k.map(|status| media_status_label(status).to_owned()),
    }
}

impl Toolbox {
    pub async fn media_details(
        &self,
        session_id: Option<&SessionId>,
        params: &MediaDetailsParams,
    ) -> Result<MediaDetailsOutput, ToolError> {
        let selector = params.selector.normalize()?;
        let subject = self.resolve_subject(session_id, &selector)?;
        log::debug!("get_media_details {} {}", subject.kind, subject.id);

        let details = self
            .catalog()
            .media_details(subject.kind, subject.id)
            .await
            .map_err(ToolError::upstream("get media details"))?;
        Ok(shape(subject.kind, details))
    }
}
