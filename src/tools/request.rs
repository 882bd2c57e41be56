// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-OverseerrMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of overseerr-mcp and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::input::RequestMediaParams;
use super::output::{CreatedMediaInfo, RequestCreatedOutput};
use super::{ToolError, Toolbox};
use crate::catalog::wire::NewRequest;
use crate::model::{request_status_label, MediaKind, SessionId};

/// Upstream wording for a duplicate request.
const ALREADY_EXISTS: &str = "already exists";

impl Toolbox {
    /// File a request for the resolved subject. Seasons only apply to series; an empty list
    /// requests all of them.
    pub async fn request_media(
        &self,
        session_id: Option<&SessionId>,
        params: &RequestMediaParams,
    ) -> Result<RequestCreatedOutput, ToolError> {
        let command = params.normalize()?;
        let subject = self.resolve_subject(session_id, &command.selector)?;

        let seasons = match subject.kind {
            MediaKind::Tv if !command.seasons.is_empty() => Some(command.seasons),
            _ => None,
        };
        let body = NewRequest {
            media_type: subject.kind,
            media_id: subject.id,
            seasons,
            is_4k: command.is_4k,
        };
        log::debug!("request_media {body:?}");

        let created = self.catalog().create_request(&body).await.map_err(|source| {
            if source.mentions(ALREADY_EXISTS) {
                log::info!("{} {} was already requested", subject.kind, subject.id);
                ToolError::AlreadyRequested { kind: subject.kind, message: source.to_string() }
            } else {
                ToolError::upstream("request media")(source)
            }
        })?;

        let media = created.media.as_ref();
        Ok(RequestCreatedOutput {
            success: true,
            message: format!(
                "Successfully requested {} with ID {}",
                subject.kind.noun(),
                subject.id
            ),
            request_id: created.id,
            status: created.status.map(request_status_label).unwrap_or("unknown").to_owned(),
            media_info: CreatedMediaInfo {
                title: media
                    .and_then(|media| media.title.clone().or_else(|| media.name.clone()))
                    .or(subject.title),
                poster_url: media.and_then(|media| media.poster_url.clone()),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::tools::input::{LooseSeasons, MediaSelectorParams};
    use crate::tools::test_support::{
        new_runtime, session, summaries, toolbox_with, CatalogCall, FakeCatalog,
        CREATED_REQUEST_ID,
    };

    fn explicit(kind: &str, id: u64) -> MediaSelectorParams {
        MediaSelectorParams {
            reference: None,
            media_type: Some(kind.to_owned()),
            media_id: Some(id.into()),
        }
    }

    fn reference(token: &str) -> MediaSelectorParams {
        MediaSelectorParams { reference: Some(token.into()), ..MediaSelectorParams::default() }
    }

    fn created_bodies(catalog: &FakeCatalog) -> Vec<NewRequest> {
        catalog
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                CatalogCall::CreateRequest(body) => Some(body),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn last_without_prior_search_fails_but_explicit_ids_succeed() {
        let runtime = new_runtime();
        let (toolbox, catalog) = toolbox_with(FakeCatalog::default());
        let s1 = session("s1");

        let params = RequestMediaParams { selector: reference("last"), ..Default::default() };
        let err = runtime
            .block_on(toolbox.request_media(Some(&s1), &params))
            .expect_err("no prior search");
        assert!(matches!(err, ToolError::NoPriorSearch));
        assert!(catalog.calls().is_empty());

        let params = RequestMediaParams { selector: explicit("movie", 603), ..Default::default() };
        let output =
            runtime.block_on(toolbox.request_media(Some(&s1), &params)).expect("explicit request");
        assert!(output.success);
        assert_eq!(output.request_id, CREATED_REQUEST_ID);
        assert_eq!(output.status, "pending");
        assert_eq!(output.message, "Successfully requested movie with ID 603");
    }

    #[test]
    fn reference_resolves_kind_and_id_from_the_snapshot() {
        let runtime = new_runtime();
        let (toolbox, catalog) = toolbox_with(FakeCatalog::default());
        toolbox.sessions().store_search(&session("s1"), Arc::from(summaries(2)));

        let params = RequestMediaParams {
            selector: reference("second"),
            seasons: Some(LooseSeasons::Text("1, 2".to_owned())),
            is_4k: Some(true.into()),
        };
        let output = runtime
            .block_on(toolbox.request_media(Some(&session("s1")), &params))
            .expect("request");

        assert_eq!(output.message, "Successfully requested TV show with ID 101");
        assert_eq!(
            created_bodies(&catalog),
            vec![NewRequest {
                media_type: MediaKind::Tv,
                media_id: 101,
                seasons: Some(vec![1, 2]),
                is_4k: true,
            }]
        );
    }

    #[test]
    fn seasons_are_dropped_for_movies() {
        let runtime = new_runtime();
        let (toolbox, catalog) = toolbox_with(FakeCatalog::default());

        let params = RequestMediaParams {
            selector: explicit("movie", 603),
            seasons: Some(LooseSeasons::Text("1".to_owned())),
            is_4k: None,
        };
        runtime.block_on(toolbox.request_media(None, &params)).expect("request");

        let bodies = created_bodies(&catalog);
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0].seasons, None);
        assert!(!bodies[0].is_4k);
    }

    #[test]
    fn duplicate_request_is_already_requested() {
        let runtime = new_runtime();
        let catalog = FakeCatalog::default()
            .with_request_failure(409, r#"{"message":"Request for this media already exists."}"#);
        let (toolbox, _) = toolbox_with(catalog);

        let params = RequestMediaParams { selector: explicit("tv", 1399), ..Default::default() };
        let err =
            runtime.block_on(toolbox.request_media(None, &params)).expect_err("already requested");

        match err {
            ToolError::AlreadyRequested { kind, message } => {
                assert_eq!(kind, MediaKind::Tv);
                assert!(message.contains("already exists"));
            }
            other => panic!("expected AlreadyRequested, got {other:?}"),
        }
    }

    #[test]
    fn other_failures_stay_upstream_errors() {
        let runtime = new_runtime();
        let catalog = FakeCatalog::default().with_request_failure(403, "quota exceeded");
        let (toolbox, _) = toolbox_with(catalog);

        let params = RequestMediaParams { selector: explicit("movie", 603), ..Default::default() };
        let err = runtime.block_on(toolbox.request_media(None, &params)).expect_err("quota");

        assert!(matches!(err, ToolError::Upstream { action: "request media", .. }));
        assert_eq!(
            err.to_string(),
            "Failed to request media: Overseerr API error (403): quota exceeded"
        );
    }

    #[test]
    fn unknown_kind_is_rejected_before_calling_out() {
        let runtime = new_runtime();
        let (toolbox, catalog) = toolbox_with(FakeCatalog::default());

        let params = RequestMediaParams { selector: explicit("music", 1), ..Default::default() };
        let err = runtime.block_on(toolbox.request_media(None, &params)).expect_err("bad kind");

        assert!(matches!(err, ToolError::InvalidMediaKind(_)));
        assert!(catalog.calls().is_empty());
    }
}
