// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-OverseerrMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of overseerr-mcp and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The actions behind the MCP tools.
//!
//! A [`Toolbox`] owns the catalog handle and the session store. Every action normalizes its
//! parameters first (see [`input`]), resolves the subject (reference into the session's last
//! search, or an explicit kind/id pair), talks to the catalog and shapes a serializable
//! response (see [`output`]). Transport concerns (session id extraction, result rendering)
//! live in `crate::mcp`.

pub mod input;
pub mod output;

mod clear;
mod details;
mod request;
mod requests;
mod search;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};
use crate::model::{resolve, MediaKind, ResolveError, SessionId};
use crate::store::SessionStore;

use input::Selector;

pub use search::{TMDB_BACKDROP_BASE, TMDB_POSTER_BASE};

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("No previous search results found. Please search for a movie or TV show first.")]
    NoPriorSearch,
    #[error(
        "Invalid reference '{reference}'. Available options: 1-{len}, or 'first', 'second', 'third', 'last'."
    )]
    InvalidReference { reference: String, len: usize },
    #[error(
        "Either provide a reference (e.g. 'first', '2', 'last') or both mediaType and mediaId."
    )]
    MissingSelector,
    #[error("Invalid media type: {0}. Must be 'movie' or 'tv'.")]
    InvalidMediaKind(String),
    #[error("Search query cannot be empty")]
    EmptyQuery,
    #[error("A numeric requestId is required.")]
    MissingRequestId,
    #[error("Provide the position of a pending request (e.g. 'first', '2', 'last').")]
    MissingPendingReference,
    #[error("No pending requests found.")]
    NoPendingRequests,
    #[error("Failed to {action}: {source}")]
    Upstream {
        action: &'static str,
        #[source]
        source: CatalogError,
    },
    #[error("This {} has already been requested or is already available", .kind.noun())]
    AlreadyRequested { kind: MediaKind, message: String },
}

impl ToolError {
    pub(crate) fn upstream(action: &'static str) -> impl FnOnce(CatalogError) -> Self {
        move |source| {
            log::warn!("failed to {action}: {source}");
            Self::Upstream { action, source }
        }
    }
}

impl From<ResolveError> for ToolError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NoPriorSearch => Self::NoPriorSearch,
            ResolveError::InvalidReference { reference, len } => {
                Self::InvalidReference { reference, len }
            }
        }
    }
}

/// Media an action applies to, after reference resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub kind: MediaKind,
    pub id: u64,
    /// Known when the subject came from a stored search.
    pub title: Option<String>,
}

/// Explicit registry of the actions, built once at startup.
#[derive(Clone)]
pub struct Toolbox {
    catalog: Arc<dyn Catalog>,
    sessions: Arc<SessionStore>,
}

impl Toolbox {
    pub fn new(catalog: Arc<dyn Catalog>, sessions: Arc<SessionStore>) -> Self {
        Self { catalog, sessions }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    fn catalog(&self) -> &dyn Catalog {
        self.catalog.as_ref()
    }

    /// Turn a selector into a concrete subject. References are resolved against the session's
    /// last search; a call without a session sees no search at all.
    pub fn resolve_subject(
        &self,
        session_id: Option<&SessionId>,
        selector: &Selector,
    ) -> Result<Subject, ToolError> {
        match selector {
            Selector::Explicit { kind, id } => Ok(Subject { kind: *kind, id: *id, title: None }),
            Selector::Reference(token) => {
                let snapshot =
                    session_id.and_then(|session_id| self.sessions.last_search(session_id));
                let entry = resolve(snapshot.as_deref(), token)?;
                log::debug!(
                    "resolved reference '{token}' to {} {} ({})",
                    entry.media_type,
                    entry.id,
                    entry.title
                );
                Ok(Subject {
                    kind: entry.media_type,
                    id: entry.id,
                    title: Some(entry.title.clone()),
                })
            }
        }
    }
}
