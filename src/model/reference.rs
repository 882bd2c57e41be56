// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-OverseerrMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of overseerr-mcp and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Ordinal references into a stored search snapshot.
//!
//! A reference is a short token like `first`, `last` or `3` that names an entry of the most
//! recent search instead of its TMDB id. Parsing and resolution are split: [`Reference`]
//! captures which rule matched, [`resolve`] applies it to a snapshot.

use std::str::FromStr;

use thiserror::Error;

use super::media::MediaSummary;

/// A parsed reference token. Keywords win over numbers; the first rule that matches is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    First,
    Second,
    Third,
    Last,
    /// 1-based position, as typed by the caller (may be out of range or non-positive).
    Ordinal(i64),
}

impl Reference {
    /// Zero-based index into a snapshot of `len` entries, or `None` when out of range.
    pub fn index(self, len: usize) -> Option<usize> {
        let index = match self {
            Self::First => Some(0),
            Self::Second => Some(1),
            Self::Third => Some(2),
            Self::Last => len.checked_sub(1),
            Self::Ordinal(value) => usize::try_from(value).ok().and_then(|v| v.checked_sub(1)),
        };
        index.filter(|index| *index < len)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized reference '{0}'")]
pub struct ParseReferenceError(String);

impl FromStr for Reference {
    type Err = ParseReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        match token.as_str() {
            "first" => Ok(Self::First),
            "second" => Ok(Self::Second),
            "third" => Ok(Self::Third),
            "last" => Ok(Self::Last),
            _ => token
                .parse::<i64>()
                .map(Self::Ordinal)
                .map_err(|_| ParseReferenceError(s.trim().to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("No previous search results found. Please search for a movie or TV show first.")]
    NoPriorSearch,
    #[error(
        "Invalid reference '{reference}'. Available options: 1-{len}, or 'first', 'second', 'third', 'last'."
    )]
    InvalidReference { reference: String, len: usize },
}

/// Resolve `token` against `snapshot`.
///
/// An absent or empty snapshot is always [`ResolveError::NoPriorSearch`], whatever the token.
pub fn resolve<'a>(
    snapshot: Option<&'a [MediaSummary]>,
    token: &str,
) -> Result<&'a MediaSummary, ResolveError> {
    let snapshot = snapshot.unwrap_or_default();
    Ok(&snapshot[resolve_index(token, snapshot.len())?])
}

/// Zero-based index `token` names in a list of `len` entries. An empty list is
/// [`ResolveError::NoPriorSearch`].
pub fn resolve_index(token: &str, len: usize) -> Result<usize, ResolveError> {
    if len == 0 {
        return Err(ResolveError::NoPriorSearch);
    }
    let invalid = || ResolveError::InvalidReference { reference: token.trim().to_owned(), len };
    let reference = token.parse::<Reference>().map_err(|_| invalid())?;
    reference.index(len).ok_or_else(invalid)
}
