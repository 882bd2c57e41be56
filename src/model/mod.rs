// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-OverseerrMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of overseerr-mcp and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Sessions own at most one search snapshot; references resolve into that snapshot.

pub mod ids;
pub mod media;
pub mod reference;
pub mod request;

pub use ids::{IdError, SessionId};
pub use media::{MediaKind, MediaSummary, ParseMediaKindError, ResultSnapshot};
pub use reference::{resolve, resolve_index, ParseReferenceError, Reference, ResolveError};
pub use request::{media_status_label, request_status_label, RequestFilter, ReviewDecision};
