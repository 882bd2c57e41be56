// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-OverseerrMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of overseerr-mcp and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Per-session memory.
//!
//! Nothing here survives a restart; the store only bridges consecutive tool calls of the same
//! conversation.

pub mod session_store;

pub use session_store::{SessionKey, SessionStore, SessionValue, DEFAULT_MAX_SESSIONS};
