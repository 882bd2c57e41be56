// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-OverseerrMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of overseerr-mcp and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! overseerr-mcp: search and request media on an Overseerr instance over MCP.
//!
//! Search results are remembered per MCP session so later calls can say "the second one"
//! instead of repeating TMDB ids.

pub mod catalog;
pub mod config;
pub mod mcp;
pub mod model;
pub mod store;
pub mod tools;
