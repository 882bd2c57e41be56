// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-OverseerrMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of overseerr-mcp and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

/// Status filter accepted by `GET /request`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RequestFilter {
    #[default]
    All,
    Pending,
    Approved,
    Processing,
    Available,
}

impl RequestFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Processing => "processing",
            Self::Available => "available",
        }
    }

    /// Case-insensitive; anything unrecognized falls back to [`RequestFilter::All`].
    pub fn parse_or_all(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "pending" => Self::Pending,
            "approved" => Self::Approved,
            "processing" => Self::Processing,
            "available" => Self::Available,
            _ => Self::All,
        }
    }
}

impl fmt::Display for RequestFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Decline,
}

impl ReviewDecision {
    /// Path segment of `POST /request/{id}/{decision}`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Decline => "decline",
        }
    }

    pub fn past_tense(self) -> &'static str {
        match self {
            Self::Approve => "approved",
            Self::Decline => "declined",
        }
    }
}

/// Label for Overseerr's numeric `MediaRequestStatus`.
pub fn request_status_label(code: u8) -> &'static str {
    match code {
        1 => "pending",
        2 => "approved",
        3 => "declined",
        4 => "failed",
        5 => "completed",
        _ => "unknown",
    }
}

/// Label for Overseerr's numeric `MediaStatus` (availability on the media server).
pub fn media_status_label(code: u8) -> &'static str {
    match code {
        2 => "pending",
        3 => "processing",
        4 => "partially available",
        5 => "available",
        6 => "blacklisted",
        7 => "deleted",
        _ => "unknown",
    }
}
