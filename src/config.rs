// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-OverseerrMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of overseerr-mcp and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Process configuration from environment variables.

use std::fmt;
use std::num::NonZeroUsize;

use log::LevelFilter;
use reqwest::Url;
use thiserror::Error;

use crate::store::DEFAULT_MAX_SESSIONS;

pub const ENV_URL: &str = "OVERSEERR_URL";
pub const ENV_API_KEY: &str = "OVERSEERR_API_KEY";
pub const ENV_PORT: &str = "MCP_SERVER_PORT";
pub const ENV_MAX_SESSIONS: &str = "OVERSEERR_MCP_MAX_SESSIONS";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

pub const DEFAULT_URL: &str = "http://localhost:5055";
pub const DEFAULT_PORT: u16 = 3200;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("OVERSEERR_API_KEY environment variable is required")]
    MissingApiKey,
    #[error("{name} must be an http(s) URL, got '{value}'")]
    InvalidUrl { name: &'static str, value: String },
    #[error("{name} must be a positive integer, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
    #[error("LOG_LEVEL must be one of debug, info, warn, error, got '{0}'")]
    InvalidLogLevel(String),
}

#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Overseerr root URL without trailing `/`.
    pub overseerr_url: String,
    pub api_key: String,
    pub port: u16,
    pub max_sessions: NonZeroUsize,
    pub log_level: LevelFilter,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name).map(|value| value.trim().to_owned()).filter(|value| !value.is_empty())
        };

        let overseerr_url = match read(ENV_URL) {
            Some(value) => parse_url(ENV_URL, &value)?,
            None => DEFAULT_URL.to_owned(),
        };
        let api_key = read(ENV_API_KEY).ok_or(ConfigError::MissingApiKey)?;
        let port = match read(ENV_PORT) {
            Some(value) => parse_port(ENV_PORT, &value)?,
            None => DEFAULT_PORT,
        };
        let max_sessions = match read(ENV_MAX_SESSIONS) {
            Some(value) => value
                .parse::<NonZeroUsize>()
                .map_err(|_| ConfigError::InvalidNumber { name: ENV_MAX_SESSIONS, value })?,
            None => NonZeroUsize::new(DEFAULT_MAX_SESSIONS).unwrap_or(NonZeroUsize::MIN),
        };
        let log_level = match read(ENV_LOG_LEVEL) {
            Some(value) => parse_log_level(&value)?,
            None => LevelFilter::Info,
        };

        Ok(Self { overseerr_url, api_key, port, max_sessions, log_level })
    }
}

pub(crate) fn parse_url(name: &'static str, value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim().trim_end_matches('/');
    let invalid = || ConfigError::InvalidUrl { name, value: value.to_owned() };
    let url = Url::parse(trimmed).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    Ok(trimmed.to_owned())
}

fn parse_port(name: &'static str, value: &str) -> Result<u16, ConfigError> {
    value
        .parse::<u16>()
        .ok()
        .filter(|port| *port > 0)
        .ok_or_else(|| ConfigError::InvalidNumber { name, value: value.to_owned() })
}

pub fn parse_log_level(value: &str) -> Result<LevelFilter, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" | "warning" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        _ => Err(ConfigError::InvalidLogLevel(value.to_owned())),
    }
}

/// Never prints the API key.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("overseerr_url", &self.overseerr_url)
            .field("api_key", &"[SET]")
            .field("port", &self.port)
            .field("max_sessions", &self.max_sessions)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "url={} api_key=[SET] port={} max_sessions={} log_level={}",
            self.overseerr_url, self.port, self.max_sessions, self.log_level
        )
    }
}
