// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-OverseerrMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of overseerr-mcp and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! overseerr-mcp CLI entrypoint.
//!
//! By default this serves MCP over stdio (one client, one session). Use `--http` to serve
//! streamable HTTP at `http://127.0.0.1:<port>/mcp` instead, where every MCP session gets
//! its own remembered search results.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use clap::Parser;
use log::LevelFilter;
use rmcp::transport::{
    streamable_http_server::session::local::LocalSessionManager, StreamableHttpServerConfig,
    StreamableHttpService,
};

use overseerr_mcp::catalog::OverseerrClient;
use overseerr_mcp::config::{parse_log_level, Config};
use overseerr_mcp::mcp::OverseerrMcp;
use overseerr_mcp::model::SessionId;
use overseerr_mcp::store::SessionStore;
use overseerr_mcp::tools::Toolbox;

const DEFAULT_STDIO_SESSION: &str = "stdio";

#[derive(Debug, Parser)]
#[command(name = "overseerr-mcp")]
#[command(
    about = "MCP server for searching and requesting media through Overseerr",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Serve streamable HTTP instead of stdio
    #[arg(long)]
    http: bool,

    /// HTTP port (overrides MCP_SERVER_PORT)
    #[arg(long, requires = "http")]
    port: Option<u16>,

    /// Session id used for remembered search results in stdio mode
    #[arg(long, default_value = DEFAULT_STDIO_SESSION, conflicts_with = "http")]
    session_id: String,

    /// Log level: debug, info, warn, error (overrides LOG_LEVEL)
    #[arg(long, value_parser = parse_level_arg)]
    log_level: Option<LevelFilter>,
}

fn parse_level_arg(raw: &str) -> Result<LevelFilter, String> {
    parse_log_level(raw).map_err(|err| err.to_string())
}

/// Logs go to stderr only; stdout carries the stdio protocol. `RUST_LOG` replaces the
/// default filter entirely.
fn init_logging(level: LevelFilter) {
    let default_filter = format!("warn,overseerr_mcp={}", level.to_string().to_lowercase());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();
}

fn build_server(config: &Config) -> anyhow::Result<OverseerrMcp> {
    let client = OverseerrClient::new(&config.overseerr_url, config.api_key.clone())
        .context("failed to create Overseerr client")?;
    let sessions = Arc::new(SessionStore::new(config.max_sessions));
    Ok(OverseerrMcp::new(Toolbox::new(Arc::new(client), sessions)))
}

async fn serve_http(mcp: OverseerrMcp, port: u16) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind 127.0.0.1:{port}"))?;
    log::info!("serving MCP over streamable HTTP at http://{}/mcp", listener.local_addr()?);

    let config =
        StreamableHttpServerConfig { stateful_mode: true, ..StreamableHttpServerConfig::default() };
    let shutdown_token = config.cancellation_token.clone();

    let session_manager = Arc::new(LocalSessionManager::default());
    let mcp_service = StreamableHttpService::new(move || Ok(mcp.clone()), session_manager, config);
    let router = Router::new().nest_service("/mcp", mcp_service);

    let ctrl_c_token = shutdown_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("shutting down");
            ctrl_c_token.cancel();
        }
    });

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown_token.cancelled().await })
        .await
        .context("MCP HTTP server error")
}

fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    log::info!("starting overseerr-mcp ({config})");
    let mcp = build_server(&config)?;
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

    if cli.http {
        let port = cli.port.unwrap_or(config.port);
        return runtime.block_on(serve_http(mcp, port));
    }

    let session_id = SessionId::new(cli.session_id).context("invalid --session-id")?;
    log::info!("serving MCP over stdio (session '{session_id}')");
    runtime.block_on(mcp.with_fixed_session(session_id).serve_stdio())?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let config = Config::from_env();
    let level = cli
        .log_level
        .or_else(|| config.as_ref().ok().map(|config| config.log_level))
        .unwrap_or(LevelFilter::Info);
    init_logging(level);

    let config = match config {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}");
            eprintln!("overseerr-mcp: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(cli, config) {
        log::error!("{err:#}");
        eprintln!("overseerr-mcp: {err:#}");
        std::process::exit(1);
    }
}
