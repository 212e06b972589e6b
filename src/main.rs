//! brutalist-registry-mcp: MCP server for the brutalist UI component registry
//!
//! Exposes registry browsing, search, and documentation tools to AI
//! assistants over MCP stdio transport.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use brutalist_registry_mcp::config;
use brutalist_registry_mcp::docs::DocsExtractor;
use brutalist_registry_mcp::mcp::server::McpServer;
use brutalist_registry_mcp::registry::{resolve_base_url, RegistryClient, ResponseCache};

/// MCP server for the brutalist UI component registry.
///
/// Provides registry browsing, component search, install commands, and
/// documentation extraction tools to AI assistants.
#[derive(Parser, Debug)]
#[command(name = "brutalist-registry-mcp")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Registry base URL (overrides config and environment)
    #[arg(long, value_name = "URL")]
    registry_url: Option<String>,

    /// Documentation pages directory (overrides config)
    #[arg(long, value_name = "DIR")]
    docs_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN, // Default to warn for unknown levels
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Entry point for the brutalist-registry-mcp server.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration (the file is optional; defaults apply)
    let cfg = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    // Display GPL license notice (required by GPLv3 Section 5d)
    eprintln!(
        "brutalist-registry-mcp {}  Copyright (C) 2026  The Embedded Society",
        env!("CARGO_PKG_VERSION")
    );
    eprintln!("This program comes with ABSOLUTELY NO WARRANTY.");
    eprintln!("This is free software, licensed under GPL-3.0-or-later.");
    eprintln!("Source: {}", env!("CARGO_PKG_REPOSITORY"));
    eprintln!();

    // Resolve the registry endpoint once; it is fixed for the process lifetime
    let explicit_url = args
        .registry_url
        .as_deref()
        .or(cfg.registry.base_url.as_deref());
    let base_url = resolve_base_url(explicit_url);

    let docs_root = args
        .docs_dir
        .or(cfg.docs.root)
        .unwrap_or_else(|| PathBuf::from("docs"));

    info!(
        version = env!("CARGO_PKG_VERSION"),
        registry = %base_url,
        docs_root = %docs_root.display(),
        cache_ttl_secs = cfg.registry.cache_ttl_secs,
        "Starting brutalist-registry-mcp server"
    );

    let cache = ResponseCache::new(Duration::from_secs(cfg.registry.cache_ttl_secs));
    let registry = RegistryClient::new(base_url, cache);
    let extractor = DocsExtractor::new(docs_root);

    let mut server = McpServer::new(registry, extractor);

    info!("MCP server ready, waiting for client connection...");

    // Run the server
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "Failed to create Tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(server.run());

    match result {
        Ok(()) => {
            info!("Server shut down gracefully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Server error");
            ExitCode::FAILURE
        }
    }
}
