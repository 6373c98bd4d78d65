//! Pokedex CLI
//!
//! Interactive client for walking the PokeAPI location catalog, catching
//! Pokemon, and inspecting them. Responses are kept in an expiring cache.

mod commands;
mod repl;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pokedex_api::{ClientConfig, PokeApiClient};
use pokedex_cache::{CacheConfig, ExpiringCache};
use pokedex_core::constants::{
    DEFAULT_BASE_URL, DEFAULT_CACHE_TTL_SECONDS, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECONDS,
};

use crate::commands::{CommandTable, Session};

/// Pokedex - explore the Pokemon world from your terminal
#[derive(Parser)]
#[command(name = "pokedex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Seconds a cached response lives; also how often expired ones are swept
    #[arg(
        long,
        env = "POKEDEX_CACHE_TTL",
        default_value_t = DEFAULT_CACHE_TTL_SECONDS,
        allow_negative_numbers = true
    )]
    cache_ttl_seconds: i64,

    /// PokeAPI root URL
    #[arg(long, env = "POKEAPI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Location areas per map page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "pokedex=debug,info"
    } else {
        "pokedex=warn,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cache = ExpiringCache::with_config(&CacheConfig::from_secs(cli.cache_ttl_seconds))
        .context("Failed to initialise response cache")?;
    let cache = Arc::new(cache);

    let config = ClientConfig::new(cli.base_url)
        .with_page_size(cli.page_size)
        .with_timeout(cli.timeout);
    let client = PokeApiClient::new(config, Arc::clone(&cache))
        .context("Failed to create PokeAPI client")?;

    info!(ttl = ?cache.ttl(), "Pokedex starting");

    let table = CommandTable::standard();
    let mut session = Session::new(&client, rand::thread_rng()).with_progress(true);
    let mut stdout = std::io::stdout();

    let result = repl::run(&table, &mut session, BufReader::new(tokio::io::stdin()), &mut stdout).await;

    cache.shutdown().await;
    info!(stats = ?cache.stats(), "Pokedex stopped");

    result.context("Pokedex session failed")
}
