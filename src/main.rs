//! Pokedex CLI - Explore PokeAPI location areas and catch Pokemon
//!
//! An interactive prompt that pages through location areas, lists the Pokemon
//! found in each, and lets the user catch and inspect them. API responses are
//! cached in memory and swept once they outlive the cache interval.

use std::io;
use std::process;

use clap::Parser;
use tokio::io::BufReader;
use tracing::info;

use pokedex::app::App;
use pokedex::cache::Cache;
use pokedex::cli::{Cli, StartupConfig};
use pokedex::data::PokeApiClient;
use pokedex::logging::init_tracing;
use pokedex::repl;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(2);
        }
    };

    init_tracing(&config.log_level);
    info!(
        base_url = %config.base_url,
        cache_interval_secs = config.cache_interval.as_secs(),
        page_size = config.page_size,
        "Starting Pokedex"
    );

    let cache = Cache::new(config.cache_interval)?;
    let client = PokeApiClient::new(cache).with_base_url(config.base_url);
    let mut app = App::new(client, config.page_size);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();
    repl::run(&mut app, stdin, &mut stdout).await?;

    // Stop the sweeper before the runtime goes away
    app.into_client().into_cache().shutdown().await;

    Ok(())
}
