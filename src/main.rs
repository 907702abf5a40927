use std::env;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use dotenvy::dotenv;
use ebay_resell::{
    AggregateResult, Condition, FinderConfig, SearchAggregator, SearchQuery, SearchSession,
    SearchState,
};
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;

// ==================== LOGGER ====================
fn configure_logger() -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env()?;
    tracing_subscriber::fmt()
        .compact()
        .with_target(false)
        .with_env_filter(filter)
        .init();
    Ok(())
}

// ==================== RENDERING ====================
fn render(keyword: &str, result: &AggregateResult) {
    println!("{}", "=".repeat(80));
    println!("Results for \"{}\"", keyword);
    println!("{}", "=".repeat(80));
    match result.active_total_entries {
        Some(total) => println!("Active Listings:    {} (of {})", result.active_count, total),
        None => println!("Active Listings:    {}", result.active_count),
    }
    println!("Sold Items:         {}", result.sold_count);
    println!("Average Sold Price: ${:.2}", result.average_sold_price);
    println!();
    println!("Recent Sold Listings");
    println!("{}", "-".repeat(80));
    for listing in &result.sold_listings {
        println!("{}", listing.title);
        match listing.end_time {
            Some(ended) => println!(
                "  ${:.2}  ended {}",
                listing.price,
                ended.format("%Y-%m-%d %H:%M UTC")
            ),
            None => println!("  ${:.2}", listing.price),
        }
        println!("  {}", listing.url);
    }
}

// ==================== ENTRY POINT ====================
async fn run() -> Result<()> {
    let keyword = env::var("SEARCH_KEYWORD").unwrap_or_default();
    let condition: Condition = env::var("SEARCH_CONDITION").unwrap_or_default().parse()?;
    let as_json = env::var("OUTPUT_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let config = FinderConfig::from_env()?;
    info!("Finding endpoint: {}", config.endpoint);
    let session = SearchSession::new(Arc::new(SearchAggregator::with_http(config)?));

    session
        .submit(SearchQuery::new(keyword.clone(), condition))
        .await;

    match session.snapshot() {
        SearchState::Idle => {
            warn!("SEARCH_KEYWORD is empty, nothing to search for");
            Ok(())
        }
        SearchState::Ready { result, .. } => {
            if as_json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                render(&keyword, &result);
            }
            Ok(())
        }
        SearchState::Failed { message, .. } => Err(anyhow!(message)),
        SearchState::InFlight { .. } => Err(anyhow!("search did not settle")),
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    if let Err(e) = configure_logger() {
        eprintln!("Failed to configure logging: {}", e);
    }
    if let Err(e) = run().await {
        eprintln!("\nFatal error: {}", e);
        std::process::exit(1);
    }
}
