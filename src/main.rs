mod backend;
mod compare;
mod config;
mod filters;
mod listing;
mod models;

use std::sync::Arc;

use backend::RestBackend;
use compare::{load_comparison, parse_ids_param, AddOutcome, CompareStore};
use config::Config;
use filters::FilterState;
use listing::{FeedState, ListingFeed};
use tracing::{info, warn, Level};
use tracing_subscriber;

/// Pages fetched per run; the portal UI loads more on scroll instead
const MAX_PAGES: usize = 5;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("🏠 Estate Lens - listing & compare engine");
    info!("==========================================");
    info!("");

    let config = Config::load();

    // Filter comes from the first argument as a listing-page query string,
    // e.g. "city=Cairo&bedrooms=3&sortBy=price_asc"
    let filter = FilterState::from_query_string(&std::env::args().nth(1).unwrap_or_default());
    info!("Active filter: \"{}\"", filter.to_query_string());

    let backend = Arc::new(RestBackend::new(&config)?);
    let mut feed = ListingFeed::new(backend.clone(), config.page_size);
    feed.set_filter(filter);

    let mut pages = 0;
    while pages < MAX_PAGES && feed.has_more() {
        feed.load_more().await;
        pages += 1;
        if let FeedState::Error(message) = feed.state() {
            warn!("Listing fetch failed: {}", message);
            break;
        }
    }

    info!(
        "\n✅ Loaded {} of {} listings\n",
        feed.items().len(),
        feed.total_count().unwrap_or(feed.items().len() as u64)
    );

    for (i, listing) in feed.items().iter().enumerate() {
        println!("{}. {} ({} EGP)", i + 1, listing.address, listing.price);
        println!(
            "   {} bd, {} ba, {} sqm",
            listing.bedrooms, listing.bathrooms, listing.sqm
        );
        if let Some(area) = &listing.location.area {
            println!("   Area: {}", area);
        }
        println!("   ID: {}", listing.id);
        if !listing.tags.is_empty() {
            println!("   Tags: {}", listing.tags.join(", "));
        }
        println!();
    }

    // Select the first two listings for comparison
    let mut store = match &config.compare_file {
        Some(path) => CompareStore::with_persistence(config.compare_cap, path.clone()),
        None => CompareStore::new(config.compare_cap),
    };
    store.clear();
    for listing in feed.items() {
        if store.add(&listing.id) == AddOutcome::LimitReached {
            break;
        }
    }
    info!("Compare tray: {}/{} selected", store.len(), store.cap());

    if let Some(path) = &config.compare_file {
        info!("💾 Compare selection saved to {:?}", path);
    }

    // An explicit second argument ("id1,id2") compares those ids instead,
    // like the comparison page's ids parameter
    let ids: Vec<String> = match std::env::args().nth(2) {
        Some(raw) => parse_ids_param(&raw),
        None => store.ids().to_vec(),
    };

    match load_comparison(backend.as_ref(), &ids, config.compare_mode).await {
        Ok(comparison) if comparison.records.len() == 2 => {
            let left = &comparison.records[0];
            let right = &comparison.records[1];
            println!("Comparing {} vs {}", left.address, right.address);
            println!();
            for row in &comparison.rows {
                let marker = if row.differs { "≠" } else { " " };
                println!("{} {:<14} {:<28} {:<28}", marker, row.label, row.left, row.right);
            }
        }
        Ok(_) => {
            info!("Nothing to diff yet ({} of 2 properties selected)", ids.len());
        }
        Err(e) => warn!("Comparison unavailable: {}", e),
    }

    Ok(())
}
