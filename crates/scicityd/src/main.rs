//! Scicity Daemon - chatbot guide for Science City Kolkata
//!
//! Answers venue and general-science questions through the Gemini API and
//! walks visitors through a short planning dialogue for a personalized
//! itinerary.

use anyhow::Result;
use scicityd::config::GuideConfig;
use scicityd::server;
use scicity_common::venue::VenueRecord;
use tracing::{info, warn, Level};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("Scicity Daemon v{} starting", env!("CARGO_PKG_VERSION"));

    let config = GuideConfig::load();
    info!(
        "gateway configured with {} API key(s), model {}",
        config.api_keys.len(),
        config.model
    );

    let venue = match VenueRecord::load(&config.venue_data_file) {
        Ok(venue) => {
            info!("venue data loaded from {}", config.venue_data_file.display());
            venue
        }
        Err(e) => {
            warn!("{}, using built-in venue record", e);
            VenueRecord::default()
        }
    };

    server::run(config, venue).await
}
