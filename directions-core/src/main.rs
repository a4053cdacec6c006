use std::error::Error;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use url::Url;

use directions_core::geocode::{CacheConfig, CachedGeocoder, PeliasClient, PeliasConfig};
use directions_core::orchestrator::{Directions, DirectionsConfig, Signal};
use directions_core::permalink;
use directions_core::routing::{ValhallaClient, ValhallaConfig};

/// Base URL used to parse bare query strings given on the command line.
const BASE_URL: &str = "http://localhost/";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "directions_core=info".into()),
        )
        .init();

    let Some(arg) = std::env::args().nth(1) else {
        eprintln!("usage: directions-core <permalink URL or query string>");
        eprintln!("  e.g. directions-core 'profile=bicycle&wps=8.68,50.11,8.57,50.05'");
        std::process::exit(2);
    };
    let url = match Url::parse(&arg) {
        Ok(url) => url,
        Err(_) => Url::parse(BASE_URL)?.join(&format!("?{}", arg.trim_start_matches('?')))?,
    };

    let mut pelias_config = match std::env::var("PELIAS_URL") {
        Ok(base) => PeliasConfig::new(base),
        Err(_) => {
            warn!("PELIAS_URL not set, using the default local geocoder");
            PeliasConfig::default()
        }
    };
    if let Ok(key) = std::env::var("PELIAS_API_KEY") {
        pelias_config = pelias_config.with_api_key(key);
    }
    let valhalla_config = match std::env::var("VALHALLA_URL") {
        Ok(base) => ValhallaConfig::new(base),
        Err(_) => ValhallaConfig::default(),
    };

    let geocoder = CachedGeocoder::new(PeliasClient::new(pelias_config)?, &CacheConfig::default());
    let router = ValhallaClient::new(valhalla_config)?;

    let (directions, mut signals) = Directions::new(geocoder, router, DirectionsConfig::default());
    let outcome = directions.load_url(&url).await?;
    info!(
        waypoints = outcome.total,
        resolved = outcome.resolved,
        "trip restored"
    );

    while let Ok(signal) = signals.try_recv() {
        match signal {
            Signal::Notify(n) => eprintln!("{}: {}", n.title, n.description),
            Signal::FitViewport(rect) => {
                let (min, max) = (rect.min(), rect.max());
                println!(
                    "Extent: {:.6},{:.6} to {:.6},{:.6}",
                    min.y, min.x, max.y, max.x
                );
            }
            _ => {}
        }
    }

    let trip = directions.snapshot().await;
    println!("Profile: {}", trip.profile);
    for wp in trip.waypoints.iter().filter(|wp| wp.is_active()) {
        println!("  {}. {}", wp.index + 1, wp.label);
    }
    for route in trip.routes.iter() {
        match route.summary {
            Some(summary) => println!(
                "{}: {:.1} km, {} min",
                route.provider,
                summary.length_km,
                (summary.time_secs / 60.0).round()
            ),
            None => println!("{}: no route", route.provider),
        }
    }
    let mut shared = url.clone();
    permalink::apply_to_url(&mut shared, trip.profile, &trip.waypoints.to_vec());
    println!("Permalink: {shared}");

    Ok(())
}
