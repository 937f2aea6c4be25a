use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use trip_server::locations::{LocationClient, LocationClientConfig};
use trip_server::mock::MockCollaborators;
use trip_server::planner::{DEFAULT_TIER, PlannerConfig};
use trip_server::pricing::{PricingClient, PricingConfig};
use trip_server::web::{AppState, Collaborators, create_router};

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

fn env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Build the live HTTP collaborators from the environment.
fn live_collaborators() -> Collaborators {
    let mut location_config = LocationClientConfig::default();
    if let Some(url) = env("LOCATION_API_URL") {
        location_config = LocationClientConfig::new(url);
    }
    let locations = LocationClient::new(location_config).expect("Failed to create location client");

    let server_token = env("PRICING_SERVER_TOKEN").unwrap_or_else(|| {
        warn!("PRICING_SERVER_TOKEN not set. Pricing calls will fail.");
        String::new()
    });
    let mut pricing_config = PricingConfig::new(server_token);
    if let Some(url) = env("PRICING_API_URL") {
        pricing_config = pricing_config.with_base_url(url);
    }
    match (env("PRICING_ACCESS_TOKEN"), env("PRICING_PRODUCT_ID")) {
        (Some(token), Some(product)) => {
            pricing_config = pricing_config.with_ride_requests(token, product);
        }
        _ => warn!("PRICING_ACCESS_TOKEN or PRICING_PRODUCT_ID not set. Trip requests will fail."),
    }
    let pricing = PricingClient::new(pricing_config).expect("Failed to create pricing client");

    Collaborators::Live { locations, pricing }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("trip_server=info".parse().expect("valid directive")),
        )
        .init();

    let collaborators = match env("TRIP_MOCK_DATA") {
        Some(path) => {
            let mock = MockCollaborators::load(&path).expect("Failed to load mock data");
            info!(%path, locations = mock.len(), "using mock collaborators");
            Collaborators::Mock(mock)
        }
        None => live_collaborators(),
    };

    let tier = env("PRICING_TIER").unwrap_or_else(|| DEFAULT_TIER.to_string());
    let config = PlannerConfig::new(tier);

    let state = AppState::new(collaborators, config);
    let app = create_router(state);

    let addr: SocketAddr = env("TRIP_LISTEN_ADDR")
        .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
        .parse()
        .expect("TRIP_LISTEN_ADDR must be a socket address");

    info!(%addr, "trip planner listening");
    info!("POST /trips               - Plan a trip");
    info!("GET  /trips/:id           - Check a trip");
    info!("PUT  /trips/:id/request   - Request the next leg");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
