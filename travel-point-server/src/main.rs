use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use travel_point_server::config::ServerConfig;
use travel_point_server::reference::ReferenceData;
use travel_point_server::resolver::Resolver;
use travel_point_server::web::{AppState, create_router};

const DEFAULT_FILTER: &str = "travel_point_server=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        .with(tracing_subscriber::fmt::layer().compact())
        .init();

    let config = ServerConfig::from_env()?;

    let data = match &config.data_path {
        Some(path) => {
            info!(path = %path.display(), "loading reference data");
            ReferenceData::load(path)?
        }
        None => ReferenceData::builtin()?,
    };
    info!(
        municipality = data.municipality(),
        towns = data.towns().len(),
        facilities = data.facilities().len(),
        "reference data loaded"
    );

    for entry in data.towns() {
        for issue in entry.coverage_issues() {
            warn!(town = entry.town(), %issue, "range table coverage");
        }
    }

    let state = AppState::new(Resolver::new(Arc::new(data)));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "travel point server listening on http://{}", config.addr);

    axum::serve(listener, app).await?;
    Ok(())
}
