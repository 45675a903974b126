use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::restaurant::{
    repo::seaorm::SeaOrmRestaurantRepository, seed::load_seed_file, RestaurantRepository,
};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address: {e}")))
}

/// Connect, migrate, optionally seed, and return the router plus bind address.
pub async fn build_app(cfg: &AppConfig) -> Result<(Router, SocketAddr), StartupError> {
    let db = models::db::connect_and_migrate(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    let repo: Arc<dyn RestaurantRepository> = Arc::new(SeaOrmRestaurantRepository::new(db));
    let state = ServerState::new(repo, cfg.service.max_write_attempts);

    if cfg.seed.on_startup {
        let records = load_seed_file(&cfg.seed.path).await?;
        let seeded = state.restaurants.seed(records).await?;
        info!(event = "seeded_on_startup", count = seeded.len(), path = %cfg.seed.path);
    }

    let app = routes::build_router(state, build_cors());
    Ok((app, bind_addr(cfg)?))
}

/// Public entry: load configuration, build the app and serve HTTP.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();

    let cfg = AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    if cfg.seed.on_startup {
        warn!(path = %cfg.seed.path, "seed.on_startup is set; records will be inserted again on every start");
    }

    let (app, addr) = build_app(&cfg).await?;
    info!(%addr, "starting restaurant api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
