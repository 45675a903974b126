//! Bulk-import restaurants from a JSON array file.
//!
//! Usage: `seed [PATH]`; without PATH the configured `seed.path` is used.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};

use service::restaurant::{
    repo::seaorm::SeaOrmRestaurantRepository, seed::load_seed_file, RestaurantRepository, RestaurantService,
};

async fn run(path_arg: Option<String>) -> anyhow::Result<usize> {
    let cfg = configs::AppConfig::load_or_env().context("loading configuration")?;
    let path = path_arg.unwrap_or_else(|| cfg.seed.path.clone());

    let records = load_seed_file(&path).await?;
    let db = models::db::connect_and_migrate(&cfg.database).await?;
    let repo: Arc<dyn RestaurantRepository> = Arc::new(SeaOrmRestaurantRepository::new(db));
    let svc = RestaurantService::new(repo).with_max_write_attempts(cfg.service.max_write_attempts);

    let seeded = svc.seed(records).await?;
    info!(event = "seed_done", path = %path, count = seeded.len(), "database seeding complete");
    Ok(seeded.len())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_from_env();

    match run(std::env::args().nth(1)).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(event = "seed_failed", error = %format!("{e:#}"), "error seeding database");
            ExitCode::FAILURE
        }
    }
}
