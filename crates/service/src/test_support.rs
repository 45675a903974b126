#![cfg(test)]
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

use configs::DatabaseConfig;
use models::db::connect_with_config;

static MIGRATED: OnceCell<()> = OnceCell::const_new();

fn db_tests_enabled() -> bool {
    std::env::var("SKIP_DB_TESTS").is_err() && std::env::var("DATABASE_URL").is_ok()
}

/// Fresh connection to a migrated test database, or `None` when database
/// tests are disabled (`SKIP_DB_TESTS` set or `DATABASE_URL` unset).
pub async fn get_db() -> Result<Option<DatabaseConnection>, anyhow::Error> {
    if !db_tests_enabled() {
        return Ok(None);
    }
    let mut cfg = DatabaseConfig::from_env();
    cfg.min_connections = 1;

    MIGRATED
        .get_or_try_init(|| async {
            let db = connect_with_config(&cfg).await?;
            migration::Migrator::up(&db, None).await?;
            Ok::<(), anyhow::Error>(())
        })
        .await?;

    Ok(Some(connect_with_config(&cfg).await?))
}
