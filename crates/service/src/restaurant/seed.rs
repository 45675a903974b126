use std::path::Path;

use tracing::info;

use super::domain::CreateRestaurantInput;
use crate::errors::ServiceError;

/// Read a JSON array of restaurant documents for bulk import.
pub async fn load_seed_file(path: impl AsRef<Path>) -> Result<Vec<CreateRestaurantInput>, ServiceError> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ServiceError::Io(format!("reading {}: {e}", path.display())))?;
    let records = parse_seed(&raw)?;
    info!(event = "seed_file_loaded", path = %path.display(), count = records.len());
    Ok(records)
}

pub fn parse_seed(raw: &str) -> Result<Vec<CreateRestaurantInput>, ServiceError> {
    serde_json::from_str(raw).map_err(|e| ServiceError::Validation(format!("malformed seed data: {e}")))
}
