use async_trait::async_trait;
use uuid::Uuid;

use models::restaurant::Model;

use crate::errors::ServiceError;

/// Persistence seam for restaurant aggregates.
///
/// List-style queries return aggregates in insertion order.
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    async fn insert(&self, restaurant: Model) -> Result<Model, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<Model>, ServiceError>;
    async fn list(&self) -> Result<Vec<Model>, ServiceError>;
    /// Exact, case-sensitive name match.
    async fn find_by_name(&self, name: &str) -> Result<Vec<Model>, ServiceError>;
    /// Exact, case-sensitive cuisine match.
    async fn find_by_cuisine(&self, cuisine: &str) -> Result<Vec<Model>, ServiceError>;
    /// Case-insensitive substring match against address or city.
    async fn find_by_location(&self, term: &str) -> Result<Vec<Model>, ServiceError>;
    async fn find_by_min_rating(&self, min: f64) -> Result<Vec<Model>, ServiceError>;
    /// Store `restaurant` only if the stored version still equals `expected_version`.
    /// `Ok(None)` means the row moved on (or vanished) since it was read.
    async fn save_versioned(&self, restaurant: Model, expected_version: i64) -> Result<Option<Model>, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<Option<Model>, ServiceError>;
}

/// In-memory repository for tests and local runs without Postgres.
pub mod memory {
    use super::*;
    use std::sync::Mutex;

    use chrono::Utc;

    #[derive(Default)]
    pub struct InMemoryRestaurantRepository {
        rows: Mutex<Vec<Model>>,
    }

    impl InMemoryRestaurantRepository {
        pub fn new() -> Self { Self::default() }

        fn rows(&self) -> Result<std::sync::MutexGuard<'_, Vec<Model>>, ServiceError> {
            self.rows.lock().map_err(|_| ServiceError::Db("restaurant store poisoned".into()))
        }

        fn filtered(&self, pred: impl Fn(&Model) -> bool) -> Result<Vec<Model>, ServiceError> {
            Ok(self.rows()?.iter().filter(|r| pred(r)).cloned().collect())
        }
    }

    #[async_trait]
    impl RestaurantRepository for InMemoryRestaurantRepository {
        async fn insert(&self, restaurant: Model) -> Result<Model, ServiceError> {
            let mut rows = self.rows()?;
            if rows.iter().any(|r| r.id == restaurant.id) {
                return Err(ServiceError::Db(format!("duplicate restaurant id {}", restaurant.id)));
            }
            rows.push(restaurant.clone());
            Ok(restaurant)
        }

        async fn get(&self, id: Uuid) -> Result<Option<Model>, ServiceError> {
            Ok(self.rows()?.iter().find(|r| r.id == id).cloned())
        }

        async fn list(&self) -> Result<Vec<Model>, ServiceError> {
            Ok(self.rows()?.clone())
        }

        async fn find_by_name(&self, name: &str) -> Result<Vec<Model>, ServiceError> {
            self.filtered(|r| r.name == name)
        }

        async fn find_by_cuisine(&self, cuisine: &str) -> Result<Vec<Model>, ServiceError> {
            self.filtered(|r| r.cuisine == cuisine)
        }

        async fn find_by_location(&self, term: &str) -> Result<Vec<Model>, ServiceError> {
            let needle = term.to_lowercase();
            self.filtered(|r| r.address.to_lowercase().contains(&needle) || r.city.to_lowercase().contains(&needle))
        }

        async fn find_by_min_rating(&self, min: f64) -> Result<Vec<Model>, ServiceError> {
            self.filtered(|r| r.rating >= min)
        }

        async fn save_versioned(&self, mut restaurant: Model, expected_version: i64) -> Result<Option<Model>, ServiceError> {
            let mut rows = self.rows()?;
            let Some(slot) = rows.iter_mut().find(|r| r.id == restaurant.id) else {
                return Ok(None);
            };
            if slot.version != expected_version {
                return Ok(None);
            }
            restaurant.version = expected_version + 1;
            restaurant.created_at = slot.created_at;
            restaurant.updated_at = Utc::now().into();
            *slot = restaurant.clone();
            Ok(Some(restaurant))
        }

        async fn delete(&self, id: Uuid) -> Result<Option<Model>, ServiceError> {
            let mut rows = self.rows()?;
            Ok(rows.iter().position(|r| r.id == id).map(|idx| rows.remove(idx)))
        }
    }
}
