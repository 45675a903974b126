use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use models::restaurant::{parse_id, validate_required, Model, Review};

use super::domain::{CreateRestaurantInput, NewMenuItem, NewReview, RatingUpdate};
use super::repository::RestaurantRepository;
use crate::errors::ServiceError;

pub const DEFAULT_MAX_WRITE_ATTEMPTS: u32 = 5;

/// Restaurant business service, independent of the web framework.
///
/// Mutations are read-modify-write cycles checked against the aggregate's
/// `version`; a cycle that loses a race is retried up to
/// `max_write_attempts` times before failing with [`ServiceError::Conflict`].
pub struct RestaurantService<R: RestaurantRepository + ?Sized> {
    repo: Arc<R>,
    max_write_attempts: u32,
}

impl<R: RestaurantRepository + ?Sized> RestaurantService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo, max_write_attempts: DEFAULT_MAX_WRITE_ATTEMPTS }
    }

    pub fn with_max_write_attempts(mut self, attempts: u32) -> Self {
        self.max_write_attempts = attempts.max(1);
        self
    }

    /// Validate and store a new restaurant.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::restaurant::{RestaurantService, domain::CreateRestaurantInput};
    /// use service::restaurant::repository::memory::InMemoryRestaurantRepository;
    /// let svc = RestaurantService::new(Arc::new(InMemoryRestaurantRepository::new()));
    /// let input = CreateRestaurantInput {
    ///     name: Some("Punjabi Dhaba".into()),
    ///     cuisine: Some("Punjabi".into()),
    ///     address: Some("Urban Estate".into()),
    ///     city: Some("Phagwara".into()),
    ///     ..Default::default()
    /// };
    /// let created = tokio_test::block_on(svc.create_restaurant(input)).unwrap();
    /// assert_eq!(created.rating, 0.0);
    /// ```
    #[instrument(skip(self, input))]
    pub async fn create_restaurant(&self, input: CreateRestaurantInput) -> Result<Model, ServiceError> {
        let model = input.into_model()?;
        let saved = self.repo.insert(model).await?;
        info!(event = "restaurant_created", id = %saved.id, name = %saved.name);
        Ok(saved)
    }

    pub async fn get(&self, id: &str) -> Result<Model, ServiceError> {
        let id = parse_id(id)?;
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("restaurant"))
    }

    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Model>, ServiceError> {
        validate_required("name", Some(name))?;
        self.repo.find_by_name(name).await
    }

    #[instrument(skip(self))]
    pub async fn find_by_cuisine(&self, cuisine: &str) -> Result<Vec<Model>, ServiceError> {
        validate_required("cuisine", Some(cuisine))?;
        self.repo.find_by_cuisine(cuisine).await
    }

    #[instrument(skip(self))]
    pub async fn find_by_location(&self, term: &str) -> Result<Vec<Model>, ServiceError> {
        validate_required("location", Some(term))?;
        self.repo.find_by_location(term).await
    }

    #[instrument(skip(self))]
    pub async fn filter_by_min_rating(&self, min: f64) -> Result<Vec<Model>, ServiceError> {
        if min.is_nan() {
            return Err(ServiceError::Validation("minimum rating must be a number".into()));
        }
        self.repo.find_by_min_rating(min).await
    }

    pub async fn list_all(&self) -> Result<Vec<Model>, ServiceError> {
        self.repo.list().await
    }

    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: &str) -> Result<Model, ServiceError> {
        let id = parse_id(id)?;
        let deleted = self.repo.delete(id).await?.ok_or_else(|| ServiceError::not_found("restaurant"))?;
        info!(event = "restaurant_deleted", id = %deleted.id, name = %deleted.name);
        Ok(deleted)
    }

    /// Overwrite only `rating`; every other field of the request is ignored.
    #[instrument(skip(self, update))]
    pub async fn update_rating(&self, id: &str, update: RatingUpdate) -> Result<Model, ServiceError> {
        let id = parse_id(id)?;
        let rating = update.validated()?;
        let saved = self
            .mutate(id, "update_rating", |r| {
                r.rating = rating;
                Ok(())
            })
            .await?;
        info!(event = "rating_updated", id = %saved.id, rating = saved.rating);
        Ok(saved)
    }

    #[instrument(skip(self, item))]
    pub async fn add_menu_item(&self, id: &str, item: NewMenuItem) -> Result<Model, ServiceError> {
        let id = parse_id(id)?;
        let item = item.into_item()?;
        let item_id = item.id;
        let saved = self
            .mutate(id, "add_menu_item", |r| {
                r.menu.0.push(item.clone());
                Ok(())
            })
            .await?;
        info!(event = "menu_item_added", id = %saved.id, item_id = %item_id);
        Ok(saved)
    }

    /// Remove every menu item named `name` (case-insensitive). Removing a dish
    /// that is not on the menu still succeeds and returns the restaurant.
    #[instrument(skip(self))]
    pub async fn remove_menu_item(&self, id: &str, name: Option<&str>) -> Result<Model, ServiceError> {
        let id = parse_id(id)?;
        let name = validate_required("name", name)?.to_string();
        let mut removed = 0;
        let saved = self
            .mutate(id, "remove_menu_item", |r| {
                removed = r.remove_menu_items_named(&name);
                Ok(())
            })
            .await?;
        info!(event = "menu_item_removed", id = %saved.id, dish = %name, removed);
        Ok(saved)
    }

    /// Append a review and re-derive the rating from all reviews.
    ///
    /// A username may review a restaurant once; later attempts fail with
    /// [`ServiceError::DuplicateReview`] whatever their content.
    #[instrument(skip(self, review))]
    pub async fn add_review(&self, id: &str, review: NewReview) -> Result<Model, ServiceError> {
        let id = parse_id(id)?;
        let review = review.into_review()?;
        let username = review.username.clone();
        let saved = self
            .mutate(id, "add_review", |r| {
                if r.has_review_from(&review.username) {
                    return Err(ServiceError::DuplicateReview(format!(
                        "user '{}' has already reviewed this restaurant",
                        review.username
                    )));
                }
                r.push_review(review.clone());
                Ok(())
            })
            .await?;
        info!(event = "review_added", id = %saved.id, username = %username, rating = saved.rating);
        Ok(saved)
    }

    pub async fn list_reviews(&self, id: &str) -> Result<Vec<Review>, ServiceError> {
        Ok(self.get(id).await?.reviews.0)
    }

    /// Import records one after another; the first failure aborts the run.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn seed(&self, records: Vec<CreateRestaurantInput>) -> Result<Vec<Model>, ServiceError> {
        let mut seeded = Vec::with_capacity(records.len());
        for record in records {
            let saved = self.repo.insert(record.into_model()?).await?;
            info!(event = "restaurant_seeded", id = %saved.id, name = %saved.name);
            seeded.push(saved);
        }
        info!(event = "seed_complete", count = seeded.len());
        Ok(seeded)
    }

    async fn mutate<F>(&self, id: Uuid, op: &'static str, mut apply: F) -> Result<Model, ServiceError>
    where
        F: FnMut(&mut Model) -> Result<(), ServiceError> + Send,
    {
        for attempt in 1..=self.max_write_attempts {
            let mut current = self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("restaurant"))?;
            let expected = current.version;
            apply(&mut current)?;
            if let Some(saved) = self.repo.save_versioned(current, expected).await? {
                return Ok(saved);
            }
            warn!(event = "write_conflict", id = %id, op, attempt, "restaurant changed underneath, retrying");
        }
        Err(ServiceError::Conflict(format!(
            "restaurant {id} kept changing; gave up after {} attempts",
            self.max_write_attempts
        )))
    }
}
