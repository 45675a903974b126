use std::collections::HashSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::restaurant::{self, validate_price, validate_rating, validate_required, Menu, MenuItem, Review, Reviews};

use crate::errors::ServiceError;

/// Creation input. Text fields are optional at the wire level so a missing
/// field surfaces as a validation error rather than a decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateRestaurantInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub menu: Vec<NewMenuItem>,
    #[serde(default)]
    pub reviews: Vec<NewReview>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewMenuItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewReview {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

/// Body of the rating update; any other field sent alongside is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RatingUpdate {
    #[serde(default)]
    pub rating: Option<f64>,
}

impl NewMenuItem {
    pub fn into_item(self) -> Result<MenuItem, ServiceError> {
        let name = validate_required("menu item name", self.name.as_deref())?.to_string();
        let price = self.price.ok_or_else(|| ServiceError::Validation("menu item price is required".into()))?;
        let price = validate_price(price)?;
        Ok(MenuItem { id: Uuid::new_v4(), name, price })
    }
}

impl NewReview {
    pub fn into_review(self) -> Result<Review, ServiceError> {
        let rating = self.rating.ok_or_else(|| ServiceError::Validation("review rating is required".into()))?;
        let review = Review {
            username: self.username.unwrap_or_default(),
            comment: self.comment.unwrap_or_default(),
            rating,
        };
        restaurant::validate_review(&review)?;
        Ok(review)
    }
}

impl RatingUpdate {
    pub fn validated(&self) -> Result<f64, ServiceError> {
        let rating = self.rating.ok_or_else(|| ServiceError::Validation("rating is required".into()))?;
        Ok(validate_rating("rating", rating)?)
    }
}

impl CreateRestaurantInput {
    /// Validate everything and build a fresh aggregate with a generated id.
    ///
    /// Initial reviews must come from distinct usernames; when any are given
    /// the stored rating is their rounded mean, not the supplied `rating`.
    pub fn into_model(self) -> Result<restaurant::Model, ServiceError> {
        let name = validate_required("name", self.name.as_deref())?.to_string();
        let cuisine = validate_required("cuisine", self.cuisine.as_deref())?.to_string();
        let address = validate_required("address", self.address.as_deref())?.to_string();
        let city = validate_required("city", self.city.as_deref())?.to_string();
        let mut rating = validate_rating("rating", self.rating.unwrap_or(restaurant::MIN_RATING))?;

        let menu = self
            .menu
            .into_iter()
            .map(NewMenuItem::into_item)
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = HashSet::new();
        let mut reviews = Vec::with_capacity(self.reviews.len());
        for r in self.reviews {
            let review = r.into_review()?;
            if !seen.insert(review.username.clone()) {
                return Err(ServiceError::DuplicateReview(format!(
                    "user '{}' has already reviewed this restaurant",
                    review.username
                )));
            }
            reviews.push(review);
        }
        if let Some(avg) = restaurant::average_rating(&reviews) {
            rating = avg;
        }

        let now = Utc::now().into();
        Ok(restaurant::Model {
            id: Uuid::new_v4(),
            name,
            cuisine,
            address,
            city,
            rating,
            menu: Menu(menu),
            reviews: Reviews(reviews),
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }
}
