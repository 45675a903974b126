//! Restaurant aggregate: one row holding the restaurant fields plus its
//! embedded menu and reviews.
//!
//! Validation lives here as plain functions so every write path can run
//! them before touching storage.

use sea_orm::{entity::prelude::*, FromJsonQueryResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "restaurant")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub cuisine: String,
    pub address: String,
    pub city: String,
    pub rating: f64,
    #[sea_orm(column_type = "JsonBinary")]
    pub menu: Menu,
    #[sea_orm(column_type = "JsonBinary")]
    pub reviews: Reviews,
    /// Bumped on every write; a write only applies against the version it read.
    pub version: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub username: String,
    pub comment: String,
    pub rating: f64,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct Menu(pub Vec<MenuItem>);

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct Reviews(pub Vec<Review>);

impl Model {
    pub fn has_review_from(&self, username: &str) -> bool {
        self.reviews.0.iter().any(|r| r.username == username)
    }

    /// Append a review and re-derive `rating` from all reviews.
    pub fn push_review(&mut self, review: Review) {
        self.reviews.0.push(review);
        if let Some(avg) = average_rating(&self.reviews.0) {
            self.rating = avg;
        }
    }

    /// Drop every menu item whose name matches case-insensitively; returns how many went.
    pub fn remove_menu_items_named(&mut self, name: &str) -> usize {
        let target = name.to_lowercase();
        let before = self.menu.0.len();
        self.menu.0.retain(|item| item.name.to_lowercase() != target);
        before - self.menu.0.len()
    }
}

/// Required text field: present and not blank.
pub fn validate_required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, ModelError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ModelError::Validation(format!("{field} is required"))),
    }
}

pub fn validate_rating(field: &str, value: f64) -> Result<f64, ModelError> {
    if !value.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&value) {
        return Err(ModelError::Validation(format!(
            "{field} must be between {MIN_RATING} and {MAX_RATING}, got {value}"
        )));
    }
    Ok(value)
}

/// Price sign is unconstrained; only NaN/infinity are rejected.
pub fn validate_price(value: f64) -> Result<f64, ModelError> {
    if !value.is_finite() {
        return Err(ModelError::Validation("price must be a finite number".into()));
    }
    Ok(value)
}

pub fn validate_review(review: &Review) -> Result<(), ModelError> {
    validate_required("username", Some(review.username.as_str()))?;
    validate_required("comment", Some(review.comment.as_str()))?;
    validate_rating("review rating", review.rating)?;
    Ok(())
}

pub fn parse_id(raw: &str) -> Result<Uuid, ModelError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ModelError::InvalidId(format!("'{raw}' is not a valid restaurant id")))
}

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Mean of review ratings rounded to one decimal; `None` with no reviews.
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let total: f64 = reviews.iter().map(|r| r.rating).sum();
    Some(round_to_tenth(total / reviews.len() as f64))
}
