use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::info;

use service::restaurant::domain::{CreateRestaurantInput, RatingUpdate};

use super::respond;
use crate::{errors::JsonApiError, state::ServerState};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CuisineQuery {
    pub cuisine: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteQuery {
    #[serde(rename = "ID")]
    pub id: Option<String>,
}

fn required(value: Option<String>, param: &str) -> Result<String, JsonApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(JsonApiError::bad_request(format!("Please provide the '{param}' query parameter."))),
    }
}

#[utoipa::path(
    post, path = "/newRestaurant", tag = "restaurants",
    request_body = crate::openapi::CreateRestaurantRequest,
    responses(
        (status = 201, description = "Restaurant Added", body = crate::openapi::RestaurantDoc),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Duplicate review in initial reviews")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<CreateRestaurantInput>, JsonRejection>,
) -> Result<impl IntoResponse, JsonApiError> {
    let Json(input) = payload?;
    let saved = state
        .restaurants
        .create_restaurant(input)
        .await
        .map_err(|e| JsonApiError::from_service(e, "Error in adding Restaurant"))?;
    Ok(respond(StatusCode::CREATED, "Restaurant Added", saved))
}

#[utoipa::path(
    get, path = "/getRestaurantByName", tag = "restaurants",
    params(NameQuery),
    responses(
        (status = 200, description = "Restaurants with exactly this name (possibly none)", body = [crate::openapi::RestaurantDoc]),
        (status = 400, description = "Missing name")
    )
)]
pub async fn by_name(
    State(state): State<ServerState>,
    query: Result<Query<NameQuery>, QueryRejection>,
) -> Result<impl IntoResponse, JsonApiError> {
    let Query(q) = query?;
    let name = required(q.name, "name")?;
    let found = state
        .restaurants
        .find_by_name(&name)
        .await
        .map_err(|e| JsonApiError::from_service(e, "Error in finding Restaurant By name"))?;
    Ok(respond(StatusCode::OK, "Restaurant Found", found))
}

#[utoipa::path(
    get, path = "/getCuisine", tag = "restaurants",
    params(CuisineQuery),
    responses(
        (status = 200, description = "Restaurant Found By Cuisine", body = [crate::openapi::RestaurantDoc]),
        (status = 404, description = "No restaurants for this cuisine")
    )
)]
pub async fn by_cuisine(
    State(state): State<ServerState>,
    query: Result<Query<CuisineQuery>, QueryRejection>,
) -> Result<impl IntoResponse, JsonApiError> {
    let Query(q) = query?;
    let cuisine = required(q.cuisine, "cuisine")?;
    let found = state
        .restaurants
        .find_by_cuisine(&cuisine)
        .await
        .map_err(|e| JsonApiError::from_service(e, "Error in finding Restaurant By Cuisine"))?;
    if found.is_empty() {
        return Err(JsonApiError::not_found("No restaurants found for the specified cuisine."));
    }
    Ok(respond(StatusCode::OK, "Restaurant Found By Cuisine", found))
}

#[utoipa::path(
    post, path = "/deleteById", tag = "restaurants",
    params(DeleteQuery),
    responses(
        (status = 200, description = "Restaurant Deleted Successfully", body = crate::openapi::RestaurantDoc),
        (status = 400, description = "Malformed or missing ID"),
        (status = 404, description = "No restaurant with this ID")
    )
)]
pub async fn delete_by_id(
    State(state): State<ServerState>,
    query: Result<Query<DeleteQuery>, QueryRejection>,
) -> Result<impl IntoResponse, JsonApiError> {
    let Query(q) = query?;
    let id = required(q.id, "ID")?;
    let deleted = state
        .restaurants
        .delete_by_id(&id)
        .await
        .map_err(|e| JsonApiError::from_service(e, "Error in deleting Restaurant By ID"))?;
    Ok(respond(StatusCode::OK, "Restaurant Deleted Successfully", deleted))
}

#[utoipa::path(
    get, path = "/restaurantsByLocation/{location}", tag = "restaurants",
    params(("location" = String, Path, description = "Case-insensitive fragment of the address or city")),
    responses(
        (status = 200, description = "Restaurants fetched successfully.", body = [crate::openapi::RestaurantDoc]),
        (status = 404, description = "No restaurants at this location")
    )
)]
pub async fn by_location(
    State(state): State<ServerState>,
    Path(location): Path<String>,
) -> Result<impl IntoResponse, JsonApiError> {
    let found = state
        .restaurants
        .find_by_location(&location)
        .await
        .map_err(|e| JsonApiError::from_service(e, "Error fetching restaurants."))?;
    if found.is_empty() {
        return Err(JsonApiError::not_found("No restaurants found for the given location."));
    }
    Ok(respond(StatusCode::OK, "Restaurants fetched successfully.", found))
}

#[utoipa::path(
    post, path = "/restaurant/{id}", tag = "restaurants",
    params(("id" = String, Path, description = "Restaurant id")),
    request_body = crate::openapi::RatingUpdateRequest,
    responses(
        (status = 200, description = "Data updated successfully", body = crate::openapi::RestaurantDoc),
        (status = 400, description = "Rating missing or out of range"),
        (status = 404, description = "Restaurant not found with the given ID.")
    )
)]
pub async fn update_rating(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<RatingUpdate>, JsonRejection>,
) -> Result<impl IntoResponse, JsonApiError> {
    let Json(update) = payload?;
    let saved = state
        .restaurants
        .update_rating(&id, update)
        .await
        .map_err(|e| JsonApiError::from_service(e, "Error updating the restaurant details"))?;
    Ok(respond(StatusCode::OK, "Data updated successfully", saved))
}

#[utoipa::path(
    get, path = "/restaurants/rating/{minRating}", tag = "restaurants",
    params(("minRating" = f64, Path, description = "Inclusive lower bound on rating")),
    responses(
        (status = 200, description = "Filtered restaurants fetched successfully.", body = [crate::openapi::RestaurantDoc]),
        (status = 400, description = "Invalid minRating value."),
        (status = 404, description = "Nothing rated that high")
    )
)]
pub async fn by_min_rating(
    State(state): State<ServerState>,
    Path(raw): Path<String>,
) -> Result<impl IntoResponse, JsonApiError> {
    let min: f64 = raw
        .trim()
        .parse()
        .map_err(|_| JsonApiError::bad_request("Invalid minRating value."))?;
    let found = state
        .restaurants
        .filter_by_min_rating(min)
        .await
        .map_err(|e| JsonApiError::from_service(e, "Invalid minRating value."))?;
    if found.is_empty() {
        return Err(JsonApiError::not_found(format!("No restaurants found with a rating of {min} or higher.")));
    }
    info!(min_rating = min, count = found.len(), "filtered restaurants by rating");
    Ok(respond(StatusCode::OK, "Filtered restaurants fetched successfully.", found))
}

#[utoipa::path(
    get, path = "/getRestaurants", tag = "restaurants",
    responses((status = 200, description = "All Restaurants Retrieved", body = [crate::openapi::RestaurantDoc]))
)]
pub async fn list_all(State(state): State<ServerState>) -> Result<impl IntoResponse, JsonApiError> {
    let all = state
        .restaurants
        .list_all()
        .await
        .map_err(|e| JsonApiError::from_service(e, "Error retrieving restaurants."))?;
    Ok(respond(StatusCode::OK, "All Restaurants Retrieved", all))
}
