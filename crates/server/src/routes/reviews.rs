use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use service::restaurant::domain::NewReview;

use super::respond;
use crate::{errors::JsonApiError, state::ServerState};

#[utoipa::path(
    post, path = "/restaurant/{id}/review", tag = "reviews",
    params(("id" = String, Path, description = "Restaurant id")),
    request_body = crate::openapi::NewReviewRequest,
    responses(
        (status = 200, description = "Review added successfully", body = crate::openapi::RestaurantDoc),
        (status = 400, description = "Invalid review or id"),
        (status = 404, description = "Restaurant not found"),
        (status = 409, description = "User has already reviewed this restaurant")
    )
)]
pub async fn add_review(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<NewReview>, JsonRejection>,
) -> Result<impl IntoResponse, JsonApiError> {
    let Json(review) = payload?;
    let saved = state
        .restaurants
        .add_review(&id, review)
        .await
        .map_err(|e| JsonApiError::from_service(e, "Review not added."))?;
    Ok(respond(StatusCode::OK, "Review added successfully", saved))
}

#[utoipa::path(
    get, path = "/restaurants/{id}/reviews", tag = "reviews",
    params(("id" = String, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Reviews fetched successfully", body = [crate::openapi::ReviewDoc]),
        (status = 404, description = "Restaurant doesn't exist")
    )
)]
pub async fn list_reviews(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, JsonApiError> {
    let reviews = state
        .restaurants
        .list_reviews(&id)
        .await
        .map_err(|e| JsonApiError::from_service(e, "No reviews found for the specified restaurant."))?;
    Ok(respond(StatusCode::OK, "Reviews fetched successfully", reviews))
}
