use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod menu;
pub mod restaurants;
pub mod reviews;

/// Success envelope: `{"message": ..., "data": ...}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: T,
}

pub(crate) fn respond<T: Serialize>(status: StatusCode, message: impl Into<String>, data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (status, Json(ApiResponse { message: message.into(), data }))
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the application router with tracing, CORS and the API docs mounted.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/newRestaurant", post(restaurants::create))
        .route("/getRestaurantByName", get(restaurants::by_name))
        .route("/getCuisine", get(restaurants::by_cuisine))
        .route("/deleteById", post(restaurants::delete_by_id))
        .route("/restaurantsByLocation/:location", get(restaurants::by_location))
        .route("/restaurant/:id", post(restaurants::update_rating))
        .route("/restaurants/rating/:minRating", get(restaurants::by_min_rating))
        .route("/getRestaurants", get(restaurants::list_all))
        .route("/addMenu/:id", post(menu::add_dish))
        .route("/removeDish/:id", post(menu::remove_dish))
        .route("/restaurant/:id/review", post(reviews::add_review))
        .route("/restaurants/:id/reviews", get(reviews::list_reviews))
        .with_state(state);

    api.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
