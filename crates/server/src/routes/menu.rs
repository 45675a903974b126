use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use service::restaurant::domain::NewMenuItem;

use super::respond;
use crate::{errors::JsonApiError, state::ServerState};

#[derive(Debug, Default, Deserialize)]
pub struct RemoveDishBody {
    #[serde(default)]
    pub name: Option<String>,
}

#[utoipa::path(
    post, path = "/addMenu/{id}", tag = "menu",
    params(("id" = String, Path, description = "Restaurant id")),
    request_body = crate::openapi::NewMenuItemRequest,
    responses(
        (status = 201, description = "Menu added successfully to restaurant", body = crate::openapi::RestaurantDoc),
        (status = 400, description = "Invalid dish or id"),
        (status = 404, description = "Restaurant not found.")
    )
)]
pub async fn add_dish(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<NewMenuItem>, JsonRejection>,
) -> Result<impl IntoResponse, JsonApiError> {
    let Json(item) = payload?;
    let saved = state
        .restaurants
        .add_menu_item(&id, item)
        .await
        .map_err(|e| JsonApiError::from_service(e, "Unable to add menu to the restaurant."))?;
    Ok(respond(StatusCode::CREATED, "Menu added successfully to restaurant", saved))
}

#[utoipa::path(
    post, path = "/removeDish/{id}", tag = "menu",
    params(("id" = String, Path, description = "Restaurant id")),
    request_body = crate::openapi::RemoveDishRequest,
    responses(
        (status = 200, description = "Menu Deleted Successfully; also when no dish matched", body = crate::openapi::RestaurantDoc),
        (status = 400, description = "Missing dish name or malformed id"),
        (status = 404, description = "Restaurant not found.")
    )
)]
pub async fn remove_dish(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<RemoveDishBody>, JsonRejection>,
) -> Result<impl IntoResponse, JsonApiError> {
    let Json(body) = payload?;
    let saved = state
        .restaurants
        .remove_menu_item(&id, body.name.as_deref())
        .await
        .map_err(|e| JsonApiError::from_service(e, "Error in deleting menu from restaurant."))?;
    Ok(respond(StatusCode::OK, "Menu Deleted Successfully", saved))
}
