use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::{routes, state::ServerState};
use service::restaurant::repository::memory::InMemoryRestaurantRepository;

fn app() -> Router {
    let state = ServerState::new(Arc::new(InMemoryRestaurantRepository::new()), 5);
    routes::build_router(state, CorsLayer::very_permissive())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder.header("content-type", "application/json").body(Body::from(b.to_string()))?,
        None => builder.body(Body::empty())?,
    };
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, value))
}

async fn create(app: &Router, name: &str, cuisine: &str, address: &str, city: &str, rating: f64) -> anyhow::Result<String> {
    let body = json!({"name": name, "cuisine": cuisine, "address": address, "city": city, "rating": rating});
    let (status, v) = send(app, "POST", "/newRestaurant", Some(body)).await?;
    assert_eq!(status, StatusCode::CREATED);
    Ok(v["data"]["id"].as_str().unwrap_or_default().to_string())
}

#[tokio::test]
async fn health_ok() -> anyhow::Result<()> {
    let (status, v) = send(&app(), "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn create_returns_envelope_with_generated_id() -> anyhow::Result<()> {
    let app = app();
    let body = json!({
        "name": "Lajwaab Dhaba", "cuisine": "Desi Punjabi", "address": "Urban", "city": "Phagwara", "rating": 3,
        "menu": [{"name": "Dal Makhni", "price": 140}, {"name": "Tandoori Roti", "price": 8}]
    });
    let (status, v) = send(&app, "POST", "/newRestaurant", Some(body)).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(v["message"], "Restaurant Added");
    assert_eq!(v["data"]["name"], "Lajwaab Dhaba");
    assert_eq!(v["data"]["rating"], 3.0);
    assert_eq!(v["data"]["menu"].as_array().map(Vec::len), Some(2));
    assert!(Uuid::parse_str(v["data"]["id"].as_str().unwrap_or_default()).is_ok());
    Ok(())
}

#[tokio::test]
async fn create_missing_field_is_400() -> anyhow::Result<()> {
    let (status, v) = send(&app(), "POST", "/newRestaurant", Some(json!({"name": "A", "cuisine": "C", "address": "1 St"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["message"], "Error in adding Restaurant");
    assert!(v["details"].as_str().unwrap_or_default().contains("city"));
    Ok(())
}

async fn send_raw(app: &Router, content_type: Option<&str>, body: &str) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method("POST").uri("/newRestaurant");
    if let Some(ct) = content_type {
        builder = builder.header("content-type", ct);
    }
    let resp = app.clone().oneshot(builder.body(Body::from(body.to_string()))?).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

#[tokio::test]
async fn malformed_json_is_400_envelope() -> anyhow::Result<()> {
    let (status, v) = send_raw(&app(), Some("application/json"), "{not json").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["message"], "Invalid JSON body");
    Ok(())
}

#[tokio::test]
async fn wrong_typed_field_is_400() -> anyhow::Result<()> {
    let body = r#"{"name": "A", "cuisine": "C", "address": "1 St", "city": "Town", "rating": "high"}"#;
    let (status, v) = send_raw(&app(), Some("application/json"), body).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["message"], "Invalid JSON body");
    Ok(())
}

#[tokio::test]
async fn missing_content_type_is_400() -> anyhow::Result<()> {
    let body = r#"{"name": "A", "cuisine": "C", "address": "1 St", "city": "Town"}"#;
    let (status, v) = send_raw(&app(), None, body).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["message"], "Invalid JSON body");
    Ok(())
}

#[tokio::test]
async fn lookups_by_name_cuisine_location() -> anyhow::Result<()> {
    let app = app();
    create(&app, "Punjabi Dhaba", "Punjabi", "12 Urban Estate", "Phagwara", 4.0).await?;
    create(&app, "Noodle Bar", "Chinese", "Mall Road", "Ludhiana", 3.0).await?;

    let (status, v) = send(&app, "GET", "/getRestaurantByName?name=Punjabi%20Dhaba", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["data"].as_array().map(Vec::len), Some(1));

    let (status, v) = send(&app, "GET", "/getRestaurantByName?name=punjabi%20dhaba", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["data"], json!([]));

    let (status, _) = send(&app, "GET", "/getRestaurantByName", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, v) = send(&app, "GET", "/getCuisine?cuisine=Chinese", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["data"][0]["name"], "Noodle Bar");

    let (status, v) = send(&app, "GET", "/getCuisine?cuisine=Antarctican", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(v["message"], "No restaurants found for the specified cuisine.");

    let (status, v) = send(&app, "GET", "/restaurantsByLocation/urban", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["data"][0]["name"], "Punjabi Dhaba");

    let (status, v) = send(&app, "GET", "/restaurantsByLocation/LUDHI", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["data"][0]["name"], "Noodle Bar");

    let (status, _) = send(&app, "GET", "/restaurantsByLocation/Atlantis", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn rating_filter_and_update() -> anyhow::Result<()> {
    let app = app();
    let low = create(&app, "A", "C", "1 St", "Town", 1.0).await?;
    create(&app, "B", "C", "2 St", "Town", 4.5).await?;

    let (status, v) = send(&app, "GET", "/restaurants/rating/0", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["data"].as_array().map(Vec::len), Some(2));

    let (status, _) = send(&app, "GET", "/restaurants/rating/5.1", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, v) = send(&app, "GET", "/restaurants/rating/abc", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["message"], "Invalid minRating value.");

    let (status, v) = send(&app, "POST", &format!("/restaurant/{low}"), Some(json!({"rating": 5, "name": "ignored"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["data"]["rating"], 5.0);
    assert_eq!(v["data"]["name"], "A");

    let (status, _) = send(&app, "POST", &format!("/restaurant/{low}"), Some(json!({"rating": 6}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "POST", &format!("/restaurant/{}", Uuid::new_v4()), Some(json!({"rating": 2}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, v) = send(&app, "GET", "/restaurants/rating/4.5", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["data"].as_array().map(Vec::len), Some(2));
    Ok(())
}

#[tokio::test]
async fn menu_add_and_remove() -> anyhow::Result<()> {
    let app = app();
    let id = create(&app, "A", "C", "1 St", "Town", 0.0).await?;

    let (status, v) = send(&app, "POST", &format!("/addMenu/{id}"), Some(json!({"name": "Soup", "price": 5}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(v["data"]["menu"][0]["name"], "Soup");
    assert!(v["data"]["menu"][0]["id"].is_string());

    let (status, v) = send(&app, "POST", &format!("/removeDish/{id}"), Some(json!({"name": "soup"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["message"], "Menu Deleted Successfully");
    assert_eq!(v["data"]["menu"], json!([]));

    let (status, _) = send(&app, "POST", &format!("/removeDish/{id}"), Some(json!({"name": "pizza"}))).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "POST", &format!("/addMenu/{}", Uuid::new_v4()), Some(json!({"name": "Soup", "price": 5}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "POST", "/addMenu/not-an-id", Some(json!({"name": "Soup", "price": 5}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "POST", &format!("/removeDish/{id}"), Some(json!({}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn review_flow() -> anyhow::Result<()> {
    let app = app();
    let id = create(&app, "A", "C", "1 St", "Town", 0.0).await?;
    let uri = format!("/restaurant/{id}/review");

    let (status, v) = send(&app, "POST", &uri, Some(json!({"username": "bob", "comment": "ok", "rating": 4}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["data"]["rating"], 4.0);

    let (status, v) = send(&app, "POST", &uri, Some(json!({"username": "bob", "comment": "again", "rating": 1}))).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(v["message"], "Review not added.");

    let (status, v) = send(&app, "POST", &uri, Some(json!({"username": "amy", "comment": "meh", "rating": 3}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["data"]["rating"], 3.5);

    let (status, v) = send(&app, "GET", &format!("/restaurants/{id}/reviews"), None).await?;
    assert_eq!(status, StatusCode::OK);
    let users: Vec<_> = v["data"].as_array().into_iter().flatten().map(|r| r["username"].clone()).collect();
    assert_eq!(users, vec![json!("bob"), json!("amy")]);

    let (status, _) = send(&app, "GET", &format!("/restaurants/{}/reviews", Uuid::new_v4()), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "POST", &format!("/restaurant/{}/review", Uuid::new_v4()), Some(json!({"username": "bob", "comment": "ok", "rating": 4}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_and_list() -> anyhow::Result<()> {
    let app = app();
    let id = create(&app, "A", "C", "1 St", "Town", 0.0).await?;
    create(&app, "B", "C", "2 St", "Town", 0.0).await?;

    let (status, v) = send(&app, "GET", "/getRestaurants", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["data"].as_array().map(Vec::len), Some(2));

    let (status, v) = send(&app, "POST", &format!("/deleteById?ID={id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["data"]["id"], json!(id));

    let (status, _) = send(&app, "POST", &format!("/deleteById?ID={id}"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "POST", "/deleteById?ID=6502de934bb3e290fb695277", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "POST", "/deleteById", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, v) = send(&app, "GET", "/getRestaurants", None).await?;
    assert_eq!(v["data"][0]["name"], "B");
    Ok(())
}

#[tokio::test]
async fn openapi_document_lists_routes() -> anyhow::Result<()> {
    let (status, v) = send(&app(), "GET", "/api-docs/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(v["paths"]["/newRestaurant"].is_object());
    assert!(v["paths"]["/restaurants/{id}/reviews"].is_object());
    Ok(())
}
