use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MenuItemDoc { pub id: Uuid, pub name: String, pub price: f64 }

#[derive(ToSchema)]
pub struct ReviewDoc { pub username: String, pub comment: String, pub rating: f64 }

#[derive(ToSchema)]
pub struct RestaurantDoc {
    pub id: Uuid,
    pub name: String,
    pub cuisine: String,
    pub address: String,
    pub city: String,
    pub rating: f64,
    pub menu: Vec<MenuItemDoc>,
    pub reviews: Vec<ReviewDoc>,
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct NewMenuItemRequest { pub name: String, pub price: f64 }

#[derive(ToSchema)]
pub struct NewReviewRequest { pub username: String, pub comment: String, pub rating: f64 }

#[derive(ToSchema)]
pub struct CreateRestaurantRequest {
    pub name: String,
    pub cuisine: String,
    pub address: String,
    pub city: String,
    pub rating: Option<f64>,
    pub menu: Option<Vec<NewMenuItemRequest>>,
    pub reviews: Option<Vec<NewReviewRequest>>,
}

#[derive(ToSchema)]
pub struct RatingUpdateRequest { pub rating: f64 }

#[derive(ToSchema)]
pub struct RemoveDishRequest { pub name: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::restaurants::create,
        crate::routes::restaurants::by_name,
        crate::routes::restaurants::by_cuisine,
        crate::routes::restaurants::delete_by_id,
        crate::routes::restaurants::by_location,
        crate::routes::restaurants::update_rating,
        crate::routes::restaurants::by_min_rating,
        crate::routes::restaurants::list_all,
        crate::routes::menu::add_dish,
        crate::routes::menu::remove_dish,
        crate::routes::reviews::add_review,
        crate::routes::reviews::list_reviews,
    ),
    components(
        schemas(
            HealthResponse,
            MenuItemDoc,
            ReviewDoc,
            RestaurantDoc,
            NewMenuItemRequest,
            NewReviewRequest,
            CreateRestaurantRequest,
            RatingUpdateRequest,
            RemoveDishRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "restaurants"),
        (name = "menu"),
        (name = "reviews")
    )
)]
pub struct ApiDoc;
