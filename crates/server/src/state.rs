use std::sync::Arc;

use service::restaurant::{RestaurantRepository, RestaurantService};

pub type SharedRestaurantService = Arc<RestaurantService<dyn RestaurantRepository>>;

#[derive(Clone)]
pub struct ServerState {
    pub restaurants: SharedRestaurantService,
}

impl ServerState {
    pub fn new(repo: Arc<dyn RestaurantRepository>, max_write_attempts: u32) -> Self {
        let svc = RestaurantService::new(repo).with_max_write_attempts(max_write_attempts);
        Self { restaurants: Arc::new(svc) }
    }
}
