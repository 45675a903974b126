//! Restaurant module: domain inputs, repository seam, service and seed import.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;
pub mod seed;

pub use repository::RestaurantRepository;
pub use service::RestaurantService;
