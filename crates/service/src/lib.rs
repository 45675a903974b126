//! Service layer for restaurant aggregates.
//! - Storage is reached only through the `RestaurantRepository` seam.
//! - Reuses validation and entity definitions from the `models` crate.
//! - Enforces the invariants storage does not: one review per username,
//!   the derived rating, and conflict-checked read-modify-write.

pub mod errors;
pub mod restaurant;
#[cfg(test)]
pub mod test_support;
