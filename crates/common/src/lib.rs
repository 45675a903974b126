//! Shared helpers for the restaurant workspace: logging setup and
//! small response types used by more than one binary.

pub mod types;
pub mod utils;
