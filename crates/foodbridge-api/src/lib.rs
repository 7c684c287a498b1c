//! # foodbridge-api
//!
//! HTTP API layer for FoodBridge built on Axum.
//!
//! Provides all REST endpoints, extractors, DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
