//! # foodbridge-core
//!
//! Shared foundation for the FoodBridge platform: the unified error type,
//! pagination primitives, geographic distance math, display formatting
//! rules, and configuration schemas.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
