//! Core value types shared across crates.

pub mod display;
pub mod geo;
pub mod pagination;
