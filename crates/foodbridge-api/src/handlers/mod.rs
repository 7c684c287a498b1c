//! HTTP request handlers, grouped by domain.

pub mod analytics;
pub mod auth;
pub mod booking;
pub mod food;
pub mod health;
pub mod notification;
pub mod report;
pub mod request;
pub mod user;
