//! # foodbridge-entity
//!
//! Domain entity models for FoodBridge. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.
//!
//! Status enums are explicit finite-state machines: each one carries an
//! allowed-transition table and a terminal-state predicate, and services
//! refuse any transition the table does not permit.

pub mod analytics;
pub mod booking;
pub mod food;
pub mod notification;
pub mod rating;
pub mod report;
pub mod request;
pub mod user;
