//! Notification entity: model and kind/priority enums.

pub mod kind;
pub mod model;

pub use kind::{NotificationKind, NotificationPriority};
pub use model::{CreateNotification, Notification};
