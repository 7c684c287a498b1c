//! User entity: model, roles, and account approval status.

pub mod approval;
pub mod model;
pub mod role;

pub use approval::{ApprovalStatus, OrganizationType};
pub use model::{CreateUser, UpdateUser, User};
pub use role::UserRole;
