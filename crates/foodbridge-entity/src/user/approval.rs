//! Account approval status and organization classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Approval state of a user account.
///
/// Receivers register as `Pending` and must be approved by an admin
/// before they can claim listings; donors and admins start `Approved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "approval_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    /// Awaiting admin review.
    Pending,
    /// Account may use the platform.
    Approved,
    /// Account was rejected during review.
    Rejected,
}

impl ApprovalStatus {
    /// The initial approval status for a newly registered role.
    pub fn initial_for(role: super::UserRole) -> Self {
        match role {
            super::UserRole::Receiver => Self::Pending,
            super::UserRole::Donor | super::UserRole::Admin => Self::Approved,
        }
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of organization behind a donor or receiver account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "organization_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrganizationType {
    Restaurant,
    GroceryStore,
    Bakery,
    Catering,
    Ngo,
    Charity,
    FoodBank,
    CommunityCenter,
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::UserRole;

    #[test]
    fn test_initial_approval_by_role() {
        assert_eq!(
            ApprovalStatus::initial_for(UserRole::Receiver),
            ApprovalStatus::Pending
        );
        assert_eq!(
            ApprovalStatus::initial_for(UserRole::Donor),
            ApprovalStatus::Approved
        );
        assert_eq!(
            ApprovalStatus::initial_for(UserRole::Admin),
            ApprovalStatus::Approved
        );
    }
}
