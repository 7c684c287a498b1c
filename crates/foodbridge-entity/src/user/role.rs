//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Posts surplus food listings.
    Donor,
    /// Requests and picks up listings.
    Receiver,
    /// Platform administration: approvals, reports, analytics.
    Admin,
}

impl UserRole {
    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Check if this role may post food listings.
    pub fn can_donate(&self) -> bool {
        matches!(self, Self::Donor | Self::Admin)
    }

    /// Check if this role may request listings.
    pub fn can_request(&self) -> bool {
        matches!(self, Self::Receiver)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Donor => "donor",
            Self::Receiver => "receiver",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = foodbridge_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "donor" => Ok(Self::Donor),
            "receiver" => Ok(Self::Receiver),
            "admin" => Ok(Self::Admin),
            _ => Err(foodbridge_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: donor, receiver, admin"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_capabilities() {
        assert!(UserRole::Donor.can_donate());
        assert!(!UserRole::Donor.can_request());
        assert!(UserRole::Receiver.can_request());
        assert!(UserRole::Admin.is_admin());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("donor".parse::<UserRole>().unwrap(), UserRole::Donor);
        assert_eq!("RECEIVER".parse::<UserRole>().unwrap(), UserRole::Receiver);
        assert!("moderator".parse::<UserRole>().is_err());
    }
}
