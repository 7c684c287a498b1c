//! Password policy enforcement for new passwords.

use foodbridge_core::config::AuthConfig;
use foodbridge_core::error::AppError;

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length as usize,
        }
    }

    /// Validates a password against all configured policies.
    ///
    /// Returns `Ok(())` if the password meets all requirements,
    /// or an error describing the first violation found.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.len() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if !password.chars().any(|c| c.is_uppercase()) {
            return Err(AppError::validation(
                "Password must contain at least one uppercase letter",
            ));
        }

        if !password.chars().any(|c| c.is_lowercase()) {
            return Err(AppError::validation(
                "Password must contain at least one lowercase letter",
            ));
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::validation(
                "Password must contain at least one digit",
            ));
        }

        let estimate = zxcvbn::zxcvbn(password, &[]);
        if estimate.score() < zxcvbn::Score::Three {
            return Err(AppError::validation(
                "Password is too weak. Please use a stronger password with more entropy.",
            ));
        }

        Ok(())
    }

    /// Validates that a new password differs from the old one.
    pub fn validate_not_same(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        if old_password == new_password {
            return Err(AppError::validation(
                "New password must be different from the current password",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> PasswordValidator {
        PasswordValidator::new(&AuthConfig {
            jwt_secret: "s".to_string(),
            jwt_access_ttl_minutes: 30,
            jwt_refresh_ttl_hours: 168,
            password_min_length: 8,
        })
    }

    #[test]
    fn test_rejects_short_passwords() {
        assert!(validator().validate("Ab1!").is_err());
    }

    #[test]
    fn test_rejects_missing_character_classes() {
        let v = validator();
        assert!(v.validate("alllowercase1").is_err());
        assert!(v.validate("ALLUPPERCASE1").is_err());
        assert!(v.validate("NoDigitsHere").is_err());
    }

    #[test]
    fn test_accepts_strong_password() {
        assert!(validator().validate("Tr0ub4dor&Beyond").is_ok());
    }

    #[test]
    fn test_not_same_as_old() {
        let v = validator();
        assert!(v.validate_not_same("OldPass1!", "OldPass1!").is_err());
        assert!(v.validate_not_same("OldPass1!", "NewPass2@").is_ok());
    }
}
