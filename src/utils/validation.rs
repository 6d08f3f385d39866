//! Request payload validation helpers.

use crate::utils::error::{AppError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").unwrap());

/// Minimum accepted password length for admin accounts.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Validate an email address shape.
pub fn validate_email(email: &str) -> Result<()> {
    if email.len() > 254 || !EMAIL_RE.is_match(email) {
        return Err(AppError::validation(format!(
            "Invalid email address: {}",
            email
        )));
    }
    Ok(())
}

/// Validate a password meets the minimum length.
pub fn validate_password(password: &str) -> Result<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

/// Validate that a required text field is present and non-blank.
pub fn validate_required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!(
            "Missing required field: {}",
            field
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("info@bufete.es").is_ok());
        assert!(validate_email("maria.garcia+web@example.co.uk").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    #[test]
    fn test_password_length() {
        assert!(validate_password("longenough").is_ok());
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn test_required_fields() {
        assert!(validate_required("name", "Ana").is_ok());
        assert!(validate_required("name", "").is_err());
        assert!(validate_required("name", "   ").is_err());
    }
}
