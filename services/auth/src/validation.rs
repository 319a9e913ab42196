//! Input validation for registration

use regex::Regex;
use std::sync::OnceLock;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate password length; composition rules are left to the user
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    let length = password.chars().count();

    if length < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        ));
    }

    if length > MAX_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at most {} characters long",
            MAX_PASSWORD_LENGTH
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        assert!(validate_email("front.desk+clinic@example.co").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        assert_eq!(validate_email("").unwrap_err(), "Email is required");
        assert_eq!(validate_email("no-at-sign").unwrap_err(), "Invalid email format");
        assert_eq!(validate_email("a@b").unwrap_err(), "Invalid email format");

        let long = format!("{}@example.com", "a".repeat(250));
        assert!(validate_email(&long).unwrap_err().contains("254"));
    }

    #[test]
    fn test_password_length_bounds() {
        assert!(validate_password("12345678").is_ok());
        assert_eq!(validate_password("").unwrap_err(), "Password is required");
        assert!(validate_password("short").unwrap_err().contains("at least 8"));
        assert!(validate_password(&"x".repeat(129))
            .unwrap_err()
            .contains("at most 128"));
    }
}
