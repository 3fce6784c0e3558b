//! Setting value validation.

use regex::Regex;
use std::sync::LazyLock;

static RE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

const MAX_NAME_LEN: usize = 100;

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "PROFILE_NAME" => {
            if value.chars().count() > MAX_NAME_LEN {
                return Err(format!("must be at most {MAX_NAME_LEN} characters"));
            }
        }
        "PROFILE_EMAIL" => {
            if !value.is_empty() && !RE_EMAIL.is_match(value) {
                return Err("invalid e-mail address".into());
            }
        }
        k if is_boolean_setting(k) => {
            if value != "true" && value != "false" {
                return Err("must be 'true' or 'false'".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn is_boolean_setting(key: &str) -> bool {
    matches!(
        key,
        "FILTER_BY_INTERESTS" | "NOTIFICATIONS_ENABLED" | "EMAIL_UPDATES"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_boolean() {
        assert!(validate_setting("FILTER_BY_INTERESTS", "true").is_ok());
        assert!(validate_setting("EMAIL_UPDATES", "false").is_ok());
        assert!(validate_setting("NOTIFICATIONS_ENABLED", "yes").is_err());
    }

    #[test]
    fn test_valid_email() {
        assert!(validate_setting("PROFILE_EMAIL", "alex.johnson@example.com").is_ok());
        assert!(validate_setting("PROFILE_EMAIL", "").is_ok()); // empty is ok
        assert!(validate_setting("PROFILE_EMAIL", "alex").is_err());
        assert!(validate_setting("PROFILE_EMAIL", "a b@example.com").is_err());
    }

    #[test]
    fn test_profile_name_length() {
        assert!(validate_setting("PROFILE_NAME", "Alex Johnson").is_ok());
        assert!(validate_setting("PROFILE_NAME", &"x".repeat(101)).is_err());
    }
}
