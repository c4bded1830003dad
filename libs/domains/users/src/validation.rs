//! Field rules for user records.
//!
//! Rules are plain functions so they can be attached to DTOs with
//! `#[validate(custom(function = "..."))]` and called directly.

use axum_helpers::Violations;
use axum_helpers::errors::violations;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use validator::{Validate, ValidationError};

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Invalid email format";

/// local-part "@" domain, where the domain contains at least one dot.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").unwrap());

/// `name` must be non-empty after trimming.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed(NAME_REQUIRED)));
    }
    Ok(())
}

/// `email` must be present and shaped like an email address.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed(EMAIL_REQUIRED)));
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(ValidationError::new("email").with_message(Cow::Borrowed(EMAIL_INVALID)));
    }
    Ok(())
}

/// Every violation of `candidate`, one message per field. Empty when valid.
pub fn validate_candidate<T: Validate>(candidate: &T) -> Violations {
    match candidate.validate() {
        Ok(()) => Violations::new(),
        Err(errors) => violations(&errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateUser, UpdateUser};

    #[test]
    fn test_name_rules() {
        assert!(validate_name("Vraj").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   \t").is_err());
    }

    #[test]
    fn test_email_accepts_common_shapes() {
        for email in ["vraj@example.com", "first.last+tag@mail.example.co.uk", "a@b.io"] {
            assert!(validate_email(email).is_ok(), "{email} should be valid");
        }
    }

    #[test]
    fn test_email_rejects_malformed() {
        for email in [
            "vraj",
            "vraj@",
            "@example.com",
            "vraj@example",
            "vraj@example.",
            "vraj@.com",
            "vraj@@example.com",
            "vraj @example.com",
            " vraj@example.com",
        ] {
            let err = validate_email(email).unwrap_err();
            assert_eq!(err.message.as_deref(), Some(EMAIL_INVALID), "{email:?}");
        }
    }

    #[test]
    fn test_empty_email_is_required_not_invalid() {
        let err = validate_email("").unwrap_err();
        assert_eq!(err.message.as_deref(), Some(EMAIL_REQUIRED));
    }

    #[test]
    fn test_valid_candidate_has_no_violations() {
        let candidate = CreateUser {
            id: Some(3),
            name: "Asha".into(),
            email: "asha@example.com".into(),
        };
        assert!(validate_candidate(&candidate).is_empty());
    }

    #[test]
    fn test_candidate_reports_every_field() {
        let candidate = UpdateUser {
            name: " ".into(),
            email: "not-an-email".into(),
        };
        let violations = validate_candidate(&candidate);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations["name"], NAME_REQUIRED);
        assert_eq!(violations["email"], EMAIL_INVALID);
    }
}
