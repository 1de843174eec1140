//! Field validation rules for user registration.
//!
//! # Responsibility
//! - Provide pure predicates for name, email and password shape.
//! - Map a failed predicate to a field-tagged validation error.
//!
//! # Invariants
//! - Every rule is total: it never panics and has no side effects.
//! - Letter/digit classification is ASCII; whitespace is Unicode-aware.

use crate::model::user::{Field, UserValidationError};
use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum number of characters in a name.
pub const MIN_NAME_CHARS: usize = 3;
/// Minimum number of characters in a password.
pub const MIN_PASSWORD_CHARS: usize = 8;
/// Passwords must contain at least one of these characters.
pub const PASSWORD_SPECIAL_CHARS: &str = "@#$%^&+=";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Returns whether `name` has at least three characters, all ASCII letters.
pub fn is_valid_name(name: &str) -> bool {
    name.chars().count() >= MIN_NAME_CHARS && name.chars().all(|ch| ch.is_ascii_alphabetic())
}

/// Returns whether `email` has the `local@domain.tld` shape.
///
/// Syntactic check only; no DNS or mailbox verification happens here.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Returns whether `password` satisfies every complexity requirement.
///
/// Requires at least eight characters, one digit, one lowercase letter, one
/// uppercase letter, one of [`PASSWORD_SPECIAL_CHARS`], and no whitespace.
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_CHARS
        && password.chars().any(|ch| ch.is_ascii_digit())
        && password.chars().any(|ch| ch.is_ascii_lowercase())
        && password.chars().any(|ch| ch.is_ascii_uppercase())
        && password
            .chars()
            .any(|ch| PASSWORD_SPECIAL_CHARS.contains(ch))
        && !password.chars().any(char::is_whitespace)
}

/// Checks `value` against the rule for `field`.
///
/// # Errors
/// - Returns `UserValidationError` tagged with `field` and the rule text.
pub fn check_field(field: Field, value: &str) -> Result<(), UserValidationError> {
    let valid = match field {
        Field::Name => is_valid_name(value),
        Field::Email => is_valid_email(value),
        Field::Password => is_valid_password(value),
    };

    if valid {
        Ok(())
    } else {
        Err(UserValidationError::new(field))
    }
}

#[cfg(test)]
mod tests {
    use super::{check_field, is_valid_email, is_valid_name, is_valid_password};
    use crate::model::user::Field;

    #[test]
    fn name_rule_accepts_letters_only() {
        for name in ["Alice", "Bob", "Charlie", "abc"] {
            assert!(is_valid_name(name), "{name} should be accepted");
        }
    }

    #[test]
    fn name_rule_rejects_short_or_non_alphabetic() {
        for name in ["", "Al", "Bob1", "Charlie!", "John Doe", "Zoë"] {
            assert!(!is_valid_name(name), "{name:?} should be rejected");
        }
    }

    #[test]
    fn email_rule_accepts_well_formed_addresses() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("user.name@domain.co.uk"));
        assert!(is_valid_email("a@b.c"));
    }

    #[test]
    fn email_rule_rejects_malformed_addresses() {
        for email in [
            "",
            "invalid-email",
            "user@",
            "@domain.com",
            "user@domain",
            "user@@domain.com",
            "us er@domain.com",
            "user@domain.com ",
            "user@.com",
        ] {
            assert!(!is_valid_email(email), "{email:?} should be rejected");
        }
    }

    #[test]
    fn password_rule_accepts_complex_passwords() {
        assert!(is_valid_password("Password1@"));
        assert!(is_valid_password("Abcdef1@"));
        assert!(is_valid_password("xY9=xY9="));
    }

    #[test]
    fn password_rule_rejects_each_missing_condition() {
        assert!(!is_valid_password("short"));
        assert!(!is_valid_password("Abcde1@"), "seven chars");
        assert!(!is_valid_password("nouppercase1@"));
        assert!(!is_valid_password("NOLOWERCASE1@"));
        assert!(!is_valid_password("NoSpecialChar1"));
        assert!(!is_valid_password("NoNumber@@"));
        assert!(!is_valid_password("Password1!"), "`!` is not in the special set");
        assert!(!is_valid_password("Pass word1@"));
        assert!(!is_valid_password("Password1@\t"));
    }

    #[test]
    fn check_field_tags_errors_with_field() {
        assert!(check_field(Field::Name, "Alice").is_ok());

        let err = check_field(Field::Email, "nope").unwrap_err();
        assert_eq!(err.field, Field::Email);

        let err = check_field(Field::Password, "nope").unwrap_err();
        assert_eq!(err.field, Field::Password);
    }
}
