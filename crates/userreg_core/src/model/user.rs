//! User domain model.
//!
//! # Responsibility
//! - Define the record persisted for every registered user.
//! - Generate stable identifiers for new users.
//!
//! # Invariants
//! - `id` is assigned once at creation and never changes.
//! - `password` is stored verbatim. Plaintext storage is unsuitable for any
//!   deployment beyond a single-operator demo.
//! - Debug output never includes the password.

use crate::model::rules;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use uuid::Uuid;

/// Opaque stable identifier of a user record.
///
/// New ids are UUIDv4 strings, but persisted ids are accepted as-is so that
/// hand-edited documents stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Input field guarded by a validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Password,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
        }
    }

    /// Human-readable rule shown when a value is rejected.
    pub fn rule(self) -> &'static str {
        match self {
            Self::Name => "must be at least 3 characters and only letters",
            Self::Email => "must look like user@example.com",
            Self::Password => {
                "must be at least 8 characters with a digit, a lowercase letter, \
                 an uppercase letter, one of @#$%^&+= and no whitespace"
            }
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field failed its validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserValidationError {
    pub field: Field,
    pub reason: &'static str,
}

impl UserValidationError {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            reason: field.rule(),
        }
    }
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.reason)
    }
}

impl Error for UserValidationError {}

/// Persisted user record.
///
/// Serialized with exactly four string fields: `user_id`, `name`, `email`,
/// `password`. Documents written before ids existed get a fresh id on load.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "user_id", default = "UserId::generate")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl User {
    /// Creates a user with a generated id.
    ///
    /// Does not validate; see [`User::validate`].
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::with_id(UserId::generate(), name, email, password)
    }

    /// Creates a user with a caller-provided id.
    pub fn with_id(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Checks name, email and password in that order.
    ///
    /// # Errors
    /// - Returns the first failing field.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        rules::check_field(Field::Name, &self.name)?;
        rules::check_field(Field::Email, &self.email)?;
        rules::check_field(Field::Password, &self.password)?;
        Ok(())
    }
}

impl Debug for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
