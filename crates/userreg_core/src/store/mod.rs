//! JSON file persistence for user records.
//!
//! # Responsibility
//! - Read and write the whole user collection as one JSON array.
//! - Expose use-case oriented lookups and mutations over that collection.
//!
//! # Invariants
//! - Every operation reloads the document; mutations rewrite it in full.
//! - A missing or unparsable document reads as an empty collection.
//! - Write failures always propagate; a mutation is never reported as
//!   successful unless the document reached disk.

use crate::model::user::{UserId, UserValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod document;
pub mod user_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for user store reads, writes and membership checks.
#[derive(Debug)]
pub enum StoreError {
    /// Record failed field validation before persistence.
    Validation(UserValidationError),
    /// Another record already uses this email.
    DuplicateEmail(String),
    /// No record carries this id.
    NotFound(UserId),
    /// The document exists but could not be read.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The document could not be written.
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The collection could not be encoded as JSON.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateEmail(email) => write!(f, "email already registered: {email}"),
            Self::NotFound(id) => write!(f, "user not found: {id}"),
            Self::Read { path, source } => {
                write!(f, "failed to read user store `{}`: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "failed to write user store `{}`: {source}", path.display())
            }
            Self::Encode(err) => write!(f, "failed to encode user store: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
            Self::DuplicateEmail(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<UserValidationError> for StoreError {
    fn from(value: UserValidationError) -> Self {
        Self::Validation(value)
    }
}
